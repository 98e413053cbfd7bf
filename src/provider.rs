//! Collaborator capability trait and the default SHAKE-backed provider.
//!
//! The key exchange consumes exactly three symmetric capabilities: a
//! uniform byte source, an extendable-output expansion of a public seed
//! into a uniform ring element, and a keyed pseudo-random stream with a
//! short nonce. They are passed to each operation as one explicit
//! capability object; there is no process-wide state.

use rand_core::CryptoRng;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128, Shake256,
};

use crate::error::Error;
use crate::math::sample;
use crate::params::{ERROR_SEED_BYTES, N, NONCE_BYTES, SEED_BYTES};

/// The symmetric collaborators of the key exchange.
///
/// Implementations must report failure through the returned status; the
/// calling operation propagates the first non-success status verbatim after
/// zeroizing its secret temporaries.
pub trait Provider {
    /// Fill `out` with cryptographically uniform bytes.
    fn random_bytes(&mut self, out: &mut [u8]) -> Result<(), Error>;

    /// Expand `seed` into N coefficients, each uniform in [0, q).
    ///
    /// The result is treated as a ring element in the NTT domain; it is
    /// never transformed again.
    fn extendable_output(
        &mut self,
        seed: &[u8; SEED_BYTES],
        out: &mut [i32; N],
    ) -> Result<(), Error>;

    /// Keyed pseudo-random stream: fill `out` from `seed` and `nonce`.
    fn stream_output(
        &mut self,
        seed: &[u8; ERROR_SEED_BYTES],
        nonce: &[u8; NONCE_BYTES],
        out: &mut [u8],
    ) -> Result<(), Error>;
}

/// Default provider: SHAKE-128 seed expansion, SHAKE-256 keyed stream, and
/// a caller-supplied RNG for fresh randomness.
pub struct ShakeProvider<R> {
    rng: R,
}

impl<R: CryptoRng> ShakeProvider<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: CryptoRng> Provider for ShakeProvider<R> {
    fn random_bytes(&mut self, out: &mut [u8]) -> Result<(), Error> {
        self.rng.fill_bytes(out);
        Ok(())
    }

    fn extendable_output(
        &mut self,
        seed: &[u8; SEED_BYTES],
        out: &mut [i32; N],
    ) -> Result<(), Error> {
        // ~17 blocks are expected at the 75% acceptance rate of 14-bit
        // rejection; the budget failing means a broken XOF, not bad luck.
        const MAX_BLOCKS: usize = 64;

        let mut xof = Shake128::default();
        xof.update(seed);
        let mut reader = xof.finalize_xof();

        let mut buf = [0u8; sample::SHAKE128_RATE];
        let mut ctr = 0;
        for _ in 0..MAX_BLOCKS {
            if ctr == N {
                break;
            }
            reader.read(&mut buf);
            ctr = sample::uniform_block(&buf, out, ctr);
        }
        if ctr < N {
            return Err(Error::TooManyIterations);
        }
        Ok(())
    }

    fn stream_output(
        &mut self,
        seed: &[u8; ERROR_SEED_BYTES],
        nonce: &[u8; NONCE_BYTES],
        out: &mut [u8],
    ) -> Result<(), Error> {
        let mut h = Shake256::default();
        h.update(seed);
        h.update(nonce);
        h.finalize_xof().read(out);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Q;
    use rand_core::{OsRng, TryRngCore};

    #[test]
    fn extendable_output_is_uniform_and_deterministic() {
        let mut p = ShakeProvider::new(OsRng.unwrap_err());
        let seed = [7u8; SEED_BYTES];
        let mut a1 = [0i32; N];
        let mut a2 = [0i32; N];
        p.extendable_output(&seed, &mut a1).unwrap();
        p.extendable_output(&seed, &mut a2).unwrap();
        assert_eq!(a1, a2);
        for &c in &a1 {
            assert!((0..Q).contains(&c));
        }
    }

    #[test]
    fn stream_output_separates_nonces() {
        let mut p = ShakeProvider::new(OsRng.unwrap_err());
        let seed = [3u8; ERROR_SEED_BYTES];
        let mut s0 = [0u8; 64];
        let mut s1 = [0u8; 64];
        p.stream_output(&seed, &[0u8; NONCE_BYTES], &mut s0).unwrap();
        let mut nonce = [0u8; NONCE_BYTES];
        nonce[0] = 1;
        p.stream_output(&seed, &nonce, &mut s1).unwrap();
        assert_ne!(s0, s1);
    }
}
