//! Protocol orchestration: key generation and the two agreement steps.
//!
//! One round of messages derives a mutual 256-bit secret:
//!
//! ```text
//! A: keygen_a  ──msg_a (1824 B)──▶  B: agree_b
//! A: agree_a   ◀──msg_b (2048 B)──      │
//! │                                     ▼
//! ▼                                  shared_b
//! shared_a            (equal with overwhelming probability)
//! ```
//!
//! Secret temporaries are cleared on every exit path: each fallible
//! operation works through a secret working set (`KeygenSecrets`,
//! `AgreeBSecrets`) that is wiped before returning on success and
//! failure alike, with a [`Zeroizing`] guard covering unwinds, and the
//! remaining leaf buffers are zeroize-on-drop. Each function is
//! straight-line and synchronous; all state is local, so independent
//! exchanges may run concurrently with their own providers.

use zeroize::{Zeroize, Zeroizing};

use crate::error::Error;
use crate::math::{pack, poly::Poly, recon, sample};
use crate::params::{ERROR_SEED_BYTES, N, NONCE_BYTES, SEED_BYTES, SHARED_BYTES};
use crate::provider::Provider;
use crate::types::{MessageA, MessageB, SecretKey, SharedSecret};

/// Expand the public seed into the uniform ring element `a` (NTT domain).
fn generate_a(p: &mut impl Provider, seed: &[u8; SEED_BYTES]) -> Result<Poly, Error> {
    let mut a = Poly::zero();
    p.extendable_output(seed, &mut a.coeffs)?;
    Ok(a)
}

/// Sample a centered-binomial error polynomial from the keyed stream,
/// canonicalised to [0, q). The nonce occupies byte 0 of the stream nonce.
fn get_error(
    p: &mut impl Provider,
    error_seed: &[u8; ERROR_SEED_BYTES],
    nonce: u8,
) -> Result<Poly, Error> {
    let mut nce = [0u8; NONCE_BYTES];
    nce[0] = nonce;

    let mut stream = Zeroizing::new([0u8; sample::ERROR_STREAM_BYTES]);
    p.stream_output(error_seed, &nce, stream.as_mut_slice())?;

    let mut e = Poly::zero();
    sample::centered_binomial(&stream, &mut e.coeffs);
    e.correction();
    Ok(e)
}

/// Secret working set of [`keygen_a`]; wiped on every exit path.
#[derive(Default, Zeroize)]
struct KeygenSecrets {
    error_seed: [u8; ERROR_SEED_BYTES],
    sk: Poly,
    e: Poly,
}

/// Secret working set of [`agree_b`]; wiped on every exit path.
#[derive(Zeroize)]
struct AgreeBSecrets {
    error_seed: [u8; ERROR_SEED_BYTES],
    sk: Poly,
    e: Poly,
    v: Poly,
    random_bits: [u8; N / 32],
    rvec: [i32; N],
    key: [u8; SHARED_BYTES],
}

impl Default for AgreeBSecrets {
    fn default() -> Self {
        Self {
            error_seed: [0; ERROR_SEED_BYTES],
            sk: Poly::zero(),
            e: Poly::zero(),
            v: Poly::zero(),
            random_bits: [0; N / 32],
            rvec: [0; N],
            key: [0; SHARED_BYTES],
        }
    }
}

/// Initiator key generation.
///
/// Draws a public seed and a secret error seed, computes
/// `b = a·s + 3e` in the NTT domain, and returns the retained secret key
/// together with the wire message `encode14(b) || seed`.
///
/// # Errors
///
/// Propagates the first collaborator failure; all secret temporaries are
/// zeroized before returning.
pub fn keygen_a(p: &mut impl Provider) -> Result<(SecretKey, MessageA), Error> {
    let mut secrets = Zeroizing::new(KeygenSecrets::default());
    keygen_a_with(p, &mut secrets)
}

/// Key generation against a caller-owned working set, wiped before
/// returning on success and failure alike.
fn keygen_a_with(
    p: &mut impl Provider,
    secrets: &mut KeygenSecrets,
) -> Result<(SecretKey, MessageA), Error> {
    let result = keygen_a_steps(p, secrets);
    secrets.zeroize();
    result
}

fn keygen_a_steps(
    p: &mut impl Provider,
    secrets: &mut KeygenSecrets,
) -> Result<(SecretKey, MessageA), Error> {
    let mut seed = [0u8; SEED_BYTES];
    p.random_bytes(&mut seed)?;
    p.random_bytes(&mut secrets.error_seed)?;

    let a = generate_a(p, &seed)?;

    secrets.sk = get_error(p, &secrets.error_seed, 0)?;
    secrets.e = get_error(p, &secrets.error_seed, 1)?;
    secrets.sk.ntt_forward();
    secrets.e.ntt_forward();
    secrets.e.smul(3);

    let mut b = Poly::pmuladd(&a, &secrets.sk, &secrets.e);
    b.correction();

    let msg = MessageA::from_array(pack::encode_a(&b.coeffs, &seed));
    Ok((SecretKey::from_poly(secrets.sk.clone()), msg))
}

/// Responder agreement.
///
/// Re-expands `a` from the received seed, computes its own public value
/// `u = a·s + 3e`, forms `v = b·s + 81e'` back in the standard domain,
/// derives the reconciliation hint and the shared secret, and returns the
/// wire message `encode14(u) || r`.
///
/// # Errors
///
/// Propagates the first collaborator failure; all secret temporaries are
/// zeroized before returning.
pub fn agree_b(
    p: &mut impl Provider,
    msg_a: &MessageA,
) -> Result<(SharedSecret, MessageB), Error> {
    let mut secrets = Zeroizing::new(AgreeBSecrets::default());
    agree_b_with(p, msg_a, &mut secrets)
}

/// Responder agreement against a caller-owned working set, wiped before
/// returning on success and failure alike.
fn agree_b_with(
    p: &mut impl Provider,
    msg_a: &MessageA,
    secrets: &mut AgreeBSecrets,
) -> Result<(SharedSecret, MessageB), Error> {
    let result = agree_b_steps(p, msg_a, secrets);
    secrets.zeroize();
    result
}

fn agree_b_steps(
    p: &mut impl Provider,
    msg_a: &MessageA,
    secrets: &mut AgreeBSecrets,
) -> Result<(SharedSecret, MessageB), Error> {
    let (b, seed) = pack::decode_a(msg_a.as_array());
    let b = Poly { coeffs: b };

    p.random_bytes(&mut secrets.error_seed)?;

    let a = generate_a(p, &seed)?;

    secrets.sk = get_error(p, &secrets.error_seed, 0)?;
    secrets.e = get_error(p, &secrets.error_seed, 1)?;
    secrets.sk.ntt_forward();
    secrets.e.ntt_forward();
    secrets.e.smul(3);

    let mut u = Poly::pmuladd(&a, &secrets.sk, &secrets.e);
    u.correction();

    // Reuse the error buffer for e'.
    secrets.e = get_error(p, &secrets.error_seed, 2)?;
    secrets.e.ntt_forward();
    secrets.e.smul(81);

    secrets.v = Poly::pmuladd(&b, &secrets.sk, &secrets.e);
    secrets.v.ntt_inverse();
    secrets.v.two_reduce();
    secrets.v.correction();

    // One dithering bit per key index; the hint nonce occupies byte 1.
    let mut nce = [0u8; NONCE_BYTES];
    nce[1] = 3;
    p.stream_output(&secrets.error_seed, &nce, &mut secrets.random_bits)?;

    secrets.rvec = recon::help_rec(&secrets.v.coeffs, &secrets.random_bits);
    secrets.key = recon::rec(&secrets.v.coeffs, &secrets.rvec);

    let msg = MessageB::from_array(pack::encode_b(&u.coeffs, &secrets.rvec));
    Ok((SharedSecret::from_bytes(secrets.key), msg))
}

/// Initiator agreement.
///
/// Computes `w = u·s` back in the standard domain and extracts the shared
/// secret with the received reconciliation vector. Needs no randomness.
///
/// # Errors
///
/// Infallible for well-formed inputs (message length is enforced by the
/// type); the `Result` carries the uniform status surface.
pub fn agree_a(msg_b: &MessageB, sk: &SecretKey) -> Result<SharedSecret, Error> {
    let (u, rvec) = pack::decode_b(msg_b.as_array());
    let u = Poly { coeffs: u };
    let rvec = Zeroizing::new(rvec);

    let mut w = Zeroizing::new(Poly::pmul(sk.poly(), &u));
    w.ntt_inverse();
    w.two_reduce();
    w.correction();

    let key = Zeroizing::new(recon::rec(&w.coeffs, &rvec));
    Ok(SharedSecret::from_bytes(*key))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
