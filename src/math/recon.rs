//! Lattice reconciliation: hint generation and key extraction.
//!
//! Two parties holding ring elements that are close but not equal derive an
//! identical 256-bit string. Each of the 256 key bits is decided by four
//! coefficients (indices i, i+256, i+512, i+768) interpreted as a point
//! near the D̃₄ lattice: [`help_rec`] publishes a 2-bit-per-coefficient
//! rounding hint, [`rec`] decodes the bit from a coefficient quadruple and
//! the hint.
//!
//! Every step is branchless with respect to the ring element and the hint;
//! comparisons are sign-mask arithmetic only.

use crate::ct::{abs_ct, select};
use crate::params::{N, Q, Q1_4, Q2_4, Q3_4, Q5_4, Q6_4, Q7_4, SHARED_BYTES};

/// Thresholds counted by the fine rounding (odd multiples of q/4).
const V0_STEPS: [i32; 4] = [Q1_4, Q3_4, Q5_4, Q7_4];
/// Thresholds counted by the coarse rounding (multiples of q/2).
const V1_STEPS: [i32; 3] = [Q2_4, Q, Q6_4];

/// Compute the reconciliation hint vector for `x`.
///
/// `x` must be canonical in [0, q); `random_bits` is one dithering bit per
/// key index, drawn by the caller from the keyed stream. Every output value
/// is in [0, 4).
pub fn help_rec(x: &[i32; N], random_bits: &[u8; 32]) -> [i32; N] {
    let mut rvec = [0i32; N];

    for i in 0..N / 4 {
        let bit = ((random_bits[i >> 3] >> (i & 0x07)) & 1) as i32;

        let mut y = [0i32; 4];
        let mut v0 = [4i32; 4];
        let mut v1 = [3i32; 4];
        let mut norm = 0i32;
        for j in 0..4 {
            y[j] = (x[i + 256 * j] << 1) - bit;
            // Arithmetic shift turns y < t into an all-ones mask, so each
            // v ends up as the count of thresholds at or below y.
            for t in V0_STEPS {
                v0[j] += (y[j] - t) >> 31;
            }
            for t in V1_STEPS {
                v1[j] += (y[j] - t) >> 31;
            }
            norm += abs_ct(2 * y[j] - Q * v0[j]);
        }

        // All-ones when the fine rounding is closer.
        let m = (norm - Q) >> 31;
        let c0 = select(m, v0[0], v1[0]);
        let c1 = select(m, v0[1], v1[1]);
        let c2 = select(m, v0[2], v1[2]);
        let c3 = select(m, v0[3], v1[3]);

        rvec[i] = (c0 - c3) & 0x03;
        rvec[i + 256] = (c1 - c3) & 0x03;
        rvec[i + 512] = (c2 - c3) & 0x03;
        rvec[i + 768] = ((c3 << 1) + (!m & 1)) & 0x03;
    }

    rvec
}

/// Low-density decoding of one coefficient quadruple: 1 when the scaled
/// point is within L1 distance 8q of the lattice, 0 otherwise.
fn ld_decode(t: &[i32; 4]) -> u8 {
    const CNEG: i32 = -8 * Q;
    let mut norm = 0i32;
    for &ti in t {
        let mask1 = ti >> 31;
        let mask2 = (4 * Q - abs_ct(ti)) >> 31;
        // ±8q, folding |t| >= 4q back toward the origin.
        let value = (mask1 & ((8 * Q) ^ CNEG)) ^ CNEG;
        norm += abs_ct(ti + (mask2 & value));
    }
    ((((8 * Q - norm) >> 31) & 1) ^ 1) as u8
}

/// Extract the 256-bit shared key from `x` and the hint vector.
///
/// `x` must be canonical in [0, q); hint values are in [0, 4).
pub fn rec(x: &[i32; N], rvec: &[i32; N]) -> [u8; SHARED_BYTES] {
    let mut key = [0u8; SHARED_BYTES];
    for i in 0..N / 4 {
        let t = [
            8 * x[i] - (2 * rvec[i] + rvec[i + 768]) * Q,
            8 * x[i + 256] - (2 * rvec[i + 256] + rvec[i + 768]) * Q,
            8 * x[i + 512] - (2 * rvec[i + 512] + rvec[i + 768]) * Q,
            8 * x[i + 768] - rvec[i + 768] * Q,
        ];
        key[i >> 3] |= ld_decode(&t) << (i & 0x07);
    }
    key
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_fill(seed: i64) -> [i32; N] {
        let mut x = [0i32; N];
        for (i, c) in x.iter_mut().enumerate() {
            *c = (((i as i64) * seed + 5) % (Q as i64)) as i32;
        }
        x
    }

    #[test]
    fn ld_decode_boundaries() {
        assert_eq!(ld_decode(&[0, 0, 0, 0]), 1);
        assert_eq!(ld_decode(&[4 * Q, 4 * Q, 4 * Q, 4 * Q]), 0);
        assert_eq!(ld_decode(&[-4 * Q, -4 * Q, -4 * Q, -4 * Q]), 0);
        // A point just inside the 8q ball decodes to 1.
        assert_eq!(ld_decode(&[2 * Q - 1, 2 * Q - 1, 2 * Q - 1, 2 * Q - 1]), 1);
    }

    #[test]
    fn ld_decode_folds_large_magnitudes() {
        // |t| near 8q is close to the next lattice point, so it decodes 1.
        assert_eq!(ld_decode(&[8 * Q - 1, 0, 0, 0]), 1);
        assert_eq!(ld_decode(&[-8 * Q + 1, 0, 0, 0]), 1);
        // |t| in (8q, 9q] folds to |t| - 8q.
        assert_eq!(ld_decode(&[9 * Q, 0, 0, 0]), 1);
    }

    #[test]
    fn hint_values_in_range() {
        let random_bits: [u8; 32] = core::array::from_fn(|i| (i * 73 + 29) as u8);
        for seed in [1i64, 257, 5821, 11779] {
            let x = canonical_fill(seed);
            let rvec = help_rec(&x, &random_bits);
            for &r in &rvec {
                assert!((0..4).contains(&r), "hint value {r} out of range");
            }
        }
    }

    #[test]
    fn equal_inputs_reconcile() {
        let random_bits: [u8; 32] = core::array::from_fn(|i| (i * 151 + 3) as u8);
        let x = canonical_fill(4099);
        let rvec = help_rec(&x, &random_bits);
        assert_eq!(rec(&x, &rvec), rec(&x, &rvec));
    }

    #[test]
    fn small_perturbation_reconciles() {
        // Shift every coefficient by a small amount mod q; the hint from
        // the unperturbed element must still decode to the same key.
        let random_bits: [u8; 32] = core::array::from_fn(|i| (i * 41 + 17) as u8);
        let x = canonical_fill(7879);
        let rvec = help_rec(&x, &random_bits);
        let key = rec(&x, &rvec);

        let mut x2 = x;
        for (i, c) in x2.iter_mut().enumerate() {
            let delta = ((i as i32) % 31) - 15;
            *c = (*c + delta).rem_euclid(Q);
        }
        assert_eq!(rec(&x2, &rvec), key, "nearby element decoded differently");
    }

    #[test]
    fn hint_is_deterministic_in_inputs() {
        let random_bits = [0xA5u8; 32];
        let x = canonical_fill(911);
        assert_eq!(help_rec(&x, &random_bits), help_rec(&x, &random_bits));
    }
}
