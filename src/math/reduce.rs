//! Barrett-style modular reduction for the ring modulus q = 12289.

use crate::params::Q;

/// ⌊2⁴³ / q⌋, a 30-bit constant: the quotient estimate is off by at most
/// one, and `x * BARRETT_M` stays inside `i64` for `x` below 2³³.
const BARRETT_M: i64 = (1i64 << 43) / (Q as i64);

/// Multiple of q added before signed reduction; larger than the magnitude
/// of any intermediate this crate produces.
const SIGNED_BIAS: i32 = Q << 14;

/// Conditionally subtract q: maps [0, 2q) to [0, q). Branchless.
#[inline]
#[must_use]
pub const fn reduce_once(x: i32) -> i32 {
    let m = (x - Q) >> 31;
    x - (Q & !m)
}

/// Barrett reduction of a product-sized value.
///
/// Input:  `x ∈ [0, 2³³)`; wider values overflow the internal 64-bit
///         product. A product of canonical residues plus a relaxed addend
///         (the largest value this crate forms) stays below 2²⁸.
/// Output: `r ∈ [0, q)` with `r ≡ x (mod q)`.
#[inline]
#[must_use]
pub const fn barrett(x: i64) -> i32 {
    let t = (x * BARRETT_M) >> 43;
    reduce_once((x - t * (Q as i64)) as i32)
}

/// Field multiplication of canonical residues: `a·b mod q` in [0, q).
#[inline]
#[must_use]
pub const fn mul_mod(a: i32, b: i32) -> i32 {
    barrett((a as i64) * (b as i64))
}

/// Two-step signed reduction.
///
/// Input:  any `x` with `|x| < 2²⁷` (the callers stay below 12q).
/// Output: `r ∈ [0, 2q)` with `r ≡ x (mod q)`.
#[inline]
#[must_use]
pub const fn two_reduce(x: i32) -> i32 {
    let xp = (x + SIGNED_BIAS) as i64;
    let t = (xp * BARRETT_M) >> 43;
    (xp - t * (Q as i64)) as i32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
