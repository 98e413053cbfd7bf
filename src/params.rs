//! Ring and protocol parameters.

/// Polynomial ring degree.
pub const N: usize = 1024;

/// Field modulus, q = 3 * 2^12 + 1.
pub const Q: i32 = 12289;

/// Size in bytes of a 14-bit-packed ring element (14 * 1024 / 8).
pub const POLY_BYTES: usize = 1792;

/// Size in bytes of the public seed for the uniform polynomial `a`.
pub const SEED_BYTES: usize = 32;

/// Size in bytes of the secret error seed.
pub const ERROR_SEED_BYTES: usize = 32;

/// Size in bytes of the stream-function nonce.
pub const NONCE_BYTES: usize = 8;

/// Size in bytes of the packed reconciliation vector (2 bits per coefficient).
pub const REC_BYTES: usize = 256;

/// Size in bytes of the derived shared secret.
pub const SHARED_BYTES: usize = 32;

/// Initiator message: packed public value `b` followed by the seed.
pub const MSG_A_BYTES: usize = POLY_BYTES + SEED_BYTES;

/// Responder message: packed public value `u` followed by the packed
/// reconciliation vector.
pub const MSG_B_BYTES: usize = POLY_BYTES + REC_BYTES;

// Reconciliation rounding thresholds, ceil(k*q/4) for k = 1..7.
pub(crate) const Q1_4: i32 = 3073;
pub(crate) const Q2_4: i32 = 6145;
pub(crate) const Q3_4: i32 = 9217;
pub(crate) const Q5_4: i32 = 15362;
pub(crate) const Q6_4: i32 = 18434;
pub(crate) const Q7_4: i32 = 21506;
