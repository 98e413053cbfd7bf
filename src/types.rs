//! Key, message, and shared-secret newtypes with RAII zeroization.
//!
//! Secret-bearing types zeroize on drop and redact their `Debug` output;
//! message types validate lengths on the slice entry points so that a
//! wrongly-sized input is rejected before any secret is drawn.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Error;
use crate::math::poly::Poly;
use crate::params::{MSG_A_BYTES, MSG_B_BYTES, SHARED_BYTES};

/// The initiator's retained private key: a small-error ring element in the
/// NTT domain. Opaque to callers; zeroized on drop.
pub struct SecretKey {
    poly: Poly,
}

impl SecretKey {
    #[inline]
    pub(crate) fn from_poly(poly: Poly) -> Self {
        Self { poly }
    }

    #[inline]
    pub(crate) fn poly(&self) -> &Poly {
        &self.poly
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.poly.zeroize();
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Initiator message: packed public value `b` followed by the 32-byte seed
/// for the uniform polynomial `a`. 1824 bytes.
#[derive(Clone)]
pub struct MessageA {
    bytes: [u8; MSG_A_BYTES],
}

impl MessageA {
    /// Parse a message from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless the slice is exactly
    /// [`MSG_A_BYTES`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; MSG_A_BYTES] =
            bytes.try_into().map_err(|_| Error::InvalidParameter)?;
        Ok(Self { bytes })
    }

    /// View the message as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub(crate) fn from_array(bytes: [u8; MSG_A_BYTES]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub(crate) fn as_array(&self) -> &[u8; MSG_A_BYTES] {
        &self.bytes
    }
}

impl AsRef<[u8]> for MessageA {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for MessageA {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MessageA")
            .field("len", &MSG_A_BYTES)
            .finish_non_exhaustive()
    }
}

/// Responder message: packed public value `u` followed by the packed
/// reconciliation vector. 2048 bytes.
#[derive(Clone)]
pub struct MessageB {
    bytes: [u8; MSG_B_BYTES],
}

impl MessageB {
    /// Parse a message from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless the slice is exactly
    /// [`MSG_B_BYTES`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; MSG_B_BYTES] =
            bytes.try_into().map_err(|_| Error::InvalidParameter)?;
        Ok(Self { bytes })
    }

    /// View the message as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub(crate) fn from_array(bytes: [u8; MSG_B_BYTES]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub(crate) fn as_array(&self) -> &[u8; MSG_B_BYTES] {
        &self.bytes
    }
}

impl AsRef<[u8]> for MessageB {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for MessageB {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MessageB")
            .field("len", &MSG_B_BYTES)
            .finish_non_exhaustive()
    }
}

/// The derived shared secret (32 bytes). Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; SHARED_BYTES],
}

impl SharedSecret {
    #[inline]
    pub(crate) fn from_bytes(bytes: [u8; SHARED_BYTES]) -> Self {
        Self { bytes }
    }

    /// View the secret as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
