//! `rlwe-kex` — Ring-LWE key agreement over `Z_q[X]/(X^1024 + 1)`.
//!
//! Implements the one-round unauthenticated key exchange of Alkim, Ducas,
//! Pöppelmann and Schwabe, instantiated with N = 1024 and q = 12289. The
//! initiator runs [`keygen_a`], the responder answers with [`agree_b`], and
//! the initiator finishes with [`agree_a`]; both ends derive the same 256-bit
//! secret through lattice reconciliation.
//!
//! # Design principles
//!
//! - **No `unsafe`** — enforced by `#![deny(unsafe_code)]`.
//! - **Constant-time** handling of secret data: sign-mask idioms only, no
//!   secret-dependent branches or table indices.
//! - **RAII zeroization** of secret material via the `zeroize` crate.
//! - Symmetric primitives are injected through the [`Provider`] capability
//!   trait; [`ShakeProvider`] is the SHAKE-backed default.
//!
//! The exchange is unauthenticated; binding the messages to identities is
//! the caller's duty.

#![deny(unsafe_code)]

mod ct;
pub mod error;
pub mod kex;
pub mod math;
pub mod params;
pub mod provider;
pub mod types;

// Re-export the public API surface.
pub use error::Error;
pub use kex::{agree_a, agree_b, keygen_a};
pub use provider::{Provider, ShakeProvider};
pub use types::{MessageA, MessageB, SecretKey, SharedSecret};
