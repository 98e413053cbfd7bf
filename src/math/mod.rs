//! Core mathematical primitives for the key exchange.
//!
//! Sub-modules cover modular reduction, the Number-Theoretic Transform,
//! polynomial arithmetic, byte-level packing, deterministic sampling, and
//! lattice reconciliation. Everything here is pure: randomness and XOF
//! streams are drawn by the caller and passed in as byte slices.

pub mod ntt;
pub mod pack;
pub mod poly;
pub mod recon;
pub mod reduce;
pub mod sample;
