//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the auction (bid friction draws, match ordering,
//! seller selection) MUST go through this module.

mod xorshift;

pub use xorshift::RngManager;
