//! Auction module
//!
//! The stateful orchestrator of the collective-choice mechanism: drives the
//! round loop (majority check → target selection → bid construction →
//! matching → wealth transfers) until consensus, stall, or round limit.

mod engine;

pub use engine::{AuctionConfig, AuctionEngine, AuctionError, AuctionOutcome, Termination};
