//! Polder Auction Core - Collective Choice Engine
//!
//! Models how a community of landowning households decides which year to
//! convert shared polder land from a sediment-depositing tidal regime to
//! permanent water-logging protection, and how households trade that timing
//! right among themselves when no consensus exists.
//!
//! # Architecture
//!
//! - **models**: Domain types (Household, Bid, Transaction, AuctionState)
//! - **election**: Instant-runoff tally and plurality helpers
//! - **market**: Bid construction and bidding-round matching
//! - **auction**: Main round loop (the state machine)
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, ordered iteration)
//! 2. Total wealth across households is conserved by every trade
//! 3. Precondition violations abort before the first round; liquidity
//!    shortfalls and stalls are normal terminations, not errors
//!
//! The surrounding simulation (tide series, sediment aggradation, treemap
//! plot partitioning, profit/utility cubes) lives outside this crate; it
//! supplies each household's expected-utility schedule and initial wealth,
//! and consumes the winning year, realized utilities, and transaction log.

// Module declarations
pub mod auction;
pub mod election;
pub mod market;
pub mod models;
pub mod rng;

// Re-exports for convenience
pub use auction::{AuctionConfig, AuctionEngine, AuctionError, AuctionOutcome, Termination};
pub use market::{construct_bids, run_bidding_round};
pub use models::{
    bid::{Bid, BidDirection},
    event::{RoundLog, RoundRecord},
    household::{Household, HouseholdId, ScheduleError, UtilitySchedule, Year},
    state::AuctionState,
    transaction::Transaction,
};
pub use rng::RngManager;
