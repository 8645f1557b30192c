//! Market module
//!
//! The double-auction side of the collective choice mechanism:
//! - `bids`: turn a household's utility schedule and the round's target
//!   year into sell offers and a buy offer.
//! - `matching`: clear one round of pooled bids by randomized bilateral
//!   matching.
//!
//! # Critical Invariants
//!
//! 1. **Wealth conservation**: a cleared trade moves exactly `price` from
//!    buyer to seller (applied by `AuctionState::record_transaction`).
//! 2. **One trade per household per round**: matching removes both
//!    participants from further consideration once they clear.
//! 3. **Insufficient liquidity is not an error**: a one-sided or empty bid
//!    pool yields an empty transaction list.

pub mod bids;
pub mod matching;

pub use bids::construct_bids;
pub use matching::run_bidding_round;
