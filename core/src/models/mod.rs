//! Domain models: Household, Bid, Transaction, AuctionState, RoundLog

pub mod bid;
pub mod event;
pub mod household;
pub mod state;
pub mod transaction;
