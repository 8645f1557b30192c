//! Auction State
//!
//! Complete state of one auction run: the household store, the append-only
//! transaction log, and the round counter.
//!
//! # Critical Invariants
//!
//! 1. **Wealth conservation**: the sum of household wealth is invariant —
//!    every recorded trade debits the buyer and credits the seller by the
//!    same price.
//! 2. **Log validity**: every household id referenced by a transaction
//!    exists in the household store.
//! 3. Households are held in a `BTreeMap` so every iteration over them is
//!    in ascending-id order; combined with the seeded RNG this makes whole
//!    runs reproducible.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::household::{Household, HouseholdId, Year};
use crate::models::transaction::Transaction;

/// Complete state owned by the auction engine for one run
///
/// # Example
/// ```
/// use polder_auction_core::{AuctionState, Household};
///
/// let state = AuctionState::new(vec![
///     Household::new(0, 100.0, 0.03),
///     Household::new(1, 250.0, 0.03),
/// ]);
/// assert_eq!(state.num_households(), 2);
/// assert_eq!(state.total_wealth(), 350.0);
/// ```
#[derive(Debug, Clone)]
pub struct AuctionState {
    /// All households, indexed by id (ordered for deterministic iteration)
    households: BTreeMap<HouseholdId, Household>,

    /// Append-only log of all cleared trades
    transactions: Vec<Transaction>,

    /// Current round index (0-based)
    round: usize,
}

impl AuctionState {
    /// Create a new auction state from a set of households
    ///
    /// Id uniqueness is validated by the engine before the state is built;
    /// a duplicate here is a programming error.
    pub fn new(households: Vec<Household>) -> Self {
        let mut map = BTreeMap::new();
        for hh in households {
            let prev = map.insert(hh.id(), hh);
            debug_assert!(prev.is_none(), "duplicate household id");
        }
        Self {
            households: map,
            transactions: Vec::new(),
            round: 0,
        }
    }

    /// Get reference to a household by id
    pub fn get_household(&self, id: HouseholdId) -> Option<&Household> {
        self.households.get(&id)
    }

    /// Get mutable reference to a household by id
    pub fn get_household_mut(&mut self, id: HouseholdId) -> Option<&mut Household> {
        self.households.get_mut(&id)
    }

    /// All households, in ascending-id order
    pub fn households(&self) -> impl Iterator<Item = &Household> {
        self.households.values()
    }

    /// All household ids, ascending
    pub fn household_ids(&self) -> Vec<HouseholdId> {
        self.households.keys().copied().collect()
    }

    /// Number of households in the store
    pub fn num_households(&self) -> usize {
        self.households.len()
    }

    /// Current round index
    pub fn round(&self) -> usize {
        self.round
    }

    /// Advance the round counter
    pub fn advance_round(&mut self) {
        self.round += 1;
    }

    /// The transaction log, in clearing order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Record a cleared trade: apply the wealth transfer and append to the log
    ///
    /// # Panics
    /// Panics if buyer or seller is not in the household store.
    pub fn record_transaction(&mut self, trade: Transaction) {
        let price = trade.price();
        self.households
            .get_mut(&trade.buyer())
            .expect("buyer not in household store")
            .adjust_wealth(-price);
        self.households
            .get_mut(&trade.seller())
            .expect("seller not in household store")
            .adjust_wealth(price);
        self.transactions.push(trade);
    }

    /// Households that have bought into a year (committed buyers)
    pub fn committed_buyers(&self) -> BTreeSet<HouseholdId> {
        self.transactions.iter().map(|t| t.buyer()).collect()
    }

    /// Households that have sold their entitlement (committed sellers)
    pub fn committed_sellers(&self) -> BTreeSet<HouseholdId> {
        self.transactions.iter().map(|t| t.seller()).collect()
    }

    /// The year a committed buyer has an open purchase on, if any
    ///
    /// A buyer only ever buys into a single year (its favorite at the time
    /// of its first trade), so the first log entry is authoritative.
    pub fn open_purchase(&self, id: HouseholdId) -> Option<Year> {
        self.transactions
            .iter()
            .find(|t| t.buyer() == id)
            .map(|t| t.year())
    }

    /// The year a household sold into, if it has sold
    pub fn sold_year(&self, id: HouseholdId) -> Option<Year> {
        self.transactions
            .iter()
            .find(|t| t.seller() == id)
            .map(|t| t.year())
    }

    /// Effective first-preference vote per household, ascending by id
    ///
    /// A household votes its favorite year unless it has sold, in which
    /// case its vote is the year it sold into. Requires every household to
    /// have a schedule (validated by the engine).
    pub fn effective_votes(&self) -> Vec<Year> {
        self.households
            .values()
            .map(|hh| {
                self.sold_year(hh.id())
                    .or_else(|| hh.favorite_year())
                    .expect("household without schedule")
            })
            .collect()
    }

    /// Total wealth across all households (for invariant checking)
    pub fn total_wealth(&self) -> f64 {
        self.households.values().map(|hh| hh.wealth()).sum()
    }
}
