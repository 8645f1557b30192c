//! Auction Engine
//!
//! Main round loop integrating all components:
//! - Effective-ballot derivation (sellers vote the year they sold into)
//! - Majority check (strict > 50% on effective first preferences)
//! - Target selection (forced plurality leader)
//! - Bid construction (neutrals + committed buyers)
//! - Bidding round (randomized bilateral matching)
//! - Wealth transfers and round logging
//!
//! # State machine
//!
//! ```text
//! INITIALIZED → ROUND_ACTIVE (repeated) → CONSENSUS_REACHED
//!                                       | STALLED
//!                                       | ROUND_LIMIT_REACHED
//! ```
//!
//! For each round:
//! 1. Compute effective votes (favorite year, or sold-into year for sellers)
//! 2. Strict-majority check → CONSENSUS_REACHED
//! 3. Target year = plurality leader (no majority needed)
//! 4. Partition households: committed buyers / committed sellers / neutrals
//! 5. Construct bids for neutrals (target) and buyers (open purchase)
//! 6. Pool bids, run the bidding round, apply wealth transfers
//! 7. Zero trades → STALLED; round budget spent → ROUND_LIMIT_REACHED
//!
//! # Determinism
//!
//! All randomness flows through one seeded `RngManager` and households are
//! visited in ascending-id order, so the same seed and inputs reproduce an
//! identical run, trade for trade.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::election::{self, ElectionError};
use crate::market::{construct_bids, run_bidding_round};
use crate::models::event::{RoundLog, RoundRecord};
use crate::models::household::{Household, HouseholdId, Year};
use crate::models::state::AuctionState;
use crate::models::transaction::Transaction;
use crate::rng::RngManager;

// ============================================================================
// Configuration Types
// ============================================================================

/// Auction engine configuration
#[derive(Debug, Clone)]
pub struct AuctionConfig {
    /// RNG seed for deterministic runs
    pub seed: u64,

    /// Market-friction parameter: friction draws are `U(1, bid_scale)`.
    /// Must exceed 1.0; the original model used 2.0.
    pub bid_scale: f64,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            bid_scale: 2.0,
        }
    }
}

/// How an auction run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A year holds a strict majority of effective votes
    ConsensusReached,

    /// A round cleared zero trades: no further convergence is possible
    Stalled,

    /// The `max_rounds` budget was spent without consensus or stall
    RoundLimitReached,
}

/// Final result of an auction run
#[derive(Debug, Clone)]
pub struct AuctionOutcome {
    /// Forced-plurality year over effective votes at termination
    /// (a true majority only when termination is `ConsensusReached`)
    pub winning_year: Year,

    /// Why the run ended
    pub termination: Termination,

    /// Realized utility per household: utility at the winning year, net of
    /// transaction prices (buyers pay, sellers receive)
    pub utilities: BTreeMap<HouseholdId, f64>,

    /// Number of completed rounds
    pub rounds: usize,
}

/// Auction error types
///
/// Precondition violations abort the run before any round executes; they
/// are never retried. Liquidity shortfalls and stalls are normal outcomes
/// reported through [`Termination`], not through this enum.
#[derive(Debug, Error, PartialEq)]
pub enum AuctionError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Duplicate household id: {0}")]
    DuplicateHousehold(HouseholdId),

    #[error("Household {0} has no utility schedule")]
    MissingSchedule(HouseholdId),

    #[error("Household {id} covers {found} years, expected {expected}")]
    MismatchedHorizon {
        id: HouseholdId,
        expected: usize,
        found: usize,
    },

    #[error("Election failed: {0}")]
    Election(#[from] ElectionError),
}

// ============================================================================
// Engine
// ============================================================================

/// Stateful orchestrator for one auction run
///
/// Owns the household store, transaction log, round log, and RNG for the
/// duration of the run. Single-threaded and fully sequential; drive it to
/// completion before anything else reads or writes the same households.
///
/// # Example
///
/// ```
/// use polder_auction_core::{AuctionConfig, AuctionEngine, Household, UtilitySchedule};
///
/// let mut households = Vec::new();
/// for (id, utilities) in [
///     (0, vec![5.0, 9.0, 1.0]),
///     (1, vec![9.0, 5.0, 1.0]),
///     (2, vec![5.0, 9.0, 1.0]),
/// ] {
///     let mut hh = Household::new(id, 100.0, 0.03);
///     hh.set_schedule(UtilitySchedule::new(utilities).unwrap());
///     households.push(hh);
/// }
///
/// let mut engine = AuctionEngine::new(households, AuctionConfig::default()).unwrap();
/// let outcome = engine.run(100).unwrap();
/// assert_eq!(outcome.winning_year, 1); // 2 of 3 favor year 1
/// ```
#[derive(Debug)]
pub struct AuctionEngine {
    /// Households, transaction log, round counter
    state: AuctionState,

    /// Deterministic RNG (friction draws, match ordering, seller selection)
    rng: RngManager,

    /// Market-friction parameter
    bid_scale: f64,

    /// Structured per-round log
    round_log: RoundLog,
}

impl AuctionEngine {
    /// Create a new engine, validating all preconditions up front
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` - no households, or `bid_scale` not > 1.0
    /// * `DuplicateHousehold` - two households share an id
    /// * `MissingSchedule` - a household has no utility schedule
    /// * `MismatchedHorizon` - schedules disagree on the year range
    pub fn new(households: Vec<Household>, config: AuctionConfig) -> Result<Self, AuctionError> {
        Self::validate(&households, &config)?;

        Ok(Self {
            state: AuctionState::new(households),
            rng: RngManager::new(config.seed),
            bid_scale: config.bid_scale,
            round_log: RoundLog::new(),
        })
    }

    fn validate(households: &[Household], config: &AuctionConfig) -> Result<(), AuctionError> {
        if !(config.bid_scale > 1.0) || !config.bid_scale.is_finite() {
            return Err(AuctionError::InvalidConfig(
                "bid_scale must be a finite value greater than 1.0".to_string(),
            ));
        }
        if households.is_empty() {
            return Err(AuctionError::InvalidConfig(
                "Must have at least one household".to_string(),
            ));
        }

        let mut ids = std::collections::BTreeSet::new();
        for hh in households {
            if !ids.insert(hh.id()) {
                return Err(AuctionError::DuplicateHousehold(hh.id()));
            }
        }

        let mut expected = None;
        for hh in households {
            let schedule = hh
                .schedule()
                .ok_or(AuctionError::MissingSchedule(hh.id()))?;
            // UtilitySchedule::new already rejects degenerate (< 2 year)
            // schedules; here we only check the horizons agree.
            let found = schedule.horizon();
            match expected {
                None => expected = Some(found),
                Some(expected) if expected != found => {
                    return Err(AuctionError::MismatchedHorizon {
                        id: hh.id(),
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get reference to the auction state
    pub fn state(&self) -> &AuctionState {
        &self.state
    }

    /// Get mutable reference to the auction state
    ///
    /// Primarily for tests; direct mutation bypasses engine invariants.
    pub fn state_mut(&mut self) -> &mut AuctionState {
        &mut self.state
    }

    /// The transaction log, in clearing order
    pub fn transactions(&self) -> &[Transaction] {
        self.state.transactions()
    }

    /// The structured per-round log
    pub fn round_log(&self) -> &RoundLog {
        &self.round_log
    }

    /// Current effective first-preference votes, ascending by household id
    pub fn effective_votes(&self) -> Vec<Year> {
        self.state.effective_votes()
    }

    /// One-shot instant-runoff tally over the households' full ballots
    ///
    /// A cheap consensus pre-check: if the social choice is already clear
    /// from rankings alone, the driver can skip the auction entirely. Uses
    /// original ballots, not effective votes — trades play no part here.
    pub fn instant_runoff_winner(&self) -> Result<Year, AuctionError> {
        let ballots: Vec<Vec<Year>> = self
            .state
            .households()
            .map(|hh| hh.ballot().expect("validated at construction"))
            .collect();
        Ok(election::instant_runoff(&ballots)?)
    }

    // ========================================================================
    // Round Loop
    // ========================================================================

    /// Drive the auction to termination, at most `max_rounds` rounds
    ///
    /// Returns the winning year (forced plurality at termination), the
    /// termination reason, and each household's realized utility at that
    /// year net of transaction prices.
    pub fn run(&mut self, max_rounds: usize) -> Result<AuctionOutcome, AuctionError> {
        for _ in 0..max_rounds {
            let votes = self.state.effective_votes();

            // Strict majority on effective first preferences ends the run
            if election::majority_vote(&votes).is_some() {
                return Ok(self.finish(Termination::ConsensusReached));
            }

            // Focal year for bid construction: plurality leader, majority
            // or not (ties break toward the smallest year)
            let target = election::plurality_vote(&votes).expect("non-empty household store");

            let trades = self.bidding_round(target);
            for trade in &trades {
                self.state.record_transaction(trade.clone());
            }
            self.state.advance_round();

            if trades.is_empty() {
                return Ok(self.finish(Termination::Stalled));
            }
        }

        Ok(self.finish(Termination::RoundLimitReached))
    }

    /// Construct and pool bids for one round, then clear them
    fn bidding_round(&mut self, target: Year) -> Vec<Transaction> {
        let committed_sellers = self.state.committed_sellers();

        let mut pooled = Vec::new();
        for id in self.state.household_ids() {
            // Sellers have given up their entitlement: they sit out
            if committed_sellers.contains(&id) {
                if let Some(hh) = self.state.get_household_mut(id) {
                    hh.set_bids(Vec::new());
                }
                continue;
            }

            let open_purchase = self.state.open_purchase(id);
            let hh = self.state.get_household(id).expect("known id");
            let bids = construct_bids(
                id,
                hh.schedule().expect("validated at construction"),
                hh.wealth(),
                target,
                open_purchase,
                self.bid_scale,
                &mut self.rng,
            );

            pooled.extend(bids.iter().cloned());
            self.state
                .get_household_mut(id)
                .expect("known id")
                .set_bids(bids);
        }

        let trades = run_bidding_round(&pooled, &mut self.rng);

        self.round_log.log(RoundRecord {
            round: self.state.round(),
            target_year: target,
            sell_bids: pooled.iter().filter(|b| b.is_sell()).count(),
            buy_bids: pooled.iter().filter(|b| b.is_buy()).count(),
            trades: trades.clone(),
        });

        trades
    }

    /// Assemble the outcome at termination
    fn finish(&self, termination: Termination) -> AuctionOutcome {
        let votes = self.state.effective_votes();
        let winning_year = election::plurality_vote(&votes).expect("non-empty household store");

        let mut utilities = BTreeMap::new();
        for hh in self.state.households() {
            let schedule = hh.schedule().expect("validated at construction");
            let mut net = schedule.utility_of(winning_year);
            for trade in self.state.transactions() {
                if trade.buyer() == hh.id() {
                    net -= trade.price();
                }
                if trade.seller() == hh.id() {
                    net += trade.price();
                }
            }
            utilities.insert(hh.id(), net);
        }

        AuctionOutcome {
            winning_year,
            termination,
            utilities,
            rounds: self.state.round(),
        }
    }
}
