//! Household model
//!
//! Represents a landowning household participating in the conversion-year
//! auction. Each household has:
//! - A wealth balance (f64, mutated only by cleared trades)
//! - A discount rate (used upstream to build the utility schedule; read-only here)
//! - An expected-utility schedule: one utility value per candidate conversion year
//! - A transient bid set, overwritten every auction round
//!
//! The utility schedule is supplied by the external profit/utility engine as a
//! vector indexed by year over a dense range `[0, horizon)`. Internally it is
//! kept re-ranked by descending utility, which makes "favorite year",
//! "second-best year", and the full ballot cheap to read off.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::bid::Bid;

/// Candidate conversion year (index into the simulation horizon)
pub type Year = usize;

/// Unique household identifier, stable for the simulation's lifetime
pub type HouseholdId = usize;

/// Errors that can occur when building a utility schedule
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Schedule needs at least two candidate years, got {0}")]
    TooFewYears(usize),

    #[error("Utility for year {year} is not finite")]
    NonFiniteUtility { year: Year },
}

/// A household's expected-utility schedule over candidate conversion years
///
/// Entries are held sorted by descending utility; ties break toward the
/// smaller year so the ordering is total and deterministic. The first entry
/// is the household's favorite year.
///
/// # Example
/// ```
/// use polder_auction_core::UtilitySchedule;
///
/// // Years 0..4, utility peaks at year 2
/// let schedule = UtilitySchedule::new(vec![10.0, 30.0, 80.0, 50.0]).unwrap();
/// assert_eq!(schedule.favorite(), (2, 80.0));
/// assert_eq!(schedule.second_best(), (3, 50.0));
/// assert_eq!(schedule.ballot(), vec![2, 3, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilitySchedule {
    /// (year, utility) pairs, descending by utility
    entries: Vec<(Year, f64)>,
}

impl UtilitySchedule {
    /// Build a schedule from utilities indexed by year
    ///
    /// `utilities[y]` is the household's expected utility if the polder
    /// converts in year `y`. The input must cover at least two years and
    /// contain only finite values.
    pub fn new(utilities: Vec<f64>) -> Result<Self, ScheduleError> {
        if utilities.len() < 2 {
            return Err(ScheduleError::TooFewYears(utilities.len()));
        }
        for (year, &u) in utilities.iter().enumerate() {
            if !u.is_finite() {
                return Err(ScheduleError::NonFiniteUtility { year });
            }
        }

        let mut entries: Vec<(Year, f64)> = utilities.into_iter().enumerate().collect();
        // Descending utility, ascending year among ties
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then(a.0.cmp(&b.0)));

        Ok(Self { entries })
    }

    /// Number of candidate years covered (the horizon)
    pub fn horizon(&self) -> usize {
        self.entries.len()
    }

    /// The (year, utility) entry with maximum utility
    pub fn favorite(&self) -> (Year, f64) {
        self.entries[0]
    }

    /// The (year, utility) entry ranked second by utility
    ///
    /// Well-defined because schedules always cover at least two years.
    pub fn second_best(&self) -> (Year, f64) {
        self.entries[1]
    }

    /// Utility at a specific year
    ///
    /// # Panics
    /// Panics if `year` is outside the schedule's range.
    pub fn utility_of(&self, year: Year) -> f64 {
        self.entries
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, u)| *u)
            .unwrap_or_else(|| panic!("year {} not in schedule", year))
    }

    /// Full ranking of candidate years by descending utility (the ballot)
    pub fn ballot(&self) -> Vec<Year> {
        self.entries.iter().map(|(y, _)| *y).collect()
    }

    /// Iterate over (year, utility) pairs in descending-utility order
    pub fn entries(&self) -> impl Iterator<Item = (Year, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// Represents a landowning household in the auction
///
/// # Lifecycle
///
/// Created once per simulation with an id and initial wealth (assigned by the
/// external plot model). The utility schedule is set once by the external
/// utility engine. `bids` mutate every auction round; `wealth` mutates only
/// on a cleared trade involving this household.
///
/// # Example
/// ```
/// use polder_auction_core::{Household, UtilitySchedule};
///
/// let mut hh = Household::new(0, 1000.0, 0.03);
/// hh.set_schedule(UtilitySchedule::new(vec![5.0, 9.0, 2.0]).unwrap());
/// assert_eq!(hh.ballot().unwrap(), vec![1, 0, 2]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    /// Unique household identifier
    id: HouseholdId,

    /// Wealth balance; mutated only by cleared transactions
    wealth: f64,

    /// Discount rate used upstream to build the utility schedule (read-only here)
    discount_rate: f64,

    /// Expected-utility schedule, set once by the external utility engine
    schedule: Option<UtilitySchedule>,

    /// Current round's bid set (sell offers + at most one buy offer)
    bids: Vec<Bid>,
}

impl Household {
    /// Create a new household
    pub fn new(id: HouseholdId, wealth: f64, discount_rate: f64) -> Self {
        assert!(discount_rate >= 0.0, "discount_rate must be non-negative");
        Self {
            id,
            wealth,
            discount_rate,
            schedule: None,
            bids: Vec::new(),
        }
    }

    /// Get household id
    pub fn id(&self) -> HouseholdId {
        self.id
    }

    /// Get current wealth balance
    pub fn wealth(&self) -> f64 {
        self.wealth
    }

    /// Get discount rate
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Replace the utility schedule wholesale (external utility engine)
    pub fn set_schedule(&mut self, schedule: UtilitySchedule) {
        self.schedule = Some(schedule);
    }

    /// Get the utility schedule, if one has been set
    pub fn schedule(&self) -> Option<&UtilitySchedule> {
        self.schedule.as_ref()
    }

    /// Favorite conversion year, if a schedule has been set
    pub fn favorite_year(&self) -> Option<Year> {
        self.schedule.as_ref().map(|s| s.favorite().0)
    }

    /// Full year-ranking ballot, if a schedule has been set
    pub fn ballot(&self) -> Option<Vec<Year>> {
        self.schedule.as_ref().map(|s| s.ballot())
    }

    /// Replace this round's bid set
    pub fn set_bids(&mut self, bids: Vec<Bid>) {
        self.bids = bids;
    }

    /// Get this round's bid set
    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    /// Apply a wealth transfer from a cleared trade
    ///
    /// Positive delta for sellers (price received), negative for buyers.
    pub fn adjust_wealth(&mut self, delta: f64) {
        self.wealth += delta;
    }
}
