//! Bid model
//!
//! A bid is one side of a potential trade of the conversion-year entitlement:
//! - A **sell offer** (willingness-to-accept): the household demands `amount`
//!   to give up a better-than-target year and vote for the buyer's year.
//! - A **buy offer** (willingness-to-pay): the household pays up to `amount`
//!   to pull another household into its favorite year.
//!
//! Bids are transient: the bid constructor overwrites each household's bid
//! set every round. Non-positive amounts are filtered out before matching.

use serde::{Deserialize, Serialize};

use crate::models::household::{HouseholdId, Year};

/// Direction of a bid in the double auction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidDirection {
    /// Offer to sell the entitlement (willingness-to-accept)
    Sell,
    /// Bid to buy another household into one's year (willingness-to-pay)
    Buy,
}

/// A single sell offer or buy offer for one (household, year) pair
///
/// # Invariants
/// - `amount > 0` for finite bids (a committed buyer's reservation may be
///   `f64::INFINITY`)
/// - a household holds at most one active buy bid per round
/// - sell offers never reference the household's own favorite year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Bidding household
    pub household: HouseholdId,

    /// Conversion year the bid refers to
    pub year: Year,

    /// Sell (willingness-to-accept) or buy (willingness-to-pay)
    pub direction: BidDirection,

    /// Price demanded (sell) or offered (buy)
    pub amount: f64,
}

impl Bid {
    /// Create a sell offer (willingness-to-accept)
    pub fn sell(household: HouseholdId, year: Year, amount: f64) -> Self {
        Self {
            household,
            year,
            direction: BidDirection::Sell,
            amount,
        }
    }

    /// Create a buy offer (willingness-to-pay)
    pub fn buy(household: HouseholdId, year: Year, amount: f64) -> Self {
        Self {
            household,
            year,
            direction: BidDirection::Buy,
            amount,
        }
    }

    /// True for sell offers
    pub fn is_sell(&self) -> bool {
        self.direction == BidDirection::Sell
    }

    /// True for buy offers
    pub fn is_buy(&self) -> bool {
        self.direction == BidDirection::Buy
    }
}
