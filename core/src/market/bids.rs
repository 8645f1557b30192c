//! Bid constructor
//!
//! Converts a household's utility schedule plus the round's target year into
//! the household's bid set:
//!
//! - One **sell offer** per non-favorite year: the household demands more
//!   than its raw utility loss to part with a better-than-target year, so
//!   the ask is `(favorite utility − year utility) × U(1, scale)`.
//! - One **buy offer** on the household's favorite year: it will pay up to
//!   its utility gain over the target, discounted by the same friction
//!   factor, `(favorite utility − target utility) / U(1, scale)`, and never
//!   more than its current wealth.
//! - A household with an open purchase bids only on that year, with an
//!   unbounded reservation: the initiated purchase must complete.
//!
//! Non-positive amounts are dropped before the bids are pooled.

use crate::models::bid::Bid;
use crate::models::household::{HouseholdId, UtilitySchedule, Year};
use crate::rng::RngManager;

/// Construct one household's bid set for the current round
///
/// # Arguments
/// * `id` - Bidding household
/// * `schedule` - The household's utility schedule (≥ 2 years, validated upstream)
/// * `wealth` - Current wealth, caps the buy offer
/// * `target` - The round's forced-plurality year
/// * `open_purchase` - Year of an earlier uncompleted purchase, if any
/// * `scale` - Market-friction parameter (> 1.0); friction draws are `U(1, scale)`
/// * `rng` - Injected random source
///
/// # Example
/// ```
/// use polder_auction_core::{construct_bids, RngManager, UtilitySchedule};
///
/// let schedule = UtilitySchedule::new(vec![10.0, 40.0, 25.0]).unwrap();
/// let mut rng = RngManager::new(42);
/// let bids = construct_bids(0, &schedule, 1000.0, 2, None, 2.0, &mut rng);
///
/// // Sell offers on the two non-favorite years plus one buy offer on year 1
/// assert_eq!(bids.iter().filter(|b| b.is_sell()).count(), 2);
/// assert_eq!(bids.iter().filter(|b| b.is_buy()).count(), 1);
/// ```
pub fn construct_bids(
    id: HouseholdId,
    schedule: &UtilitySchedule,
    wealth: f64,
    target: Year,
    open_purchase: Option<Year>,
    scale: f64,
    rng: &mut RngManager,
) -> Vec<Bid> {
    debug_assert!(scale > 1.0, "bid scale must exceed 1.0");

    // A committed buyer only completes its open purchase: a single buy bid
    // on that year, reservation effectively unbounded.
    if let Some(year) = open_purchase {
        return vec![Bid::buy(id, year, f64::INFINITY)];
    }

    let (favorite_year, favorite_utility) = schedule.favorite();

    // The target is the focal year a seller would be bought into; if it is
    // this household's own favorite, fall back to its second-best year.
    let target = if target == favorite_year {
        schedule.second_best().0
    } else {
        target
    };

    let mut bids = Vec::with_capacity(schedule.horizon());

    for (year, utility) in schedule.entries() {
        if year == favorite_year {
            continue;
        }
        let ask = (favorite_utility - utility) * rng.uniform(1.0, scale);
        bids.push(Bid::sell(id, year, ask));
    }

    let offer = (favorite_utility - schedule.utility_of(target)) / rng.uniform(1.0, scale);
    bids.push(Bid::buy(id, favorite_year, offer.min(wealth)));

    // Non-positive bids never reach matching
    bids.retain(|b| b.amount > 0.0);
    bids
}
