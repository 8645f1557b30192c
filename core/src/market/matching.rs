//! Bidding round: randomized bilateral matching
//!
//! Given the pooled bid set for one round, clears zero or more trades.
//! Matching is deliberately randomized rather than price-priority ordered:
//! the model assumes decentralized bilateral search between neighbours, not
//! a centralized limit-order book with global price discovery.
//!
//! Algorithm:
//! 1. Partition bids into sell offers (willingness-to-accept) and buy
//!    offers (willingness-to-pay).
//! 2. Fewer than two offers on either side → no liquidity, no trades.
//! 3. Visit buy offers in uniformly random order. For each buyer, collect
//!    the sell offers on the same year with ask ≤ offer, and pick one
//!    seller uniformly at random.
//! 4. Clear at the midpoint `(offer + ask) / 2`; an unbounded offer (a
//!    committed buyer completing its purchase) clears at the ask. Both
//!    participants drop out of the rest of the round.

use std::collections::BTreeSet;

use crate::models::bid::Bid;
use crate::models::household::HouseholdId;
use crate::models::transaction::Transaction;
use crate::rng::RngManager;

/// Clear one round of pooled bids into a list of transactions
///
/// Never fails: an empty or one-sided pool yields an empty list.
///
/// # Example
/// ```
/// use polder_auction_core::{run_bidding_round, Bid, RngManager};
///
/// // One buyer at 10 for year 3; asks of 12 and 8. Only the 8-ask seller
/// // is eligible, so the trade clears at the midpoint 9.
/// let bids = vec![
///     Bid::buy(0, 3, 10.0),
///     Bid::buy(3, 1, 4.0),
///     Bid::sell(1, 3, 12.0),
///     Bid::sell(2, 3, 8.0),
/// ];
/// let mut rng = RngManager::new(1);
/// let trades = run_bidding_round(&bids, &mut rng);
///
/// let trade = trades.iter().find(|t| t.buyer() == 0).unwrap();
/// assert_eq!(trade.seller(), 2);
/// assert_eq!(trade.price(), 9.0);
/// ```
pub fn run_bidding_round(bids: &[Bid], rng: &mut RngManager) -> Vec<Transaction> {
    let sells: Vec<&Bid> = bids.iter().filter(|b| b.is_sell()).collect();
    let mut buys: Vec<&Bid> = bids.iter().filter(|b| b.is_buy()).collect();

    // Insufficient liquidity: not an error, just no trades
    if sells.len() < 2 || buys.len() < 2 {
        return Vec::new();
    }

    rng.shuffle(&mut buys);

    let mut matched: BTreeSet<HouseholdId> = BTreeSet::new();
    let mut transactions = Vec::new();

    for buy in buys {
        if matched.contains(&buy.household) {
            continue;
        }

        // Every seller already matched: the sell side is exhausted
        if sells.iter().all(|s| matched.contains(&s.household)) {
            break;
        }

        let eligible: Vec<&&Bid> = sells
            .iter()
            .filter(|s| {
                s.year == buy.year
                    && s.amount <= buy.amount
                    && s.household != buy.household
                    && !matched.contains(&s.household)
            })
            .collect();

        if eligible.is_empty() {
            continue;
        }

        let sell = eligible[rng.index(eligible.len())];
        let price = if buy.amount.is_finite() {
            (buy.amount + sell.amount) / 2.0
        } else {
            // Unbounded reservation (committed buyer): clear at the ask
            sell.amount
        };

        transactions.push(Transaction::new(buy.household, sell.household, buy.year, price));
        matched.insert(buy.household);
        matched.insert(sell.household);
    }

    transactions
}
