//! Property-based tests
//!
//! Random populations and seeds driven through the public API, checking the
//! invariants that must survive any draw: wealth conservation, bounded round
//! counts, one-trade-per-household rounds, elimination-order totality, and
//! seed determinism.

use proptest::prelude::*;

use polder_auction_core::{
    construct_bids, election::instant_runoff, AuctionConfig, AuctionEngine, Household, RngManager,
    UtilitySchedule,
};

// ============================================================================
// Strategies
// ============================================================================

/// Utility tables for 2-7 households over a shared 2-5 year horizon
fn populations() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (2usize..6).prop_flat_map(|horizon| {
        prop::collection::vec(prop::collection::vec(0.1f64..100.0, horizon), 2..8)
    })
}

/// Ballot sets: 1-7 full rankings of the same 1-5 year horizon
fn ballot_sets() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..6).prop_flat_map(|horizon| {
        let years: Vec<usize> = (0..horizon).collect();
        prop::collection::vec(Just(years).prop_shuffle(), 1..8)
    })
}

fn build_engine(utilities: &[Vec<f64>], seed: u64) -> AuctionEngine {
    let households = utilities
        .iter()
        .enumerate()
        .map(|(id, table)| {
            let mut hh = Household::new(id, 200.0, 0.03);
            hh.set_schedule(UtilitySchedule::new(table.clone()).expect("generated finite utilities"));
            hh
        })
        .collect();
    AuctionEngine::new(households, AuctionConfig { seed, bid_scale: 2.0 })
        .expect("generated population is valid")
}

// ============================================================================
// Engine Invariants
// ============================================================================

proptest! {
    #[test]
    fn prop_wealth_conserved_across_any_run(
        utilities in populations(),
        seed in 1_u64..10_000,
    ) {
        let mut engine = build_engine(&utilities, seed);
        let before = engine.state().total_wealth();
        engine.run(30).expect("valid engine runs");

        let after = engine.state().total_wealth();
        prop_assert!((before - after).abs() < 1e-6,
            "wealth drifted from {} to {}", before, after);
    }

    #[test]
    fn prop_rounds_never_exceed_budget(
        utilities in populations(),
        seed in 1_u64..10_000,
        budget in 0_usize..20,
    ) {
        let mut engine = build_engine(&utilities, seed);
        let outcome = engine.run(budget).expect("valid engine runs");

        prop_assert!(outcome.rounds <= budget);
        prop_assert_eq!(engine.round_log().len(), outcome.rounds);
    }

    #[test]
    fn prop_no_household_clears_twice_per_round(
        utilities in populations(),
        seed in 1_u64..10_000,
    ) {
        let mut engine = build_engine(&utilities, seed);
        engine.run(30).expect("valid engine runs");

        for record in engine.round_log().records() {
            let mut seen = std::collections::BTreeSet::new();
            for trade in &record.trades {
                prop_assert!(seen.insert(trade.buyer()),
                    "household {} on two trades in round {}", trade.buyer(), record.round);
                prop_assert!(seen.insert(trade.seller()),
                    "household {} on two trades in round {}", trade.seller(), record.round);
            }
        }
    }

    #[test]
    fn prop_prices_finite_and_non_negative(
        utilities in populations(),
        seed in 1_u64..10_000,
    ) {
        let mut engine = build_engine(&utilities, seed);
        engine.run(30).expect("valid engine runs");

        for trade in engine.transactions() {
            prop_assert!(trade.price().is_finite());
            prop_assert!(trade.price() >= 0.0);
        }
    }

    #[test]
    fn prop_same_seed_same_run(
        utilities in populations(),
        seed in 1_u64..10_000,
    ) {
        let mut a = build_engine(&utilities, seed);
        let mut b = build_engine(&utilities, seed);

        let out_a = a.run(30).expect("valid engine runs");
        let out_b = b.run(30).expect("valid engine runs");

        prop_assert_eq!(a.transactions(), b.transactions());
        prop_assert_eq!(out_a.winning_year, out_b.winning_year);
        prop_assert_eq!(out_a.utilities, out_b.utilities);
    }
}

// ============================================================================
// Election Totality
// ============================================================================

proptest! {
    #[test]
    fn prop_instant_runoff_total_on_valid_ballots(ballots in ballot_sets()) {
        let winner = instant_runoff(&ballots).expect("valid ballots always elect");
        prop_assert!(ballots[0].contains(&winner),
            "winner {} not a ranked year", winner);
    }

    #[test]
    fn prop_instant_runoff_ignores_ballot_order(ballots in ballot_sets()) {
        let forward = instant_runoff(&ballots).expect("valid ballots always elect");

        let mut reversed = ballots.clone();
        reversed.reverse();
        let backward = instant_runoff(&reversed).expect("valid ballots always elect");

        prop_assert_eq!(forward, backward);
    }
}

// ============================================================================
// Bid Construction and RNG Bounds
// ============================================================================

proptest! {
    #[test]
    fn prop_bid_amounts_positive_and_within_bands(
        table in prop::collection::vec(0.1f64..100.0, 2..6),
        wealth in 0.0f64..500.0,
        target in 0_usize..6,
        seed in 1_u64..10_000,
    ) {
        let schedule = UtilitySchedule::new(table).expect("generated finite utilities");
        let target = target % schedule.horizon();
        let mut rng = RngManager::new(seed);
        let bids = construct_bids(0, &schedule, wealth, target, None, 2.0, &mut rng);

        let (favorite_year, favorite_utility) = schedule.favorite();
        for bid in &bids {
            prop_assert!(bid.amount > 0.0, "non-positive bid survived");
            if bid.is_sell() {
                prop_assert!(bid.year != favorite_year, "sell offer on favorite year");
                let loss = favorite_utility - schedule.utility_of(bid.year);
                prop_assert!(bid.amount >= loss && bid.amount < loss * 2.0);
            } else {
                prop_assert!(bid.year == favorite_year, "buy offer off the favorite year");
                prop_assert!(bid.amount <= wealth);
            }
        }
    }

    #[test]
    fn prop_uniform_draws_within_bounds(
        seed in 1_u64..10_000,
        lo in -1000.0f64..1000.0,
        width in 0.5f64..1000.0,
    ) {
        let mut rng = RngManager::new(seed);
        let hi = lo + width;
        for _ in 0..50 {
            let draw = rng.uniform(lo, hi);
            prop_assert!(draw >= lo && draw < hi);
        }
    }

    #[test]
    fn prop_shuffle_is_a_permutation(
        seed in 1_u64..10_000,
        mut items in prop::collection::vec(0_u32..1000, 0..50),
    ) {
        let mut reference = items.clone();
        let mut rng = RngManager::new(seed);
        rng.shuffle(&mut items);

        reference.sort_unstable();
        items.sort_unstable();
        prop_assert_eq!(items, reference);
    }
}
