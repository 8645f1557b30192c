//! Instant-runoff election over conversion-year ballots
//!
//! One-shot, stateless tally. Each ballot is a household's full ranking of
//! candidate years by descending utility. The tally:
//!
//! 1. Count first preferences; a year holding a strict majority (> 50% of
//!    ballots) wins immediately.
//! 2. Otherwise count **last** preferences, eliminate the year most often
//!    ranked last (ties go to the smallest year), remove it from every
//!    ballot, and repeat.
//! 3. When only one year remains on all ballots, it wins.
//!
//! NOTE: this deliberately differs from textbook IRV, which eliminates the
//! year with the *fewest first*-preference votes. The model eliminates the
//! most-disliked year instead. Do not "correct" this without revisiting the
//! model: outcomes change materially.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::household::Year;

/// Errors for malformed ballot sets
#[derive(Debug, Error, PartialEq)]
pub enum ElectionError {
    #[error("Ballot set is empty or contains an empty ballot")]
    EmptyBallots,

    #[error("Ballots do not all rank the same set of years")]
    RaggedBallots,
}

/// Tally of single votes: year → vote count
///
/// Counting in a `BTreeMap` keeps iteration order ascending by year, which
/// is what makes all tie-breaks deterministic.
pub fn vote_tally(votes: &[Year]) -> BTreeMap<Year, usize> {
    let mut tally = BTreeMap::new();
    for &year in votes {
        *tally.entry(year).or_insert(0) += 1;
    }
    tally
}

/// Year holding a strict majority (> 50%) of single votes, if any
///
/// This is the cheap per-round consensus check the auction engine runs on
/// effective first-preference votes.
pub fn majority_vote(votes: &[Year]) -> Option<Year> {
    let n = votes.len();
    vote_tally(votes)
        .into_iter()
        .find(|&(_, count)| count * 2 > n)
        .map(|(year, _)| year)
}

/// Year with the most single votes, majority or not
///
/// Ties break toward the smallest year. Returns None for an empty vote set.
pub fn plurality_vote(votes: &[Year]) -> Option<Year> {
    max_count_year(vote_tally(votes))
}

/// Tally of first-preference votes: year → ballot count
pub fn first_preference_tally(ballots: &[Vec<Year>]) -> BTreeMap<Year, usize> {
    let mut tally = BTreeMap::new();
    for ballot in ballots {
        if let Some(&first) = ballot.first() {
            *tally.entry(first).or_insert(0) += 1;
        }
    }
    tally
}

/// Year holding a strict majority (> 50%) of first preferences, if any
pub fn majority_winner(ballots: &[Vec<Year>]) -> Option<Year> {
    let n = ballots.len();
    first_preference_tally(ballots)
        .into_iter()
        .find(|&(_, count)| count * 2 > n)
        .map(|(year, _)| year)
}

/// Year with the most first-preference votes, majority or not
///
/// Ties break toward the smallest year. Returns None for an empty ballot set.
pub fn plurality_leader(ballots: &[Vec<Year>]) -> Option<Year> {
    max_count_year(first_preference_tally(ballots))
}

/// Year with the strictly greatest count; ascending scan so ties keep the
/// smallest year
fn max_count_year(tally: BTreeMap<Year, usize>) -> Option<Year> {
    let mut leader: Option<(Year, usize)> = None;
    for (year, count) in tally {
        match leader {
            Some((_, best)) if count <= best => {}
            _ => leader = Some((year, count)),
        }
    }
    leader.map(|(year, _)| year)
}

/// Run the full instant-runoff tally
///
/// Returns the winning year, or an error for an empty or ragged ballot set.
///
/// # Example
/// ```
/// use polder_auction_core::election::instant_runoff;
///
/// // No year holds a first-preference majority; year 0 is ranked last
/// // once but loses the elimination tie-break and goes first, after which
/// // year 1 holds a majority.
/// let ballots = vec![
///     vec![0, 1, 2],
///     vec![1, 2, 0],
///     vec![2, 0, 1],
/// ];
/// assert_eq!(instant_runoff(&ballots).unwrap(), 1);
/// ```
pub fn instant_runoff(ballots: &[Vec<Year>]) -> Result<Year, ElectionError> {
    if ballots.is_empty() || ballots.iter().any(|b| b.is_empty()) {
        return Err(ElectionError::EmptyBallots);
    }
    let width = ballots[0].len();
    if ballots.iter().any(|b| b.len() != width) {
        return Err(ElectionError::RaggedBallots);
    }
    let mut reference: Vec<Year> = ballots[0].clone();
    reference.sort_unstable();
    for ballot in &ballots[1..] {
        let mut years: Vec<Year> = ballot.clone();
        years.sort_unstable();
        if years != reference {
            return Err(ElectionError::RaggedBallots);
        }
    }

    let mut ballots: Vec<Vec<Year>> = ballots.to_vec();

    loop {
        if let Some(winner) = majority_winner(&ballots) {
            return Ok(winner);
        }
        if ballots[0].len() == 1 {
            // Single candidate left on every ballot: trivially wins
            return Ok(ballots[0][0]);
        }

        // Eliminate the year most often ranked last (smallest year on ties)
        let mut last_tally: BTreeMap<Year, usize> = BTreeMap::new();
        for ballot in &ballots {
            *last_tally.entry(*ballot.last().unwrap()).or_insert(0) += 1;
        }
        let eliminated = max_count_year(last_tally).expect("non-empty tally");

        for ballot in &mut ballots {
            ballot.retain(|&y| y != eliminated);
        }
    }
}
