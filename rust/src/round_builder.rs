//! Single-round construction.
//!
//! A round is filled in two passes over the candidate pairs, both ordered so
//! that pairs of under-served teams come first:
//! 1. Greedy pass: accept pairs while no team exceeds the simultaneous cap.
//! 2. Fill pass: only when courts are still free. Rescan the candidates,
//!    then any fallback pairs, accepting pairs not yet in the round, again
//!    within the cap.
//!
//! A round that ends short of the court count is a valid result.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::SchedulingConfig;
use crate::models::Pair;
use crate::pairs::all_pairs;
use crate::participation::ParticipationCounter;
use crate::{log_checks, log_debug};

/// Which pass is offering a pair. The fill pass additionally refuses a pair
/// that is already on a court this round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Greedy,
    Fill,
}

/// Outcome of offering a pair to a round in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Offer {
    Accepted,
    CourtsFull,
    /// This team is already at the simultaneous cap.
    AtCap(String),
    AlreadyPlaced,
}

/// A round being filled.
///
/// Tracks within-round usage so the cap is enforced as pairs are accepted.
pub struct RoundDraft<'a> {
    court_capacity: usize,
    simultaneous_cap: usize,
    accepted: Vec<&'a Pair>,
    placed: FxHashSet<&'a Pair>,
    usage: FxHashMap<&'a str, usize>,
    verbosity: u8,
}

impl<'a> RoundDraft<'a> {
    fn new(court_capacity: usize, simultaneous_cap: usize, verbosity: u8) -> Self {
        Self {
            court_capacity,
            simultaneous_cap,
            accepted: Vec::with_capacity(court_capacity),
            placed: FxHashSet::default(),
            usage: FxHashMap::default(),
            verbosity,
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.accepted.len() >= self.court_capacity
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Matches `team` already has in this round.
    pub fn usage(&self, team: &str) -> usize {
        self.usage.get(team).copied().unwrap_or(0)
    }

    /// Try to put `pair` on the next free court.
    pub fn offer(&mut self, pair: &'a Pair, pass: Pass) -> Offer {
        let outcome = self.check(pair, pass);
        if outcome == Offer::Accepted {
            self.accepted.push(pair);
            self.placed.insert(pair);
            for team in pair.teams() {
                *self.usage.entry(team).or_insert(0) += 1;
            }
            log_checks!(
                self.verbosity,
                "    court {}: {} ({:?} pass)",
                self.accepted.len(),
                pair,
                pass
            );
        } else {
            log_checks!(self.verbosity, "    skip {}: {:?}", pair, outcome);
        }
        outcome
    }

    fn check(&self, pair: &Pair, pass: Pass) -> Offer {
        if self.is_full() {
            return Offer::CourtsFull;
        }
        if pass == Pass::Fill && self.placed.contains(pair) {
            return Offer::AlreadyPlaced;
        }
        for team in pair.teams() {
            if self.usage(team) >= self.simultaneous_cap {
                return Offer::AtCap(team.to_string());
            }
        }
        Offer::Accepted
    }

    /// Accepted pairs in court order.
    pub fn into_pairs(self) -> Vec<Pair> {
        self.accepted.into_iter().cloned().collect()
    }
}

/// Builds one round at a time under a court count and a per-team cap.
#[derive(Clone, Debug)]
pub struct RoundBuilder {
    court_capacity: usize,
    simultaneous_cap: usize,
    verbosity: u8,
}

impl RoundBuilder {
    pub fn new(court_capacity: usize, simultaneous_cap: usize) -> Self {
        Self {
            court_capacity,
            simultaneous_cap,
            verbosity: 0,
        }
    }

    pub fn from_config(config: &SchedulingConfig) -> Self {
        Self::new(config.court_count, config.simultaneous_cap()).with_verbosity(config.verbosity)
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// An empty round to fill by hand.
    pub fn draft<'a>(&self) -> RoundDraft<'a> {
        RoundDraft::new(self.court_capacity, self.simultaneous_cap, self.verbosity)
    }

    /// The full pair universe, enumerated over teams ranked by ascending
    /// participation (ties in roster order).
    ///
    /// Used as the candidate pool when pairs may repeat across rounds.
    pub fn fairness_pool(counts: &ParticipationCounter) -> Vec<Pair> {
        all_pairs(&counts.ranked_teams())
    }

    /// Candidates sorted by combined participation of both teams.
    ///
    /// The sort is stable: equal totals keep their incoming order.
    pub fn order_candidates<'a>(
        candidates: &'a [Pair],
        counts: &ParticipationCounter,
    ) -> Vec<&'a Pair> {
        let mut ordered: Vec<&Pair> = candidates.iter().collect();
        ordered.sort_by_key(|pair| counts.combined(pair));
        ordered
    }

    /// Select up to `court_capacity` pairs for the next round.
    ///
    /// `candidates` feed both passes; `fallback` is only consulted by the fill
    /// pass, after the candidates. Pass an empty slice when pairs outside the
    /// candidate pool must never be used.
    pub fn build_round(
        &self,
        candidates: &[Pair],
        fallback: &[Pair],
        counts: &ParticipationCounter,
    ) -> Vec<Pair> {
        let ordered = Self::order_candidates(candidates, counts);
        log_debug!(
            self.verbosity,
            "  candidates: {:?}",
            ordered
                .iter()
                .map(|p| format!("{}={}", p, counts.combined(p)))
                .collect::<Vec<_>>()
        );

        let mut draft = self.draft();
        for &pair in &ordered {
            if draft.is_full() {
                break;
            }
            draft.offer(pair, Pass::Greedy);
        }

        if !draft.is_full() {
            let ordered_fallback = Self::order_candidates(fallback, counts);
            for &pair in ordered.iter().chain(ordered_fallback.iter()) {
                if draft.is_full() {
                    break;
                }
                draft.offer(pair, Pass::Fill);
            }
        }

        draft.into_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("T{}", i)).collect()
    }

    fn max_usage(pairs: &[Pair]) -> usize {
        let mut usage: FxHashMap<&str, usize> = FxHashMap::default();
        for p in pairs {
            for team in p.teams() {
                *usage.entry(team).or_insert(0) += 1;
            }
        }
        usage.values().copied().max().unwrap_or(0)
    }

    #[test]
    fn test_empty_candidates() {
        let counts = ParticipationCounter::new(&roster(4));
        let builder = RoundBuilder::new(2, 2);
        assert!(builder.build_round(&[], &[], &counts).is_empty());
    }

    #[test]
    fn test_respects_courts_and_cap() {
        let teams = roster(8);
        let counts = ParticipationCounter::new(&teams);
        let universe = all_pairs(&teams);

        for courts in 1..=6 {
            for cap in 1..=3 {
                let round = RoundBuilder::new(courts, cap).build_round(&universe, &[], &counts);
                assert!(round.len() <= courts);
                assert!(max_usage(&round) <= cap);
            }
        }
    }

    #[test]
    fn test_cap_of_one_gives_disjoint_pairs() {
        let teams = roster(6);
        let counts = ParticipationCounter::new(&teams);
        let round = RoundBuilder::new(3, 1).build_round(&all_pairs(&teams), &[], &counts);
        assert_eq!(
            round,
            vec![
                Pair::new("T1", "T2"),
                Pair::new("T3", "T4"),
                Pair::new("T5", "T6")
            ]
        );
    }

    #[test]
    fn test_least_played_teams_first() {
        let teams = roster(4);
        let mut counts = ParticipationCounter::new(&teams);
        counts.record_round(&[Pair::new("T1", "T2"), Pair::new("T1", "T2")]);

        let pool = RoundBuilder::fairness_pool(&counts);
        let round = RoundBuilder::new(1, 2).build_round(&pool, &[], &counts);
        assert_eq!(round, vec![Pair::new("T3", "T4")]);
    }

    #[test]
    fn test_fairness_pool_ranks_teams() {
        let teams = roster(3);
        let mut counts = ParticipationCounter::new(&teams);
        counts.record_round(&[Pair::new("T1", "T2")]);

        let pool = RoundBuilder::fairness_pool(&counts);
        let shown: Vec<String> = pool.iter().map(|p| p.to_string()).collect();
        assert_eq!(shown, vec!["T3 vs T1", "T3 vs T2", "T1 vs T2"]);
    }

    #[test]
    fn test_short_round_when_infeasible() {
        // Three teams, cap one: only one pair can ever be on court
        let teams = roster(3);
        let counts = ParticipationCounter::new(&teams);
        let round = RoundBuilder::new(4, 1).build_round(&all_pairs(&teams), &[], &counts);
        assert_eq!(round.len(), 1);
    }

    #[test]
    fn test_fill_pass_uses_fallback() {
        let teams = roster(4);
        let counts = ParticipationCounter::new(&teams);
        let universe = all_pairs(&teams);
        // Only one unscheduled pair left
        let remaining = vec![Pair::new("T1", "T2")];

        let round = RoundBuilder::new(2, 1).build_round(&remaining, &universe, &counts);
        assert_eq!(round.len(), 2);
        assert_eq!(round[0], Pair::new("T1", "T2"));
        assert_eq!(round[1], Pair::new("T3", "T4"));
    }

    #[test]
    fn test_fill_pass_never_repeats_pair_in_round() {
        let teams = roster(2);
        let counts = ParticipationCounter::new(&teams);
        let universe = all_pairs(&teams);

        let round = RoundBuilder::new(3, 3).build_round(&universe, &universe, &counts);
        assert_eq!(round, vec![Pair::new("T1", "T2")]);
    }

    #[test]
    fn test_draft_offers() {
        let ab = Pair::new("A", "B");
        let ac = Pair::new("A", "C");
        let builder = RoundBuilder::new(2, 1);

        let mut draft = builder.draft();
        assert_eq!(draft.offer(&ab, Pass::Greedy), Offer::Accepted);
        assert_eq!(draft.offer(&ab, Pass::Fill), Offer::AlreadyPlaced);
        assert_eq!(draft.offer(&ac, Pass::Fill), Offer::AtCap("A".to_string()));
        assert_eq!(draft.usage("A"), 1);
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_draft_reports_full() {
        let ab = Pair::new("A", "B");
        let cd = Pair::new("C", "D");
        let mut draft = RoundBuilder::new(1, 2).draft();
        assert_eq!(draft.offer(&ab, Pass::Greedy), Offer::Accepted);
        assert!(draft.is_full());
        assert_eq!(draft.offer(&cd, Pass::Greedy), Offer::CourtsFull);
        assert_eq!(draft.into_pairs(), vec![ab.clone()]);
    }
}
