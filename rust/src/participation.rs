//! Running per-team match counts.

use rustc_hash::FxHashMap;
use std::collections::HashMap;

use crate::models::Pair;

/// Matches scheduled so far per team.
///
/// Keeps the roster order so rankings can break ties by input position.
/// Counts only ever grow.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticipationCounter {
    order: Vec<String>,
    counts: FxHashMap<String, usize>,
}

impl ParticipationCounter {
    /// Start every roster team at zero.
    pub fn new(teams: &[String]) -> Self {
        let mut counter = Self {
            order: Vec::with_capacity(teams.len()),
            counts: FxHashMap::with_capacity_and_hasher(teams.len(), Default::default()),
        };
        for team in teams {
            counter.ensure(team);
        }
        counter
    }

    fn ensure(&mut self, team: &str) -> &mut usize {
        if !self.counts.contains_key(team) {
            self.order.push(team.to_string());
        }
        self.counts.entry(team.to_string()).or_insert(0)
    }

    /// Count for a team (0 for teams never seen).
    #[inline]
    pub fn count(&self, team: &str) -> usize {
        self.counts.get(team).copied().unwrap_or(0)
    }

    /// `count(a) + count(b)`.
    #[inline]
    pub fn combined(&self, pair: &Pair) -> usize {
        self.count(&pair.first) + self.count(&pair.second)
    }

    /// Credit one match to both teams of every pair.
    pub fn record_round(&mut self, pairs: &[Pair]) {
        for pair in pairs {
            *self.ensure(&pair.first) += 1;
            *self.ensure(&pair.second) += 1;
        }
    }

    /// Teams sorted by ascending count, ties in roster order.
    pub fn ranked_teams(&self) -> Vec<&str> {
        let mut ranked: Vec<&str> = self.order.iter().map(String::as_str).collect();
        // sort_by_key is stable, which keeps roster order among equal counts
        ranked.sort_by_key(|team| self.count(team));
        ranked
    }

    /// Teams in roster order.
    pub fn teams(&self) -> &[String] {
        &self.order
    }

    /// `(team, count)` in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order.iter().map(|team| (team.as_str(), self.count(team)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn min(&self) -> usize {
        self.iter().map(|(_, c)| c).min().unwrap_or(0)
    }

    pub fn max(&self) -> usize {
        self.iter().map(|(_, c)| c).max().unwrap_or(0)
    }

    /// Sum over teams (twice the number of matches).
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Std map copy for the Python interface.
    pub fn to_map(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|(team, count)| (team.clone(), *count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_starts_at_zero() {
        let counter = ParticipationCounter::new(&roster(&["A", "B", "C"]));
        assert_eq!(counter.len(), 3);
        assert!(counter.iter().all(|(_, c)| c == 0));
        assert_eq!(counter.count("unknown"), 0);
    }

    #[test]
    fn test_record_round() {
        let mut counter = ParticipationCounter::new(&roster(&["A", "B", "C"]));
        counter.record_round(&[Pair::new("A", "B"), Pair::new("A", "C")]);
        assert_eq!(counter.count("A"), 2);
        assert_eq!(counter.count("B"), 1);
        assert_eq!(counter.combined(&Pair::new("B", "C")), 2);
        assert_eq!(counter.total(), 4);
        assert_eq!((counter.min(), counter.max()), (1, 2));
    }

    #[test]
    fn test_ranked_teams_ties_keep_roster_order() {
        let mut counter = ParticipationCounter::new(&roster(&["A", "B", "C", "D"]));
        counter.record_round(&[Pair::new("A", "C")]);
        assert_eq!(counter.ranked_teams(), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_unknown_team_is_appended() {
        let mut counter = ParticipationCounter::new(&roster(&["A"]));
        counter.record_round(&[Pair::new("A", "Z")]);
        assert_eq!(counter.teams(), roster(&["A", "Z"]).as_slice());
        assert_eq!(counter.count("Z"), 1);
    }

    #[test]
    fn test_empty_counter() {
        let counter = ParticipationCounter::new(&[]);
        assert!(counter.is_empty());
        assert_eq!((counter.min(), counter.max()), (0, 0));
    }
}
