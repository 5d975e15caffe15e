//! Pair universe: every distinct matchup of a roster.

use itertools::Itertools;

use crate::models::Pair;

/// Every 2-combination of `teams`, each exactly once.
///
/// Enumeration follows input order: `(t0, t1), (t0, t2), ..., (t1, t2), ...`.
/// Duplicate names are not filtered here; rosters are validated upstream.
pub fn all_pairs<S: AsRef<str>>(teams: &[S]) -> Vec<Pair> {
    teams
        .iter()
        .tuple_combinations()
        .map(|(a, b)| Pair::new(a.as_ref(), b.as_ref()))
        .collect()
}

/// Number of distinct pairs for `team_count` teams.
pub fn pair_count(team_count: usize) -> usize {
    team_count * team_count.saturating_sub(1) / 2
}
