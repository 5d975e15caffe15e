//! Fairness and utilization metrics for a finished schedule.

use pyo3::prelude::*;
use std::collections::HashMap;

use crate::config::ScheduleMode;
use crate::models::Schedule;

/// Coarse verdict on the games spread (max - min games per team).
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FairnessRating {
    /// Spread of at most one game
    VeryFair,
    /// Spread of two games
    Acceptable,
    /// Anything wider; worth flagging to the organizer
    Uneven,
}

impl FairnessRating {
    pub fn from_spread(spread: usize) -> Self {
        match spread {
            0 | 1 => Self::VeryFair,
            2 => Self::Acceptable,
            _ => Self::Uneven,
        }
    }
}

/// Per-team line of the statistics table.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct TeamSummary {
    #[pyo3(get)]
    pub team: String,
    #[pyo3(get)]
    pub games: usize,
    /// `games * play_minutes`
    #[pyo3(get)]
    pub play_minutes: u32,
    /// Games as a percentage of the busiest team's games
    #[pyo3(get)]
    pub share_of_max: f64,
}

#[pymethods]
impl TeamSummary {
    fn __repr__(&self) -> String {
        format!(
            "TeamSummary(team={:?}, games={}, play_minutes={})",
            self.team, self.games, self.play_minutes
        )
    }
}

/// Snapshot of a schedule's fairness and resource use.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleStats {
    #[pyo3(get)]
    pub total_rounds: usize,
    #[pyo3(get)]
    pub total_matches: usize,
    #[pyo3(get)]
    pub team_counts: HashMap<String, usize>,
    #[pyo3(get)]
    pub min_games: usize,
    #[pyo3(get)]
    pub max_games: usize,
    #[pyo3(get)]
    pub avg_games: f64,
    /// `max_games - min_games`
    #[pyo3(get)]
    pub games_spread: usize,
    #[pyo3(get)]
    pub fairness: FairnessRating,
    /// Percent of court slots used (round-robin and time-budgeted)
    #[pyo3(get)]
    pub court_utilization: Option<f64>,
    /// Minute budget (time-budgeted only)
    #[pyo3(get)]
    pub planned_duration: Option<u32>,
    /// `rounds * minutes_per_round` (time-budgeted only)
    #[pyo3(get)]
    pub actual_duration: Option<u32>,
    /// `actual / planned * 100` (time-budgeted only)
    #[pyo3(get)]
    pub time_efficiency: Option<f64>,
    /// Sorted by team name
    #[pyo3(get)]
    pub team_summaries: Vec<TeamSummary>,
}

#[pymethods]
impl ScheduleStats {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleStats(rounds={}, matches={}, games={}..{}, fairness={:?})",
            self.total_rounds, self.total_matches, self.min_games, self.max_games, self.fairness
        )
    }
}

/// Summarize a completed schedule.
///
/// Reads the schedule's participation counts and the court count and timing
/// it was built with; never mutates anything, so repeated calls give
/// identical results.
pub fn summarize(schedule: &Schedule) -> ScheduleStats {
    let counter = schedule.participation();
    let total_rounds = schedule.rounds.len();
    let total_matches = schedule.total_matches();

    let min_games = counter.min();
    let max_games = counter.max();
    let avg_games = if counter.is_empty() {
        0.0
    } else {
        counter.total() as f64 / counter.len() as f64
    };
    let games_spread = max_games - min_games;

    let court_utilization = match schedule.mode {
        ScheduleMode::SingleRound => None,
        _ if total_rounds == 0 || schedule.court_count == 0 => None,
        _ => Some(
            total_matches as f64 / (total_rounds * schedule.court_count) as f64 * 100.0,
        ),
    };

    let (planned_duration, actual_duration, time_efficiency) = match schedule.mode {
        ScheduleMode::TimeBudgeted { total_minutes } => {
            let actual = total_rounds as u32 * schedule.minutes_per_round;
            let efficiency = if total_minutes > 0 {
                f64::from(actual) / f64::from(total_minutes) * 100.0
            } else {
                0.0
            };
            (Some(total_minutes), Some(actual), Some(efficiency))
        }
        _ => (None, None, None),
    };

    let mut team_summaries: Vec<TeamSummary> = counter
        .iter()
        .map(|(team, games)| TeamSummary {
            team: team.to_string(),
            games,
            play_minutes: games as u32 * schedule.play_minutes,
            share_of_max: if max_games > 0 {
                games as f64 / max_games as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    team_summaries.sort_by(|a, b| a.team.cmp(&b.team));

    ScheduleStats {
        total_rounds,
        total_matches,
        team_counts: counter.to_map(),
        min_games,
        max_games,
        avg_games,
        games_spread,
        fairness: FairnessRating::from_spread(games_spread),
        court_utilization,
        planned_duration,
        actual_duration,
        time_efficiency,
        team_summaries,
    }
}
