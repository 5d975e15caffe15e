//! Core data types for court scheduling.

use chrono::{Duration, NaiveTime};
use pyo3::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::config::{ScheduleMode, SchedulingConfig};
use crate::error::SchedulerError;
use crate::participation::ParticipationCounter;

/// An unordered pair of teams.
///
/// `first`/`second` keep the order the pair was generated in for display,
/// but equality and hashing ignore it: `A vs B == B vs A`.
#[derive(Clone, Debug)]
pub struct Pair {
    pub first: String,
    pub second: String,
}

impl Pair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn contains(&self, team: &str) -> bool {
        self.first == team || self.second == team
    }

    pub fn teams(&self) -> [&str; 2] {
        [self.first.as_str(), self.second.as_str()]
    }

    /// Order-independent identity.
    fn key(&self) -> (&str, &str) {
        if self.first <= self.second {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }
}

impl PartialEq for Pair {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pair {}

impl Hash for Pair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}

/// Outcome of a played match, written back by the persistence layer.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    /// Winning team; `None` records a draw
    #[pyo3(get, set)]
    pub winner: Option<String>,
    #[pyo3(get, set)]
    pub team1_score: i32,
    #[pyo3(get, set)]
    pub team2_score: i32,
}

#[pymethods]
impl MatchResult {
    #[new]
    #[pyo3(signature = (winner, team1_score, team2_score))]
    fn new(winner: Option<String>, team1_score: i32, team2_score: i32) -> Self {
        Self {
            winner,
            team1_score,
            team2_score,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    fn __repr__(&self) -> String {
        format!(
            "MatchResult(winner={:?}, score={}:{})",
            self.winner, self.team1_score, self.team2_score
        )
    }
}

/// A pair placed on a court in a round.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    /// 1-based round number
    #[pyo3(get)]
    pub round: usize,
    /// 1-based court index within the round
    #[pyo3(get)]
    pub court: usize,
    #[pyo3(get)]
    pub team1: String,
    #[pyo3(get)]
    pub team2: String,
    /// Absent until recorded by the caller; scheduling never sets it
    #[pyo3(get)]
    pub result: Option<MatchResult>,
}

impl Match {
    pub fn new(round: usize, court: usize, pair: &Pair) -> Self {
        Self {
            round,
            court,
            team1: pair.first.clone(),
            team2: pair.second.clone(),
            result: None,
        }
    }

    pub fn pair(&self) -> Pair {
        Pair::new(self.team1.as_str(), self.team2.as_str())
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// Attach a result. The winner must be one of the two teams, or `None`
    /// for a draw.
    pub fn record_result(
        &mut self,
        winner: Option<&str>,
        team1_score: i32,
        team2_score: i32,
    ) -> Result<(), SchedulerError> {
        if let Some(w) = winner {
            if !self.involves(w) {
                return Err(SchedulerError::InvalidResult(format!(
                    "{} did not play in {} vs {}",
                    w, self.team1, self.team2
                )));
            }
        }
        self.result = Some(MatchResult {
            winner: winner.map(str::to_string),
            team1_score,
            team2_score,
        });
        Ok(())
    }
}

#[pymethods]
impl Match {
    #[pyo3(name = "record_result", signature = (winner, team1_score, team2_score))]
    fn py_record_result(
        &mut self,
        winner: Option<String>,
        team1_score: i32,
        team2_score: i32,
    ) -> PyResult<()> {
        self.record_result(winner.as_deref(), team1_score, team2_score)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Match(round={}, court={}, {:?} vs {:?})",
            self.round, self.court, self.team1, self.team2
        )
    }
}

/// One time slice of the schedule.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    /// 1-based round number
    #[pyo3(get)]
    pub number: usize,
    /// Matches in court order
    #[pyo3(get)]
    pub matches: Vec<Match>,
    /// Minutes from event start (time-budgeted schedules only)
    #[pyo3(get)]
    pub start_minute: Option<u32>,
    #[pyo3(get)]
    pub end_minute: Option<u32>,
}

impl Round {
    /// Place pairs on courts 1..=n in the given order.
    pub fn from_pairs(number: usize, pairs: &[Pair]) -> Self {
        let matches = pairs
            .iter()
            .enumerate()
            .map(|(idx, pair)| Match::new(number, idx + 1, pair))
            .collect();
        Self {
            number,
            matches,
            start_minute: None,
            end_minute: None,
        }
    }

    pub fn with_window(mut self, start_minute: u32, end_minute: u32) -> Self {
        self.start_minute = Some(start_minute);
        self.end_minute = Some(end_minute);
        self
    }

    pub fn pairs(&self) -> Vec<Pair> {
        self.matches.iter().map(Match::pair).collect()
    }

    /// Matches per team within this round.
    pub fn team_usage(&self) -> FxHashMap<&str, usize> {
        let mut usage: FxHashMap<&str, usize> = FxHashMap::default();
        for m in &self.matches {
            *usage.entry(m.team1.as_str()).or_insert(0) += 1;
            *usage.entry(m.team2.as_str()).or_insert(0) += 1;
        }
        usage
    }

    pub fn is_full(&self, court_count: usize) -> bool {
        self.matches.len() >= court_count
    }

    /// Roster teams without a match in this round, in roster order.
    pub fn idle_teams(&self, roster: &[String]) -> Vec<String> {
        let usage = self.team_usage();
        roster
            .iter()
            .filter(|team| !usage.contains_key(team.as_str()))
            .cloned()
            .collect()
    }

    /// Wall-clock start and end when the event starts at `origin`.
    ///
    /// Wraps past midnight. `None` for untimed rounds.
    pub fn clock_window(&self, origin: NaiveTime) -> Option<(NaiveTime, NaiveTime)> {
        let (start, end) = (self.start_minute?, self.end_minute?);
        let at = |minutes: u32| {
            origin
                .overflowing_add_signed(Duration::minutes(i64::from(minutes)))
                .0
        };
        Some((at(start), at(end)))
    }
}

#[pymethods]
impl Round {
    #[pyo3(name = "idle_teams")]
    fn py_idle_teams(&self, roster: Vec<String>) -> Vec<String> {
        self.idle_teams(&roster)
    }

    #[pyo3(name = "clock_window")]
    fn py_clock_window(&self, origin: NaiveTime) -> Option<(NaiveTime, NaiveTime)> {
        self.clock_window(origin)
    }

    fn __len__(&self) -> usize {
        self.matches.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Round(number={}, matches={}, window={:?}-{:?})",
            self.number,
            self.matches.len(),
            self.start_minute,
            self.end_minute
        )
    }
}

/// Flat per-match row for tables and CSV export.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRow {
    #[pyo3(get)]
    pub round: usize,
    #[pyo3(get)]
    pub court: usize,
    #[pyo3(get)]
    pub team1: String,
    #[pyo3(get)]
    pub team2: String,
    /// `HH:MM`, timed rounds only
    #[pyo3(get)]
    pub start: Option<String>,
    #[pyo3(get)]
    pub end: Option<String>,
    #[pyo3(get)]
    pub duration_minutes: Option<u32>,
}

/// A complete schedule for one invocation.
///
/// Carries the court count and timing it was built with, so statistics never
/// depend on a config supplied after the fact.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Schedule {
    pub mode: ScheduleMode,
    /// Roster the schedule was built for, in input order
    #[pyo3(get)]
    pub teams: Vec<String>,
    #[pyo3(get)]
    pub rounds: Vec<Round>,
    #[pyo3(get)]
    pub court_count: usize,
    #[pyo3(get)]
    pub minutes_per_round: u32,
    #[pyo3(get)]
    pub play_minutes: u32,
    participation: ParticipationCounter,
}

impl Schedule {
    pub fn new(
        mode: ScheduleMode,
        teams: Vec<String>,
        rounds: Vec<Round>,
        participation: ParticipationCounter,
        config: &SchedulingConfig,
    ) -> Self {
        Self {
            mode,
            teams,
            rounds,
            court_count: config.court_count,
            minutes_per_round: config.minutes_per_round,
            play_minutes: config.play_minutes,
            participation,
        }
    }

    /// A schedule with no rounds (rosters too small to pair).
    pub fn empty(mode: ScheduleMode, teams: Vec<String>, config: &SchedulingConfig) -> Self {
        let participation = ParticipationCounter::new(&teams);
        Self::new(mode, teams, Vec::new(), participation, config)
    }

    /// Final participation counts.
    pub fn participation(&self) -> &ParticipationCounter {
        &self.participation
    }

    pub fn total_matches(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }

    /// Every distinct pair that appears somewhere in the schedule.
    pub fn scheduled_pairs(&self) -> FxHashSet<Pair> {
        self.rounds.iter().flat_map(Round::pairs).collect()
    }

    /// One row per match, with clock labels relative to `origin`.
    pub fn export_rows(&self, origin: NaiveTime) -> Vec<ExportRow> {
        let mut rows = Vec::with_capacity(self.total_matches());
        for round in &self.rounds {
            let window = round.clock_window(origin);
            let duration = round
                .start_minute
                .zip(round.end_minute)
                .map(|(start, end)| end.saturating_sub(start));
            for m in &round.matches {
                rows.push(ExportRow {
                    round: round.number,
                    court: m.court,
                    team1: m.team1.clone(),
                    team2: m.team2.clone(),
                    start: window.map(|(s, _)| s.format("%H:%M").to_string()),
                    end: window.map(|(_, e)| e.format("%H:%M").to_string()),
                    duration_minutes: duration,
                });
            }
        }
        rows
    }
}

#[pymethods]
impl Schedule {
    #[getter(mode)]
    fn py_mode(&self) -> &'static str {
        self.mode.name()
    }

    #[getter(participation)]
    fn py_participation(&self) -> std::collections::HashMap<String, usize> {
        self.participation.to_map()
    }

    #[pyo3(name = "export_rows", signature = (origin=None))]
    fn py_export_rows(&self, origin: Option<NaiveTime>) -> Vec<ExportRow> {
        self.export_rows(origin.unwrap_or(NaiveTime::MIN))
    }

    fn __len__(&self) -> usize {
        self.rounds.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Schedule(mode={}, rounds={}, matches={})",
            self.mode.name(),
            self.rounds.len(),
            self.total_matches()
        )
    }
}
