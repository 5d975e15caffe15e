//! Rust core of the court scheduler.
//!
//! Assigns matches between teams to a limited number of courts, round by
//! round, keeping the number of games per team as even as possible. The
//! Python front end calls in through the `rust` module defined here; nothing
//! in this crate does I/O or keeps state between calls.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
mod error;
pub mod logging;
mod models;
pub mod pairs;
mod participation;
pub mod roster;
pub mod round_builder;
pub mod scheduler;
pub mod stats;

pub use config::{ScheduleMode, SchedulingConfig};
pub use error::SchedulerError;
pub use models::{ExportRow, Match, MatchResult, Pair, Round, Schedule};
pub use pairs::{all_pairs, pair_count};
pub use participation::ParticipationCounter;
pub use roster::{numbered_roster, parse_roster, validate_roster};
pub use round_builder::{Offer, Pass, RoundBuilder, RoundDraft};
pub use scheduler::{plan_schedule, PairPool, ScheduleAssembler};
pub use stats::{summarize, FairnessRating, ScheduleStats, TeamSummary};

fn to_py_err(err: SchedulerError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// All distinct matchups of a roster, as `(team1, team2)` tuples.
#[pyfunction]
#[pyo3(name = "all_pairs")]
fn py_all_pairs(teams: Vec<String>) -> Vec<(String, String)> {
    all_pairs(&teams)
        .into_iter()
        .map(|pair| (pair.first, pair.second))
        .collect()
}

/// Build a schedule and its statistics.
///
/// # Arguments
/// * `teams` - Team names, unique, at least two
/// * `config` - Courts, players per team and timing
/// * `mode` - "time_budgeted", "round_robin" or "single_round"
/// * `total_minutes` - Event length, required for "time_budgeted"
///
/// # Returns
/// * `(Schedule, ScheduleStats)`
///
/// # Raises
/// * ValueError for too few or duplicate teams, an invalid config, an
///   unknown mode, or a time budget shorter than one round
#[pyfunction]
#[pyo3(signature = (teams, config, mode, total_minutes=None))]
fn build_schedule(
    teams: Vec<String>,
    config: SchedulingConfig,
    mode: &str,
    total_minutes: Option<u32>,
) -> PyResult<(Schedule, ScheduleStats)> {
    let mode = ScheduleMode::parse(mode, total_minutes).map_err(to_py_err)?;
    plan_schedule(teams, &config, mode).map_err(to_py_err)
}

/// Recompute statistics for a schedule, using the courts and timing it was
/// built with.
#[pyfunction]
#[pyo3(name = "summarize_schedule")]
fn py_summarize_schedule(schedule: Schedule) -> ScheduleStats {
    summarize(&schedule)
}

/// Split a multi-line text field into team names.
#[pyfunction]
#[pyo3(name = "parse_roster")]
fn py_parse_roster(text: &str) -> Vec<String> {
    parse_roster(text)
}

/// Generic names "Team 1".."Team n".
#[pyfunction]
#[pyo3(name = "numbered_roster")]
fn py_numbered_roster(count: usize) -> Vec<String> {
    numbered_roster(count)
}

/// The courtplan.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<Match>()?;
    m.add_class::<MatchResult>()?;
    m.add_class::<Round>()?;
    m.add_class::<Schedule>()?;
    m.add_class::<ExportRow>()?;
    m.add_class::<ScheduleStats>()?;
    m.add_class::<TeamSummary>()?;
    m.add_class::<FairnessRating>()?;

    // Config
    m.add_class::<SchedulingConfig>()?;

    // Entry points
    m.add_function(wrap_pyfunction!(py_all_pairs, m)?)?;
    m.add_function(wrap_pyfunction!(build_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_summarize_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_roster, m)?)?;
    m.add_function(wrap_pyfunction!(py_numbered_roster, m)?)?;

    Ok(())
}
