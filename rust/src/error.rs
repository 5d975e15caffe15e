//! Error types for roster validation and schedule construction.

use thiserror::Error;

/// Errors that can occur while planning a schedule.
///
/// Under-filled rounds and uneven game counts are not errors; they show up in
/// the returned schedule and statistics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("{total_minutes} minutes is not enough for a single round of {minutes_per_round} minutes")]
    InsufficientDuration {
        total_minutes: u32,
        minutes_per_round: u32,
    },
    #[error("At least 2 teams are required, got {0}")]
    InsufficientTeams(usize),
    #[error("Duplicate team: {0}")]
    DuplicateTeam(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unknown scheduling mode: {0}")]
    UnknownMode(String),
    #[error("Invalid match result: {0}")]
    InvalidResult(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SchedulerError::InsufficientDuration {
            total_minutes: 15,
            minutes_per_round: 20,
        };
        assert_eq!(
            err.to_string(),
            "15 minutes is not enough for a single round of 20 minutes"
        );
        assert_eq!(
            SchedulerError::InsufficientTeams(1).to_string(),
            "At least 2 teams are required, got 1"
        );
    }
}
