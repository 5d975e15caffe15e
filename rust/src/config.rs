//! Configuration types for the court scheduler.

use pyo3::prelude::*;

use crate::error::SchedulerError;

/// Court, team and timing configuration shared by all scheduling modes.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulingConfig {
    /// Number of courts available in every round
    #[pyo3(get, set)]
    pub court_count: usize,
    /// Players per team; half of them can be on court at once
    #[pyo3(get, set)]
    pub players_per_team: usize,
    /// Round cadence in minutes (play plus changeover)
    #[pyo3(get, set)]
    pub minutes_per_round: u32,
    /// Playing time within a round
    #[pyo3(get, set)]
    pub play_minutes: u32,
    /// Seed for the round-robin shuffle. `None` draws a fresh seed.
    #[pyo3(get, set)]
    pub seed: Option<u64>,
    /// Logging verbosity (0-3), see `logging`
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            court_count: 4,
            players_per_team: 4,
            minutes_per_round: 20,
            play_minutes: 15,
            seed: None,
            verbosity: 0,
        }
    }
}

impl SchedulingConfig {
    /// Maximum number of matches one team may play within a single round.
    pub fn simultaneous_cap(&self) -> usize {
        self.players_per_team / 2
    }

    /// Reject configurations no round could be built from.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.court_count == 0 {
            return Err(SchedulerError::InvalidConfig(
                "court_count must be at least 1".to_string(),
            ));
        }
        if self.simultaneous_cap() == 0 {
            return Err(SchedulerError::InvalidConfig(format!(
                "players_per_team must be at least 2, got {}",
                self.players_per_team
            )));
        }
        if self.minutes_per_round == 0 {
            return Err(SchedulerError::InvalidConfig(
                "minutes_per_round must be positive".to_string(),
            ));
        }
        if self.play_minutes > self.minutes_per_round {
            return Err(SchedulerError::InvalidConfig(format!(
                "play_minutes ({}) exceeds minutes_per_round ({})",
                self.play_minutes, self.minutes_per_round
            )));
        }
        Ok(())
    }
}

#[pymethods]
impl SchedulingConfig {
    #[new]
    #[pyo3(signature = (
        court_count=None,
        players_per_team=None,
        minutes_per_round=None,
        play_minutes=None,
        seed=None,
        verbosity=None
    ))]
    fn new(
        court_count: Option<usize>,
        players_per_team: Option<usize>,
        minutes_per_round: Option<u32>,
        play_minutes: Option<u32>,
        seed: Option<u64>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            court_count: court_count.unwrap_or(defaults.court_count),
            players_per_team: players_per_team.unwrap_or(defaults.players_per_team),
            minutes_per_round: minutes_per_round.unwrap_or(defaults.minutes_per_round),
            play_minutes: play_minutes.unwrap_or(defaults.play_minutes),
            seed,
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    #[getter]
    fn max_simultaneous_matches(&self) -> usize {
        self.simultaneous_cap()
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulingConfig(courts={}, players_per_team={}, round={}min, seed={:?})",
            self.court_count, self.players_per_team, self.minutes_per_round, self.seed
        )
    }
}

/// Which driver the assembler runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleMode {
    /// As many rounds as fit into `total_minutes`.
    TimeBudgeted { total_minutes: u32 },
    /// Every pair at least once.
    RoundRobin,
    /// One round, no history.
    SingleRound,
}

impl ScheduleMode {
    /// Parse the mode name used by the Python surface.
    ///
    /// `time_budgeted` needs `total_minutes`; the other modes ignore it.
    pub fn parse(name: &str, total_minutes: Option<u32>) -> Result<Self, SchedulerError> {
        match name {
            "time_budgeted" => total_minutes
                .map(|total_minutes| Self::TimeBudgeted { total_minutes })
                .ok_or_else(|| {
                    SchedulerError::InvalidConfig(
                        "time_budgeted mode requires total_minutes".to_string(),
                    )
                }),
            "round_robin" => Ok(Self::RoundRobin),
            "single_round" => Ok(Self::SingleRound),
            other => Err(SchedulerError::UnknownMode(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TimeBudgeted { .. } => "time_budgeted",
            Self::RoundRobin => "round_robin",
            Self::SingleRound => "single_round",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cap() {
        let config = SchedulingConfig::default();
        assert_eq!(config.simultaneous_cap(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_odd_players_round_down() {
        let config = SchedulingConfig {
            players_per_team: 5,
            ..Default::default()
        };
        assert_eq!(config.simultaneous_cap(), 2);
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let no_courts = SchedulingConfig {
            court_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            no_courts.validate(),
            Err(SchedulerError::InvalidConfig(_))
        ));

        let single_player = SchedulingConfig {
            players_per_team: 1,
            ..Default::default()
        };
        assert!(single_player.validate().is_err());

        let long_play = SchedulingConfig {
            play_minutes: 25,
            ..Default::default()
        };
        assert!(long_play.validate().is_err());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            ScheduleMode::parse("time_budgeted", Some(120)),
            Ok(ScheduleMode::TimeBudgeted { total_minutes: 120 })
        );
        assert_eq!(
            ScheduleMode::parse("round_robin", None),
            Ok(ScheduleMode::RoundRobin)
        );
        assert_eq!(
            ScheduleMode::parse("single_round", Some(60)),
            Ok(ScheduleMode::SingleRound)
        );
        assert!(matches!(
            ScheduleMode::parse("time_budgeted", None),
            Err(SchedulerError::InvalidConfig(_))
        ));
        assert_eq!(
            ScheduleMode::parse("swiss", None),
            Err(SchedulerError::UnknownMode("swiss".to_string()))
        );
    }
}
