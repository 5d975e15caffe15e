//! Schedule assembly for the three scheduling modes.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ScheduleMode, SchedulingConfig};
use crate::error::SchedulerError;
use crate::models::{Pair, Round, Schedule};
use crate::pairs::all_pairs;
use crate::participation::ParticipationCounter;
use crate::roster::validate_roster;
use crate::round_builder::{Pass, RoundBuilder};
use crate::stats::{summarize, ScheduleStats};
use crate::{log_debug, log_rounds};

use super::state::PairPool;

/// Validate the roster, build the schedule and summarize it.
///
/// This is the calling layer: it reports `InsufficientTeams` and
/// `DuplicateTeam`, which the assembler itself never raises.
pub fn plan_schedule(
    teams: Vec<String>,
    config: &SchedulingConfig,
    mode: ScheduleMode,
) -> Result<(Schedule, ScheduleStats), SchedulerError> {
    validate_roster(&teams)?;
    let assembler = ScheduleAssembler::new(teams, config.clone())?;
    let schedule = assembler.build(mode)?;
    let stats = summarize(&schedule);
    Ok((schedule, stats))
}

/// Drives the round builder for one roster and configuration.
///
/// Rounds are built strictly in sequence: each one reads the participation
/// counts left by all earlier rounds.
pub struct ScheduleAssembler {
    teams: Vec<String>,
    config: SchedulingConfig,
    builder: RoundBuilder,
}

impl ScheduleAssembler {
    pub fn new(teams: Vec<String>, config: SchedulingConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        let builder = RoundBuilder::from_config(&config);
        Ok(Self {
            teams,
            config,
            builder,
        })
    }

    /// Build a schedule in the given mode.
    ///
    /// Rosters with fewer than two teams produce an empty schedule.
    pub fn build(&self, mode: ScheduleMode) -> Result<Schedule, SchedulerError> {
        log_rounds!(
            self.config.verbosity,
            "Building {} schedule: {} teams, {} courts, cap {}",
            mode.name(),
            self.teams.len(),
            self.config.court_count,
            self.config.simultaneous_cap()
        );
        match mode {
            ScheduleMode::TimeBudgeted { total_minutes } => self.build_time_budgeted(total_minutes),
            ScheduleMode::RoundRobin => Ok(self.build_round_robin()),
            ScheduleMode::SingleRound => Ok(self.build_single_round()),
        }
    }

    /// `total_minutes / minutes_per_round` rounds over the full pair universe,
    /// each re-ranked by participation so far.
    pub fn build_time_budgeted(&self, total_minutes: u32) -> Result<Schedule, SchedulerError> {
        let mode = ScheduleMode::TimeBudgeted { total_minutes };
        let minutes_per_round = self.config.minutes_per_round;
        let round_count = total_minutes / minutes_per_round;
        if round_count == 0 {
            return Err(SchedulerError::InsufficientDuration {
                total_minutes,
                minutes_per_round,
            });
        }
        if self.teams.len() < 2 {
            return Ok(Schedule::empty(mode, self.teams.clone(), &self.config));
        }

        let verbosity = self.config.verbosity;
        let mut counter = ParticipationCounter::new(&self.teams);
        let mut rounds = Vec::with_capacity(round_count as usize);

        for index in 0..round_count {
            let number = index as usize + 1;
            let pool = RoundBuilder::fairness_pool(&counter);
            let pairs = self.builder.build_round(&pool, &[], &counter);

            let start = index * minutes_per_round;
            let end = start + self.config.play_minutes;
            log_rounds!(
                verbosity,
                "Round {} ({}-{} min): {} of {} courts",
                number,
                start,
                end,
                pairs.len(),
                self.config.court_count
            );

            counter.record_round(&pairs);
            rounds.push(Round::from_pairs(number, &pairs).with_window(start, end));
        }

        log_debug!(verbosity, "Final counts: {:?}", counter.iter().collect::<Vec<_>>());
        Ok(Schedule::new(mode, self.teams.clone(), rounds, counter, &self.config))
    }

    /// Every pair at least once.
    ///
    /// The pair universe is shuffled once and drained without replacement;
    /// the fill pass may repeat already-scheduled pairs to keep courts busy.
    /// Nominally `ceil(pairs / courts)` rounds. When the simultaneous cap kept
    /// a round from taking enough new pairs, extra rounds follow until every
    /// pair has been played.
    pub fn build_round_robin(&self) -> Schedule {
        let mode = ScheduleMode::RoundRobin;
        if self.teams.len() < 2 {
            return Schedule::empty(mode, self.teams.clone(), &self.config);
        }

        let verbosity = self.config.verbosity;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        log_debug!(verbosity, "Round-robin shuffle seed: {}", seed);

        let mut pool = PairPool::shuffled(all_pairs(&self.teams), &mut rng);
        let fallback: Vec<Pair> = pool.remaining().to_vec();
        let nominal_rounds = fallback.len().div_ceil(self.config.court_count);

        let mut counter = ParticipationCounter::new(&self.teams);
        let mut rounds = Vec::with_capacity(nominal_rounds);

        while rounds.len() < nominal_rounds || !pool.is_empty() {
            let number = rounds.len() + 1;
            if number > nominal_rounds {
                log_rounds!(
                    verbosity,
                    "Extra round {}: {} pairs still unplayed",
                    number,
                    pool.len()
                );
            }

            let pairs = self
                .builder
                .build_round(pool.remaining(), &fallback, &counter);
            if pairs.is_empty() {
                // Nothing placeable at all; cannot happen with a validated config
                break;
            }
            let fresh = pool.consume(&pairs);
            log_rounds!(
                verbosity,
                "Round {}: {} matches ({} new, {} repeats), {} pairs left",
                number,
                pairs.len(),
                fresh,
                pairs.len() - fresh,
                pool.len()
            );

            counter.record_round(&pairs);
            rounds.push(Round::from_pairs(number, &pairs));
        }

        Schedule::new(mode, self.teams.clone(), rounds, counter, &self.config)
    }

    /// One round: neighbours in roster order first (1-2, 3-4, ...), then any
    /// other combination while courts are free.
    pub fn build_single_round(&self) -> Schedule {
        let mode = ScheduleMode::SingleRound;
        if self.teams.len() < 2 {
            return Schedule::empty(mode, self.teams.clone(), &self.config);
        }

        let adjacent: Vec<Pair> = self
            .teams
            .chunks_exact(2)
            .map(|two| Pair::new(two[0].as_str(), two[1].as_str()))
            .collect();
        let universe = all_pairs(&self.teams);

        let mut draft = self.builder.draft();
        for pair in &adjacent {
            if draft.is_full() {
                break;
            }
            draft.offer(pair, Pass::Greedy);
        }
        for pair in &universe {
            if draft.is_full() {
                break;
            }
            draft.offer(pair, Pass::Fill);
        }
        let pairs = draft.into_pairs();
        log_rounds!(
            self.config.verbosity,
            "Single round: {} of {} courts",
            pairs.len(),
            self.config.court_count
        );

        let mut counter = ParticipationCounter::new(&self.teams);
        counter.record_round(&pairs);
        Schedule::new(
            mode,
            self.teams.clone(),
            vec![Round::from_pairs(1, &pairs)],
            counter,
            &self.config,
        )
    }
}
