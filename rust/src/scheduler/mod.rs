//! Schedule assembly.
//!
//! Drives the round builder in one of three modes (time-budgeted,
//! round-robin, single round) and keeps the participation counter current
//! between rounds.

mod core;
mod state;

pub use core::{plan_schedule, ScheduleAssembler};
pub use state::PairPool;
