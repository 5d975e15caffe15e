//! Logging macros for the court scheduler with verbosity level control.
//!
//! Output goes to stderr and costs nothing when verbosity is 0.
//! Levels:
//! - 0: SILENT
//! - 1: ROUNDS (one line per built round, mode decisions)
//! - 2: CHECKS (why a pair was accepted or skipped)
//! - 3: DEBUG (candidate orderings, counter snapshots)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_ROUNDS: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at ROUNDS level (verbosity >= 1).
///
/// Used for: round summaries, extra round-robin rounds, mode selection.
#[macro_export]
macro_rules! log_rounds {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_ROUNDS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// One line per pair offered to a round: the court it landed on, or the
/// reason it was skipped (courts full, team at its cap, already placed).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Candidate orderings with their combined counts, the round-robin shuffle
/// seed and the final participation counts.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_ROUNDS);
        assert!(VERBOSITY_ROUNDS < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_silent_verbosity_emits_nothing() {
        let verbosity = VERBOSITY_SILENT;
        log_rounds!(verbosity, "round {}", 1);
        log_checks!(verbosity, "skip {}", "A-B");
        log_debug!(verbosity, "order {:?}", vec![1, 2]);
    }
}
