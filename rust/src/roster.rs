//! Roster parsing and validation.

use rustc_hash::FxHashSet;

use crate::error::SchedulerError;

/// One team per line; surrounding whitespace trimmed, blank lines dropped.
pub fn parse_roster(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"Team 1" .. "Team n"`.
pub fn numbered_roster(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Team {}", i)).collect()
}

/// Require at least two teams and unique names.
pub fn validate_roster(teams: &[String]) -> Result<(), SchedulerError> {
    if teams.len() < 2 {
        return Err(SchedulerError::InsufficientTeams(teams.len()));
    }
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for team in teams {
        if !seen.insert(team.as_str()) {
            return Err(SchedulerError::DuplicateTeam(team.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roster() {
        let teams = parse_roster("  Aces \n\nBaseliners\n   \nNet Rushers\n");
        assert_eq!(teams, vec!["Aces", "Baseliners", "Net Rushers"]);
        assert!(parse_roster("").is_empty());
    }

    #[test]
    fn test_numbered_roster() {
        assert_eq!(numbered_roster(3), vec!["Team 1", "Team 2", "Team 3"]);
        assert!(numbered_roster(0).is_empty());
    }

    #[test]
    fn test_validate_roster() {
        assert!(validate_roster(&numbered_roster(2)).is_ok());
        assert_eq!(
            validate_roster(&numbered_roster(1)),
            Err(SchedulerError::InsufficientTeams(1))
        );

        let dup = vec!["A".to_string(), "B".to_string(), "A".to_string()];
        assert_eq!(
            validate_roster(&dup),
            Err(SchedulerError::DuplicateTeam("A".to_string()))
        );
    }
}
