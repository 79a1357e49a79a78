//! Collaboration mode of a team.
//!
//! [`TeamMode`] is a closed set: it selects which execution strategy the
//! coordinator dispatches to.
//!
//! | Mode | Members invoked | Combination |
//! |------|-----------------|-------------|
//! | `Route` | exactly one | member answer returned verbatim |
//! | `Coordinate` | all (after a leader plan) | leader synthesis |
//! | `Collaborate` | all, same prompt | conflict-aware leader synthesis |

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a team distributes a prompt across its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamMode {
    /// The leader picks a single member to answer.
    Route,
    /// The leader plans, every member answers, the leader synthesizes.
    #[default]
    Coordinate,
    /// Every member answers the same prompt; disagreements are reconciled.
    Collaborate,
}

impl TeamMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamMode::Route => "route",
            TeamMode::Coordinate => "coordinate",
            TeamMode::Collaborate => "collaborate",
        }
    }

    /// Parse a mode string, falling back to [`TeamMode::Coordinate`] for
    /// unknown or empty input.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn all() -> [TeamMode; 3] {
        [TeamMode::Route, TeamMode::Coordinate, TeamMode::Collaborate]
    }
}

impl fmt::Display for TeamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TeamMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "route" => Ok(TeamMode::Route),
            "coordinate" => Ok(TeamMode::Coordinate),
            "collaborate" => Ok(TeamMode::Collaborate),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("route".parse::<TeamMode>().unwrap(), TeamMode::Route);
        assert_eq!(" Collaborate ".parse::<TeamMode>().unwrap(), TeamMode::Collaborate);
        assert_eq!("COORDINATE".parse::<TeamMode>().unwrap(), TeamMode::Coordinate);
    }

    #[test]
    fn test_unknown_and_empty_default_to_coordinate() {
        assert_eq!(TeamMode::parse_or_default(""), TeamMode::Coordinate);
        assert_eq!(TeamMode::parse_or_default("swarm"), TeamMode::Coordinate);
        assert!("swarm".parse::<TeamMode>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for mode in TeamMode::all() {
            assert_eq!(mode.to_string().parse::<TeamMode>().unwrap(), mode);
        }
    }
}
