//! Team configuration from TOML (`[team]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [team]
//! name = "research-desk"
//! role = "answers research questions"
//! mode = "collaborate"      # "route", "coordinate" (default), "collaborate"
//! async = true              # collaborate: run members concurrently
//! min_successful_members = 2
//! call_timeout_secs = 120
//! ```

use crew_domain::{ConfigIssue, ConfigIssueCode, FailurePolicy, TeamMode, TeamProfile};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw team configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTeamConfig {
    pub name: String,
    pub role: String,
    pub description: String,
    /// Collaboration mode: "route", "coordinate", "collaborate"
    pub mode: String,
    /// Run Collaborate-mode members concurrently
    #[serde(rename = "async")]
    pub is_async: bool,
    /// Label member outputs with name and role in synthesis prompts
    pub show_member_responses: bool,
    /// Keep member failures as diagnostic text
    pub debug: bool,
    /// Abort before synthesis when fewer members succeed (0 = never abort)
    pub min_successful_members: usize,
    /// Deadline for every leader and member call
    pub call_timeout_secs: Option<u64>,
}

impl Default for FileTeamConfig {
    fn default() -> Self {
        Self {
            name: "crew".to_string(),
            role: String::new(),
            description: String::new(),
            mode: TeamMode::default().as_str().to_string(),
            is_async: false,
            show_member_responses: false,
            debug: false,
            min_successful_members: 0,
            call_timeout_secs: None,
        }
    }
}

impl FileTeamConfig {
    pub fn profile(&self) -> TeamProfile {
        TeamProfile::new(self.name.clone())
            .with_role(self.role.clone())
            .with_description(self.description.clone())
    }

    /// Parse the mode string. Unknown values fall back to Coordinate with a warning.
    pub fn parse_mode(&self) -> (TeamMode, Vec<ConfigIssue>) {
        match self.mode.parse::<TeamMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => (
                TeamMode::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "team.mode".to_string(),
                        value: self.mode.clone(),
                        valid_values: TeamMode::all()
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                    },
                    format!(
                        "team.mode: unknown value '{}', falling back to '{}'",
                        self.mode,
                        TeamMode::default()
                    ),
                )],
            ),
        }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        match self.min_successful_members {
            0 => FailurePolicy::FailOpen,
            n => FailurePolicy::RequireSuccesses(n),
        }
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs.map(Duration::from_secs)
    }
}
