//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod members;
mod output;
mod session;
mod stream;
mod team;

pub use logging::FileLoggingConfig;
pub use members::{FileCommandConfig, FileMemberConfig};
pub use output::FileOutputConfig;
pub use session::FileSessionConfig;
pub use stream::FileStreamConfig;
pub use team::FileTeamConfig;

use crew_application::{ExecutionParams, PersistenceOptions, TeamConfig};
use crew_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Team identity, mode and flags
    pub team: FileTeamConfig,
    /// Leader model backend
    pub leader: FileCommandConfig,
    /// Team members, in order
    pub members: Vec<FileMemberConfig>,
    /// Session binding and persistence
    pub session: FileSessionConfig,
    /// Streaming re-emission
    pub stream: FileStreamConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Mode string parses
    /// 2. Leader and every member have a command
    /// 3. Member list is non-empty and names are unique
    /// 4. The failure policy is reachable with the configured members
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Enum parse validation
        issues.extend(self.team.parse_mode().1);

        // 2. Commands
        if !self.leader.has_command() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingCommand {
                    member: "leader".to_string(),
                },
                "leader.command is not set",
            ));
        }
        for (i, member) in self.members.iter().enumerate() {
            if !member.backend.has_command() {
                let name = if member.name.is_empty() {
                    format!("members[{}]", i)
                } else {
                    member.name.clone()
                };
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingCommand {
                        member: name.clone(),
                    },
                    format!("member '{}' has no command", name),
                ));
            }
        }

        // 3. Member set
        if self.members.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoMembers,
                "no [[members]] configured; route mode will answer with a placeholder",
            ));
        }
        let mut seen = HashSet::new();
        for member in &self.members {
            if !seen.insert(member.name.as_str()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicateMemberName {
                        member: member.name.clone(),
                    },
                    format!(
                        "member name '{}' is used more than once; routing reaches only the first",
                        member.name
                    ),
                ));
            }
        }

        // 4. Failure policy
        let required = self.team.min_successful_members;
        if required > self.members.len() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnreachableFailurePolicy {
                    required,
                    members: self.members.len(),
                },
                format!(
                    "team.min_successful_members = {} but only {} member(s) configured",
                    required,
                    self.members.len()
                ),
            ));
        }

        issues
    }

    /// Convert into the application-level team configuration.
    pub fn to_team_config(&self) -> TeamConfig {
        let execution = ExecutionParams::default()
            .with_call_timeout(self.team.call_timeout())
            .with_history_window(self.session.history_window)
            .with_stream_chunking(self.stream.chunk_chars, self.stream.chunk_delay());

        TeamConfig::new(self.team.profile())
            .with_mode(self.team.parse_mode().0)
            .with_async(self.team.is_async)
            .with_show_member_responses(self.team.show_member_responses)
            .with_debug(self.team.debug)
            .with_failure_policy(self.team.failure_policy())
            .with_session(self.session.binding())
            .with_persistence(PersistenceOptions {
                enable_memories: self.session.enable_memories,
                enable_summaries: self.session.enable_summaries,
            })
            .with_execution(execution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_domain::{DispatchMode, FailurePolicy, OutputFormat, TeamMode};
    use std::time::Duration;

    const FULL: &str = r#"
[team]
name = "desk"
role = "research"
mode = "collaborate"
async = true
min_successful_members = 1

[leader]
command = "bridge"

[[members]]
name = "a"
command = "bridge"

[[members]]
name = "b"
command = "bridge"

[session]
id = "s-9"
user_id = "u-9"
history_window = 6

[stream]
chunk_chars = 8
chunk_delay_ms = 0

[output]
format = "full"
"#;

    #[test]
    fn test_deserialize_full_config() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        assert_eq!(config.team.name, "desk");
        assert_eq!(config.members.len(), 2);
        assert_eq!(config.session.id.as_deref(), Some("s-9"));
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_to_team_config() {
        let config: FileConfig = toml::from_str(FULL).unwrap();
        let team = config.to_team_config();
        assert_eq!(team.profile.name, "desk");
        assert_eq!(team.mode, TeamMode::Collaborate);
        assert_eq!(team.dispatch, DispatchMode::Concurrent);
        assert_eq!(team.failure_policy, FailurePolicy::RequireSuccesses(1));
        assert_eq!(team.session.user_key(), "u-9");
        assert_eq!(team.execution.history_window, 6);
        assert_eq!(team.execution.stream_chunk_chars, 8);
        assert_eq!(team.execution.stream_chunk_delay, Duration::ZERO);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.members.is_empty());
        assert_eq!(config.stream.chunk_chars, 20);
        assert_eq!(config.session.history_window, 20);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_default_config() {
        let issues = FileConfig::default().validate();
        let codes: Vec<&ConfigIssueCode> = issues.iter().map(|i| &i.code).collect();
        assert!(codes.contains(&&ConfigIssueCode::NoMembers));
        assert!(codes.contains(&&ConfigIssueCode::MissingCommand {
            member: "leader".to_string()
        }));
    }

    #[test]
    fn test_validate_member_problems() {
        let toml_str = r#"
[team]
min_successful_members = 3

[leader]
command = "bridge"

[[members]]
name = "twin"
command = "bridge"

[[members]]
name = "twin"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert!(issues.iter().any(|i| i.code
            == ConfigIssueCode::DuplicateMemberName {
                member: "twin".to_string()
            }
            && !i.is_error()));
        assert!(issues.iter().any(|i| i.code
            == ConfigIssueCode::MissingCommand {
                member: "twin".to_string()
            }
            && i.is_error()));
        assert!(issues.iter().any(|i| i.code
            == ConfigIssueCode::UnreachableFailurePolicy {
                required: 3,
                members: 2
            }));
    }
}
