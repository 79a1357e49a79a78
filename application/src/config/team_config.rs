//! Team configuration container.
//!
//! [`TeamConfig`] is built once at startup (usually from the TOML file
//! config) and handed to the [`TeamBuilder`](crate::use_cases::run_team::TeamBuilder).
//! It is immutable for the lifetime of the team.

use crate::config::ExecutionParams;
use crew_domain::{DispatchMode, FailurePolicy, SessionBinding, TeamMode, TeamProfile};

/// Which optional records the memory adapter is asked to write after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceOptions {
    /// Create a standalone memory of every (prompt, answer) pair.
    pub enable_memories: bool,
    /// Regenerate the rolling session summary after every run.
    pub enable_summaries: bool,
}

impl Default for PersistenceOptions {
    fn default() -> Self {
        Self {
            enable_memories: false,
            enable_summaries: true,
        }
    }
}

/// Static configuration of a team.
#[derive(Debug, Clone, Default)]
pub struct TeamConfig {
    pub profile: TeamProfile,
    pub mode: TeamMode,
    /// Collaborate-mode dispatch (`async` flag)
    pub dispatch: DispatchMode,
    /// Label member outputs with the member name and role in synthesis prompts
    pub show_member_responses: bool,
    /// Keep member failures as diagnostic text and log session misses
    pub debug: bool,
    pub failure_policy: FailurePolicy,
    pub session: SessionBinding,
    pub persistence: PersistenceOptions,
    pub execution: ExecutionParams,
}

impl TeamConfig {
    pub fn new(profile: TeamProfile) -> Self {
        Self {
            profile,
            ..Default::default()
        }
    }

    // ==================== Builder Methods (init-time) ====================

    pub fn with_mode(mut self, mode: TeamMode) -> Self {
        self.mode = mode;
        self
    }

    /// Run Collaborate-mode members concurrently (`true`) or in order (`false`).
    pub fn with_async(mut self, is_async: bool) -> Self {
        self.dispatch = DispatchMode::from_async_flag(is_async);
        self
    }

    pub fn with_show_member_responses(mut self, show: bool) -> Self {
        self.show_member_responses = show;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_session(mut self, session: SessionBinding) -> Self {
        self.session = session;
        self
    }

    pub fn with_persistence(mut self, persistence: PersistenceOptions) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TeamConfig::new(TeamProfile::new("t"));
        assert_eq!(config.mode, TeamMode::Coordinate);
        assert_eq!(config.dispatch, DispatchMode::Sequential);
        assert!(!config.debug);
        assert!(!config.session.is_bound());
        assert_eq!(config.failure_policy, FailurePolicy::FailOpen);
    }

    #[test]
    fn test_builder() {
        let config = TeamConfig::new(TeamProfile::new("t"))
            .with_mode(TeamMode::Collaborate)
            .with_async(true)
            .with_debug(true)
            .with_session(SessionBinding::new("s").with_user("u"));
        assert_eq!(config.dispatch, DispatchMode::Concurrent);
        assert!(config.debug);
        assert_eq!(config.session.user_key(), "u");
    }
}
