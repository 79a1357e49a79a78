//! Team domain entities

use serde::{Deserialize, Serialize};

/// Identity of a team as presented to the leader model and to parent teams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub name: String,
    pub role: String,
    pub description: String,
}

impl TeamProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Session a team is bound to.
///
/// An empty `session_id` means the team is unbound: nothing is loaded on
/// construction and nothing is persisted after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBinding {
    pub session_id: String,
    pub user_id: Option<String>,
}

impl SessionBinding {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn is_bound(&self) -> bool {
        !self.session_id.trim().is_empty()
    }

    /// User id used for adapter keys; adapters keyed by user get `""` when unset.
    pub fn user_key(&self) -> &str {
        self.user_id.as_deref().unwrap_or("")
    }
}

/// How members are dispatched in Collaborate mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One member at a time, in member order.
    #[default]
    Sequential,
    /// All members at once; outputs arrive in completion order.
    Concurrent,
}

impl DispatchMode {
    pub fn from_async_flag(is_async: bool) -> Self {
        if is_async {
            DispatchMode::Concurrent
        } else {
            DispatchMode::Sequential
        }
    }

    pub fn is_concurrent(&self) -> bool {
        matches!(self, DispatchMode::Concurrent)
    }
}

/// What to do when members fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Member failures are dropped (or shown as diagnostics in debug mode);
    /// synthesis runs even when every member failed.
    #[default]
    FailOpen,
    /// Abort before synthesis unless at least this many members succeeded.
    RequireSuccesses(usize),
}

impl FailurePolicy {
    /// Returns `true` when `successes` satisfies the policy.
    pub fn is_satisfied(&self, successes: usize) -> bool {
        match self {
            FailurePolicy::FailOpen => true,
            FailurePolicy::RequireSuccesses(min) => successes >= *min,
        }
    }
}

/// Phase of a team run, reported to progress notifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Routing,
    Planning,
    Dispatch,
    ConflictAnalysis,
    ConflictResolution,
    Synthesis,
    Persistence,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Routing => "routing",
            Phase::Planning => "planning",
            Phase::Dispatch => "dispatch",
            Phase::ConflictAnalysis => "conflict_analysis",
            Phase::ConflictResolution => "conflict_resolution",
            Phase::Synthesis => "synthesis",
            Phase::Persistence => "persistence",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Routing => "Routing",
            Phase::Planning => "Delegation Planning",
            Phase::Dispatch => "Member Dispatch",
            Phase::ConflictAnalysis => "Conflict Analysis",
            Phase::ConflictResolution => "Conflict Resolution",
            Phase::Synthesis => "Synthesis",
            Phase::Persistence => "Session Persistence",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
