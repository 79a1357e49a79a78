//! Type definitions for the RunTeam use case.

use crate::ports::language_model::ModelError;
use crew_domain::Phase;
use thiserror::Error;

/// Answer returned by Route mode when the team has no members.
pub const NO_MEMBERS_RESPONSE: &str = "No team members are available to handle this request.";

/// Answer substituted when the final text would otherwise be empty.
pub const EMPTY_ANSWER_RESPONSE: &str = "The team could not produce an answer for this request.";

/// Answer returned by Route mode when the selected member failed.
pub const ROUTE_MEMBER_FAILED_RESPONSE: &str =
    "The selected team member could not answer this request.";

/// Errors that can surface from a team run
///
/// Member, analyzer, resolver and persistence failures never appear here;
/// they degrade inside the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunTeamError {
    #[error("Leader model failed during {phase}: {source}")]
    LeaderFailed {
        phase: Phase,
        #[source]
        source: ModelError,
    },

    #[error("Only {successes} member(s) responded, {required} required")]
    InsufficientResponses { successes: usize, required: usize },

    #[error("Stream aborted: {0}")]
    StreamAborted(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl RunTeamError {
    /// Map a leader-model failure in `phase` to a run error.
    pub(crate) fn leader(phase: Phase, error: ModelError) -> Self {
        match error {
            ModelError::Cancelled => RunTeamError::Cancelled,
            source => RunTeamError::LeaderFailed { phase, source },
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunTeamError::Cancelled)
    }
}
