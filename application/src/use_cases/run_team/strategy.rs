//! Execution strategies, one per [`TeamMode`].

use super::collaborate::CollaborateStrategy;
use super::coordinate::CoordinateStrategy;
use super::leader::Leader;
use super::limits::CallLimits;
use super::route::RouteStrategy;
use super::types::RunTeamError;
use crate::config::TeamConfig;
use crate::ports::member::Member;
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use crew_domain::{FailurePolicy, MemberCard, MemberOutcome, TeamMode, TeamRun, success_count};
use std::sync::Arc;
use tracing::warn;

/// Everything a strategy needs for one run.
pub(crate) struct RunContext<'a> {
    pub(crate) config: &'a TeamConfig,
    pub(crate) members: &'a [Arc<dyn Member>],
    pub(crate) leader: Leader<'a>,
    pub(crate) limits: &'a CallLimits,
    pub(crate) progress: &'a dyn ProgressNotifier,
}

impl RunContext<'_> {
    pub(crate) fn member_cards(&self) -> Vec<MemberCard<'_>> {
        self.members.iter().map(|m| (m.name(), m.role())).collect()
    }

    /// Fail fast when the caller cancelled while members were running.
    pub(crate) fn ensure_not_cancelled(&self) -> Result<(), RunTeamError> {
        if self.limits.is_cancelled() {
            Err(RunTeamError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Apply the configured failure policy to gathered member outcomes.
    pub(crate) fn check_failure_policy(&self, outcomes: &[MemberOutcome]) -> Result<(), RunTeamError> {
        let successes = success_count(outcomes);
        if self.config.failure_policy.is_satisfied(successes) {
            return Ok(());
        }
        let required = match self.config.failure_policy {
            FailurePolicy::RequireSuccesses(n) => n,
            FailurePolicy::FailOpen => 0,
        };
        warn!(
            "{} of {} members succeeded, policy requires {}",
            successes,
            outcomes.len(),
            required
        );
        Err(RunTeamError::InsufficientResponses {
            successes,
            required,
        })
    }
}

/// How a team distributes a prompt and combines the answers.
#[async_trait]
pub(crate) trait ExecutionStrategy: Send + Sync {
    async fn execute(&self, ctx: &RunContext<'_>, prompt: &str) -> Result<TeamRun, RunTeamError>;
}

pub(crate) fn strategy_for(mode: TeamMode) -> Box<dyn ExecutionStrategy> {
    match mode {
        TeamMode::Route => Box::new(RouteStrategy),
        TeamMode::Coordinate => Box::new(CoordinateStrategy),
        TeamMode::Collaborate => Box::new(CollaborateStrategy),
    }
}
