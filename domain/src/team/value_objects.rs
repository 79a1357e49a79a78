//! Team value objects - immutable result types for a single run.
//!
//! - [`MemberOutcome`] - one member's answer (or failure) for a run
//! - [`ConflictVerdict`] - whether member answers contradict each other
//! - [`TeamRun`] - everything known about a finished run

use super::event::RunEvent;
use crate::core::model::Model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator placed between member outputs inside synthesis prompts.
pub const EVIDENCE_SEPARATOR: &str = "\n\n---\n\n";

/// Result of invoking one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberOutcome {
    /// Position of the member in the team's member list
    pub index: usize,
    pub member: String,
    pub role: String,
    /// The response content (empty on failure)
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MemberOutcome {
    pub fn success(
        index: usize,
        member: impl Into<String>,
        role: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            index,
            member: member.into(),
            role: role.into(),
            content: content.into(),
            error: None,
        }
    }

    pub fn failure(
        index: usize,
        member: impl Into<String>,
        role: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            index,
            member: member.into(),
            role: role.into(),
            content: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Render this outcome as an entry of the evidence set given to the leader.
    ///
    /// Failures only appear (as diagnostic text) when `debug` is set.
    pub fn evidence_entry(&self, show_member_responses: bool, debug: bool) -> Option<String> {
        match &self.error {
            None if show_member_responses => Some(format!(
                "Member {} ({}):\n{}",
                self.member, self.role, self.content
            )),
            None => Some(self.content.clone()),
            Some(error) if debug => Some(format!(
                "[debug] member {} failed: {}",
                self.member, error
            )),
            Some(_) => None,
        }
    }
}

/// Build the evidence set for synthesis from member outcomes, keeping their order.
pub fn evidence_set(
    outcomes: &[MemberOutcome],
    show_member_responses: bool,
    debug: bool,
) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|o| o.evidence_entry(show_member_responses, debug))
        .collect()
}

/// Count of outcomes that succeeded.
pub fn success_count(outcomes: &[MemberOutcome]) -> usize {
    outcomes.iter().filter(|o| o.is_success()).count()
}

/// Outcome of conflict analysis. Computed fresh for every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictVerdict {
    pub has_conflict: bool,
    /// Analyzer rationale (raw leader output, or the reason analysis was skipped)
    pub rationale: String,
}

impl ConflictVerdict {
    pub fn no_conflict(rationale: impl Into<String>) -> Self {
        Self {
            has_conflict: false,
            rationale: rationale.into(),
        }
    }

    pub fn conflict(rationale: impl Into<String>) -> Self {
        Self {
            has_conflict: true,
            rationale: rationale.into(),
        }
    }
}

/// A finished team run.
///
/// Never persisted as-is: the prompt and final text are projected into the
/// session history after a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRun {
    pub prompt: String,
    pub event: RunEvent,
    /// Final answer; never empty for a successful run
    pub content: String,
    /// Model behind the last leader call, if any was made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,
    /// Member outcomes in the order they were gathered
    pub member_outcomes: Vec<MemberOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<ConflictVerdict>,
    pub created_at: DateTime<Utc>,
}

impl TeamRun {
    pub fn new(prompt: impl Into<String>, event: RunEvent, content: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            event,
            content: content.into(),
            model: None,
            member_outcomes: Vec::new(),
            verdict: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_model(mut self, model: Option<Model>) -> Self {
        self.model = model;
        self
    }

    pub fn with_outcomes(mut self, outcomes: Vec<MemberOutcome>) -> Self {
        self.member_outcomes = outcomes;
        self
    }

    pub fn with_verdict(mut self, verdict: ConflictVerdict) -> Self {
        self.verdict = Some(verdict);
        self
    }

    pub fn successful_members(&self) -> usize {
        success_count(&self.member_outcomes)
    }
}
