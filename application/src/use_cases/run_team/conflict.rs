//! Conflict analysis and resolution for Collaborate mode.

use super::leader::Leader;
use super::types::RunTeamError;
use crate::ports::language_model::{ModelError, ModelReply};
use crate::ports::progress::ProgressNotifier;
use crew_domain::{ConflictVerdict, Phase, TeamPromptTemplate, parse_conflict_verdict};
use tracing::{info, warn};

/// Classify a set of answers as consistent or contradictory.
///
/// Fewer than two answers never conflict. A failed analyzer call counts as
/// no conflict; only cancellation is returned as an error.
pub(crate) async fn analyze(
    leader: &Leader<'_>,
    request: &str,
    answers: &[String],
    progress: &dyn ProgressNotifier,
) -> Result<ConflictVerdict, RunTeamError> {
    if answers.len() < 2 {
        return Ok(ConflictVerdict::no_conflict(format!(
            "{} answer(s), nothing to compare",
            answers.len()
        )));
    }

    progress.on_phase_start(&Phase::ConflictAnalysis, 1);
    let prompt = TeamPromptTemplate::conflict_analysis_prompt(request, answers);
    let result = leader.ask(Phase::ConflictAnalysis, &prompt).await;
    progress.on_task_complete(&Phase::ConflictAnalysis, "leader", result.is_ok());
    progress.on_phase_complete(&Phase::ConflictAnalysis);

    match result {
        Ok(reply) => {
            let verdict = parse_conflict_verdict(&reply.content);
            info!("Conflict analysis: has_conflict={}", verdict.has_conflict);
            Ok(verdict)
        }
        Err(ModelError::Cancelled) => Err(RunTeamError::Cancelled),
        Err(e) => {
            warn!("Conflict analysis failed, treating answers as consistent: {}", e);
            Ok(ConflictVerdict::no_conflict(format!("analysis failed: {}", e)))
        }
    }
}

/// Ask the leader for one reconciled answer.
///
/// Returns the trimmed reply. A blank reply is reported as a failure so the
/// caller falls back to standard synthesis.
pub(crate) async fn resolve(
    leader: &Leader<'_>,
    request: &str,
    answers: &[String],
    verdict: &ConflictVerdict,
    progress: &dyn ProgressNotifier,
) -> Result<ModelReply, ModelError> {
    progress.on_phase_start(&Phase::ConflictResolution, 1);
    let prompt =
        TeamPromptTemplate::conflict_resolution_prompt(request, answers, &verdict.rationale);
    let result = leader
        .ask(Phase::ConflictResolution, &prompt)
        .await
        .and_then(|reply| {
            let content = reply.content.trim();
            if content.is_empty() {
                Err(ModelError::RequestFailed("empty resolution".to_string()))
            } else {
                Ok(ModelReply::new(content, reply.model))
            }
        });
    progress.on_task_complete(&Phase::ConflictResolution, "leader", result.is_ok());
    progress.on_phase_complete(&Phase::ConflictResolution);
    result
}
