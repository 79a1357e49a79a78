//! Collaborate mode: every member answers the same prompt, then a
//! conflict-aware synthesis reconciles the answers.

use super::conflict;
use super::dispatch::dispatch;
use super::strategy::{ExecutionStrategy, RunContext};
use super::types::RunTeamError;
use crate::ports::language_model::{ModelError, ModelReply};
use async_trait::async_trait;
use crew_domain::{Phase, RunEvent, TeamPromptTemplate, TeamRun, evidence_set};
use tracing::warn;

pub(crate) struct CollaborateStrategy;

impl CollaborateStrategy {
    async fn synthesize(
        ctx: &RunContext<'_>,
        prompt: &str,
        evidence: &[String],
    ) -> Result<ModelReply, RunTeamError> {
        ctx.progress.on_phase_start(&Phase::Synthesis, 1);
        let reply = ctx
            .leader
            .ask(
                Phase::Synthesis,
                &TeamPromptTemplate::collaboration_synthesis_prompt(prompt, evidence),
            )
            .await
            .map_err(|e| RunTeamError::leader(Phase::Synthesis, e))?;
        ctx.progress.on_task_complete(&Phase::Synthesis, "leader", true);
        ctx.progress.on_phase_complete(&Phase::Synthesis);
        Ok(reply)
    }
}

#[async_trait]
impl ExecutionStrategy for CollaborateStrategy {
    async fn execute(&self, ctx: &RunContext<'_>, prompt: &str) -> Result<TeamRun, RunTeamError> {
        let mode = ctx.config.dispatch;
        let outcomes = dispatch(mode, ctx.members, prompt, ctx.limits, ctx.progress).await;
        ctx.ensure_not_cancelled()?;
        ctx.check_failure_policy(&outcomes)?;

        let answers: Vec<String> = outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.content.clone())
            .collect();
        let evidence = evidence_set(
            &outcomes,
            ctx.config.show_member_responses,
            ctx.config.debug,
        );

        let verdict = conflict::analyze(&ctx.leader, prompt, &answers, ctx.progress).await?;

        let reply = if verdict.has_conflict {
            match conflict::resolve(&ctx.leader, prompt, &answers, &verdict, ctx.progress).await {
                Ok(resolved) => resolved,
                Err(ModelError::Cancelled) => return Err(RunTeamError::Cancelled),
                Err(e) => {
                    warn!("Conflict resolution failed, using standard synthesis: {}", e);
                    Self::synthesize(ctx, prompt, &evidence).await?
                }
            }
        } else {
            Self::synthesize(ctx, prompt, &evidence).await?
        };

        let event = if mode.is_concurrent() {
            RunEvent::TeamCollaborateAsyncResponse
        } else {
            RunEvent::TeamCollaborateResponse
        };

        Ok(TeamRun::new(prompt, event, reply.content)
            .with_model(Some(reply.model))
            .with_outcomes(outcomes)
            .with_verdict(verdict))
    }
}
