//! Coordinate mode: the leader plans, every member answers, the leader
//! synthesizes.

use super::dispatch::dispatch;
use super::strategy::{ExecutionStrategy, RunContext};
use super::types::RunTeamError;
use async_trait::async_trait;
use crew_domain::{
    DispatchMode, Message, Phase, RunEvent, TeamPromptTemplate, TeamRun, evidence_set,
};
use tracing::info;

pub(crate) struct CoordinateStrategy;

#[async_trait]
impl ExecutionStrategy for CoordinateStrategy {
    async fn execute(&self, ctx: &RunContext<'_>, prompt: &str) -> Result<TeamRun, RunTeamError> {
        // Phase 1: delegation plan
        ctx.progress.on_phase_start(&Phase::Planning, 1);
        let plan_prompt = TeamPromptTemplate::coordination_plan_prompt(prompt, &ctx.member_cards());
        let plan = ctx
            .leader
            .ask(Phase::Planning, &plan_prompt)
            .await
            .map_err(|e| RunTeamError::leader(Phase::Planning, e))?;
        ctx.progress.on_task_complete(&Phase::Planning, "leader", true);
        ctx.progress.on_phase_complete(&Phase::Planning);

        // Phase 2: every member gets the original prompt
        let outcomes = dispatch(
            DispatchMode::Sequential,
            ctx.members,
            prompt,
            ctx.limits,
            ctx.progress,
        )
        .await;
        ctx.ensure_not_cancelled()?;
        ctx.check_failure_policy(&outcomes)?;

        // Phase 3: synthesis, with the plan kept in the leader's context
        ctx.progress.on_phase_start(&Phase::Synthesis, 1);
        let evidence = evidence_set(
            &outcomes,
            ctx.config.show_member_responses,
            ctx.config.debug,
        );
        let exchange = [Message::user(plan_prompt), Message::assistant(plan.content)];
        let synthesis = ctx
            .leader
            .ask_after(
                Phase::Synthesis,
                &exchange,
                &TeamPromptTemplate::synthesis_prompt(prompt, &evidence),
            )
            .await
            .map_err(|e| RunTeamError::leader(Phase::Synthesis, e))?;
        ctx.progress.on_task_complete(&Phase::Synthesis, "leader", true);
        ctx.progress.on_phase_complete(&Phase::Synthesis);

        info!(
            "Coordinate synthesis from {} of {} member answers",
            evidence.len(),
            outcomes.len()
        );

        Ok(
            TeamRun::new(prompt, RunEvent::TeamCoordinateResponse, synthesis.content)
                .with_model(Some(synthesis.model))
                .with_outcomes(outcomes),
        )
    }
}
