//! Route mode: the leader picks exactly one member, whose answer is
//! returned verbatim.

use super::dispatch::invoke_member;
use super::strategy::{ExecutionStrategy, RunContext};
use super::types::{NO_MEMBERS_RESPONSE, ROUTE_MEMBER_FAILED_RESPONSE, RunTeamError};
use crate::ports::member::MemberError;
use async_trait::async_trait;
use crew_domain::{
    MemberOutcome, Phase, RunEvent, TeamPromptTemplate, TeamRun, parse_route_selection,
};
use tracing::{debug, info, warn};

pub(crate) struct RouteStrategy;

#[async_trait]
impl ExecutionStrategy for RouteStrategy {
    async fn execute(&self, ctx: &RunContext<'_>, prompt: &str) -> Result<TeamRun, RunTeamError> {
        if ctx.members.is_empty() {
            warn!("Route requested with no members");
            return Ok(TeamRun::new(prompt, RunEvent::TeamError, NO_MEMBERS_RESPONSE));
        }

        ctx.progress.on_phase_start(&Phase::Routing, 1);
        let cards = ctx.member_cards();
        let routing_prompt = TeamPromptTemplate::route_prompt(prompt, &cards);
        let reply = ctx
            .leader
            .ask(Phase::Routing, &routing_prompt)
            .await
            .map_err(|e| RunTeamError::leader(Phase::Routing, e))?;
        ctx.progress.on_task_complete(&Phase::Routing, "leader", true);
        ctx.progress.on_phase_complete(&Phase::Routing);

        let names: Vec<&str> = cards.iter().map(|(name, _)| *name).collect();
        let index = parse_route_selection(&reply.content, &names).unwrap_or_else(|| {
            debug!(
                "Could not parse member selection from {:?}, using first member",
                reply.content
            );
            0
        });
        let member = &ctx.members[index];
        info!("Routing to member {} ({})", member.name(), member.role());

        ctx.progress.on_phase_start(&Phase::Dispatch, 1);
        let result = invoke_member(member.as_ref(), prompt, ctx.limits).await;
        ctx.progress
            .on_task_complete(&Phase::Dispatch, member.name(), result.is_ok());
        ctx.progress.on_phase_complete(&Phase::Dispatch);

        let run = match result {
            Ok(content) => TeamRun::new(prompt, RunEvent::TeamRouteResponse, content.clone())
                .with_outcomes(vec![MemberOutcome::success(
                    index,
                    member.name(),
                    member.role(),
                    content,
                )]),
            Err(MemberError::Cancelled) => return Err(RunTeamError::Cancelled),
            Err(e) => {
                warn!("Routed member {} failed: {}", member.name(), e);
                let content = if ctx.config.debug {
                    format!("[debug] member {} failed: {}", member.name(), e)
                } else {
                    ROUTE_MEMBER_FAILED_RESPONSE.to_string()
                };
                TeamRun::new(prompt, RunEvent::TeamError, content).with_outcomes(vec![
                    MemberOutcome::failure(index, member.name(), member.role(), e.to_string()),
                ])
            }
        };

        Ok(run.with_model(Some(reply.model)))
    }
}
