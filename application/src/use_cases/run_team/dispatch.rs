//! Member dispatch: sequential in member order, or concurrent fan-out
//! gathered in completion order.

use super::limits::{CallLimits, Interrupted};
use crate::ports::member::{Member, MemberError};
use crate::ports::progress::ProgressNotifier;
use crew_domain::{DispatchMode, MemberOutcome, Phase};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{self, JoinSet};
use tracing::{info, warn};

/// Invoke one member under the call limits.
pub(crate) async fn invoke_member(
    member: &dyn Member,
    prompt: &str,
    limits: &CallLimits,
) -> Result<String, MemberError> {
    match limits.guard(member.run(prompt)).await {
        Ok(result) => result,
        Err(Interrupted::Timeout) => Err(MemberError::Timeout),
        Err(Interrupted::Cancelled) => Err(MemberError::Cancelled),
    }
}

fn outcome(index: usize, member: &dyn Member, result: Result<String, MemberError>) -> MemberOutcome {
    match result {
        Ok(content) => {
            info!("Member {} responded successfully", member.name());
            MemberOutcome::success(index, member.name(), member.role(), content)
        }
        Err(e) => {
            warn!("Member {} failed: {}", member.name(), e);
            MemberOutcome::failure(index, member.name(), member.role(), e.to_string())
        }
    }
}

/// Send the same prompt to every member and collect one outcome per member.
pub(crate) async fn dispatch(
    mode: DispatchMode,
    members: &[Arc<dyn Member>],
    prompt: &str,
    limits: &CallLimits,
    progress: &dyn ProgressNotifier,
) -> Vec<MemberOutcome> {
    progress.on_phase_start(&Phase::Dispatch, members.len());
    let outcomes = match mode {
        DispatchMode::Sequential => sequential(members, prompt, limits, progress).await,
        DispatchMode::Concurrent => concurrent(members, prompt, limits, progress).await,
    };
    progress.on_phase_complete(&Phase::Dispatch);
    outcomes
}

async fn sequential(
    members: &[Arc<dyn Member>],
    prompt: &str,
    limits: &CallLimits,
    progress: &dyn ProgressNotifier,
) -> Vec<MemberOutcome> {
    let mut outcomes = Vec::with_capacity(members.len());

    for (index, member) in members.iter().enumerate() {
        let result = invoke_member(member.as_ref(), prompt, limits).await;
        progress.on_task_complete(&Phase::Dispatch, member.name(), result.is_ok());
        outcomes.push(outcome(index, member.as_ref(), result));
    }

    outcomes
}

async fn concurrent(
    members: &[Arc<dyn Member>],
    prompt: &str,
    limits: &CallLimits,
    progress: &dyn ProgressNotifier,
) -> Vec<MemberOutcome> {
    let prompt: Arc<str> = Arc::from(prompt);
    let mut join_set = JoinSet::new();
    let mut slots: HashMap<task::Id, usize> = HashMap::with_capacity(members.len());

    for (index, member) in members.iter().enumerate() {
        let member = Arc::clone(member);
        let prompt = Arc::clone(&prompt);
        let limits = limits.clone();

        let handle = join_set.spawn(async move {
            let result = invoke_member(member.as_ref(), &prompt, &limits).await;
            outcome(index, member.as_ref(), result)
        });
        slots.insert(handle.id(), index);
    }

    // Dropping `join_set` aborts any member still running.
    let mut outcomes = Vec::with_capacity(members.len());
    while let Some(joined) = join_set.join_next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                let Some(&index) = slots.get(&e.id()) else {
                    warn!("Member task {} finished without a known slot", e.id());
                    continue;
                };
                let member = &members[index];
                let reason = if e.is_panic() {
                    "Member task panicked"
                } else {
                    "Member task was aborted"
                };
                warn!("Member {} failed: {}", member.name(), reason);
                MemberOutcome::failure(index, member.name(), member.role(), reason)
            }
        };
        progress.on_task_complete(&Phase::Dispatch, &outcome.member, outcome.is_success());
        outcomes.push(outcome);
    }

    outcomes
}
