//! Run Team use case
//!
//! Orchestrates one team run: dispatch to the strategy selected by the
//! team's mode, normalize the final answer, record the turn and persist it
//! through the session connector.

mod collaborate;
mod conflict;
mod coordinate;
mod dispatch;
mod leader;
mod limits;
mod route;
mod session;
mod strategy;
pub mod types;

#[cfg(test)]
mod test_support;

use crate::config::TeamConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::language_model::LanguageModel;
use crate::ports::member::{ChunkSink, Member, MemberError};
use crate::ports::memory_store::MemoryStore;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::session_storage::SessionStorage;
use async_trait::async_trait;
use chrono::Utc;
use crew_domain::core::string::char_chunks;
use crew_domain::{Message, Phase, SessionMetadata, SessionSummary, TeamRun};
use leader::Leader;
use limits::{CallLimits, Interrupted};
use session::{SessionConnector, SessionState};
use std::sync::Arc;
use strategy::{RunContext, strategy_for};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub use types::{
    EMPTY_ANSWER_RESPONSE, NO_MEMBERS_RESPONSE, ROUTE_MEMBER_FAILED_RESPONSE, RunTeamError,
};

/// Builder for [`Team`]
///
/// `build` is async because it loads the bound session, if any.
pub struct TeamBuilder {
    config: TeamConfig,
    leader: Arc<dyn LanguageModel>,
    members: Vec<Arc<dyn Member>>,
    storage: Option<Arc<dyn SessionStorage>>,
    memory: Option<Arc<dyn MemoryStore>>,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl TeamBuilder {
    pub fn new(config: TeamConfig, leader: Arc<dyn LanguageModel>) -> Self {
        Self {
            config,
            leader,
            members: Vec::new(),
            storage: None,
            memory: None,
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn member(mut self, member: Arc<dyn Member>) -> Self {
        self.members.push(member);
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = Arc<dyn Member>>) -> Self {
        self.members.extend(members);
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_memory(mut self, memory: Arc<dyn MemoryStore>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Set a cancellation token; cancelling it aborts in-flight leader and member calls.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub async fn build(self) -> Team {
        let connector = SessionConnector::new(
            self.config.session.clone(),
            self.storage,
            self.memory,
            self.config.persistence,
            self.config.debug,
        );
        let state = connector.load().await;

        Team {
            config: self.config,
            leader: self.leader,
            members: self.members,
            connector,
            conversation_logger: self.conversation_logger,
            cancellation_token: self.cancellation_token,
            state: Mutex::new(state),
        }
    }
}

/// A group of members answering as one unit.
///
/// A team is itself a [`Member`], so teams can be members of other teams.
pub struct Team {
    config: TeamConfig,
    leader: Arc<dyn LanguageModel>,
    members: Vec<Arc<dyn Member>>,
    connector: SessionConnector,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
    /// Guards the load/append/save sequence across concurrent runs
    state: Mutex<SessionState>,
}

impl Team {
    pub fn builder(config: TeamConfig, leader: Arc<dyn LanguageModel>) -> TeamBuilder {
        TeamBuilder::new(config, leader)
    }

    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Snapshot of the in-memory message history.
    pub async fn history(&self) -> Vec<Message> {
        self.state.lock().await.history.clone()
    }

    pub async fn summary(&self) -> Option<SessionSummary> {
        self.state.lock().await.summary.clone()
    }

    /// Run the team and return only the final text.
    pub async fn run(&self, prompt: &str) -> Result<String, RunTeamError> {
        Ok(self.execute(prompt).await?.content)
    }

    /// Run the team and re-emit the final text in fixed-size chunks.
    pub async fn run_stream(
        &self,
        prompt: &str,
        on_chunk: &mut ChunkSink<'_>,
    ) -> Result<(), RunTeamError> {
        self.execute_stream(prompt, on_chunk, &NoProgress).await?;
        Ok(())
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, prompt: &str) -> Result<TeamRun, RunTeamError> {
        self.execute_with_progress(prompt, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        prompt: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<TeamRun, RunTeamError> {
        let mode = self.config.mode;
        info!(
            "Team {} running in {} mode with {} members",
            self.config.profile.name,
            mode,
            self.members.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "team_run_started",
            serde_json::json!({
                "team": self.config.profile.name,
                "mode": mode.as_str(),
                "members": self.members.len(),
                "prompt": prompt,
            }),
        ));

        let preamble = {
            let state = self.state.lock().await;
            Leader::preamble(
                &self.config.profile,
                state.summary.as_ref(),
                &state.history,
                self.config.execution.history_window,
            )
        };
        let limits = CallLimits::new(
            self.config.execution.call_timeout,
            self.cancellation_token.clone(),
        );
        let ctx = RunContext {
            config: &self.config,
            members: &self.members,
            leader: Leader::new(self.leader.as_ref(), preamble, &limits),
            limits: &limits,
            progress,
        };

        let mut run = strategy_for(mode).execute(&ctx, prompt).await?;

        if run.content.trim().is_empty() {
            warn!("Team {} produced an empty answer", self.config.profile.name);
            run.content = EMPTY_ANSWER_RESPONSE.to_string();
        }

        self.log_run(&run);
        self.record_turn(prompt, &run, progress).await;
        Ok(run)
    }

    /// Execute, then stream the final text through `on_chunk`.
    pub async fn execute_stream(
        &self,
        prompt: &str,
        on_chunk: &mut ChunkSink<'_>,
        progress: &dyn ProgressNotifier,
    ) -> Result<TeamRun, RunTeamError> {
        let run = self.execute_with_progress(prompt, progress).await?;

        let limits = CallLimits::new(None, self.cancellation_token.clone());
        let delay = self.config.execution.stream_chunk_delay;

        for (i, chunk) in char_chunks(&run.content, self.config.execution.stream_chunk_chars)
            .into_iter()
            .enumerate()
        {
            if i > 0 && !delay.is_zero() {
                if let Err(Interrupted::Cancelled) = limits.guard(tokio::time::sleep(delay)).await
                {
                    return Err(RunTeamError::Cancelled);
                }
            }
            on_chunk(chunk).map_err(|e| match e {
                MemberError::StreamAborted(reason) => RunTeamError::StreamAborted(reason),
                other => RunTeamError::StreamAborted(other.to_string()),
            })?;
        }

        Ok(run)
    }

    fn log_run(&self, run: &TeamRun) {
        for outcome in &run.member_outcomes {
            self.conversation_logger.log(ConversationEvent::new(
                "member_response",
                serde_json::json!({
                    "member": outcome.member,
                    "role": outcome.role,
                    "success": outcome.is_success(),
                    "content": outcome.content,
                    "error": outcome.error,
                }),
            ));
        }
        if let Some(verdict) = &run.verdict {
            self.conversation_logger.log(ConversationEvent::new(
                "conflict_verdict",
                serde_json::json!({
                    "has_conflict": verdict.has_conflict,
                    "rationale": verdict.rationale,
                }),
            ));
        }
        self.conversation_logger.log(ConversationEvent::new(
            "team_run_completed",
            serde_json::json!({
                "team": self.config.profile.name,
                "event": run.event.as_str(),
                "model": run.model.as_ref().map(|m| m.to_string()),
                "successful_members": run.successful_members(),
                "content": run.content,
            }),
        ));
    }

    /// Append the turn to history and persist it, holding the state lock throughout.
    async fn record_turn(&self, prompt: &str, run: &TeamRun, progress: &dyn ProgressNotifier) {
        let mut state = self.state.lock().await;
        state.append_turn(prompt, &run.content);

        if !self.connector.is_active() {
            return;
        }

        progress.on_phase_start(&Phase::Persistence, 1);
        let metadata = SessionMetadata {
            team_name: self.config.profile.name.clone(),
            mode: self.config.mode,
            member_count: self.members.len(),
            last_interaction: Utc::now(),
        };
        self.connector
            .save(&mut state, prompt, &run.content, metadata)
            .await;
        progress.on_phase_complete(&Phase::Persistence);
    }
}

impl From<RunTeamError> for MemberError {
    fn from(error: RunTeamError) -> Self {
        match error {
            RunTeamError::Cancelled => MemberError::Cancelled,
            RunTeamError::StreamAborted(reason) => MemberError::StreamAborted(reason),
            other => MemberError::Failed(other.to_string()),
        }
    }
}

#[async_trait]
impl Member for Team {
    fn name(&self) -> &str {
        &self.config.profile.name
    }

    fn role(&self) -> &str {
        &self.config.profile.role
    }

    async fn run(&self, prompt: &str) -> Result<String, MemberError> {
        Ok(self.execute(prompt).await?.content)
    }

    async fn run_stream(
        &self,
        prompt: &str,
        on_chunk: &mut ChunkSink<'_>,
    ) -> Result<(), MemberError> {
        self.execute_stream(prompt, on_chunk, &NoProgress).await?;
        Ok(())
    }
}
