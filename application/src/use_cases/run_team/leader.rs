//! Leader-model calls with team context.

use super::limits::{CallLimits, Interrupted};
use crate::ports::language_model::{LanguageModel, ModelError, ModelReply};
use crew_domain::{Message, Phase, SessionSummary, TeamProfile, TeamPromptTemplate};
use tracing::debug;

/// Leader model bound to the context of one run.
///
/// Every call sends the same preamble (team description, session summary,
/// recent history) followed by the phase prompt.
pub(crate) struct Leader<'a> {
    model: &'a dyn LanguageModel,
    preamble: Vec<Message>,
    limits: &'a CallLimits,
}

impl<'a> Leader<'a> {
    pub(crate) fn new(
        model: &'a dyn LanguageModel,
        preamble: Vec<Message>,
        limits: &'a CallLimits,
    ) -> Self {
        Self {
            model,
            preamble,
            limits,
        }
    }

    /// Build the context sent ahead of every phase prompt.
    pub(crate) fn preamble(
        profile: &TeamProfile,
        summary: Option<&SessionSummary>,
        history: &[Message],
        history_window: usize,
    ) -> Vec<Message> {
        let mut messages = vec![Message::system(TeamPromptTemplate::leader_system(profile))];

        if let Some(summary) = summary.filter(|s| !s.summary.trim().is_empty()) {
            messages.push(Message::system(format!(
                "Summary of the conversation so far:\n{}",
                summary.summary
            )));
        }

        let start = history.len().saturating_sub(history_window);
        messages.extend(history[start..].iter().cloned());
        messages
    }

    pub(crate) async fn ask(&self, phase: Phase, prompt: &str) -> Result<ModelReply, ModelError> {
        self.ask_after(phase, &[], prompt).await
    }

    /// Ask with earlier exchanges of the same run placed before the prompt.
    pub(crate) async fn ask_after(
        &self,
        phase: Phase,
        exchange: &[Message],
        prompt: &str,
    ) -> Result<ModelReply, ModelError> {
        let mut messages = self.preamble.clone();
        messages.extend(exchange.iter().cloned());
        messages.push(Message::user(prompt));

        debug!(
            "Leader call for {} ({} messages) on {}",
            phase,
            messages.len(),
            self.model.model()
        );

        match self.limits.guard(self.model.invoke(&messages)).await {
            Ok(reply) => reply,
            Err(Interrupted::Timeout) => Err(ModelError::Timeout),
            Err(Interrupted::Cancelled) => Err(ModelError::Cancelled),
        }
    }
}
