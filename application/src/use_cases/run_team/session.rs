//! Session connector: loads prior state when a team is built and persists
//! each completed turn.
//!
//! Every adapter failure is logged and swallowed. A run's success never
//! depends on whether its state was recorded.

use crate::config::PersistenceOptions;
use crate::ports::memory_store::MemoryStore;
use crate::ports::session_storage::SessionStorage;
use chrono::{DateTime, Utc};
use crew_domain::{Message, SessionBinding, SessionMetadata, SessionRecord, SessionSummary};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// In-memory conversation state of a team.
#[derive(Debug, Clone, Default)]
pub(crate) struct SessionState {
    pub(crate) summary: Option<SessionSummary>,
    pub(crate) history: Vec<Message>,
    pub(crate) created_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub(crate) fn append_turn(&mut self, prompt: &str, answer: &str) {
        self.history.push(Message::user(prompt));
        self.history.push(Message::assistant(answer));
    }
}

pub(crate) struct SessionConnector {
    binding: SessionBinding,
    storage: Option<Arc<dyn SessionStorage>>,
    memory: Option<Arc<dyn MemoryStore>>,
    options: PersistenceOptions,
    debug: bool,
}

impl SessionConnector {
    pub(crate) fn new(
        binding: SessionBinding,
        storage: Option<Arc<dyn SessionStorage>>,
        memory: Option<Arc<dyn MemoryStore>>,
        options: PersistenceOptions,
        debug: bool,
    ) -> Self {
        Self {
            binding,
            storage,
            memory,
            options,
            debug,
        }
    }

    /// A session id is set and at least one adapter is configured.
    pub(crate) fn is_active(&self) -> bool {
        self.binding.is_bound() && (self.storage.is_some() || self.memory.is_some())
    }

    pub(crate) async fn load(&self) -> SessionState {
        let mut state = SessionState::default();
        if !self.is_active() {
            return state;
        }

        let session_id = self.binding.session_id.as_str();

        if let Some(memory) = &self.memory {
            match memory
                .get_session_summary(self.binding.user_key(), session_id)
                .await
            {
                Ok(Some(summary)) => {
                    info!("Loaded summary for session {}", session_id);
                    state.summary = Some(summary);
                }
                Ok(None) => {
                    if self.debug {
                        debug!("No summary stored for session {}", session_id);
                    }
                }
                Err(e) => warn!("Failed to load summary for session {}: {}", session_id, e),
            }
        }

        if let Some(storage) = &self.storage {
            match storage
                .read(session_id, self.binding.user_id.as_deref())
                .await
            {
                Ok(Some(record)) => {
                    info!(
                        "Loaded session {} with {} messages",
                        session_id,
                        record.messages.len()
                    );
                    state.history = record.messages;
                    state.created_at = Some(record.created_at);
                }
                Ok(None) => {
                    if self.debug {
                        debug!("No stored history for session {}", session_id);
                    }
                }
                Err(e) => warn!("Failed to load session {}: {}", session_id, e),
            }
        }

        state
    }

    /// Persist the latest turn, which must already be in `state.history`.
    pub(crate) async fn save(
        &self,
        state: &mut SessionState,
        prompt: &str,
        answer: &str,
        metadata: SessionMetadata,
    ) {
        if !self.is_active() {
            return;
        }

        let session_id = self.binding.session_id.as_str();
        let user_key = self.binding.user_key();

        if let Some(memory) = &self.memory {
            if self.options.enable_memories {
                if let Err(e) = memory.create_memory(user_key, prompt, answer).await {
                    warn!("Failed to create memory for session {}: {}", session_id, e);
                }
            }
            if self.options.enable_summaries {
                match memory
                    .create_session_summary(user_key, session_id, &state.history)
                    .await
                {
                    Ok(summary) => state.summary = Some(summary),
                    Err(e) => warn!("Failed to update summary for session {}: {}", session_id, e),
                }
            }
        }

        if let Some(storage) = &self.storage {
            let now = Utc::now();
            let record = SessionRecord {
                session_id: session_id.to_string(),
                user_id: self.binding.user_id.clone(),
                messages: state.history.clone(),
                metadata,
                created_at: state.created_at.unwrap_or(now),
                updated_at: now,
            };
            match storage.upsert(record).await {
                Ok(stored) => {
                    debug!(
                        "Saved session {} ({} messages)",
                        session_id,
                        stored.messages.len()
                    );
                    state.created_at = Some(stored.created_at);
                }
                Err(e) => warn!("Failed to save session {}: {}", session_id, e),
            }
        }
    }
}
