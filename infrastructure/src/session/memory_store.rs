//! In-memory memory store with optional model-written summaries.

use async_trait::async_trait;
use crew_application::{LanguageModel, MemoryStore, PersistenceError};
use crew_domain::core::string::truncate;
use crew_domain::{MemoryRecord, Message, Role, SessionSummary, TeamPromptTemplate};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Turns kept in a summary built without a model
const RECENT_TURNS: usize = 3;
const SNIPPET_LEN: usize = 120;

/// Memories and session summaries held in process.
///
/// With a summarizer model, summaries are written by the model from the
/// session-summary prompt; otherwise (or when the model fails) they list
/// the most recent turns.
#[derive(Default)]
pub struct InMemoryMemoryStore {
    summarizer: Option<Arc<dyn LanguageModel>>,
    summaries: RwLock<HashMap<(String, String), SessionSummary>>,
    memories: RwLock<Vec<MemoryRecord>>,
}

impl InMemoryMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summarizer(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.summarizer = Some(model);
        self
    }

    /// Memories recorded for a user, oldest first.
    pub async fn memories_for(&self, user_id: &str) -> Vec<MemoryRecord> {
        self.memories
            .read()
            .await
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect()
    }

    fn recent_turns_summary(messages: &[Message]) -> SessionSummary {
        let prompts: Vec<&Message> = messages.iter().filter(|m| m.role == Role::User).collect();
        let start = prompts.len().saturating_sub(RECENT_TURNS);

        let mut summary = SessionSummary::new(format!(
            "{} turn(s) so far. Recent requests: {}",
            prompts.len(),
            prompts[start..]
                .iter()
                .map(|m| truncate(m.content.trim(), SNIPPET_LEN))
                .collect::<Vec<_>>()
                .join(" | ")
        ));
        summary.topics = prompts[start..]
            .iter()
            .map(|m| truncate(m.content.trim(), 40))
            .collect();
        summary
    }

    async fn summarize(&self, messages: &[Message]) -> SessionSummary {
        let Some(model) = &self.summarizer else {
            return Self::recent_turns_summary(messages);
        };

        let request = vec![Message::user(TeamPromptTemplate::session_summary_prompt(
            messages,
        ))];
        match model.invoke(&request).await {
            Ok(reply) if !reply.content.trim().is_empty() => {
                debug!("Session summary written by {}", reply.model);
                let mut summary = SessionSummary::new(reply.content.trim());
                summary.topics = Self::recent_turns_summary(messages).topics;
                summary
            }
            Ok(_) => Self::recent_turns_summary(messages),
            Err(e) => {
                warn!("Summarizer failed, using recent turns: {}", e);
                Self::recent_turns_summary(messages)
            }
        }
    }
}

#[async_trait]
impl MemoryStore for InMemoryMemoryStore {
    async fn get_session_summary(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<SessionSummary>, PersistenceError> {
        let key = (user_id.to_string(), session_id.to_string());
        Ok(self.summaries.read().await.get(&key).cloned())
    }

    async fn create_memory(
        &self,
        user_id: &str,
        input: &str,
        answer: &str,
    ) -> Result<MemoryRecord, PersistenceError> {
        let record = MemoryRecord::new(user_id, input, answer);
        self.memories.write().await.push(record.clone());
        Ok(record)
    }

    async fn create_session_summary(
        &self,
        user_id: &str,
        session_id: &str,
        messages: &[Message],
    ) -> Result<SessionSummary, PersistenceError> {
        let summary = self.summarize(messages).await;
        self.summaries.write().await.insert(
            (user_id.to_string(), session_id.to_string()),
            summary.clone(),
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_application::{ModelError, ModelReply};
    use crew_domain::Model;

    struct FixedModel {
        model: Model,
        reply: Result<String, ModelError>,
    }

    #[async_trait]
    impl LanguageModel for FixedModel {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn invoke(&self, messages: &[Message]) -> Result<ModelReply, ModelError> {
            assert!(messages[0].content.contains("Summarize the conversation"));
            self.reply
                .clone()
                .map(|content| ModelReply::new(content, self.model.clone()))
        }
    }

    fn conversation(turns: usize) -> Vec<Message> {
        (0..turns)
            .flat_map(|i| {
                [
                    Message::user(format!("question {}", i)),
                    Message::assistant(format!("answer {}", i)),
                ]
            })
            .collect()
    }

    #[tokio::test]
    async fn test_summary_from_recent_turns() {
        let store = InMemoryMemoryStore::new();
        let summary = store
            .create_session_summary("u", "s", &conversation(5))
            .await
            .unwrap();

        assert!(summary.summary.starts_with("5 turn(s) so far."));
        assert!(summary.summary.contains("question 4"));
        assert!(!summary.summary.contains("question 1"));
        assert_eq!(summary.topics.len(), 3);

        let loaded = store.get_session_summary("u", "s").await.unwrap().unwrap();
        assert_eq!(loaded, summary);
        assert!(store.get_session_summary("other", "s").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_summary_from_model() {
        let store = InMemoryMemoryStore::new().with_summarizer(Arc::new(FixedModel {
            model: Model::new("summarizer"),
            reply: Ok("  They discussed questions.  ".to_string()),
        }));

        let summary = store
            .create_session_summary("u", "s", &conversation(2))
            .await
            .unwrap();

        assert_eq!(summary.summary, "They discussed questions.");
    }

    #[tokio::test]
    async fn test_summarizer_failure_falls_back() {
        let store = InMemoryMemoryStore::new().with_summarizer(Arc::new(FixedModel {
            model: Model::new("summarizer"),
            reply: Err(ModelError::Timeout),
        }));

        let summary = store
            .create_session_summary("u", "s", &conversation(1))
            .await
            .unwrap();

        assert!(summary.summary.contains("question 0"));
    }

    #[tokio::test]
    async fn test_memories_by_user() {
        let store = InMemoryMemoryStore::new();
        store.create_memory("alice", "q1", "a1").await.unwrap();
        store.create_memory("bob", "q2", "a2").await.unwrap();
        store.create_memory("alice", "q3", "a3").await.unwrap();

        let alice = store.memories_for("alice").await;
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[1].input, "q3");
        assert_eq!(alice[1].memory, "a3");
    }
}
