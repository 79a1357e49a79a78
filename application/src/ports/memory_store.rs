//! Memory store port
//!
//! User-scoped memories and rolling session summaries, keyed by user id and
//! session id.

use super::session_storage::PersistenceError;
use async_trait::async_trait;
use crew_domain::{MemoryRecord, Message, SessionSummary};

#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Fetch the current summary of a session, if one was ever created.
    async fn get_session_summary(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<SessionSummary>, PersistenceError>;

    /// Record a standalone memory of one prompt/answer exchange.
    async fn create_memory(
        &self,
        user_id: &str,
        input: &str,
        answer: &str,
    ) -> Result<MemoryRecord, PersistenceError>;

    /// Regenerate the session summary from the full conversation.
    async fn create_session_summary(
        &self,
        user_id: &str,
        session_id: &str,
        messages: &[Message],
    ) -> Result<SessionSummary, PersistenceError>;
}
