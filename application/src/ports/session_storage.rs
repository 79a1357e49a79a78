//! Session storage port
//!
//! Persists full session records (message history plus team metadata).
//! Backends are external; the infrastructure layer ships an in-memory one.

use async_trait::async_trait;
use crew_domain::SessionRecord;
use thiserror::Error;

/// Errors raised by storage and memory adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Fetch a session. `Ok(None)` when nothing was stored yet.
    async fn read(
        &self,
        session_id: &str,
        user_id: Option<&str>,
    ) -> Result<Option<SessionRecord>, PersistenceError>;

    /// Insert or replace a session, returning the stored record.
    async fn upsert(&self, record: SessionRecord) -> Result<SessionRecord, PersistenceError>;
}
