//! In-memory session storage.

use async_trait::async_trait;
use crew_application::{PersistenceError, SessionStorage};
use crew_domain::SessionRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

type SessionKey = (String, Option<String>);

/// Session records keyed by (session id, user id).
#[derive(Default)]
pub struct InMemorySessionStorage {
    records: RwLock<HashMap<SessionKey, SessionRecord>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn read(
        &self,
        session_id: &str,
        user_id: Option<&str>,
    ) -> Result<Option<SessionRecord>, PersistenceError> {
        let key = (session_id.to_string(), user_id.map(str::to_string));
        Ok(self.records.read().await.get(&key).cloned())
    }

    async fn upsert(&self, mut record: SessionRecord) -> Result<SessionRecord, PersistenceError> {
        let key = (record.session_id.clone(), record.user_id.clone());
        let mut records = self.records.write().await;

        if let Some(existing) = records.get(&key) {
            record.created_at = existing.created_at;
        }
        debug!(
            "Upserting session {} ({} messages)",
            record.session_id,
            record.messages.len()
        );
        records.insert(key, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use crew_domain::{Message, SessionMetadata, TeamMode};

    fn record(session: &str, user: Option<&str>, messages: Vec<Message>) -> SessionRecord {
        SessionRecord::new(
            session,
            user.map(str::to_string),
            messages,
            SessionMetadata {
                team_name: "t".into(),
                mode: TeamMode::Route,
                member_count: 1,
                last_interaction: Utc::now(),
            },
        )
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let storage = InMemorySessionStorage::new();
        assert!(storage.read("nope", None).await.unwrap().is_none());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_records_are_keyed_by_user() {
        let storage = InMemorySessionStorage::new();
        storage
            .upsert(record("s", Some("alice"), vec![Message::user("a")]))
            .await
            .unwrap();
        storage
            .upsert(record("s", Some("bob"), vec![Message::user("b")]))
            .await
            .unwrap();

        let alice = storage.read("s", Some("alice")).await.unwrap().unwrap();
        assert_eq!(alice.messages, vec![Message::user("a")]);
        assert!(storage.read("s", None).await.unwrap().is_none());
        assert_eq!(storage.len().await, 2);
    }

    #[tokio::test]
    async fn test_upsert_keeps_creation_time() {
        let storage = InMemorySessionStorage::new();
        let mut first = record("s", None, vec![]);
        first.created_at = Utc::now() - Duration::hours(1);
        let created = first.created_at;
        storage.upsert(first).await.unwrap();

        let stored = storage
            .upsert(record("s", None, vec![Message::user("later")]))
            .await
            .unwrap();

        assert_eq!(stored.created_at, created);
        assert_eq!(stored.messages.len(), 1);
    }
}
