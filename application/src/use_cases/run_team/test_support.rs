//! Scripted test doubles shared by the run_team tests.

use crate::ports::language_model::{LanguageModel, ModelError, ModelReply};
use crate::ports::member::{Member, MemberError};
use crate::ports::memory_store::MemoryStore;
use crate::ports::session_storage::{PersistenceError, SessionStorage};
use async_trait::async_trait;
use crew_domain::{MemoryRecord, Message, Model, SessionRecord, SessionSummary};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) const ROUTE_MARKER: &str = "Select the single team member";
pub(crate) const PLAN_MARKER: &str = "Plan how the team";
pub(crate) const SYNTHESIS_MARKER: &str = "Team member responses:";
pub(crate) const COLLAB_SYNTHESIS_MARKER: &str = "Every team member answered the same request";
pub(crate) const ANALYSIS_MARKER: &str = "decide whether they contradict";
pub(crate) const RESOLUTION_MARKER: &str = "Team members gave contradicting answers";

type Handler = dyn Fn(&str) -> Result<String, ModelError> + Send + Sync;

/// Leader model answering through a closure over the last user prompt.
/// Every call's full message list is recorded.
pub(crate) struct ScriptedModel {
    model: Model,
    handler: Box<Handler>,
    delay: Duration,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedModel {
    pub(crate) fn new(
        handler: impl Fn(&str) -> Result<String, ModelError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            model: Model::new("scripted-leader"),
            handler: Box::new(handler),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Leader that echoes every synthesis prompt, so the final text reflects
    /// the evidence (and its order).
    pub(crate) fn echo() -> Self {
        Self::new(|prompt| {
            if prompt.contains(ANALYSIS_MARKER) {
                Ok("NO CONFLICTS".to_string())
            } else if prompt.contains(SYNTHESIS_MARKER) || prompt.contains(COLLAB_SYNTHESIS_MARKER)
            {
                Ok(format!("SYNTH<{}>", prompt))
            } else {
                Ok("plan: everyone answers".to_string())
            }
        })
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    /// Last user prompt of every call
    pub(crate) fn prompts(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|messages| messages.last().map(|m| m.content.clone()))
            .collect()
    }

    pub(crate) fn count_prompts(&self, marker: &str) -> usize {
        self.prompts().iter().filter(|p| p.contains(marker)).count()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn invoke(&self, messages: &[Message]) -> Result<ModelReply, ModelError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let prompt = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        (self.handler)(prompt).map(|content| ModelReply::new(content, self.model.clone()))
    }
}

/// Member with a fixed reply, an optional latency and a call counter.
pub(crate) struct ScriptedMember {
    name: String,
    role: String,
    reply: Result<String, MemberError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedMember {
    pub(crate) fn ok(name: &str, reply: &str) -> Self {
        Self {
            name: name.to_string(),
            role: format!("{} role", name),
            reply: Ok(reply.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(name: &str) -> Self {
        Self {
            reply: Err(MemberError::Failed(format!("{} is down", name))),
            ..Self::ok(name, "")
        }
    }

    pub(crate) fn with_delay(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Member for ScriptedMember {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> &str {
        &self.role
    }

    async fn run(&self, _prompt: &str) -> Result<String, MemberError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }
}

/// Storage keeping records in a map; writes can be forced to fail.
#[derive(Default)]
pub(crate) struct RecordingStorage {
    records: Mutex<HashMap<(String, Option<String>), SessionRecord>>,
    upserts: AtomicUsize,
    fail: bool,
}

impl RecordingStorage {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub(crate) fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub(crate) fn get(&self, session_id: &str, user_id: Option<&str>) -> Option<SessionRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&(session_id.to_string(), user_id.map(str::to_string)))
            .cloned()
    }
}

#[async_trait]
impl SessionStorage for RecordingStorage {
    async fn read(
        &self,
        session_id: &str,
        user_id: Option<&str>,
    ) -> Result<Option<SessionRecord>, PersistenceError> {
        if self.fail {
            return Err(PersistenceError::ReadFailed("disk on fire".into()));
        }
        Ok(self.get(session_id, user_id))
    }

    async fn upsert(&self, record: SessionRecord) -> Result<SessionRecord, PersistenceError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PersistenceError::WriteFailed("disk on fire".into()));
        }
        self.records.lock().unwrap().insert(
            (record.session_id.clone(), record.user_id.clone()),
            record.clone(),
        );
        Ok(record)
    }
}

/// Memory store summarizing as "N messages".
#[derive(Default)]
pub(crate) struct RecordingMemory {
    summaries: Mutex<HashMap<(String, String), SessionSummary>>,
    memories: Mutex<Vec<MemoryRecord>>,
}

impl RecordingMemory {
    pub(crate) fn memories(&self) -> Vec<MemoryRecord> {
        self.memories.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemoryStore for RecordingMemory {
    async fn get_session_summary(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<SessionSummary>, PersistenceError> {
        Ok(self
            .summaries
            .lock()
            .unwrap()
            .get(&(user_id.to_string(), session_id.to_string()))
            .cloned())
    }

    async fn create_memory(
        &self,
        user_id: &str,
        input: &str,
        answer: &str,
    ) -> Result<MemoryRecord, PersistenceError> {
        let record = MemoryRecord::new(user_id, input, answer);
        self.memories.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn create_session_summary(
        &self,
        user_id: &str,
        session_id: &str,
        messages: &[Message],
    ) -> Result<SessionSummary, PersistenceError> {
        let summary = SessionSummary::new(format!("{} messages", messages.len()));
        self.summaries.lock().unwrap().insert(
            (user_id.to_string(), session_id.to_string()),
            summary.clone(),
        );
        Ok(summary)
    }
}
