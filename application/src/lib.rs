//! Application layer for crew
//!
//! This crate contains the team coordinator use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ExecutionParams, PersistenceOptions, TeamConfig};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    language_model::{LanguageModel, ModelError, ModelReply},
    member::{ChunkSink, Member, MemberError},
    memory_store::MemoryStore,
    progress::{NoProgress, ProgressNotifier},
    session_storage::{PersistenceError, SessionStorage},
};
pub use use_cases::model_responder::ModelResponder;
pub use use_cases::run_team::{
    EMPTY_ANSWER_RESPONSE, NO_MEMBERS_RESPONSE, RunTeamError, Team, TeamBuilder,
};
