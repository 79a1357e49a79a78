//! Infrastructure layer for crew
//!
//! Adapters implementing the ports defined in the application layer:
//! configuration loading, command-backed language models, in-memory
//! session persistence and JSONL conversation logging.

pub mod config;
pub mod logging;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileCommandConfig, FileConfig, FileLoggingConfig, FileMemberConfig,
    FileOutputConfig, FileSessionConfig, FileStreamConfig, FileTeamConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::ProcessLanguageModel;
pub use session::{InMemoryMemoryStore, InMemorySessionStorage};
