//! Conversation logging
//!
//! [`JsonlConversationLogger`] appends team-run events to a JSONL file and
//! implements the [`ConversationLogger`](crew_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
