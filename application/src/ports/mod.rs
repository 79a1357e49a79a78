//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod language_model;
pub mod member;
pub mod memory_store;
pub mod progress;
pub mod session_storage;
