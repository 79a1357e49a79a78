//! Language model port
//!
//! Defines the interface the team uses to talk to its leader model (and that
//! model-backed members use for their own answers).

use async_trait::async_trait;
use crew_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur when invoking a language model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model not available: {0}")]
    Unavailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Cancelled")]
    Cancelled,
}

/// Text returned by a model together with the identifier of the model that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    pub content: String,
    pub model: Model,
}

impl ModelReply {
    pub fn new(content: impl Into<String>, model: Model) -> Self {
        Self {
            content: content.into(),
            model,
        }
    }
}

/// A single-call language model.
///
/// Takes the whole ordered conversation on every call; implementations keep
/// no conversation state of their own. Adapters live in the infrastructure layer.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Identifier of the underlying model
    fn model(&self) -> &Model;

    /// Send role-tagged messages and wait for the complete reply
    async fn invoke(&self, messages: &[Message]) -> Result<ModelReply, ModelError>;
}
