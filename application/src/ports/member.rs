//! Member port
//!
//! A member is anything that can answer a prompt: a model-backed responder,
//! or a whole team. Teams hold members behind this trait, which is what lets
//! teams nest.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a member
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
    #[error("Member failed: {0}")]
    Failed(String),

    #[error("Timed out")]
    Timeout,

    #[error("Cancelled")]
    Cancelled,

    #[error("Stream aborted: {0}")]
    StreamAborted(String),
}

/// Callback receiving streamed text chunks. Returning an error stops the stream.
pub type ChunkSink<'a> = dyn FnMut(&str) -> Result<(), MemberError> + Send + 'a;

/// Capability contract shared by responders and teams.
#[async_trait]
pub trait Member: Send + Sync {
    fn name(&self) -> &str;

    fn role(&self) -> &str;

    /// Answer the prompt in full.
    async fn run(&self, prompt: &str) -> Result<String, MemberError>;

    /// Answer the prompt, emitting the response through `on_chunk`.
    ///
    /// The default implementation emits the full answer as a single chunk.
    async fn run_stream(
        &self,
        prompt: &str,
        on_chunk: &mut ChunkSink<'_>,
    ) -> Result<(), MemberError> {
        let answer = self.run(prompt).await?;
        on_chunk(&answer)
    }
}
