//! Execution parameters: per-run limits of the team coordinator.
//!
//! [`ExecutionParams`] groups the static parameters that control how the
//! [`Team`](crate::use_cases::run_team::Team) talks to its collaborators.
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Execution control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Deadline applied to every leader-model and member call. `None` waits forever.
    pub call_timeout: Option<Duration>,
    /// Most recent history messages included in leader calls.
    pub history_window: usize,
    /// Characters per chunk when re-emitting the final answer as a stream.
    pub stream_chunk_chars: usize,
    /// Pause between streamed chunks.
    pub stream_chunk_delay: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            call_timeout: None,
            history_window: 20,
            stream_chunk_chars: 20,
            stream_chunk_delay: Duration::from_millis(10),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_stream_chunking(mut self, chars: usize, delay: Duration) -> Self {
        self.stream_chunk_chars = chars.max(1);
        self.stream_chunk_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert!(params.call_timeout.is_none());
        assert_eq!(params.history_window, 20);
        assert_eq!(params.stream_chunk_chars, 20);
        assert_eq!(params.stream_chunk_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_call_timeout(Some(Duration::from_secs(30)))
            .with_history_window(4)
            .with_stream_chunking(0, Duration::ZERO);

        assert_eq!(params.call_timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.history_window, 4);
        assert_eq!(params.stream_chunk_chars, 1);
        assert_eq!(params.stream_chunk_delay, Duration::ZERO);
    }
}
