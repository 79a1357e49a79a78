//! Streaming configuration from TOML (`[stream]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStreamConfig {
    /// Characters per streamed chunk
    pub chunk_chars: usize,
    /// Pause between chunks in milliseconds
    pub chunk_delay_ms: u64,
}

impl Default for FileStreamConfig {
    fn default() -> Self {
        Self {
            chunk_chars: 20,
            chunk_delay_ms: 10,
        }
    }
}

impl FileStreamConfig {
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }
}
