//! Leader and member configuration from TOML (`[leader]`, `[[members]]`)
//!
//! Both are backed by an external command that receives the conversation as
//! JSON on stdin and prints the reply on stdout.
//!
//! ```toml
//! [leader]
//! model = "leader"
//! command = "llm-bridge"
//! args = ["--model", "big"]
//!
//! [[members]]
//! name = "researcher"
//! role = "finds and cites sources"
//! instructions = "Always cite."
//! command = "llm-bridge"
//! args = ["--model", "small"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An external command standing in for a language model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCommandConfig {
    /// Model identifier reported with every reply
    pub model: Option<String>,
    pub command: String,
    pub args: Vec<String>,
    /// Extra environment variables for the command
    pub env: BTreeMap<String, String>,
}

impl FileCommandConfig {
    pub fn has_command(&self) -> bool {
        !self.command.trim().is_empty()
    }

    /// Model identifier, defaulting to the command name.
    pub fn model_name(&self) -> String {
        self.model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.command.clone())
    }
}

/// Raw `[[members]]` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMemberConfig {
    pub name: String,
    pub role: String,
    pub instructions: String,
    #[serde(flatten)]
    pub backend: FileCommandConfig,
}
