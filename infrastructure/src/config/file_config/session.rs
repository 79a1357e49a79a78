//! Session configuration from TOML (`[session]` section)

use crew_domain::SessionBinding;
use serde::{Deserialize, Serialize};

/// Raw session configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Session to bind the team to (unset = no persistence)
    pub id: Option<String>,
    pub user_id: Option<String>,
    /// Recent history messages sent with every leader call
    pub history_window: usize,
    pub enable_memories: bool,
    pub enable_summaries: bool,
    /// Build summaries with the leader model instead of from recent turns
    pub summarize_with_leader: bool,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            id: None,
            user_id: None,
            history_window: 20,
            enable_memories: false,
            enable_summaries: true,
            summarize_with_leader: false,
        }
    }
}

impl FileSessionConfig {
    pub fn binding(&self) -> SessionBinding {
        let mut binding = SessionBinding::new(self.id.clone().unwrap_or_default());
        if let Some(user) = self.user_id.as_ref().filter(|u| !u.is_empty()) {
            binding = binding.with_user(user.clone());
        }
        binding
    }
}
