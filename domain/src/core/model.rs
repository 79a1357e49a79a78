//! Model identifier value object

use serde::{Deserialize, Serialize};

/// Identifier of the language model that produced an output (Value Object)
///
/// The coordination engine never interprets model names; it only carries
/// them as provenance on a [`TeamRun`](crate::team::value_objects::TeamRun).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier used when an adapter does not report one
    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::unknown()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model(s.to_string()))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model(s.to_string())
    }
}
