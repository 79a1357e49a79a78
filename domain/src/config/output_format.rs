//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished team run is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the final answer (default)
    #[default]
    Answer,
    /// Final answer plus member outcomes and the conflict verdict
    Full,
    /// The whole run as JSON
    Json,
}
