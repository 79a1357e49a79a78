//! Event tags attached to a finished team run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag describing which execution path produced a run's final text.
///
/// Collaborate mode carries two tags because the dispatch path changes the
/// ordering guarantee of the member outputs that fed the synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunEvent {
    TeamRouteResponse,
    TeamCoordinateResponse,
    /// Members ran sequentially, outputs in member order.
    TeamCollaborateResponse,
    /// Members ran concurrently, outputs in completion order.
    TeamCollaborateAsyncResponse,
    TeamError,
}

impl RunEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunEvent::TeamRouteResponse => "TeamRouteResponse",
            RunEvent::TeamCoordinateResponse => "TeamCoordinateResponse",
            RunEvent::TeamCollaborateResponse => "TeamCollaborateResponse",
            RunEvent::TeamCollaborateAsyncResponse => "TeamCollaborateAsyncResponse",
            RunEvent::TeamError => "TeamError",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RunEvent::TeamError)
    }
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
