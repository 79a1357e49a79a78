//! Application-level configuration.
//!
//! This module provides configuration types that control how the team
//! coordinator behaves:
//!
//! - [`TeamConfig`]: identity, mode, dispatch, session binding and flags
//! - [`ExecutionParams`]: call deadlines, history window, stream chunking

pub mod execution_params;
pub mod team_config;

pub use execution_params::ExecutionParams;
pub use team_config::{PersistenceOptions, TeamConfig};
