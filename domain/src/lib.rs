//! Domain layer for crew
//!
//! This crate contains the core types of the team coordination engine.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Team**: a group of members plus a [`TeamMode`] and a leader model
//! - **Run**: one invocation of a team, summarized as a [`TeamRun`]
//! - **Conflict verdict**: whether member answers contradict each other
//! - **Session**: persisted history of a team conversation

pub mod config;
pub mod core;
pub mod prompt;
pub mod session;
pub mod team;

// Re-export commonly used types
pub use config::{
    OutputFormat,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use core::{error::DomainError, model::Model};
pub use prompt::{MemberCard, TeamPromptTemplate};
pub use session::entities::{
    MemoryRecord, Message, Role, SessionMetadata, SessionRecord, SessionSummary,
};
pub use team::{
    entities::{DispatchMode, FailurePolicy, Phase, SessionBinding, TeamProfile},
    event::RunEvent,
    mode::TeamMode,
    parsing::{CONFLICT_SENTINEL, NO_CONFLICT_SENTINEL, parse_conflict_verdict, parse_route_selection},
    value_objects::{
        ConflictVerdict, EVIDENCE_SEPARATOR, MemberOutcome, TeamRun, evidence_set, success_count,
    },
};
