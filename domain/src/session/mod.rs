//! Session domain.
//!
//! - [`entities::Message`]: a role-tagged message
//! - [`entities::SessionRecord`]: persisted history of a team session
//! - [`entities::SessionSummary`] / [`entities::MemoryRecord`]: memory adapter records

pub mod entities;
