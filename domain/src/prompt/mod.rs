//! Prompt domain
//!
//! Stateless templates for every leader-model call of a team run.

mod template;

pub use template::{MemberCard, TeamPromptTemplate};
