//! Team coordination domain
//!
//! Types describing a team, the way it distributes a prompt, and the
//! outcome of a single run. The coordinator that drives them lives in the
//! application layer.

pub mod entities;
pub mod event;
pub mod mode;
pub mod parsing;
pub mod value_objects;
