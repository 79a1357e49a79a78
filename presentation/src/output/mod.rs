//! Output formatting for team runs

pub mod console;
