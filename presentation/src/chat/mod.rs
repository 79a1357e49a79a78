//! Interactive chat module
//!
//! A line-based chat loop that keeps one team (and its session) across turns.

mod repl;

pub use repl::ChatRepl;
