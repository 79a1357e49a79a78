//! Progress reporting while a team runs

pub mod reporter;
