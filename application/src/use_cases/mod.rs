//! Use cases (application services)

pub mod model_responder;
pub mod run_team;
