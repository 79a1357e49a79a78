//! Language model providers
//!
//! Adapters implementing the [`LanguageModel`](crew_application::LanguageModel)
//! port. The only provider shipped today runs an external command per call.

mod process;

pub use process::ProcessLanguageModel;
