//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: identifier of the model behind an output
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: UTF-8 safe truncation and chunking

pub mod error;
pub mod model;
pub mod string;
