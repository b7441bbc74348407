//! # shopdesk-core
//!
//! Foundation crate for the shopdesk assistant.
//! Defines the shared types, collaborator traits, errors, config, and the
//! fixed domain vocabulary. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ShopdeskConfig;
pub use errors::{ShopdeskError, ShopdeskResult};
pub use models::{Category, Classification, RetrievalResult};
