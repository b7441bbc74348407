//! # shopdesk-runtime
//!
//! Wires storage, embeddings, completion, sessions, retrieval, and response
//! assembly into one [`ShopdeskRuntime`], optionally held as a process-wide
//! singleton.

pub mod runtime;

pub use runtime::{get, initialize, install, is_initialized, Reply, RuntimeOptions, ShopdeskRuntime};
