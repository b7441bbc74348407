//! # shopdesk-session
//!
//! Per-conversation query history. Each session keeps its last few
//! (query, categories) turns for follow-up resolution; sessions live for the
//! process lifetime and are never persisted.

pub mod context;
pub mod identity;
pub mod manager;

pub use context::{SessionContext, SessionLimits};
pub use identity::session_id_for_channel;
pub use manager::SessionManager;
