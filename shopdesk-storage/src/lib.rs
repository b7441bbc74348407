//! # shopdesk-storage
//!
//! SQLite backend for the locally materialized catalog (inventory, orders,
//! products, pages), the embedded vector entries, and durable chat history.
//! `StorageEngine` implements `IRelationalStore`, `IVectorStorage`, and
//! `IHistoryStore`.

pub mod engine;
pub mod loader;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;
pub use loader::{load_feed, CatalogKind, LoadReport};

use shopdesk_core::errors::{ShopdeskError, StorageError};

/// Wrap a backend failure message as a `BackendUnavailable` error.
pub fn to_storage_err(message: String) -> ShopdeskError {
    StorageError::SqliteError { message }.into()
}
