//! Schema migrations tracked with `PRAGMA user_version`.

pub mod v001_catalog_tables;
pub mod v002_vector_tables;
pub mod v003_chat_history;

use rusqlite::Connection;
use tracing::info;

use shopdesk_core::errors::{ShopdeskResult, StorageError};

type MigrationFn = fn(&Connection) -> ShopdeskResult<()>;

const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_catalog_tables::migrate),
    (2, v002_vector_tables::migrate),
    (3, v003_chat_history::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 3;

/// Run every migration newer than the database's current version.
pub fn run_migrations(conn: &Connection) -> ShopdeskResult<()> {
    let current = current_version(conn)?;

    for (version, migrate) in MIGRATIONS {
        if current >= *version {
            continue;
        }
        migrate(conn).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })?;
        info!(version, "applied migration");
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> ShopdeskResult<u32> {
    let version = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(version)
}
