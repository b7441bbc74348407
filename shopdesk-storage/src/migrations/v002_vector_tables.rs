//! v002: vector_entries (embedded catalog passages).

use rusqlite::Connection;

use shopdesk_core::errors::ShopdeskResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ShopdeskResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS vector_entries (
            collection  TEXT NOT NULL,
            entry_id    TEXT NOT NULL,
            embedding   BLOB NOT NULL,
            dimensions  INTEGER NOT NULL,
            content     TEXT NOT NULL,
            metadata    TEXT NOT NULL DEFAULT '{}',
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (collection, entry_id)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
