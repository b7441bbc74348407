//! v003: chat_history.

use rusqlite::Connection;

use shopdesk_core::errors::ShopdeskResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ShopdeskResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS chat_history (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id  TEXT NOT NULL,
            role        TEXT NOT NULL,
            content     TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_chat_history_session ON chat_history(session_id, id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
