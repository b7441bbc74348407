//! Durable chat history.

use rusqlite::{params, Connection};

use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::models::{ChatMessage, Role};

use crate::to_storage_err;

pub fn append_message(conn: &Connection, session_id: &str, message: &ChatMessage) -> ShopdeskResult<()> {
    conn.execute(
        "INSERT INTO chat_history (session_id, role, content) VALUES (?1, ?2, ?3)",
        params![session_id, message.role.as_str(), message.content],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Messages for a session in insertion order. Rows with an unknown role are skipped.
pub fn get_messages(conn: &Connection, session_id: &str) -> ShopdeskResult<Vec<ChatMessage>> {
    let mut stmt = conn
        .prepare("SELECT role, content FROM chat_history WHERE session_id = ?1 ORDER BY id")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![session_id], |row| {
            let role: String = row.get(0)?;
            let content: String = row.get(1)?;
            Ok((role, content))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut messages = Vec::new();
    for row in rows {
        let (role, content) = row.map_err(|e| to_storage_err(e.to_string()))?;
        match Role::parse(&role) {
            Some(role) => messages.push(ChatMessage { role, content }),
            None => tracing::warn!(session_id, role = %role, "skipping history row with unknown role"),
        }
    }
    Ok(messages)
}
