//! Execution of model-generated statements.
//!
//! Only a single statement that SQLite itself reports as read-only is run,
//! and the result is capped at a fixed number of rows.

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use shopdesk_core::errors::{ShopdeskError, ShopdeskResult};

pub fn run_read_only(
    conn: &Connection,
    statement: &str,
    row_limit: usize,
) -> ShopdeskResult<Vec<Vec<serde_json::Value>>> {
    let sql = statement.trim().trim_end_matches(';').trim();
    if sql.is_empty() {
        return Err(rejected(statement, "empty statement"));
    }

    // prepare() rejects trailing statements with MultipleStatement.
    let mut stmt = conn.prepare(sql).map_err(|e| rejected(statement, &e.to_string()))?;
    if !stmt.readonly() {
        return Err(rejected(statement, "only read-only statements may be executed"));
    }

    let column_count = stmt.column_count();
    let mut rows = stmt.query([]).map_err(|e| rejected(statement, &e.to_string()))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(|e| rejected(statement, &e.to_string()))? {
        if out.len() >= row_limit {
            break;
        }
        let mut values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            let value = row
                .get_ref(idx)
                .map_err(|e| rejected(statement, &e.to_string()))?;
            values.push(value_to_json(value));
        }
        out.push(values);
    }
    Ok(out)
}

fn value_to_json(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(i) => serde_json::Value::from(i),
        ValueRef::Real(f) => serde_json::Value::from(f),
        ValueRef::Text(t) => serde_json::Value::from(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => serde_json::Value::from(format!("<{} bytes>", b.len())),
    }
}

fn rejected(statement: &str, reason: &str) -> ShopdeskError {
    ShopdeskError::AmbiguousGeneratedQuery {
        statement: statement.to_string(),
        reason: reason.to_string(),
    }
}
