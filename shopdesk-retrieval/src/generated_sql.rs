//! Model-written SQL over the orders table, executed read-only.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use shopdesk_core::errors::{ShopdeskError, ShopdeskResult};
use shopdesk_core::models::{ChatMessage, Document};
use shopdesk_core::traits::{ICompletionProvider, IRelationalStore};

static SQL_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```sql\n(.*?)\n```").ok());

const MISSING_SQL: &str = "SQL query not found in the response.";

const SQL_SYSTEM_PROMPT: &str = "\
You are an SQL assistant for an e-commerce casket store. You write SQLite queries against one table:

orders(
  po_no TEXT PRIMARY KEY,     -- purchase order number
  cust_ref TEXT,              -- customer reference / order id
  order_status TEXT,          -- lowercase: new, confirmed, shipped, canceled, at_wms, error
  order_source TEXT,          -- BigCommerce or Costco
  order_date TEXT,            -- YYYY-MM-DD, may be NULL
  order_json TEXT             -- full order document as JSON
)

Fields inside order_json are read with json_extract, e.g. json_extract(order_json, '$.tracking_no'),
json_extract(order_json, '$.carrier'), json_extract(order_json, '$.updated_date_time').

Rules:
- Write exactly one SELECT statement. Never modify data.
- Use COUNT(*) for questions about how many orders.
- Select only the columns the question needs.
- Use date('now') for relative dates.
- Add LIMIT 10 unless the question asks for a specific number of rows.
- Correct misspelled statuses without changing the question's intent.

Examples:
Q: How many orders are confirmed today?
```sql
SELECT COUNT(*) FROM orders WHERE order_status = 'confirmed' AND order_date = date('now');
```
Q: Give me the details of order 30257.
```sql
SELECT order_json FROM orders WHERE cust_ref = '30257' OR po_no = '30257';
```

Reply with the statement in a ```sql fenced block followed by a one-line explanation.";

/// Asks the completion model for a statement, runs it, and wraps the result as a document.
pub struct GeneratedQueryRunner<'a> {
    completion: &'a dyn ICompletionProvider,
    store: &'a dyn IRelationalStore,
    temperature: f32,
    row_limit: usize,
}

impl<'a> GeneratedQueryRunner<'a> {
    pub fn new(
        completion: &'a dyn ICompletionProvider,
        store: &'a dyn IRelationalStore,
        temperature: f32,
        row_limit: usize,
    ) -> Self {
        Self {
            completion,
            store,
            temperature,
            row_limit,
        }
    }

    pub fn run(&self, question: &str) -> ShopdeskResult<Document> {
        let reply = self.completion.complete(
            SQL_SYSTEM_PROMPT,
            &[ChatMessage::human(question)],
            self.temperature,
        )?;
        let statement = extract_statement(&reply)?;
        debug!(%statement, "generated statement");

        let rows = self
            .store
            .run_read_only(&statement, self.row_limit)
            .inspect_err(|e| warn!(%statement, error = %e, "generated statement failed"))?;
        let formatted = format_rows(&rows);
        Ok(Document::new(format!(
            "The result of user query: {question} is result-> {formatted}"
        ))
        .with_metadata("source", Value::from("generated_sql"))
        .with_metadata("statement", Value::from(statement)))
    }
}

/// The body of the first ```sql block.
pub fn extract_statement(reply: &str) -> ShopdeskResult<String> {
    SQL_BLOCK
        .as_ref()
        .and_then(|re| re.captures(reply))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ShopdeskError::AmbiguousGeneratedQuery {
            statement: reply.to_string(),
            reason: MISSING_SQL.to_string(),
        })
}

/// `No data found.` for no rows, the bare value for one cell, else one line per row.
pub fn format_rows(rows: &[Vec<Value>]) -> String {
    match rows {
        [] => "No data found.".to_string(),
        [row] if row.len() == 1 => cell(&row[0]),
        _ => rows
            .iter()
            .map(|row| format!("({})", row.iter().map(cell).collect::<Vec<_>>().join(", ")))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn statement_comes_from_the_fenced_block() {
        let reply = "Here you go:\n```sql\nSELECT COUNT(*) FROM orders;\n```\nCounts all orders.";
        assert_eq!(extract_statement(reply).unwrap(), "SELECT COUNT(*) FROM orders;");
    }

    #[test]
    fn missing_block_is_reported_verbatim() {
        let err = extract_statement("SELECT 1").unwrap_err();
        assert_eq!(err.user_message(), MISSING_SQL);
    }

    #[test]
    fn row_formatting() {
        assert_eq!(format_rows(&[]), "No data found.");
        assert_eq!(format_rows(&[vec![json!(3)]]), "3");
        assert_eq!(
            format_rows(&[vec![json!("A1"), json!("new")], vec![json!("A2"), Value::Null]]),
            "(A1, new)\n(A2, None)"
        );
    }
}
