use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Route unmatched order questions through model-generated SQL.
    pub generated_sql_fallback: bool,
    /// Row cap applied to generated statements.
    pub generated_sql_row_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            generated_sql_fallback: defaults::DEFAULT_GENERATED_SQL_FALLBACK,
            generated_sql_row_limit: defaults::DEFAULT_GENERATED_SQL_ROW_LIMIT,
        }
    }
}
