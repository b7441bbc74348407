use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// One recorded question within a session. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub raw_query: String,
    pub categories: Vec<Category>,
    pub recorded_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(raw_query: impl Into<String>, categories: Vec<Category>) -> Self {
        Self {
            raw_query: raw_query.into(),
            categories,
            recorded_at: Utc::now(),
        }
    }
}
