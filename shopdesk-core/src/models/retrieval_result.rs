use std::fmt;

use serde::{Deserialize, Serialize};

/// Order summary for one status: how many orders and which ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredCount {
    pub status: String,
    pub count: usize,
    pub date: String,
    pub references: Vec<String>,
}

/// Quantity cell of a stock row. Placeholder rows carry a note instead of a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Units(i64),
    Note(String),
}

impl Quantity {
    /// Units that count toward a total; notes contribute nothing.
    pub fn units(&self) -> i64 {
        match self {
            Self::Units(n) => *n,
            Self::Note(_) => 0,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Units(n) => write!(f, "{n}"),
            Self::Note(s) => f.write_str(s),
        }
    }
}

/// One warehouse line for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    pub sku: String,
    pub warehouse: String,
    pub quantity: Quantity,
}

/// A passage of grounding context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: serde_json::Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }
}

/// The single result shape produced by one query resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "items", rename_all = "snake_case")]
pub enum RetrievalResult {
    Counts(Vec<StructuredCount>),
    Records(Vec<StockRow>),
    Documents(Vec<Document>),
}

impl RetrievalResult {
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Counts(_) => "structured_count",
            Self::Records(_) => "record_set",
            Self::Documents(_) => "document_set",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Counts(v) => v.len(),
            Self::Records(v) => v.len(),
            Self::Documents(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What the order strategy resolved, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderResolution {
    pub result: RetrievalResult,
    pub is_identifier_lookup: bool,
    pub found: bool,
}
