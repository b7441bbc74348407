//! # shopdesk-retrieval
//!
//! The classification and retrieval core: rephrase and label a question,
//! dispatch it to exactly one strategy, and return a single result shape.

pub mod classify;
pub mod engine;
pub mod extract;
pub mod generated_sql;
pub mod rules;
pub mod strategies;

pub use classify::QueryClassifier;
pub use engine::{Retrieval, RetrievalEngine, Strategy};
pub use extract::{extract_dates, extract_dates_on, extract_identifiers};
pub use generated_sql::GeneratedQueryRunner;
pub use rules::{Fired, RuleTable};
