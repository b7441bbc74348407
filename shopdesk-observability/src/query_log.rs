//! Recent pipeline executions: question, chosen strategy and rule, latency, outcome.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutcome {
    Found,
    NotFound,
    Failed,
}

impl QueryOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::NotFound => "not_found",
            Self::Failed => "failed",
        }
    }
}

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub session_id: String,
    pub query: String,
    /// `None` when the question failed before dispatch.
    pub strategy: Option<String>,
    pub rule: Option<String>,
    pub latency: Duration,
    pub outcome: QueryOutcome,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Create a new entry with the timestamp set to now.
    pub fn new(
        session_id: impl Into<String>,
        query: impl Into<String>,
        strategy: Option<String>,
        rule: Option<String>,
        latency: Duration,
        outcome: QueryOutcome,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            query: query.into(),
            strategy,
            rule,
            latency,
            outcome,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Bounded query log; the oldest entries fall off first.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    max_entries: usize,
}

impl QueryLog {
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1_024)),
            max_entries,
        }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            session_id = %entry.session_id,
            strategy = ?entry.strategy,
            rule = ?entry.rule,
            latency_ms = entry.latency.as_millis() as u64,
            outcome = entry.outcome.as_str(),
            "query logged"
        );
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&QueryLogEntry> {
        self.entries.back()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Average latency across all logged queries.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Entries per outcome, in `Found, NotFound, Failed` order.
    pub fn outcome_counts(&self) -> [(QueryOutcome, usize); 3] {
        [QueryOutcome::Found, QueryOutcome::NotFound, QueryOutcome::Failed]
            .map(|o| (o, self.entries.iter().filter(|e| e.outcome == o).count()))
    }
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::with_capacity(shopdesk_core::config::defaults::DEFAULT_QUERY_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(query: &str, ms: u64, outcome: QueryOutcome) -> QueryLogEntry {
        QueryLogEntry::new(
            "s",
            query,
            Some("order".into()),
            Some("by_identifier".into()),
            Duration::from_millis(ms),
            outcome,
        )
    }

    #[test]
    fn oldest_entries_are_evicted_at_capacity() {
        let mut log = QueryLog::with_capacity(3);
        for i in 0..5 {
            log.record(entry(&format!("q{i}"), 10, QueryOutcome::Found));
        }
        let kept: Vec<&str> = log.entries().map(|e| e.query.as_str()).collect();
        assert_eq!(kept, vec!["q2", "q3", "q4"]);
        assert_eq!(log.latest().map(|e| e.query.as_str()), Some("q4"));
    }

    #[test]
    fn average_latency_and_outcomes() {
        let mut log = QueryLog::with_capacity(10);
        assert_eq!(log.avg_latency(), Duration::ZERO);
        log.record(entry("a", 10, QueryOutcome::Found));
        log.record(entry("b", 30, QueryOutcome::Failed));
        assert_eq!(log.avg_latency(), Duration::from_millis(20));
        assert_eq!(
            log.outcome_counts(),
            [
                (QueryOutcome::Found, 1),
                (QueryOutcome::NotFound, 0),
                (QueryOutcome::Failed, 1)
            ]
        );
    }

    #[test]
    fn zero_capacity_still_keeps_the_latest() {
        let mut log = QueryLog::with_capacity(0);
        log.record(entry("a", 1, QueryOutcome::NotFound));
        log.record(entry("b", 1, QueryOutcome::NotFound));
        assert_eq!(log.count(), 1);
        assert_eq!(log.capacity(), 1);
    }
}
