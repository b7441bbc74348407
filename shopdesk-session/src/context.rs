//! SessionContext: the bounded turn list of one conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopdesk_core::config::SessionConfig;
use shopdesk_core::models::ConversationTurn;

/// Retention bounds applied on every append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub max_turns: usize,
    /// Oldest turns dropped together once `max_turns` is exceeded.
    pub evict_batch: usize,
}

impl SessionLimits {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            max_turns: config.max_turns.max(1),
            evict_batch: config.evict_batch.max(1),
        }
    }
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Oldest first.
    turns: Vec<ConversationTurn>,
}

impl SessionContext {
    pub fn new(session_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            created_at: now,
            last_activity: now,
            turns: Vec::new(),
        }
    }

    /// Append a turn, then evict the oldest batch if the bound is exceeded.
    pub fn push_turn(&mut self, turn: ConversationTurn, limits: SessionLimits) {
        self.turns.push(turn);
        if self.turns.len() > limits.max_turns {
            let evict = limits.evict_batch.min(self.turns.len());
            self.turns.drain(..evict);
        }
        self.last_activity = Utc::now();
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Raw text of the last `n` turns, oldest first.
    pub fn recent_queries(&self, n: usize) -> Vec<String> {
        let start = self.turns.len().saturating_sub(n);
        self.turns[start..]
            .iter()
            .map(|t| t.raw_query.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn idle_duration(&self) -> chrono::Duration {
        Utc::now() - self.last_activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_core::models::Category;

    fn turn(q: &str) -> ConversationTurn {
        ConversationTurn::new(q, vec![Category::Misc])
    }

    #[test]
    fn eleventh_turn_evicts_oldest_three() {
        let mut ctx = SessionContext::new("s".into());
        for i in 0..11 {
            ctx.push_turn(turn(&format!("q{i}")), SessionLimits::default());
        }
        assert_eq!(ctx.len(), 8);
        assert_eq!(ctx.turns()[0].raw_query, "q3");
        assert_eq!(ctx.turns()[7].raw_query, "q10");
    }

    #[test]
    fn recent_queries_are_oldest_first() {
        let mut ctx = SessionContext::new("s".into());
        for q in ["a", "b", "c", "d"] {
            ctx.push_turn(turn(q), SessionLimits::default());
        }
        assert_eq!(ctx.recent_queries(3), vec!["b", "c", "d"]);
        assert_eq!(ctx.recent_queries(10).len(), 4);
    }
}
