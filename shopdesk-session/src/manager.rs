//! SessionManager: concurrent per-session access via DashMap.

use dashmap::DashMap;

use shopdesk_core::config::SessionConfig;
use shopdesk_core::models::ConversationTurn;

use crate::context::{SessionContext, SessionLimits};

/// Thread-safe session registry.
///
/// Each mutation runs under the entry's shard lock, so an append and its
/// eviction are one step for concurrent writers on the same session.
pub struct SessionManager {
    sessions: DashMap<String, SessionContext>,
    limits: SessionLimits,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_limits(SessionLimits::default())
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::with_limits(SessionLimits::from_config(config))
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: DashMap::new(),
            limits,
        }
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    /// Record a turn, creating the session on first use. Returns the new turn count.
    pub fn record_turn(&self, session_id: &str, turn: ConversationTurn) -> usize {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionContext::new(session_id.to_string()));
        entry.push_turn(turn, self.limits);
        entry.len()
    }

    /// Raw queries of the last `n` turns, oldest first. Empty for unknown sessions.
    pub fn recent_queries(&self, session_id: &str, n: usize) -> Vec<String> {
        self.sessions
            .get(session_id)
            .map(|s| s.recent_queries(n))
            .unwrap_or_default()
    }

    /// Cloned snapshot of a session.
    pub fn get_session(&self, session_id: &str) -> Option<SessionContext> {
        self.sessions.get(session_id).map(|r| r.clone())
    }

    pub fn remove_session(&self, session_id: &str) -> Option<SessionContext> {
        self.sessions.remove(session_id).map(|(_, v)| v)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
