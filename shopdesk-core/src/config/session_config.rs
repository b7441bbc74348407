use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-conversation history bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum turns retained per session.
    pub max_turns: usize,
    /// Oldest turns dropped at once when `max_turns` is exceeded.
    pub evict_batch: usize,
    /// Prior raw queries fed to the rephraser.
    pub context_turns: usize,
    /// Durable history messages fed to answer generation.
    pub history_window: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_turns: defaults::DEFAULT_MAX_TURNS,
            evict_batch: defaults::DEFAULT_EVICT_BATCH,
            context_turns: defaults::DEFAULT_CONTEXT_TURNS,
            history_window: defaults::DEFAULT_HISTORY_WINDOW,
        }
    }
}
