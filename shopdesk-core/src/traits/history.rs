use std::sync::Arc;

use crate::errors::ShopdeskResult;
use crate::models::ChatMessage;

/// Durable conversation history keyed by session id.
pub trait IHistoryStore: Send + Sync {
    fn append(&self, session_id: &str, message: &ChatMessage) -> ShopdeskResult<()>;

    /// All messages for the session, oldest first.
    fn get(&self, session_id: &str) -> ShopdeskResult<Vec<ChatMessage>>;
}

impl<T: IHistoryStore> IHistoryStore for Arc<T> {
    fn append(&self, session_id: &str, message: &ChatMessage) -> ShopdeskResult<()> {
        (**self).append(session_id, message)
    }

    fn get(&self, session_id: &str) -> ShopdeskResult<Vec<ChatMessage>> {
        (**self).get(session_id)
    }
}
