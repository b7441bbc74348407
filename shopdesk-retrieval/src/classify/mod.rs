//! Query rephraser/classifier.

mod prompt;
mod vocabulary;

pub use prompt::{rephrase_system_prompt, rephrase_user_message};
pub use vocabulary::{categorize, VOCABULARIES};

use std::sync::Arc;

use chrono::Local;
use tracing::{info, info_span};

use shopdesk_core::errors::{ShopdeskError, ShopdeskResult};
use shopdesk_core::models::{ChatMessage, Classification, ConversationTurn};
use shopdesk_core::traits::ICompletionProvider;
use shopdesk_session::SessionManager;

/// Rephrases a raw question with session context and labels it.
pub struct QueryClassifier {
    completion: Arc<dyn ICompletionProvider>,
    /// Prior turns shown to the rephraser.
    context_turns: usize,
    temperature: f32,
}

impl QueryClassifier {
    pub fn new(completion: Arc<dyn ICompletionProvider>, context_turns: usize, temperature: f32) -> Self {
        Self {
            completion,
            context_turns,
            temperature,
        }
    }

    /// Rephrase and label `raw_query`, then record the turn in its session.
    ///
    /// Fails with `ClassificationUnavailable` when the completion call fails
    /// or returns blank text; the turn is not recorded in that case.
    pub fn classify(
        &self,
        raw_query: &str,
        session_id: &str,
        sessions: &SessionManager,
    ) -> ShopdeskResult<Classification> {
        let _span = info_span!("shopdesk.classify", session_id).entered();

        let previous = sessions.recent_queries(session_id, self.context_turns);
        let system = rephrase_system_prompt(Local::now().date_naive());
        let user = rephrase_user_message(raw_query, &previous);

        let reply = self
            .completion
            .complete(&system, &[ChatMessage::human(user)], self.temperature)
            .map_err(|e| ShopdeskError::ClassificationUnavailable {
                reason: e.to_string(),
            })?;
        let rephrased = reply.trim();
        if rephrased.is_empty() {
            return Err(ShopdeskError::ClassificationUnavailable {
                reason: "empty rephrase".to_string(),
            });
        }

        let classification = Classification::new(rephrased, categorize(rephrased));
        let turns = sessions.record_turn(
            session_id,
            ConversationTurn::new(raw_query, classification.categories.clone()),
        );
        info!(
            event = "query_classified",
            session_id,
            categories = ?classification.categories,
            context_turns = previous.len(),
            turns,
            "query classified"
        );
        Ok(classification)
    }
}
