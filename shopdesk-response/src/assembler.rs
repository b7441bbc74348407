//! ResponseAssembler: renders or generates the answer, then records the exchange.

use std::sync::Arc;

use chrono::Local;
use tracing::{info, info_span};

use shopdesk_core::config::ShopdeskConfig;
use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::models::{ChatMessage, Document, RetrievalResult};
use shopdesk_core::traits::{ICompletionProvider, IHistoryStore};

use crate::prompt::{join_context, qa_system_prompt};
use crate::render::render_structured;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    /// Whether the text came from the completion model rather than a fixed template.
    pub generated: bool,
}

pub struct ResponseAssembler {
    completion: Arc<dyn ICompletionProvider>,
    history: Arc<dyn IHistoryStore>,
    /// Most recent history messages shown to the model.
    history_window: usize,
    temperature: f32,
}

impl ResponseAssembler {
    pub fn new(
        completion: Arc<dyn ICompletionProvider>,
        history: Arc<dyn IHistoryStore>,
        history_window: usize,
        temperature: f32,
    ) -> Self {
        Self {
            completion,
            history,
            history_window,
            temperature,
        }
    }

    pub fn from_config(
        completion: Arc<dyn ICompletionProvider>,
        history: Arc<dyn IHistoryStore>,
        config: &ShopdeskConfig,
    ) -> Self {
        Self::new(
            completion,
            history,
            config.session.history_window,
            config.completion.answer_temperature,
        )
    }

    /// Produce the reply to `question` and append both messages to the session history.
    pub fn assemble(
        &self,
        session_id: &str,
        question: &str,
        result: &RetrievalResult,
    ) -> ShopdeskResult<Answer> {
        let _span = info_span!("shopdesk.assemble", session_id, shape = result.shape()).entered();

        let answer = match result {
            RetrievalResult::Documents(docs) => Answer {
                text: self.generate(session_id, question, docs)?,
                generated: true,
            },
            structured => Answer {
                text: render_structured(structured).unwrap_or_default(),
                generated: false,
            },
        };

        self.history.append(session_id, &ChatMessage::human(question))?;
        self.history.append(session_id, &ChatMessage::ai(answer.text.clone()))?;

        info!(
            event = "answer_rendered",
            session_id,
            shape = result.shape(),
            generated = answer.generated,
            chars = answer.text.len(),
            "answer rendered"
        );
        Ok(answer)
    }

    fn generate(&self, session_id: &str, question: &str, documents: &[Document]) -> ShopdeskResult<String> {
        let history = self.history.get(session_id)?;
        let start = history.len().saturating_sub(self.history_window);
        let mut messages: Vec<ChatMessage> = history[start..].to_vec();
        messages.push(ChatMessage::human(question));

        let system = qa_system_prompt(Local::now().date_naive(), &join_context(documents));
        let reply = self.completion.complete(&system, &messages, self.temperature)?;
        Ok(reply.trim().to_string())
    }
}
