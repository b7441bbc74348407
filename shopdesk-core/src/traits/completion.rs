use crate::errors::ShopdeskResult;
use crate::models::ChatMessage;

/// Opaque text-completion capability.
pub trait ICompletionProvider: Send + Sync {
    /// Complete a conversation under `system_prompt`, returning the reply text.
    fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> ShopdeskResult<String>;

    fn name(&self) -> &str;
}
