use std::time::Duration;

use tracing::debug;

use shopdesk_core::config::CompletionConfig;
use shopdesk_core::errors::{CompletionError, ShopdeskResult};
use shopdesk_core::models::ChatMessage;
use shopdesk_core::traits::ICompletionProvider;

use crate::wire::{ChatRequest, ChatResponse};

/// Blocking chat completion client. No retries: a failed completion fails the query.
pub struct ChatCompletionClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatCompletionClient {
    /// Build from config, reading the API key from `config.api_key_env`.
    pub fn from_config(config: &CompletionConfig) -> ShopdeskResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| CompletionError::MissingApiKey {
                env_var: config.api_key_env.clone(),
            })?;
        Self::new(config, api_key)
    }

    pub fn new(config: &CompletionConfig, api_key: String) -> ShopdeskResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::RequestFailed {
                reason: format!("http client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }
}

impl ICompletionProvider for ChatCompletionClient {
    fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> ShopdeskResult<String> {
        let request = ChatRequest::new(&self.model, system_prompt, messages, temperature);
        debug!(model = %self.model, messages = request.messages.len(), "chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| CompletionError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::BadStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            }
            .into());
        }

        let parsed: ChatResponse = response.json().map_err(|e| CompletionError::RequestFailed {
            reason: format!("JSON parse error: {e}"),
        })?;
        parsed
            .first_text()
            .ok_or_else(|| CompletionError::EmptyResponse.into())
    }

    fn name(&self) -> &str {
        &self.model
    }
}
