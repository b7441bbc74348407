use serde::{Deserialize, Serialize};

use super::defaults;

/// Chat completion endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// HTTP timeout per request. A hung endpoint fails the query instead of blocking it.
    pub timeout_secs: u64,
    pub rephrase_temperature: f32,
    pub answer_temperature: f32,
    pub sql_temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_COMPLETION_ENDPOINT.to_string(),
            model: defaults::DEFAULT_COMPLETION_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: defaults::DEFAULT_COMPLETION_TIMEOUT_SECS,
            rephrase_temperature: defaults::DEFAULT_REPHRASE_TEMPERATURE,
            answer_temperature: defaults::DEFAULT_ANSWER_TEMPERATURE,
            sql_temperature: defaults::DEFAULT_SQL_TEMPERATURE,
        }
    }
}
