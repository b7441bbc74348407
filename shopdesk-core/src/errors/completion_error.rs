/// Text completion capability errors.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("missing API key: set {env_var}")]
    MissingApiKey { env_var: String },

    #[error("completion request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("completion endpoint returned {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("completion returned no content")]
    EmptyResponse,
}
