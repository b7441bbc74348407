use super::{CompletionError, EmbeddingError, StorageError};

/// Generic reply shown to users when a request fails for reasons they can't act on.
pub const TRY_AGAIN_MESSAGE: &str =
    "Sorry, I couldn't process that request right now. Please try again.";

/// Top-level error type for the shopdesk workspace.
#[derive(Debug, thiserror::Error)]
pub enum ShopdeskError {
    #[error("classification unavailable: {reason}")]
    ClassificationUnavailable { reason: String },

    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("completion error: {0}")]
    CompletionError(#[from] CompletionError),

    #[error("malformed record {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    #[error("generated query failed: {reason}")]
    AmbiguousGeneratedQuery { statement: String, reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl ShopdeskError {
    /// Whether the error aborts the request. Only malformed rows are recovered locally.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedRecord { .. })
    }

    /// Text to show the asking user.
    ///
    /// Generated-query failures are surfaced verbatim; everything else
    /// collapses to a generic retry message.
    pub fn user_message(&self) -> String {
        match self {
            Self::AmbiguousGeneratedQuery { reason, .. } => reason.clone(),
            _ => TRY_AGAIN_MESSAGE.to_string(),
        }
    }
}
