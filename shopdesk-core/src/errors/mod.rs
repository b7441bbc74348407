mod completion_error;
mod embedding_error;
mod shopdesk_error;
mod storage_error;

pub use completion_error::CompletionError;
pub use embedding_error::EmbeddingError;
pub use shopdesk_error::{ShopdeskError, TRY_AGAIN_MESSAGE};
pub use storage_error::StorageError;

/// Convenience alias used across the workspace.
pub type ShopdeskResult<T> = Result<T, ShopdeskError>;
