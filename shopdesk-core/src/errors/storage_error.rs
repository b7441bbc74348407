/// Storage-layer errors for the relational and vector backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("connection lock poisoned: {context}")]
    LockPoisoned { context: String },

    #[error("vector index error: {reason}")]
    VectorIndex { reason: String },
}
