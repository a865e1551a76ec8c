/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The row targeted by an update does not exist.
    #[error("{table} row not found: {id}")]
    NotFound { table: &'static str, id: i64 },

    /// A lock guarding a table was poisoned by a panicking writer.
    #[error("{table} table lock poisoned")]
    LockPoisoned { table: &'static str },

    /// Failure reported by the backing engine (connection, constraint, I/O).
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
