use thiserror::Error;

/// Errors raised while constructing core domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid short code length {length}; expected {min}..={max}")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
}

/// Errors reported by a [`Repository`](crate::Repository) backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors surfaced by a [`Shortener`](crate::Shortener).
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    /// Every candidate produced within the attempt budget was already taken.
    ///
    /// With the default code space this should never happen under real load,
    /// so callers should treat it as an operational alarm.
    #[error("short code allocation exhausted after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;
