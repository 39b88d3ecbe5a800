//! Error types for the store and the HTTP client.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a task store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or empty
    #[error("{0}")]
    Validation(String),

    /// The operation targets an id that does not exist
    #[error("task not found: {0}")]
    NotFound(u64),

    /// The backing document could not be read or written
    #[error("storage failure: {0}")]
    Storage(String),

    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage document is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Validation failure for a missing or blank title.
    pub fn title_required() -> Self {
        StoreError::Validation("Title is required".to_string())
    }

    /// True for failures of the backing storage rather than of the request.
    pub fn is_storage(&self) -> bool {
        matches!(self, StoreError::Storage(_) | StoreError::Io(_) | StoreError::Json(_))
    }
}

/// Errors raised while talking to the task service
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The service reported no task with this id
    #[error("task {0} not found")]
    NotFound(u64),
}
