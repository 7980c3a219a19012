//! Typed errors for the matching library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during ingestion and matching operations.
#[derive(Debug, Error)]
pub enum MatchingError {
    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Sending a notification to a user failed
    #[error("delivery error for user {user_id}: {source}")]
    Delivery {
        user_id: i64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Language-model service unavailable or failed
    #[error("model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl MatchingError {
    /// Wrap an arbitrary error as a model failure.
    pub fn model<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Model(Box::new(err))
    }
}

/// Result type alias for matching operations.
pub type Result<T> = std::result::Result<T, MatchingError>;
