//! Error types for the Rainwave client

/// Result type alias for Rainwave operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the Rainwave client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// JSON parsing or encoding failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (from pmoconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// A rating typed by the user is not a valid 0.0 - 5.0 value
    #[error("Invalid rating: {0:?}")]
    InvalidRating(String),

    /// No auto-vote rule with this id
    #[error("Rule not found: {0}")]
    RuleNotFound(i32),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid rating error
    pub fn invalid_rating(input: impl Into<String>) -> Self {
        Self::InvalidRating(input.into())
    }
}
