//! Error types for the community calendar.

use thiserror::Error;

/// Errors that can occur in commcal operations.
#[derive(Error, Debug)]
pub enum CommCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not load event feed from {source_name}: {message}")]
    Feed {
        source_name: String,
        message: String,
    },

    #[error("Event feed is not valid JSON: {0}")]
    FeedParse(#[from] serde_json::Error),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type alias for commcal operations.
pub type CommCalResult<T> = Result<T, CommCalError>;
