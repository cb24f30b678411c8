use thiserror::Error;

/// Common error type for FrameSync components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Timeline queried before the dataset was loaded")]
    TimelineNotLoaded,

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Result type alias using FrameSync's Error.
pub type Result<T> = std::result::Result<T, Error>;
