//! RedTerm Error Types
//!
//! Centralized error handling for the console and the uplink layer.

use thiserror::Error;

/// Central error type for RedTerm
#[derive(Error, Debug)]
pub enum RedtermError {
    #[error("Uplink request failed ({status}): {body}")]
    Transport { status: u16, body: String },

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Audio playback error: {0}")]
    Audio(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for RedTerm operations
pub type RedtermResult<T> = Result<T, RedtermError>;
