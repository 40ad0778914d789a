//! Core error types for Spongeworld

use thiserror::Error;

/// Main error type for Spongeworld operations
#[derive(Error, Debug)]
pub enum SpongeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The abundance table or the sample metadata could not be read or parsed.
    #[error("Load error: {0}")]
    Load(String),

    /// Every supplied sequence was shorter than the indexed feature length.
    #[error("All sequences too short. minimal length is {min_length}")]
    TooShort { min_length: usize },

    #[error("Unknown metadata field: {0}")]
    UnknownField(String),

    #[error("{0} parameter missing")]
    MissingParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Dataset is not loaded yet")]
    NotLoaded,
}

/// Result type alias for Spongeworld operations
pub type SpongeResult<T> = Result<T, SpongeError>;

impl SpongeError {
    /// Shorthand for a load failure with a formatted message.
    pub fn load(msg: impl Into<String>) -> Self {
        SpongeError::Load(msg.into())
    }

    /// True when the caller supplied something unusable, as opposed to a
    /// failure on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SpongeError::TooShort { .. }
                | SpongeError::UnknownField(_)
                | SpongeError::MissingParameter(_)
                | SpongeError::InvalidInput(_)
        )
    }

    /// HTTP-equivalent status for the request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            e if e.is_client_error() => 400,
            SpongeError::NotLoaded => 503,
            _ => 500,
        }
    }
}

// Conversion implementations for common error types
impl From<serde_json::Error> for SpongeError {
    fn from(err: serde_json::Error) -> Self {
        SpongeError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for SpongeError {
    fn from(err: anyhow::Error) -> Self {
        SpongeError::Load(err.to_string())
    }
}
