//! Error types for Quarry

use thiserror::Error;

/// The main error type for Quarry operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was empty or otherwise unusable
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Query definition could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Build options could not be loaded
    #[error("Invalid configuration: {message}")]
    Config {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience Result type for Quarry operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new configuration error, keeping the parse error as its source
    pub fn config(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Config {
            message: message.into(),
            source,
        }
    }
}
