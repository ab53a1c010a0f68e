//! Error types for Hearth Core

use thiserror::Error;

/// Fallback shown when the backend gives no usable message
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum Error {
    /// 401 from any endpoint; always treated as session expiry
    #[error("Session expired")]
    Auth,

    #[error("Network error: {message}")]
    Network {
        /// HTTP status when the request reached the server
        status: Option<u16>,
        message: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Geocoding failed: {0}")]
    Geocode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Network failure without an HTTP status (transport-level)
    pub fn network(message: impl Into<String>) -> Self {
        Error::Network {
            status: None,
            message: message.into(),
        }
    }

    /// Whether this error must tear the session down
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth)
    }

    /// Message suitable for direct display to the user.
    ///
    /// Backend-provided messages pass through; empty or absent ones fall
    /// back to a generic message so the UI never shows a blank error.
    pub fn user_message(&self) -> String {
        match self {
            Error::Network { message, .. } if !message.trim().is_empty() => message.clone(),
            Error::Network { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            Error::Auth => "Your session has expired. Please log in again.".to_string(),
            Error::Validation(msg) | Error::Geocode(msg) | Error::InvalidOperation(msg) => {
                msg.clone()
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
