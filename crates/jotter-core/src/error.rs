//! Error types for jotter.

use thiserror::Error;

use crate::defaults;
use crate::models::NoteId;

/// Result type alias using jotter's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A client-side rule violation, detected before any network call.
///
/// The display text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Tag cannot be empty.")]
    EmptyTag,

    #[error("Tag must be at most {max} characters.")]
    TagTooLong { max: usize },

    #[error("Tag already exists.")]
    DuplicateTag(String),

    #[error("Cannot add more than {max} tags per note.")]
    TooManyTags { max: usize },

    #[error("Notes must contain at least {min} tag.")]
    MissingTags { min: usize },

    #[error("{field} is required.")]
    Required { field: &'static str },

    #[error("{field} must be at most {max} characters.")]
    TooLong { field: &'static str, max: usize },
}

/// Core error type for jotter operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Client-side field or tag rule violation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Credentials rejected at login
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Token rejected (403) on an authenticated call
    #[error("Unauthorized: {0}")]
    Authorization(String),

    /// No response received (unreachable server, timeout, connection reset).
    /// `fallback` is the text shown to the user for the failed operation.
    #[error("Network error: {message}")]
    Network {
        message: String,
        fallback: &'static str,
    },

    /// Non-403 error status with the message to surface
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Note absent from the local collection
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    /// Response body did not match the expected schema
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Message suitable for a transient user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(rule) => rule.to_string(),
            Error::Authentication(msg) | Error::Authorization(msg) => msg.clone(),
            Error::Network { fallback, .. } => fallback.to_string(),
            Error::Server { message, .. } => message.clone(),
            Error::NoteNotFound(_) => defaults::MSG_NOTE_NOT_FOUND.to_string(),
            Error::Deserialization(_) => defaults::MSG_UNEXPECTED_RESPONSE.to_string(),
            Error::Config(msg) => msg.clone(),
        }
    }

    /// No-response error with the generic server-unavailable wording.
    pub fn network(message: impl Into<String>) -> Self {
        Error::Network {
            message: message.into(),
            fallback: defaults::MSG_SERVER_UNAVAILABLE,
        }
    }

    /// True when the server rejected the presented token.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Error::Authorization(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Deserialization(e.to_string())
        } else if e.is_builder() {
            Error::Config(e.to_string())
        } else {
            Error::network(e.to_string())
        }
    }
}
