//! Error types for request decoding, dispatch, and handler failures.
//!
//! Every error in this module is recoverable from the reply loop's point of
//! view: it is turned into a single `{"error": ...}` reply and the loop moves
//! on to the next request.

use thiserror::Error;

use crate::store::StoreError;

use super::arguments::ArgError;

/// Raised when inbound bytes do not form a valid command envelope.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The frame was empty or whitespace.
    #[error("malformed request: empty message")]
    Empty,
    /// JSON syntax or shape did not match the envelope.
    #[error("malformed request: {message}")]
    Malformed {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// Wraps a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::Malformed {
            message: source.to_string(),
            source,
        }
    }
}

/// Raised when a handler cannot produce a reply.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// An argument was missing or had the wrong kind.
    #[error(transparent)]
    Argument(#[from] ArgError),
    /// Arguments were well-typed but semantically invalid.
    #[error("{message}")]
    InvalidInput { message: String },
    /// The FAQ store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Unexpected internal failure (for example a poisoned lock).
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl HandlerError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Raised by the dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No listener is registered under the requested name.
    #[error("{name} command does not exist")]
    UnknownCommand { name: String },
    /// The listener ran and reported a failure.
    #[error("{source}")]
    HandlerFailed {
        command: String,
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Creates an unknown command error.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Wraps a listener failure for `command`.
    pub fn handler_failed(command: impl Into<String>, source: HandlerError) -> Self {
        Self::HandlerFailed {
            command: command.into(),
            source,
        }
    }
}

/// Raised when a reply cannot be serialised.
#[derive(Debug, Error)]
#[error("failed to encode reply: {0}")]
pub struct EncodeError(#[from] pub serde_json::Error);
