//! Error types for the reply socket and its serving loop.

use thiserror::Error;

use crate::dispatch::EncodeError;

/// Errors surfaced by a [`ReplySocket`](super::ReplySocket).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("failed to create reply socket: {source}")]
    Socket {
        #[source]
        source: zmq::Error,
    },
    #[error("failed to connect reply socket to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: zmq::Error,
    },
    #[error("failed to receive request: {source}")]
    Receive {
        #[source]
        source: zmq::Error,
    },
    #[error("failed to send reply: {source}")]
    Send {
        #[source]
        source: zmq::Error,
    },
}

impl TransportError {
    /// Underlying socket error code.
    #[must_use]
    pub fn code(&self) -> zmq::Error {
        match self {
            Self::Socket { source }
            | Self::Connect { source, .. }
            | Self::Receive { source }
            | Self::Send { source } => *source,
        }
    }

    /// Whether the socket can still be used after this error.
    ///
    /// A terminated context, a closed socket, or a broken request/reply
    /// state machine leave nothing to retry. Setup failures are never
    /// recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Socket { .. } | Self::Connect { .. } => false,
            Self::Receive { source } | Self::Send { source } => !matches!(
                source,
                zmq::Error::ETERM | zmq::Error::ENOTSOCK | zmq::Error::EFSM
            ),
        }
    }
}

/// Terminal outcomes of [`ReplyLoop::run`](super::ReplyLoop::run).
#[derive(Debug, Error)]
pub enum LoopError {
    /// The socket reported an error that leaves it unusable.
    #[error("reply socket is unusable: {source}")]
    Receive {
        #[source]
        source: TransportError,
    },
    /// Not even the error reply could be encoded, so nothing was sent.
    #[error("failed to encode error reply: {source}")]
    ErrorEnvelope {
        #[source]
        source: EncodeError,
    },
}
