//! Reply socket abstraction and its ZeroMQ implementation.

use tracing::info;

use windiafaq_config::IpcEndpoint;

use super::{TRANSPORT_TARGET, TransportError};

/// The reply side of a strict request/reply channel.
///
/// Callers must alternate `receive` and `send`; the loop guarantees exactly
/// one `send` per successful `receive`.
pub trait ReplySocket {
    /// Blocks until the next request frame arrives.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Receive`] when no frame could be read.
    fn receive(&mut self) -> Result<Vec<u8>, TransportError>;

    /// Sends the reply for the most recently received request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Send`] when the frame could not be queued.
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}

impl<S: ReplySocket + ?Sized> ReplySocket for &mut S {
    fn receive(&mut self) -> Result<Vec<u8>, TransportError> {
        (**self).receive()
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        (**self).send(payload)
    }
}

/// REP socket connected to the front-end's bound REQ socket.
pub struct ZmqReplySocket {
    socket: zmq::Socket,
    // Declared last so it is dropped after the socket.
    _context: zmq::Context,
}

impl ZmqReplySocket {
    /// Creates a private context and connects a REP socket to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the socket cannot be created or the
    /// endpoint is refused by the library.
    pub fn connect(endpoint: &IpcEndpoint) -> Result<Self, TransportError> {
        Self::connect_with_context(zmq::Context::new(), endpoint)
    }

    /// Connects a REP socket created from an existing context.
    ///
    /// Sharing a context is required for `inproc://` endpoints.
    ///
    /// # Errors
    ///
    /// See [`ZmqReplySocket::connect`].
    pub fn connect_with_context(
        context: zmq::Context,
        endpoint: &IpcEndpoint,
    ) -> Result<Self, TransportError> {
        let socket = context
            .socket(zmq::REP)
            .map_err(|source| TransportError::Socket { source })?;
        socket
            .connect(endpoint.as_str())
            .map_err(|source| TransportError::Connect {
                endpoint: endpoint.to_string(),
                source,
            })?;
        info!(
            target: TRANSPORT_TARGET,
            endpoint = %endpoint,
            "reply socket connected"
        );
        Ok(Self {
            socket,
            _context: context,
        })
    }
}

impl ReplySocket for ZmqReplySocket {
    fn receive(&mut self) -> Result<Vec<u8>, TransportError> {
        self.socket
            .recv_bytes(0)
            .map_err(|source| TransportError::Receive { source })
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.socket
            .send(payload, 0)
            .map_err(|source| TransportError::Send { source })
    }
}

impl std::fmt::Debug for ZmqReplySocket {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("ZmqReplySocket").finish_non_exhaustive()
    }
}
