//! The request/reply serving loop.
//!
//! Each cycle performs one blocking receive followed by exactly one reply.
//! Decoding failures, unknown commands, and handler failures all turn into a
//! single `{"error": ...}` reply; only socket-level failures and an
//! unencodable error reply end the loop. An interrupted send is retried until
//! the reply is queued or the send fails for another reason.

use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::dispatch::{Command, Dispatcher, encode_error};

use super::{LoopError, ReplySocket, TRANSPORT_TARGET};

const ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// What a completed cycle sent back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// The listener's reply.
    Success,
    /// An error envelope.
    Error,
}

/// Outcome of one receive/reply cycle that did not end the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    /// Which kind of reply was produced.
    pub reply: ReplyKind,
    /// Whether the socket accepted the reply.
    pub delivered: bool,
}

/// Serves requests from `socket` through `dispatcher`, one at a time.
#[derive(Debug)]
pub struct ReplyLoop<S> {
    socket: S,
    dispatcher: Dispatcher,
    error_backoff: Duration,
}

impl<S: ReplySocket> ReplyLoop<S> {
    /// Pairs a socket with the dispatcher that answers its requests.
    pub fn new(socket: S, dispatcher: Dispatcher) -> Self {
        Self {
            socket,
            dispatcher,
            error_backoff: ERROR_BACKOFF,
        }
    }

    /// Overrides the pause after a recoverable receive failure.
    #[must_use]
    pub fn with_error_backoff(mut self, backoff: Duration) -> Self {
        self.error_backoff = backoff;
        self
    }

    /// The underlying socket.
    pub fn socket(&self) -> &S {
        &self.socket
    }

    /// Consumes the loop, returning its socket.
    pub fn into_socket(self) -> S {
        self.socket
    }

    /// Runs a single receive/reply cycle.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::Receive`] when nothing could be received (no reply
    /// is sent) and [`LoopError::ErrorEnvelope`] when an error reply could not
    /// be encoded (nothing is sent either).
    pub fn serve_once(&mut self) -> Result<Cycle, LoopError> {
        let request = self
            .socket
            .receive()
            .map_err(|source| LoopError::Receive { source })?;

        let (reply, payload) = self.respond(&request)?;
        let delivered = self.send_reply(&payload);
        Ok(Cycle { reply, delivered })
    }

    /// Serves requests until the socket becomes unusable.
    ///
    /// Recoverable receive failures are logged once per distinct error and
    /// followed by a short pause before the next receive.
    pub fn run(&mut self) -> LoopError {
        info!(
            target: TRANSPORT_TARGET,
            listeners = ?self.dispatcher.registry().names(),
            "reply loop active"
        );
        let mut last_error = None::<zmq::Error>;
        loop {
            match self.serve_once() {
                Ok(_) => last_error = None,
                Err(LoopError::Receive { source }) if source.is_recoverable() => {
                    let code = source.code();
                    if last_error != Some(code) {
                        warn!(target: TRANSPORT_TARGET, error = %source, "receive failed");
                    }
                    last_error = Some(code);
                    thread::sleep(self.error_backoff);
                }
                Err(error) => {
                    error!(target: TRANSPORT_TARGET, error = %error, "reply loop stopped");
                    return error;
                }
            }
        }
    }

    /// Sends `payload`, retrying while the send is interrupted.
    ///
    /// An interrupted send queues nothing, so the socket still owes the reply.
    fn send_reply(&mut self, payload: &[u8]) -> bool {
        loop {
            match self.socket.send(payload) {
                Ok(()) => return true,
                Err(error) if error.code() == zmq::Error::EINTR => {
                    debug!(target: TRANSPORT_TARGET, "reply send interrupted, retrying");
                }
                Err(error) => {
                    warn!(target: TRANSPORT_TARGET, error = %error, "failed to send reply");
                    return false;
                }
            }
        }
    }

    fn respond(&self, request: &[u8]) -> Result<(ReplyKind, Vec<u8>), LoopError> {
        let command = match Command::decode(request) {
            Ok(command) => command,
            Err(error) => {
                debug!(target: TRANSPORT_TARGET, error = %error, "rejecting request");
                return error_reply(&error.to_string());
            }
        };

        let command = match self.dispatcher.dispatch(command) {
            Ok(command) => command,
            Err(error) => return error_reply(&error.to_string()),
        };

        match command.into_result().unwrap_or_default().encode() {
            Ok(payload) => Ok((ReplyKind::Success, payload)),
            Err(error) => {
                warn!(target: TRANSPORT_TARGET, error = %error, "replacing unencodable reply");
                error_reply(&error.to_string())
            }
        }
    }
}

fn error_reply(message: &str) -> Result<(ReplyKind, Vec<u8>), LoopError> {
    encode_error(message)
        .map(|payload| (ReplyKind::Error, payload))
        .map_err(|source| LoopError::ErrorEnvelope { source })
}
