//! Scripted in-memory reply socket.

use std::collections::VecDeque;

use super::{ReplySocket, TransportError};

/// One interaction observed by a [`ScriptedSocket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Received(Vec<u8>),
    ReceiveFailed(zmq::Error),
    Sent(Vec<u8>),
    SendFailed(zmq::Error),
}

/// Socket that replays queued requests and records every exchange.
///
/// It keeps the REP state machine: after a successful receive the reply is
/// owed, and until a send succeeds another receive fails with `EFSM`. A send
/// with no request pending fails the same way. Once the script is exhausted,
/// `receive` reports a terminated context so a running loop stops.
#[derive(Debug, Default)]
pub struct ScriptedSocket {
    inbound: VecDeque<Result<Vec<u8>, zmq::Error>>,
    send_failures: VecDeque<zmq::Error>,
    events: Vec<SocketEvent>,
    reply_owed: bool,
}

impl ScriptedSocket {
    /// Creates a socket with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an inbound request frame.
    #[must_use]
    pub fn with_request(mut self, frame: impl Into<Vec<u8>>) -> Self {
        self.inbound.push_back(Ok(frame.into()));
        self
    }

    /// Queues a receive failure.
    #[must_use]
    pub fn with_receive_error(mut self, code: zmq::Error) -> Self {
        self.inbound.push_back(Err(code));
        self
    }

    /// Makes the next send of an owed reply fail with `code`.
    ///
    /// A failed send leaves the reply owed, as on a real REP socket.
    #[must_use]
    pub fn with_send_error(mut self, code: zmq::Error) -> Self {
        self.send_failures.push_back(code);
        self
    }

    /// Everything observed so far, in order.
    #[must_use]
    pub fn events(&self) -> &[SocketEvent] {
        &self.events
    }

    /// Frames that were sent successfully.
    #[must_use]
    pub fn sent(&self) -> Vec<&[u8]> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SocketEvent::Sent(frame) => Some(frame.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Number of send attempts, successful or not.
    #[must_use]
    pub fn send_attempts(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SocketEvent::Sent(_) | SocketEvent::SendFailed(_)))
            .count()
    }

    /// Number of frames successfully received.
    #[must_use]
    pub fn received(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SocketEvent::Received(_)))
            .count()
    }
}

impl ReplySocket for ScriptedSocket {
    fn receive(&mut self) -> Result<Vec<u8>, TransportError> {
        let next = if self.reply_owed {
            Err(zmq::Error::EFSM)
        } else {
            self.inbound.pop_front().unwrap_or(Err(zmq::Error::ETERM))
        };
        match next {
            Ok(frame) => {
                self.events.push(SocketEvent::Received(frame.clone()));
                self.reply_owed = true;
                Ok(frame)
            }
            Err(source) => {
                self.events.push(SocketEvent::ReceiveFailed(source));
                Err(TransportError::Receive { source })
            }
        }
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let failure = if self.reply_owed {
            self.send_failures.pop_front()
        } else {
            Some(zmq::Error::EFSM)
        };
        if let Some(source) = failure {
            self.events.push(SocketEvent::SendFailed(source));
            return Err(TransportError::Send { source });
        }
        self.events.push(SocketEvent::Sent(payload.to_vec()));
        self.reply_owed = false;
        Ok(())
    }
}
