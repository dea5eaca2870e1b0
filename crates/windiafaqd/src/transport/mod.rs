//! Reply socket transport and the serving loop.
//!
//! The daemon owns exactly one REP socket, connected to the endpoint the
//! front-end binds. [`ReplyLoop`] drives it: receive, dispatch, reply, repeat.

mod errors;
#[cfg(any(test, feature = "test-support"))]
mod memory;
mod reply_loop;
mod socket;

pub use self::errors::{LoopError, TransportError};
#[cfg(any(test, feature = "test-support"))]
pub use self::memory::{ScriptedSocket, SocketEvent};
pub use self::reply_loop::{Cycle, ReplyKind, ReplyLoop};
pub use self::socket::{ReplySocket, ZmqReplySocket};

const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
