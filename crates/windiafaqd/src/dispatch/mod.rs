//! Command decoding, listener lookup, and reply encoding.
//!
//! Each inbound frame is decoded into a [`Command`], routed by name through
//! the [`Dispatcher`] to a single [`CommandListener`], and the listener's
//! [`ReturnData`] is encoded back onto the wire.
//!
//! ## Protocol
//!
//! Requests name the listener and carry positional arguments:
//!
//! ```json
//! {"command":"flame","args":[160]}
//! ```
//!
//! A successful reply carries `content` and/or `embeds`:
//!
//! ```json
//! {"content":"..."}
//! ```
//!
//! Any failure is reported as a single error object instead:
//!
//! ```json
//! {"error":"missing command does not exist"}
//! ```

mod arguments;
mod command;
mod dispatcher;
mod errors;
mod registry;
mod response;

/// Tracing target for dispatch events.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

pub use self::arguments::{Arg, ArgError, ArgKind, Args};
pub use self::command::Command;
pub use self::dispatcher::Dispatcher;
pub use self::errors::{DecodeError, DispatchError, EncodeError, HandlerError};
pub use self::registry::{CommandListener, ListenerRegistry};
pub use self::response::{Embed, EmbedField, ErrorEnvelope, ReturnData, encode_error};
