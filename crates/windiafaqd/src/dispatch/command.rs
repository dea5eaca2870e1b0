//! Request envelope decoding.
//!
//! A request is a single JSON object naming the target listener and carrying
//! its positional arguments:
//!
//! ```json
//! {"command":"flame","args":[160]}
//! ```
//!
//! A missing `args` key is treated as an empty list. Anything else that does
//! not match this shape is a [`DecodeError`].

use serde::Deserialize;

use super::arguments::{Arg, ArgError, ArgKind, Args};
use super::errors::DecodeError;
use super::response::ReturnData;

/// Decoded command request plus the slot its reply is written into.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    args: Args,
    result: Option<ReturnData>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    command: String,
    #[serde(default)]
    args: Args,
}

impl Command {
    /// Builds a command directly, bypassing the wire format.
    pub fn new(name: impl Into<String>, args: impl Into<Args>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            result: None,
        }
    }

    /// Parses one inbound frame.
    ///
    /// Surrounding ASCII whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Empty`] for an empty frame and
    /// [`DecodeError::Malformed`] when the JSON is invalid or has the wrong
    /// shape.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let trimmed = bytes.trim_ascii();
        if trimmed.is_empty() {
            return Err(DecodeError::Empty);
        }

        let envelope: Envelope =
            serde_json::from_slice(trimmed).map_err(DecodeError::from_json_error)?;
        Ok(Self::new(envelope.command, envelope.args))
    }

    /// Name of the listener this request targets.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional arguments in request order.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Returns the argument at `index` if it has the `expected` kind.
    ///
    /// # Errors
    ///
    /// See [`Args::arg_at`].
    pub fn arg_at(&self, index: usize, expected: ArgKind) -> Result<&Arg, ArgError> {
        self.args.arg_at(index, expected)
    }

    /// Reply attached by the dispatcher, if any.
    pub fn result(&self) -> Option<&ReturnData> {
        self.result.as_ref()
    }

    /// Attaches the listener's reply.
    pub fn set_result(&mut self, result: ReturnData) {
        self.result = Some(result);
    }

    /// Consumes the command, yielding its reply.
    pub fn into_result(self) -> Option<ReturnData> {
        self.result
    }
}
