//! Reply envelopes and their serialisation.
//!
//! A successful reply carries optional `content` and/or `embeds`; both keys
//! are left out entirely when unused, so an empty [`ReturnData`] encodes as
//! `{}`. Failures are sent as [`ErrorEnvelope`], which only ever has an
//! `error` key, letting the front-end tell the two apart by key presence.

use serde::{Deserialize, Serialize};

use super::errors::EncodeError;

/// One named value inside an [`Embed`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedField {
    /// Field heading.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Whether the field may render beside its neighbour.
    pub inline: bool,
}

impl EmbedField {
    /// Creates a field rendered beside its neighbours.
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }

    /// Creates a field rendered on its own row.
    pub fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

/// Structured display block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Embed {
    /// Embed title.
    pub title: String,
    /// Text shown under the title.
    pub description: String,
    /// Fields in display order. Always serialised, even when empty.
    #[serde(default)]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Creates an embed without fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, preserving insertion order.
    #[must_use]
    pub fn with_field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }
}

/// Successful reply payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReturnData {
    /// Plain-text reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Embeds in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl ReturnData {
    /// Creates a plain-text reply.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    /// Creates a reply made of embeds.
    pub fn embeds(embeds: Vec<Embed>) -> Self {
        Self {
            content: None,
            embeds,
        }
    }

    /// Serialises the reply for the wire.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if serialisation fails, which does not happen
    /// for values built from this module's types.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Failure reply: `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorEnvelope {
    /// Human-readable failure description.
    pub error: String,
}

impl ErrorEnvelope {
    /// Wraps an error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Serialises the envelope for the wire.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if serialisation fails. The reply loop treats
    /// that as fatal because no reply could be sent at all.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Encodes `message` as an error reply.
///
/// # Errors
///
/// See [`ErrorEnvelope::encode`].
pub fn encode_error(message: impl Into<String>) -> Result<Vec<u8>, EncodeError> {
    ErrorEnvelope::new(message).encode()
}
