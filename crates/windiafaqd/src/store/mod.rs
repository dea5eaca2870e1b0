//! FAQ records and the stores that hold them.
//!
//! A key names either a command or an alias, never both. Aliases always point
//! at an existing command, and deleting a command removes the aliases that
//! point at it.

mod json_file;
mod memory;

use std::fmt;
use std::io;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::json_file::JsonFaqStore;
pub use self::memory::MemoryFaqStore;

const STORE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::store");

/// A FAQ entry addressable by its own name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FaqCommand {
    pub command: String,
    pub description: String,
    /// Hidden commands resolve normally but are left out of listings.
    #[serde(default)]
    pub hidden: bool,
}

impl FaqCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>, hidden: bool) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
            hidden,
        }
    }
}

/// An alternative name for a [`FaqCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FaqAlias {
    pub alias: String,
    pub command: String,
}

impl FaqAlias {
    pub fn new(alias: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            command: command.into(),
        }
    }
}

/// What an existing key already names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Command,
    Alias,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => formatter.write_str("a command"),
            Self::Alias => formatter.write_str("an alias"),
        }
    }
}

/// Errors raised by [`FaqStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{key} is already {existing}")]
    Conflict { key: String, existing: RecordKind },
    #[error("{command} is not a command")]
    MissingTarget { alias: String, command: String },
    #[error("failed to access FAQ store {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid FAQ store {path}: {source}")]
    Serialise {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn conflict(key: impl Into<String>, existing: RecordKind) -> Self {
        Self::Conflict {
            key: key.into(),
            existing,
        }
    }

    pub fn missing_target(alias: impl Into<String>, command: impl Into<String>) -> Self {
        Self::MissingTarget {
            alias: alias.into(),
            command: command.into(),
        }
    }
}

/// Key-value lookup behind the `faq` command.
pub trait FaqStore: Send {
    /// Resolves `key` as a command name first, then as an alias.
    fn get(&self, key: &str) -> Option<FaqCommand>;

    /// Every command, hidden ones included, ordered by name.
    fn list_all(&self) -> Vec<FaqCommand>;

    /// Adds a new command.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the name is already taken, or a
    /// persistence error.
    fn put(&mut self, command: FaqCommand) -> Result<(), StoreError>;

    /// Replaces a command's description. Returns whether a command matched.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    fn update(&mut self, key: &str, description: &str) -> Result<bool, StoreError>;

    /// Removes a command and its aliases. Returns whether a command matched.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    fn delete(&mut self, key: &str) -> Result<bool, StoreError>;

    /// Adds an alias for an existing command.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the alias name is taken,
    /// [`StoreError::MissingTarget`] when the target is not a command, or a
    /// persistence error.
    fn put_alias(&mut self, alias: FaqAlias) -> Result<(), StoreError>;
}
