//! Listener registry keyed by command name.
//!
//! The registry is filled once during startup and then handed to the
//! [`Dispatcher`](super::Dispatcher) by value, so it is never mutated while
//! requests are being served. Registering a name twice keeps the first
//! listener; the second registration is dropped without an error so startup
//! sequences can be replayed safely.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::command::Command;
use super::errors::HandlerError;
use super::response::ReturnData;
use super::DISPATCH_TARGET;

/// Computes the reply for commands registered under one name.
///
/// Implementations must not keep references to the command past the call.
pub trait CommandListener: Send + Sync {
    /// Runs the listener for a single request.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] describing why no reply could be produced.
    fn run(&self, command: &Command) -> Result<ReturnData, HandlerError>;
}

impl<F> CommandListener for F
where
    F: Fn(&Command) -> Result<ReturnData, HandlerError> + Send + Sync,
{
    fn run(&self, command: &Command) -> Result<ReturnData, HandlerError> {
        self(command)
    }
}

/// Mapping from command name to its single listener.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<String, Box<dyn CommandListener>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` under `name` unless the name is already taken.
    ///
    /// Returns `true` when the listener was stored and `false` when an
    /// earlier registration won.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        listener: impl CommandListener + 'static,
    ) -> bool {
        let name = name.into();
        if self.listeners.contains_key(&name) {
            debug!(
                target: DISPATCH_TARGET,
                command = %name,
                "ignoring duplicate listener registration"
            );
            return false;
        }
        debug!(target: DISPATCH_TARGET, command = %name, "listener registered");
        self.listeners.insert(name, Box::new(listener));
        true
    }

    /// Looks up the listener for `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&dyn CommandListener> {
        self.listeners.get(name).map(Box::as_ref)
    }

    /// Returns `true` when a listener is registered under `name`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.listeners.contains_key(name)
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.listeners.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ListenerRegistry")
            .field("listeners", &self.names())
            .finish()
    }
}
