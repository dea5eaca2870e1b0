//! Routes decoded commands to their registered listener.

use tracing::{debug, warn};

use super::DISPATCH_TARGET;
use super::command::Command;
use super::errors::DispatchError;
use super::registry::ListenerRegistry;

/// Looks up and runs exactly one listener per command.
///
/// The dispatcher owns the registry, so listeners cannot be added once
/// request handling has started.
#[derive(Debug)]
pub struct Dispatcher {
    registry: ListenerRegistry,
}

impl Dispatcher {
    /// Creates a dispatcher over a fully populated registry.
    #[must_use]
    pub fn new(registry: ListenerRegistry) -> Self {
        Self { registry }
    }

    /// Read access to the registry, for startup reporting.
    #[must_use]
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Runs the listener registered for `command` and attaches its reply.
    ///
    /// The listener is invoked exactly once. Failures are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownCommand`] when nothing is registered
    /// under the command's name (no listener runs), or
    /// [`DispatchError::HandlerFailed`] carrying the listener's own error.
    pub fn dispatch(&self, mut command: Command) -> Result<Command, DispatchError> {
        let Some(listener) = self.registry.lookup(command.name()) else {
            return Err(DispatchError::unknown_command(command.name()));
        };

        debug!(
            target: DISPATCH_TARGET,
            command = command.name(),
            args = %command.args(),
            "dispatching command"
        );

        match listener.run(&command) {
            Ok(result) => {
                command.set_result(result);
                Ok(command)
            }
            Err(source) => {
                warn!(
                    target: DISPATCH_TARGET,
                    command = command.name(),
                    error = %source,
                    "listener failed"
                );
                Err(DispatchError::handler_failed(command.name(), source))
            }
        }
    }
}

#[cfg(test)]
mod tests;
