//! Daemon bootstrap orchestration.

use std::sync::Arc;

use ortho_config::OrthoConfig;
use thiserror::Error;

use windiafaq_config::{Config, ConfigResult};

use crate::dispatch::{Dispatcher, ListenerRegistry};
use crate::health::HealthReporter;
use crate::listeners;
use crate::store::{FaqStore, JsonFaqStore, MemoryFaqStore, StoreError};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{LoopError, ReplyLoop, ReplySocket, TransportError, ZmqReplySocket};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the daemon configuration.
    fn load(&self) -> ConfigResult;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> ConfigResult {
        Config::load()
    }
}

/// Loader that always yields the same, already resolved configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> ConfigResult {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        #[source]
        source: Arc<ortho_config::OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        #[source]
        source: TelemetryError,
    },
    /// The FAQ store could not be opened.
    #[error("failed to open FAQ store: {source}")]
    Store {
        #[source]
        source: StoreError,
    },
}

/// A bootstrapped daemon, ready to serve a reply socket.
pub struct Daemon {
    config: Config,
    dispatcher: Dispatcher,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Daemon {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The dispatcher holding every registered listener.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Connects the production reply socket to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the socket cannot be created or
    /// connected.
    pub fn connect(&self) -> Result<ZmqReplySocket, TransportError> {
        let socket = ZmqReplySocket::connect(self.config.ipc_endpoint())?;
        self.reporter.socket_connected(self.config.ipc_endpoint());
        Ok(socket)
    }

    /// Serves `socket` until it becomes unusable, returning why it stopped.
    pub fn serve<S: ReplySocket>(self, socket: S) -> LoopError {
        let Self {
            dispatcher,
            reporter,
            ..
        } = self;
        let error = ReplyLoop::new(socket, dispatcher).run();
        reporter.loop_terminated(&error);
        error
    }
}

impl std::fmt::Debug for Daemon {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Daemon")
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

/// Bootstraps the daemon using the supplied collaborators.
///
/// # Errors
///
/// Returns [`BootstrapError`] when configuration, telemetry, or the FAQ
/// store cannot be set up. The reporter is told about the failure first.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let store = match open_store(&config) {
        Ok(store) => store,
        Err(source) => {
            let error = BootstrapError::Store { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let mut registry = ListenerRegistry::new();
    listeners::register_defaults(&mut registry, config.ees_samples(), store);
    reporter.bootstrap_succeeded(&config, &registry.names());

    Ok(Daemon {
        config,
        dispatcher: Dispatcher::new(registry),
        telemetry,
        reporter,
    })
}

fn open_store(config: &Config) -> Result<Box<dyn FaqStore>, StoreError> {
    Ok(match config.faq_store() {
        Some(path) => Box::new(JsonFaqStore::open(path.to_owned())?),
        None => Box::new(MemoryFaqStore::new()),
    })
}
