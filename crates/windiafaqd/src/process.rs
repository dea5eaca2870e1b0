//! Process entry point: bootstrap, connect, serve.

use std::convert::Infallible;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::bootstrap::{BootstrapError, ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::transport::{LoopError, TransportError};

const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Errors that end the daemon process.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("daemon bootstrap failed: {source}")]
    Bootstrap {
        #[source]
        source: BootstrapError,
    },
    #[error("failed to open reply socket: {source}")]
    Transport {
        #[source]
        source: TransportError,
    },
    #[error("reply loop stopped: {source}")]
    Serve {
        #[source]
        source: LoopError,
    },
}

impl From<BootstrapError> for LaunchError {
    fn from(source: BootstrapError) -> Self {
        Self::Bootstrap { source }
    }
}

impl From<TransportError> for LaunchError {
    fn from(source: TransportError) -> Self {
        Self::Transport { source }
    }
}

/// Runs the daemon with the production collaborators.
///
/// The reply loop only ends when its socket becomes unusable, so this never
/// returns successfully.
///
/// # Errors
///
/// Returns the [`LaunchError`] that stopped the daemon.
pub fn run_daemon() -> Result<Infallible, LaunchError> {
    run_daemon_with(&SystemConfigLoader, Arc::new(StructuredHealthReporter::new()))
}

/// Runs the daemon with injected collaborators.
///
/// # Errors
///
/// See [`run_daemon`].
pub fn run_daemon_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Infallible, LaunchError> {
    let daemon = bootstrap_with(loader, reporter)?;
    let socket = daemon.connect()?;
    info!(
        target: PROCESS_TARGET,
        endpoint = %daemon.config().ipc_endpoint(),
        "serving requests"
    );
    Err(LaunchError::Serve {
        source: daemon.serve(socket),
    })
}
