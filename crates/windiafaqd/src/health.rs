//! Structured health reporting for daemon lifecycle events.

use std::sync::Arc;

use windiafaq_config::{Config, IpcEndpoint};

use crate::bootstrap::BootstrapError;
use crate::transport::LoopError;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config, listeners: &[&str]);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the reply socket has connected to its endpoint.
    fn socket_connected(&self, endpoint: &IpcEndpoint);

    /// Invoked when the reply loop stops serving requests.
    fn loop_terminated(&self, error: &LoopError);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config, listeners: &[&str]) {
        (**self).bootstrap_succeeded(config, listeners);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn socket_connected(&self, endpoint: &IpcEndpoint) {
        (**self).socket_connected(endpoint);
    }

    fn loop_terminated(&self, error: &LoopError) {
        (**self).loop_terminated(error);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting daemon bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config, listeners: &[&str]) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            endpoint = %config.ipc_endpoint(),
            faq_store = ?config.faq_store(),
            ees_samples = config.ees_samples().get(),
            log_filter = %config.log_filter(),
            log_format = %config.log_format(),
            listeners = ?listeners,
            "daemon bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "daemon bootstrap failed"
        );
    }

    fn socket_connected(&self, endpoint: &IpcEndpoint) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "socket_connected",
            endpoint = %endpoint,
            "reply socket ready"
        );
    }

    fn loop_terminated(&self, error: &LoopError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "loop_terminated",
            error = %error,
            "reply loop terminated"
        );
    }
}
