//! Test double for [`HealthReporter`] that records lifecycle events.

use std::sync::Mutex;

use windiafaq_config::{Config, IpcEndpoint};

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::transport::LoopError;

/// Lifecycle events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    BootstrapStarting,
    /// Carries the registered listener names.
    BootstrapSucceeded(Vec<String>),
    BootstrapFailed(String),
    SocketConnected(String),
    LoopTerminated(String),
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config, listeners: &[&str]) {
        let names = listeners.iter().map(|name| (*name).to_owned()).collect();
        self.record(HealthEvent::BootstrapSucceeded(names));
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn socket_connected(&self, endpoint: &IpcEndpoint) {
        self.record(HealthEvent::SocketConnected(endpoint.to_string()));
    }

    fn loop_terminated(&self, error: &LoopError) {
        self.record(HealthEvent::LoopTerminated(error.to_string()));
    }
}
