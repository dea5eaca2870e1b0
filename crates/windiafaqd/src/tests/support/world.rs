//! BDD test world: owns the loader, reporter, daemon, and scripted socket
//! that step functions drive.

use std::cell::RefCell;
use std::mem;
use std::sync::Arc;

use serde_json::Value;

use crate::bootstrap::{BootstrapError, ConfigLoader, Daemon, bootstrap_with};
use crate::transport::{LoopError, ScriptedSocket, SocketEvent};

use super::config_loader::{CorruptStoreLoader, FailingConfigLoader, TestConfigLoader};
use super::reporter::RecordingHealthReporter;

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    daemon: Option<Daemon>,
    bootstrap_error: Option<BootstrapError>,
    socket: ScriptedSocket,
    loop_error: Option<LoopError>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            daemon: None,
            bootstrap_error: None,
            socket: ScriptedSocket::new(),
            loop_error: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
        self.reset_results();
    }

    /// Installs a loader whose FAQ store cannot be read.
    pub fn use_corrupt_store_loader(&mut self) {
        self.loader = Box::new(CorruptStoreLoader::new());
        self.reset_results();
    }

    /// Installs a loader that succeeds.
    pub fn use_successful_loader(&mut self) {
        self.loader = Box::new(TestConfigLoader::new());
        self.reset_results();
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.daemon.is_some() || self.bootstrap_error.is_some() {
            return;
        }

        match bootstrap_with(&*self.loader, self.reporter.clone()) {
            Ok(daemon) => self.daemon = Some(daemon),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Returns the bootstrap error, if bootstrap failed.
    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns the daemon once bootstrap has succeeded.
    #[must_use]
    pub fn daemon(&self) -> Option<&Daemon> {
        self.daemon.as_ref()
    }

    /// Queues a request frame for the next serve.
    pub fn queue_request(&mut self, frame: &str) {
        self.socket = mem::take(&mut self.socket).with_request(frame.as_bytes());
    }

    /// Queues a failed receive for the next serve.
    pub fn queue_receive_error(&mut self, code: zmq::Error) {
        self.socket = mem::take(&mut self.socket).with_receive_error(code);
    }

    /// Makes the next reply send fail with `code`.
    pub fn queue_send_error(&mut self, code: zmq::Error) {
        self.socket = mem::take(&mut self.socket).with_send_error(code);
    }

    /// Serves every queued frame; the loop stops once the script runs out.
    pub fn serve(&mut self) {
        if let Some(daemon) = self.daemon.take() {
            self.loop_error = Some(daemon.serve(&mut self.socket));
        }
    }

    /// Why the reply loop stopped, if it ran.
    #[must_use]
    pub fn loop_error(&self) -> Option<&LoopError> {
        self.loop_error.as_ref()
    }

    /// Every interaction observed by the socket.
    #[must_use]
    pub fn socket_events(&self) -> &[SocketEvent] {
        self.socket.events()
    }

    /// Replies sent so far, parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics when a reply is not valid JSON.
    #[must_use]
    pub fn replies(&self) -> Vec<Value> {
        self.socket
            .sent()
            .into_iter()
            .map(|frame| serde_json::from_slice(frame).expect("reply was not JSON"))
            .collect()
    }

    fn reset_results(&mut self) {
        self.daemon = None;
        self.bootstrap_error = None;
        self.loop_error = None;
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Default test world fixture.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
