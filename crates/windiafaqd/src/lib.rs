//! The windiafaq daemon.
//!
//! The daemon answers commands from a chat front-end over a single ZeroMQ
//! request/reply channel. The front-end binds a REQ socket; the daemon
//! connects a REP socket to it and serves one request at a time:
//!
//! 1. receive a JSON [`Command`](dispatch::Command) naming a listener,
//! 2. route it through the [`Dispatcher`](dispatch::Dispatcher) to exactly one
//!    registered [`CommandListener`](dispatch::CommandListener),
//! 3. send back exactly one reply, either the listener's
//!    [`ReturnData`](dispatch::ReturnData) or an `{"error": ...}` object.
//!
//! Every received request gets exactly one reply, whatever goes wrong while
//! decoding or handling it. Only a socket that can no longer be used stops the
//! [`ReplyLoop`](transport::ReplyLoop).
//!
//! The shipped listeners cover flame and magic calculators, enhancement
//! scroll simulations, and a small FAQ database backed by a [`store`].
//!
//! Bootstrap mirrors the usual daemon sequence: load layered configuration,
//! install structured telemetry, open the FAQ store, register listeners, and
//! report each stage through a [`HealthReporter`].

mod bootstrap;
pub mod calculator;
pub mod dispatch;
mod health;
pub mod listeners;
mod process;
pub mod store;
mod telemetry;
pub mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, run_daemon, run_daemon_with};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
