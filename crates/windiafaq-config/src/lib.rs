//! Shared configuration for the windiafaq daemon.
//!
//! Configuration is layered by [`ortho_config`]: built-in defaults, then a
//! TOML file (`--config-path`), then `WINDIAFAQ_*` environment variables, and
//! finally command-line flags. The daemon only needs a handful of values: the
//! ZeroMQ endpoint its reply socket connects to, where the FAQ store lives,
//! how many runs the enhancement simulator performs, and how to log.

mod defaults;
mod endpoint;
mod logging;

use std::num::NonZeroU32;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_EES_SAMPLES, DEFAULT_IPC_ENDPOINT, DEFAULT_LOG_FILTER, default_ees_samples,
    default_ipc_endpoint, default_log_filter, default_log_filter_string, default_log_format,
};
pub use endpoint::{EndpointParseError, IpcEndpoint};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "WINDIAFAQ")]
pub struct Config {
    /// ZeroMQ endpoint the reply socket connects to.
    #[serde(default = "default_ipc_endpoint")]
    pub ipc_endpoint: IpcEndpoint,
    /// JSON document backing the FAQ store; in-memory when unset.
    #[serde(default)]
    pub faq_store: Option<Utf8PathBuf>,
    /// Runs per enhancement simulation.
    #[serde(default = "default_ees_samples")]
    pub ees_samples: NonZeroU32,
    /// `tracing` filter expression.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for log events.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ipc_endpoint: default_ipc_endpoint(),
            faq_store: None,
            ees_samples: default_ees_samples(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Endpoint the reply socket connects to.
    #[must_use]
    pub fn ipc_endpoint(&self) -> &IpcEndpoint {
        &self.ipc_endpoint
    }

    /// Path of the persistent FAQ store, if one is configured.
    #[must_use]
    pub fn faq_store(&self) -> Option<&Utf8Path> {
        self.faq_store.as_deref()
    }

    /// Runs per enhancement simulation.
    #[must_use]
    pub fn ees_samples(&self) -> NonZeroU32 {
        self.ees_samples
    }

    /// `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for log events.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

/// Result alias used by loaders that surface [`OrthoError`].
pub type ConfigResult = Result<Config, Arc<OrthoError>>;
