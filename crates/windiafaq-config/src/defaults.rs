use std::num::NonZeroU32;

use crate::endpoint::IpcEndpoint;
use crate::logging::LogFormat;

/// Endpoint the daemon connects to when nothing else is configured.
///
/// The chat front-end binds its REQ socket here; the daemon only connects.
pub const DEFAULT_IPC_ENDPOINT: &str = "tcp://127.0.0.1:5555";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Number of simulated runs behind each enhancement report.
pub const DEFAULT_EES_SAMPLES: NonZeroU32 = match NonZeroU32::new(10_000) {
    Some(samples) => samples,
    None => NonZeroU32::MIN,
};

/// Default log filter expression used by the binaries.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default endpoint for the request socket.
pub fn default_ipc_endpoint() -> IpcEndpoint {
    IpcEndpoint::from_validated(DEFAULT_IPC_ENDPOINT)
}

/// Default simulator sample count.
pub fn default_ees_samples() -> NonZeroU32 {
    DEFAULT_EES_SAMPLES
}
