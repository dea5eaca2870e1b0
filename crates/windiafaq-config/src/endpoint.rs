use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transports understood by the ZeroMQ socket layer.
const SUPPORTED_SCHEMES: &[&str] = &["tcp", "ipc", "inproc", "pgm", "epgm"];

/// Validated ZeroMQ endpoint the daemon connects its reply socket to.
///
/// The value keeps the caller's spelling; validation only checks that a known
/// transport prefix is followed by a non-empty address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpcEndpoint(String);

impl IpcEndpoint {
    /// Wraps a literal that is known to be valid.
    pub(crate) fn from_validated(value: &str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the endpoint text as passed to `zmq_connect`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the transport prefix (for example `tcp`).
    #[must_use]
    pub fn transport(&self) -> &str {
        self.0
            .split_once("://")
            .map_or(self.0.as_str(), |(scheme, _)| scheme)
    }
}

impl fmt::Display for IpcEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl FromStr for IpcEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let Some((scheme, address)) = trimmed.split_once("://") else {
            return Err(EndpointParseError::MissingScheme(input.to_owned()));
        };
        let scheme = scheme.to_ascii_lowercase();
        if !SUPPORTED_SCHEMES.contains(&scheme.as_str()) {
            return Err(EndpointParseError::UnsupportedScheme(scheme));
        }
        if address.is_empty() {
            return Err(EndpointParseError::MissingAddress(input.to_owned()));
        }
        if scheme == "tcp" && !has_port(address) {
            return Err(EndpointParseError::MissingPort(input.to_owned()));
        }
        Ok(Self(format!("{scheme}://{address}")))
    }
}

impl TryFrom<String> for IpcEndpoint {
    type Error = EndpointParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IpcEndpoint> for String {
    fn from(endpoint: IpcEndpoint) -> Self {
        endpoint.0
    }
}

fn has_port(address: &str) -> bool {
    address
        .rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty() && (port == "*" || port.parse::<u16>().is_ok()))
}

/// Errors encountered while parsing an [`IpcEndpoint`] from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointParseError {
    /// The value had no `transport://` prefix.
    #[error("endpoint '{0}' is missing a transport prefix such as tcp://")]
    MissingScheme(String),
    /// The transport prefix is not one ZeroMQ understands.
    #[error("unsupported endpoint transport '{0}'")]
    UnsupportedScheme(String),
    /// Nothing followed the transport prefix.
    #[error("endpoint '{0}' has no address")]
    MissingAddress(String),
    /// TCP endpoints need an explicit port.
    #[error("missing TCP port in '{0}'")]
    MissingPort(String),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::tcp("tcp://127.0.0.1:5555", "tcp")]
    #[case::wildcard_port("tcp://localhost:*", "tcp")]
    #[case::ipc("ipc:///tmp/windiafaq.ipc", "ipc")]
    #[case::inproc("inproc://faq", "inproc")]
    #[case::upper_scheme("TCP://10.0.0.2:7000", "tcp")]
    fn accepts_known_transports(#[case] input: &str, #[case] transport: &str) {
        let endpoint: IpcEndpoint = input.parse().expect("valid endpoint");
        assert_eq!(endpoint.transport(), transport);
    }

    #[rstest]
    #[case::no_scheme("127.0.0.1:5555")]
    #[case::unknown_scheme("udp://127.0.0.1:5555")]
    #[case::empty_address("ipc://")]
    #[case::no_port("tcp://127.0.0.1")]
    #[case::bad_port("tcp://127.0.0.1:http")]
    fn rejects_invalid_endpoints(#[case] input: &str) {
        assert!(input.parse::<IpcEndpoint>().is_err(), "{input} should fail");
    }

    #[test]
    fn normalises_scheme_case() {
        let endpoint: IpcEndpoint = "TCP://host:1".parse().expect("valid endpoint");
        assert_eq!(endpoint.to_string(), "tcp://host:1");
    }
}
