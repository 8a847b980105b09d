//! Error types for the DDNS updater
//!
//! Every failure in a run is fatal. Errors are propagated as values up to the
//! binary, which logs them and maps them to a process exit code.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code used for every fatal condition
pub const FAILURE_EXIT_CODE: u8 = 2;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// One or more required configuration values are empty
    #[error("missing required configuration: {}", .0.join(", "))]
    ConfigurationMissing(Vec<&'static str>),

    /// The named network interface does not exist
    #[error("failed to locate network interface {interface}")]
    InterfaceNotFound {
        /// Interface name as given on the command line
        interface: String,
    },

    /// The platform could not list the addresses bound to an interface
    #[error("failed to get network interface addresses for {interface}: {source}")]
    AddressEnumerationFailed {
        /// Interface name as given on the command line
        interface: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// An HTTP request could not be constructed (nothing was sent)
    #[error("failed to prepare {operation} request: {message}")]
    RequestPreparationFailed {
        /// Human-readable name of the exchange
        operation: String,
        /// Builder error text
        message: String,
    },

    /// A request body could not be encoded
    #[error("failed to serialize {what}: {source}")]
    SerializationFailed {
        /// What was being encoded
        what: String,
        /// Encoder error
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP exchange could not be completed
    #[error("failed to {operation}: {message}")]
    Network {
        /// Human-readable name of the exchange
        operation: String,
        /// Transport error text
        message: String,
    },

    /// The provider answered with a status other than the one required
    #[error("failed to {operation}: expected status {expected}, got {observed}: {body}")]
    UnexpectedStatus {
        /// Human-readable name of the exchange
        operation: String,
        /// Status the operation requires
        expected: u16,
        /// Status the provider returned
        observed: u16,
        /// Response body text, for diagnosis
        body: String,
    },

    /// The response body did not have the expected JSON shape
    #[error("failed to parse current host records: {0}")]
    MalformedResponseBody(#[source] serde_json::Error),
}

impl Error {
    /// Create an interface-not-found error
    pub fn interface_not_found(interface: impl Into<String>) -> Self {
        Self::InterfaceNotFound {
            interface: interface.into(),
        }
    }

    /// Create an address enumeration error
    pub fn address_enumeration(interface: impl Into<String>, source: std::io::Error) -> Self {
        Self::AddressEnumerationFailed {
            interface: interface.into(),
            source,
        }
    }

    /// Create a request preparation error
    pub fn request_preparation(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::RequestPreparationFailed {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Create a serialization error
    pub fn serialization(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::SerializationFailed {
            what: what.into(),
            source,
        }
    }

    /// Create a network error
    pub fn network(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::Network {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(
        operation: impl Into<String>,
        expected: u16,
        observed: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::UnexpectedStatus {
            operation: operation.into(),
            expected,
            observed,
            body: body.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// All kinds are fatal and share one code; the match keeps the mapping
    /// explicit when a new kind is added.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::ConfigurationMissing(_)
            | Error::InterfaceNotFound { .. }
            | Error::AddressEnumerationFailed { .. }
            | Error::RequestPreparationFailed { .. }
            | Error::SerializationFailed { .. }
            | Error::Network { .. }
            | Error::UnexpectedStatus { .. }
            | Error::MalformedResponseBody(_) => FAILURE_EXIT_CODE,
        }
    }

    /// Whether any network traffic can have happened before this error
    pub fn is_pre_network(&self) -> bool {
        matches!(
            self,
            Error::ConfigurationMissing(_)
                | Error::InterfaceNotFound { .. }
                | Error::AddressEnumerationFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_to_exit_code_two() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let errors = vec![
            Error::ConfigurationMissing(vec!["domain"]),
            Error::interface_not_found("eth9"),
            Error::address_enumeration("eth0", std::io::Error::other("boom")),
            Error::request_preparation("domain records", "bad header"),
            Error::network("get domain records", "connection refused"),
            Error::unexpected_status("get domain records", 200, 403, "denied"),
            Error::MalformedResponseBody(json_err),
        ];

        for error in errors {
            assert_eq!(error.exit_code(), 2, "{error}");
        }
    }

    #[test]
    fn unexpected_status_message_carries_body() {
        let error = Error::unexpected_status("update domain records", 201, 409, "conflict");
        let message = error.to_string();
        assert!(message.contains("201"));
        assert!(message.contains("409"));
        assert!(message.contains("conflict"));
    }

    #[test]
    fn configuration_missing_lists_fields() {
        let error = Error::ConfigurationMissing(vec!["apiKey", "ifname"]);
        assert_eq!(
            error.to_string(),
            "missing required configuration: apiKey, ifname"
        );
    }

    #[test]
    fn discovery_errors_are_pre_network() {
        assert!(Error::interface_not_found("eth9").is_pre_network());
        assert!(!Error::network("get domain records", "reset").is_pre_network());
    }
}
