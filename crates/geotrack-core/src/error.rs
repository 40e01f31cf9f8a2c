//! Error types for the geotrack console.

use thiserror::Error;

/// Result type alias using geotrack's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for geotrack operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Request never reached the server (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status; `message` is the
    /// response body text, surfaced verbatim for display
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Client-side required-field check failed before submit
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The page-local detail string shown to the operator.
    ///
    /// For server errors this is the raw response body, not the
    /// status-prefixed Display form.
    pub fn detail(&self) -> String {
        match self {
            Error::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_network() {
        let err = Error::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_display_server() {
        let err = Error::Server {
            status: 400,
            message: "bad deviceId".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (400): bad deviceId");
    }

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("latitude is required".to_string());
        assert_eq!(err.to_string(), "Validation error: latitude is required");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("invalid base URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: invalid base URL");
    }

    #[test]
    fn test_server_detail_is_body_only() {
        let err = Error::Server {
            status: 400,
            message: "bad deviceId".to_string(),
        };
        assert_eq!(err.detail(), "bad deviceId");
    }

    #[test]
    fn test_network_detail_includes_kind() {
        let err = Error::Network("timed out".to_string());
        assert_eq!(err.detail(), "Network error: timed out");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
