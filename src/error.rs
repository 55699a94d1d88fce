//! Error types returned when waiting for a request.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Ways waiting for a request can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// No matching request arrived within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The `host:port` that was requested.
        addr: String,
        /// The underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The listener faulted after it was bound.
    #[error(transparent)]
    Transport(#[from] std::io::Error),

    /// A matching request carried a body that is not valid JSON.
    #[error("request body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The configured response could not be turned into an HTTP response.
    #[error("invalid response configuration: {0}")]
    InvalidResponse(#[from] http::Error),
}

impl Error {
    /// true if the operation failed because no request arrived in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }

    pub(crate) fn bind(host: &str, port: u16, source: std::io::Error) -> Self {
        Error::Bind {
            addr: format!("{}:{}", host, port),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_timeout_message() {
        let err = Error::Timeout;
        assert!(err.is_timeout());
        assert_eq!("Request timed out", err.to_string());
    }

    #[test]
    fn test_bind_preserves_source() {
        let err = Error::bind("localhost", 3000, std::io::ErrorKind::AddrInUse.into());
        assert!(!err.is_timeout());
        assert!(err.to_string().starts_with("failed to bind localhost:3000"));
        let source = err
            .source()
            .and_then(|s| s.downcast_ref::<std::io::Error>())
            .unwrap();
        assert_eq!(std::io::ErrorKind::AddrInUse, source.kind());
    }
}
