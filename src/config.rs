//! Configuration for a single capture.
//!
//! Every field has a default, so callers only set what they care about:
//!
//! ```
//! # use httpcapture::Config;
//! # use std::time::Duration;
//! let config = Config::default()
//!     .port(3001)
//!     .path("/webhook")
//!     .timeout(Duration::from_secs(5))
//!     .response_status(201);
//! assert_eq!("localhost", config.host);
//! assert_eq!("OK", config.response_body);
//! ```
//!
//! `Config` can also be deserialized, which is handy for fixture files. Keys
//! are camelCase and `timeout` is given in milliseconds:
//!
//! ```
//! # use httpcapture::Config;
//! let config: Config = serde_json::from_str(r#"{"port": 3002, "timeout": 250}"#).unwrap();
//! assert_eq!(3002, config.port);
//! assert_eq!(250, config.timeout.as_millis());
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default host to bind.
pub const DEFAULT_HOST: &str = "localhost";
/// Default port to bind.
pub const DEFAULT_PORT: u16 = 3000;
/// Default path prefix requests must start with.
pub const DEFAULT_PATH: &str = "/";
/// Default time to wait for a matching request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);
/// Default status of the canned response.
pub const DEFAULT_RESPONSE_STATUS: u16 = 200;
/// Default body of the canned response.
pub const DEFAULT_RESPONSE_BODY: &str = "OK";

/// How to listen, what to match and how to answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Host (name or ip) to bind the listener on.
    pub host: String,
    /// Port to bind. `0` lets the OS pick one; see
    /// [CaptureServer::addr](crate::CaptureServer::addr).
    pub port: u16,
    /// Requests whose path starts with this string are captured.
    pub path: String,
    /// How long to wait for a matching request.
    #[serde(with = "millis")]
    pub timeout: Duration,
    /// Status code of the canned response.
    pub response_status: u16,
    /// Headers of the canned response. Replaces the default outright.
    pub response_headers: BTreeMap<String, String>,
    /// Body of the canned response.
    pub response_body: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut response_headers = BTreeMap::new();
        response_headers.insert("Content-Type".to_owned(), "text/plain".to_owned());
        Config {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            response_status: DEFAULT_RESPONSE_STATUS,
            response_headers,
            response_body: DEFAULT_RESPONSE_BODY.to_owned(),
        }
    }
}

impl Config {
    /// Set the host to bind.
    pub fn host(self, host: impl Into<String>) -> Self {
        Config {
            host: host.into(),
            ..self
        }
    }

    /// Set the port to bind.
    pub fn port(self, port: u16) -> Self {
        Config { port, ..self }
    }

    /// Set the path prefix to match.
    pub fn path(self, path: impl Into<String>) -> Self {
        Config {
            path: path.into(),
            ..self
        }
    }

    /// Set how long to wait before giving up.
    pub fn timeout(self, timeout: Duration) -> Self {
        Config { timeout, ..self }
    }

    /// Set the status code of the canned response.
    pub fn response_status(self, response_status: u16) -> Self {
        Config {
            response_status,
            ..self
        }
    }

    /// Replace the headers of the canned response.
    pub fn response_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Config {
            response_headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..self
        }
    }

    /// Set the body of the canned response.
    pub fn response_body(self, response_body: impl Into<String>) -> Self {
        Config {
            response_body: response_body.into(),
            ..self
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!("localhost", config.host);
        assert_eq!(3000, config.port);
        assert_eq!("/", config.path);
        assert_eq!(Duration::from_secs(60), config.timeout);
        assert_eq!(200, config.response_status);
        assert_eq!(
            vec![("Content-Type", "text/plain")],
            config
                .response_headers
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect::<Vec<_>>()
        );
        assert_eq!("OK", config.response_body);
    }

    #[test]
    fn test_headers_replace_default() {
        let config = Config::default().response_headers(vec![("X-Thing", "1")]);
        assert_eq!(1, config.response_headers.len());
        assert_eq!(Some("1"), config.response_headers.get("X-Thing").map(String::as_str));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "path": "/hook",
            "timeout": 1500,
            "responseStatus": 204,
            "responseHeaders": {"Content-Type": "application/json"},
        }))
        .unwrap();
        assert_eq!(
            Config::default()
                .path("/hook")
                .timeout(Duration::from_millis(1500))
                .response_status(204)
                .response_headers(vec![("Content-Type", "application/json")]),
            config
        );
    }

    #[test]
    fn test_serialize_timeout_as_millis() {
        let value = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(serde_json::json!(60_000), value["timeout"]);
        assert_eq!(serde_json::json!("OK"), value["responseBody"]);
    }
}
