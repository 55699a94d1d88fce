//! The data recorded from a matching request.

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;

/// A captured request.
#[derive(Debug)]
pub struct CapturedRequest {
    /// Query parameters. Empty if the url had no query string. When a key
    /// repeats, the last value wins.
    pub query: HashMap<String, String>,
    /// The body parsed as JSON, or `Value::Null` when no body was sent.
    pub body: Value,
    /// The full request as received, including the unparsed body bytes.
    pub raw: http::Request<Bytes>,
}

impl CapturedRequest {
    /// Parse a complete request into a capture.
    ///
    /// Fails only if the body is non-empty and not valid JSON.
    pub fn from_request(raw: http::Request<Bytes>) -> Result<Self, serde_json::Error> {
        let query = parse_query(raw.uri().query().unwrap_or(""));
        let body = parse_body(raw.body())?;
        Ok(CapturedRequest { query, body, raw })
    }

    /// Deserialize the captured body into `T`.
    pub fn body_as<T>(&self) -> Result<T, serde_json::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        T::deserialize(&self.body)
    }

    /// The request method.
    pub fn method(&self) -> &http::Method {
        self.raw.method()
    }

    /// The request path, without the query string.
    pub fn path(&self) -> &str {
        self.raw.uri().path()
    }

    /// The request headers.
    pub fn headers(&self) -> &http::HeaderMap {
        self.raw.headers()
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
}
