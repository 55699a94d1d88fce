//! Responses the capture server sends.
//!
//! A matching request gets the canned response built from the
//! [Config](crate::Config). Anything else gets [not_found].

use bytes::Bytes;
use http_body_util::Full;

use crate::config::Config;

/// A response that is validated once and replayed as many times as needed.
#[derive(Debug, Clone)]
pub struct CannedResponse(http::Response<Bytes>);

impl CannedResponse {
    /// Build the canned response described by `config`.
    ///
    /// Fails if the status code or any header name or value is not valid
    /// HTTP.
    pub fn from_config(config: &Config) -> Result<Self, http::Error> {
        let mut builder = http::Response::builder().status(config.response_status);
        for (name, value) in &config.response_headers {
            let name = http::header::HeaderName::try_from(name.as_str())?;
            let value = http::header::HeaderValue::try_from(value.as_str())?;
            builder = builder.header(name, value);
        }
        builder
            .body(Bytes::from(config.response_body.clone()))
            .map(CannedResponse)
    }

    /// The status code that will be sent.
    pub fn status(&self) -> http::StatusCode {
        self.0.status()
    }

    /// The headers that will be sent.
    pub fn headers(&self) -> &http::HeaderMap {
        self.0.headers()
    }

    /// The body that will be sent.
    pub fn body(&self) -> &Bytes {
        self.0.body()
    }

    pub(crate) fn respond(&self) -> http::Response<Full<Bytes>> {
        let mut resp = http::Response::new(Full::new(self.0.body().clone()));
        *resp.status_mut() = self.0.status();
        *resp.headers_mut() = self.0.headers().clone();
        resp
    }
}

/// The response sent to requests outside the configured path.
pub fn not_found() -> http::Response<Full<Bytes>> {
    let mut resp = http::Response::new(Full::new(Bytes::from_static(b"Not Found")));
    *resp.status_mut() = http::StatusCode::NOT_FOUND;
    resp.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::header::HeaderValue::from_static("text/plain"),
    );
    resp
}
