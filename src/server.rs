use crate::capture::CapturedRequest;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::matchers::{path_prefix, Matcher, PathPrefix};
use crate::responders::{self, CannedResponse};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

/// Wait for a single request matching `config`, answer it and shut down.
///
/// This binds `config.host:config.port`, waits at most `config.timeout` for a
/// request whose path starts with `config.path`, replies with the configured
/// response and returns what was captured. Requests to other paths get a
/// `404 Not Found` and are otherwise ignored.
///
/// ```no_run
/// # async fn run() -> httpcapture::Result<()> {
/// let captured = httpcapture::wait_for_request(httpcapture::Config::default().port(3001)).await?;
/// println!("query: {:?} body: {}", captured.query, captured.body);
/// # Ok(())
/// # }
/// ```
pub async fn wait_for_request(config: Config) -> Result<CapturedRequest> {
    CaptureServer::bind(config).await?.wait().await
}

/// A listening capture server that has not yet seen a matching request.
///
/// Use this instead of [wait_for_request] when the address must be known
/// before the request is sent, for instance when binding port `0`.
#[derive(Debug)]
pub struct CaptureServer {
    listener: TcpListener,
    addr: SocketAddr,
    timeout: Duration,
    handler: Arc<Handler>,
}

impl CaptureServer {
    /// Bind the listener described by `config`.
    ///
    /// The timeout does not start until [wait](#method.wait) is called.
    pub async fn bind(config: Config) -> Result<Self> {
        let response = CannedResponse::from_config(&config)?;
        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .map_err(|err| Error::bind(&config.host, config.port, err))?;
        let addr = listener.local_addr()?;
        log::info!(
            "Server running at http://{}:{}{}",
            config.host,
            addr.port(),
            config.path
        );
        Ok(CaptureServer {
            listener,
            addr,
            timeout: config.timeout,
            handler: Arc::new(Handler {
                matcher: path_prefix(config.path),
                response,
            }),
        })
    }

    /// Get the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get a fully formed url to the servers address.
    ///
    /// If the server is listening on port 1234.
    ///
    /// `server.url("/foo?q=1") == "http://127.0.0.1:1234/foo?q=1"`
    ///
    /// Panics if `path_and_query` is not a valid path and query.
    pub fn url<T>(&self, path_and_query: T) -> http::Uri
    where
        http::uri::PathAndQuery: TryFrom<T>,
        <http::uri::PathAndQuery as TryFrom<T>>::Error: Into<http::Error>,
    {
        http::Uri::builder()
            .scheme("http")
            .authority(self.addr.to_string().as_str())
            .path_and_query(path_and_query)
            .build()
            .expect("invalid path_and_query")
    }

    /// Wait for a matching request.
    ///
    /// Resolves once the matching request has been answered, or fails when
    /// the timeout elapses or the listener faults. Whichever happens first
    /// decides the outcome; the listener is closed before this returns.
    pub async fn wait(self) -> Result<CapturedRequest> {
        let CaptureServer {
            listener,
            timeout,
            handler,
            ..
        } = self;
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);
        let mut connections = JoinSet::new();
        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = accepted?;
                    log::debug!("Accepted connection from {}", peer);
                    connections.spawn(serve_connection(stream, handler.clone()));
                }
                Some(joined) = connections.join_next() => match joined {
                    Ok(Some(outcome)) => return outcome,
                    Ok(None) => {}
                    Err(err) => log::debug!("connection task failed: {}", err),
                },
                _ = &mut deadline => {
                    log::debug!("no matching request within {:?}", timeout);
                    return Err(Error::Timeout);
                }
            }
        }
    }
}

type Outcome = Mutex<Option<Result<CapturedRequest>>>;

#[derive(Debug)]
struct Handler {
    matcher: PathPrefix,
    response: CannedResponse,
}

impl Handler {
    async fn on_req(
        &self,
        req: hyper::Request<Incoming>,
        outcome: &Outcome,
    ) -> hyper::Result<hyper::Response<Full<Bytes>>> {
        log::debug!("Received Request: {:?}", req);
        if !self.matcher.matches(&req) {
            return Ok(responders::not_found());
        }
        // read the full body into memory prior to capturing.
        let (head, body) = req.into_parts();
        let body = body.collect().await?.to_bytes();
        let captured = CapturedRequest::from_request(hyper::Request::from_parts(head, body))
            .map_err(Error::from);
        if let Err(err) = &captured {
            log::debug!("Failed to capture request: {}", err);
        }
        *outcome.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(captured);
        let resp = self.response.respond();
        log::debug!("Sending Response: {:?}", resp);
        Ok(resp)
    }
}

// Serve one connection to completion. Keep-alive is off, so this returns only
// after the response has been written and the connection closed.
async fn serve_connection(
    stream: TcpStream,
    handler: Arc<Handler>,
) -> Option<Result<CapturedRequest>> {
    let outcome: Arc<Outcome> = Arc::default();
    let service = hyper::service::service_fn({
        let outcome = outcome.clone();
        move |req| {
            let handler = handler.clone();
            let outcome = outcome.clone();
            async move { handler.on_req(req, &outcome).await }
        }
    });
    if let Err(err) = http1::Builder::new()
        .keep_alive(false)
        .serve_connection(TokioIo::new(stream), service)
        .await
    {
        log::debug!("Error serving connection: {}", err);
    }
    let captured = outcome
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take();
    captured
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local() -> Config {
        Config::default().host("127.0.0.1").port(0)
    }

    #[tokio::test]
    async fn test_bind_reports_os_assigned_port() {
        let server = CaptureServer::bind(local()).await.unwrap();
        assert_ne!(0, server.addr().port());
        assert_eq!(
            format!("http://127.0.0.1:{}/foo?q=1", server.addr().port()),
            server.url("/foo?q=1").to_string()
        );
    }

    #[tokio::test]
    async fn test_invalid_response_fails_before_bind() {
        let err = CaptureServer::bind(local().response_status(42)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout_starts_on_wait() {
        let server = CaptureServer::bind(local().timeout(Duration::from_millis(50)))
            .await
            .unwrap();
        let started = tokio::time::Instant::now();
        let err = server.wait().await.unwrap_err();
        assert!(err.is_timeout());
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
