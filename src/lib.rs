//! Capture a single outbound HTTP request in a test.
//!
//! [wait_for_request] starts a throwaway server, waits for one request whose
//! path starts with the configured prefix, answers it with a canned response
//! and hands back the query parameters and JSON body it carried. The server
//! is gone by the time the future resolves.
//!
//! ```no_run
//! use httpcapture::{wait_for_request, Config};
//! # async fn run() -> httpcapture::Result<()> {
//! let capture = tokio::spawn(wait_for_request(Config::default().port(3001).path("/hook")));
//! // ... run the code under test, pointing it at http://localhost:3001/hook ...
//! let captured = capture.await.expect("capture task panicked")?;
//! assert_eq!(Some("1"), captured.query.get("attempt").map(String::as_str));
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod matchers;
pub mod responders;
pub mod server;

pub use capture::CapturedRequest;
pub use config::Config;
pub use error::{Error, Result};
pub use server::wait_for_request;
pub use server::CaptureServer;
