//! Matcher deciding which requests get captured.

use std::fmt;

/// Decide whether an incoming request should be captured.
pub trait Matcher<B>: Send + Sync + fmt::Debug {
    /// true if the request matches.
    fn matches(&self, req: &http::Request<B>) -> bool;
}

/// Match requests whose path starts with `prefix`.
///
/// Only the path is compared; the query string is ignored.
pub fn path_prefix(prefix: impl Into<String>) -> PathPrefix {
    PathPrefix(prefix.into())
}

/// The `PathPrefix` matcher returned by [path_prefix()](fn.path_prefix.html)
#[derive(Debug, Clone)]
pub struct PathPrefix(String);

impl PathPrefix {
    /// The prefix being matched.
    pub fn prefix(&self) -> &str {
        &self.0
    }
}

impl<B> Matcher<B> for PathPrefix {
    fn matches(&self, req: &http::Request<B>) -> bool {
        let path = req.uri().path();
        let matched = path.starts_with(self.0.as_str());
        log::debug!(
            "Matching {:?} with path: {:?} {}",
            self,
            path,
            if matched { "matches" } else { "does not match" }
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(uri: &str) -> http::Request<()> {
        http::Request::get(uri).body(()).unwrap()
    }

    #[test]
    fn test_root_matches_everything() {
        let m = path_prefix("/");
        assert!(m.matches(&req("http://localhost/")));
        assert!(m.matches(&req("http://localhost/anything/at/all?x=1")));
        assert!(m.matches(&req("/relative")));
    }

    #[test]
    fn test_prefix_not_exact() {
        let m = path_prefix("/test");
        assert!(m.matches(&req("/test")));
        assert!(m.matches(&req("/test/child")));
        assert!(m.matches(&req("/testing")));
        assert!(m.matches(&req("/test?name=value")));
        assert!(!m.matches(&req("/wrong")));
        assert!(!m.matches(&req("/tes")));
        assert!(!m.matches(&req("/other/test")));
    }

    #[test]
    fn test_query_is_not_part_of_path() {
        let m = path_prefix("/search?q=");
        assert!(!m.matches(&req("/search?q=rust")));
        assert_eq!("/search?q=", m.prefix());
    }
}
