//! HTTP access behind a trait.
//!
//! The pipeline only needs two operations: a metadata probe (HEAD) and a
//! full-body fetch (GET). `CurlTransport` does both over libcurl;
//! `MemoryTransport` serves canned responses for offline tests.

mod libcurl;
mod memory;

pub use libcurl::CurlTransport;
pub use memory::{MemoryTransport, Method, RequestRecord};

use crate::locator::SourceLocator;
use thiserror::Error;

/// Network-level failure: DNS, connect, timeout, TLS, malformed response.
///
/// HTTP error statuses are not `TransportError`s; they come back as a
/// status code.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Used by test transports to simulate an unreachable host.
    #[error("connection failed: {0}")]
    Unreachable(String),
}

/// Status and complete body of a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Only a plain 200 carries a complete archive body.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub trait Transport {
    /// Issues a HEAD request and returns the final status code.
    fn head(&self, locator: &SourceLocator) -> Result<u32, TransportError>;

    /// Issues a GET request and returns status and body.
    fn get(&self, locator: &SourceLocator) -> Result<HttpResponse, TransportError>;

    /// Best-effort check that `locator` can currently be fetched.
    ///
    /// Statuses of 400 and above and every network failure collapse to `false`.
    fn is_reachable(&self, locator: &SourceLocator) -> bool {
        match self.head(locator) {
            Ok(code) => code != 0 && code < 400,
            Err(e) => {
                tracing::debug!(url = %locator, error = %e, "HEAD probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(raw: &str) -> SourceLocator {
        SourceLocator::parse(raw).unwrap()
    }

    #[test]
    fn only_200_is_success() {
        let ok = HttpResponse { status: 200, body: vec![] };
        let no_content = HttpResponse { status: 204, body: vec![] };
        let redirect = HttpResponse { status: 302, body: vec![] };
        let missing = HttpResponse { status: 404, body: vec![] };
        assert!(ok.is_success());
        assert!(!no_content.is_success());
        assert!(!redirect.is_success());
        assert!(!missing.is_success());
    }

    #[test]
    fn reachability_collapses_errors_and_4xx_5xx() {
        let t = MemoryTransport::new()
            .with_archive("http://h/ok.zip", b"zip".to_vec())
            .with_status("http://h/moved.zip", 301)
            .with_status("http://h/missing.zip", 404)
            .with_status("http://h/broken.zip", 500);

        assert!(t.is_reachable(&loc("http://h/ok.zip")));
        assert!(t.is_reachable(&loc("http://h/moved.zip")));
        assert!(!t.is_reachable(&loc("http://h/missing.zip")));
        assert!(!t.is_reachable(&loc("http://h/broken.zip")));
        assert!(!t.is_reachable(&loc("http://nowhere/x.zip")));
    }
}
