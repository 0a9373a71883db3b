//! In-memory transport for offline tests.

use super::{HttpResponse, Transport, TransportError};
use crate::locator::SourceLocator;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Head,
    Get,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: Method,
    pub url: String,
}

#[derive(Debug, Clone)]
struct Resource {
    head_status: u32,
    get: HttpResponse,
}

/// Serves canned responses keyed by URL. Unknown URLs behave like an
/// unreachable host. Every request is recorded.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    resources: HashMap<String, Resource>,
    requests: RefCell<Vec<RequestRecord>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// HEAD and GET both succeed; GET returns `body`.
    pub fn with_archive(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.with_resource(url, 200, HttpResponse { status: 200, body: body.into() })
    }

    /// HEAD and GET both answer `status` with an empty body.
    pub fn with_status(self, url: &str, status: u32) -> Self {
        self.with_resource(url, status, HttpResponse { status, body: Vec::new() })
    }

    /// HEAD succeeds but GET answers `status` (the server changed its mind).
    pub fn with_rejected_get(self, url: &str, status: u32) -> Self {
        self.with_resource(url, 200, HttpResponse { status, body: Vec::new() })
    }

    fn with_resource(mut self, url: &str, head_status: u32, get: HttpResponse) -> Self {
        self.resources
            .insert(url.to_string(), Resource { head_status, get });
        self
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<RequestRecord> {
        self.requests.borrow().clone()
    }

    fn record(&self, method: Method, locator: &SourceLocator) -> Option<&Resource> {
        self.requests.borrow_mut().push(RequestRecord {
            method,
            url: locator.as_str().to_string(),
        });
        self.resources.get(locator.as_str())
    }
}

impl Transport for MemoryTransport {
    fn head(&self, locator: &SourceLocator) -> Result<u32, TransportError> {
        self.record(Method::Head, locator)
            .map(|r| r.head_status)
            .ok_or_else(|| TransportError::Unreachable(locator.to_string()))
    }

    fn get(&self, locator: &SourceLocator) -> Result<HttpResponse, TransportError> {
        self.record(Method::Get, locator)
            .map(|r| r.get.clone())
            .ok_or_else(|| TransportError::Unreachable(locator.to_string()))
    }
}
