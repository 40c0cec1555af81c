//! Request/response model for intercepted fetches.
//!
//! Mirrors the subset of the fetch model the worker cares about: method,
//! URL, declared resource destination, and request mode. Response bodies are
//! `Bytes`, so duplicating a response for the cache-write path and the
//! return path is a cheap reference-count bump rather than a body copy.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use url::Url;

/// Declared destination of a request (what kind of resource the requester
/// expects), as reported by the interception point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Document,
    Image,
    Script,
    Style,
    Font,
    Other,
}

/// Mode of a request. `Navigate` marks top-level document loads, which get
/// the offline-fallback treatment on network failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Navigate,
    SameOrigin,
    NoCors,
    Cors,
}

/// An intercepted outbound request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub destination: Destination,
    pub mode: RequestMode,
    pub headers: HeaderMap,
}

impl Request {
    /// A plain GET subresource request.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            destination: Destination::Other,
            mode: RequestMode::Cors,
            headers: HeaderMap::new(),
        }
    }

    /// A top-level document navigation.
    pub fn navigate(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            destination: Destination::Document,
            mode: RequestMode::Navigate,
            headers: HeaderMap::new(),
        }
    }

    /// Override the declared destination.
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Override the method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate
    }
}

/// Where a response came from. Cached entries are retagged on read so the
/// caller can tell a hit from a fresh fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Network,
    Cache,
    Fallback,
    Synthetic,
}

impl std::fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResponseSource::Network => "network",
            ResponseSource::Cache => "cache",
            ResponseSource::Fallback => "fallback",
            ResponseSource::Synthetic => "synthetic",
        };
        f.write_str(s)
    }
}

/// A response produced by the worker: real, cached, fallback, or synthetic.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub source: ResponseSource,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, source: ResponseSource) -> Self {
        Self { status, headers, body, source }
    }

    /// Synthetic 404 with a short plain-text body.
    pub fn not_found(message: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        Self {
            status: StatusCode::NOT_FOUND,
            headers,
            body: Bytes::copy_from_slice(message.as_bytes()),
            source: ResponseSource::Synthetic,
        }
    }

    /// Retag the response with a new source, e.g. when serving a stored copy.
    pub fn with_source(mut self, source: ResponseSource) -> Self {
        self.source = source;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }
}
