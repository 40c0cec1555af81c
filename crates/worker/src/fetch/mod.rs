//! Network fetch seam for the worker.
//!
//! The manager talks to the network through the [`Fetcher`] trait so tests
//! can script responses without sockets. [`HttpFetcher`] is the real
//! implementation over reqwest.
//!
//! Non-ok responses are NOT errors here: the strategies return them to the
//! caller as-is. Only transport-level failures (connect, timeout, oversized
//! body) surface as [`FetchError`] and trigger the fallback paths.

pub mod url;

use async_trait::async_trait;
use offcache_core::http::{Request, Response, ResponseSource};
use offcache_core::{Error, WorkerConfig};
use reqwest::Client;

pub use url::{UrlError, canonicalize};

/// Error type for transport-level fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("response too large: {0} bytes exceeds {1}")]
    TooLarge(u64, usize),
}

/// A fetch capability: takes a request descriptor, returns a response or
/// fails at the transport level.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}

/// Reqwest-backed fetcher.
pub struct HttpFetcher {
    http: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    /// Build a fetcher from the worker configuration.
    pub fn new(config: &WorkerConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, max_body_bytes: config.max_body_bytes })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let response = self
            .http
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(e.to_string())
                } else {
                    FetchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let headers = response.headers().clone();

        if let Some(len) = response.content_length()
            && len as usize > self.max_body_bytes
        {
            return Err(FetchError::TooLarge(len, self.max_body_bytes));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read response: {e}")))?;

        if bytes.len() > self.max_body_bytes {
            return Err(FetchError::TooLarge(bytes.len() as u64, self.max_body_bytes));
        }

        tracing::debug!("fetched {} -> {} ({} bytes)", request.url, status, bytes.len());

        Ok(Response::new(status, headers, bytes, ResponseSource::Network))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted fetcher for strategy and manager tests.

    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fetcher backed by a fixed URL -> outcome table, counting calls.
    #[derive(Clone, Default)]
    pub(crate) struct MockFetcher {
        routes: Arc<std::sync::Mutex<HashMap<String, Result<Response, String>>>>,
        calls: Arc<AtomicUsize>,
    }

    impl MockFetcher {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn ok(self, url: &str, body: &'static [u8]) -> Self {
            self.respond(url, StatusCode::OK, body)
        }

        pub(crate) fn respond(self, url: &str, status: StatusCode, body: &'static [u8]) -> Self {
            let response = Response::new(status, HeaderMap::new(), Bytes::from_static(body), ResponseSource::Network);
            self.routes.lock().unwrap().insert(url.to_string(), Ok(response));
            self
        }

        pub(crate) fn fail(self, url: &str) -> Self {
            self.routes
                .lock()
                .unwrap()
                .insert(url.to_string(), Err("connection refused".to_string()));
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.routes.lock().unwrap().get(request.url.as_str()) {
                Some(Ok(response)) => Ok(response.clone()),
                Some(Err(message)) => Err(FetchError::Network(message.clone())),
                None => Err(FetchError::Network(format!("no scripted route for {}", request.url))),
            }
        }
    }
}
