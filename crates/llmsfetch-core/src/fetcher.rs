//! HTTP access for the resolution cascade.
//!
//! Every network read the resolver performs goes through [`HttpFetch`]. The
//! production implementation is [`ReqwestFetcher`]; [`CannedFetcher`] answers
//! from a fixed URL → response table and records the order of requests, which
//! makes every stage testable without real network traffic.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::{Error, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The parts of an HTTP response the resolver reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code (e.g. 200, 404).
    pub status: u16,
    /// Raw `content-type` header value, if present.
    pub content_type: Option<String>,
    /// Full text body.
    pub body: String,
}

impl HttpResponse {
    /// A response with the given status, no content type and no body.
    pub const fn with_status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
        }
    }

    /// `200 OK` with the given content type and body.
    pub fn ok(content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// `200 OK` served as `text/plain`.
    pub fn plain(body: impl Into<String>) -> Self {
        Self::ok(Some("text/plain; charset=utf-8"), body)
    }

    /// `200 OK` served as `text/markdown`.
    pub fn markdown(body: impl Into<String>) -> Self {
        Self::ok(Some("text/markdown"), body)
    }

    /// `200 OK` served as `text/html`.
    pub fn html(body: impl Into<String>) -> Self {
        Self::ok(Some("text/html; charset=utf-8"), body)
    }

    /// `200 OK` served as `application/json`.
    pub fn json(body: impl Into<String>) -> Self {
        Self::ok(Some("application/json"), body)
    }

    /// Whether the status is in the 2xx range.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Injectable network capability: a plain GET returning status, content type
/// and body.
///
/// Implementations return `Err` only for transport-level failures (DNS,
/// connection, timeout); any HTTP status is an `Ok` response.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Perform a GET request.
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// [`HttpFetch`] backed by a `reqwest` client with a bounded timeout.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Creates a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a fetcher with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("llmsfetch/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

#[derive(Debug, Clone)]
enum Canned {
    Respond(HttpResponse),
    Fail(String),
}

/// Deterministic [`HttpFetch`] answering from a URL-keyed table.
///
/// Unregistered URLs answer `404` with an empty body. URLs registered with
/// [`fail`](Self::fail) produce a transport error. Every request is recorded,
/// in order, and can be inspected with [`requests`](Self::requests).
///
/// ```rust
/// use llmsfetch_core::{CannedFetcher, HttpResponse};
///
/// let fetcher = CannedFetcher::new()
///     .route("https://x.dev/llms.txt", HttpResponse::plain("# X"))
///     .fail("https://down.dev/llms.txt");
/// assert!(fetcher.requests().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CannedFetcher {
    routes: HashMap<String, Canned>,
    log: Mutex<Vec<String>>,
}

impl CannedFetcher {
    /// An empty table: every URL answers `404`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `response`.
    #[must_use]
    pub fn route(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.routes.insert(url.into(), Canned::Respond(response));
        self
    }

    /// Make requests to `url` fail at the transport level.
    #[must_use]
    pub fn fail(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        let reason = format!("connection refused: {url}");
        self.routes.insert(url, Canned::Fail(reason));
        self
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpFetch for CannedFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        if let Ok(mut log) = self.log.lock() {
            log.push(url.to_string());
        }

        match self.routes.get(url) {
            Some(Canned::Respond(response)) => Ok(response.clone()),
            Some(Canned::Fail(reason)) => Err(Error::Transport(reason.clone())),
            None => Ok(HttpResponse::with_status(404)),
        }
    }
}
