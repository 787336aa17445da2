// src/fetch/mod.rs
// =============================================================================
// This module is the crawler's window onto the network.
//
// The crawl engine never talks to reqwest directly. It only sees the
// `Fetcher` trait: "give me the markup behind this URL, or tell me why not".
// That keeps the engine testable with an in-memory site and lets the HTTP
// details (timeouts, TLS, size limits) live in one place.
//
// Submodules:
// - http: the reqwest-backed fetcher used by the CLI and the web front end
// =============================================================================

mod http;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use url::Url;

pub use http::{FetchSettings, ReqwestFetcher};

// Why a page could not be fetched.
//
// Every variant is non-fatal for a crawl: the engine records it against the
// URL and moves on to the next frontier entry.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    /// Server answered with a non-2xx status
    #[error("HTTP {code}")]
    Status { code: u16 },
    /// Request did not finish within the configured timeout
    #[error("request timed out")]
    Timeout,
    /// Response is not an HTML document
    #[error("unsupported content type {content_type}")]
    UnsupportedContentType { content_type: String },
    /// Body exceeded the configured size limit
    #[error("response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Connection, DNS, TLS or any other transport failure
    #[error("network error: {message}")]
    Network { message: String },
}

// The fetch capability consumed by the crawl engine.
//
// Implementations return the page body as text on success. Send + Sync so a
// single fetcher can be shared by the web front end's request handlers.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}
