// src/fetch/http.rs
// =============================================================================
// The reqwest-backed page fetcher.
//
// What it does for each URL:
// 1. GET the page with a timeout and our user agent
// 2. Reject non-2xx responses
// 3. Reject responses that are not HTML (images, PDFs, ...)
// 4. Stream the body, giving up as soon as it passes the size limit
// 5. Return the body as text (invalid UTF-8 is replaced, not rejected)
//
// TLS posture is the caller's choice: `accept_invalid_certs` lets the crawler
// walk sites with self-signed certificates, and is off unless asked for.
// =============================================================================

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{FetchError, Fetcher};

const HTML_CONTENT_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

// Transport settings for `ReqwestFetcher`
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub request_timeout: Duration,
    pub user_agent: String,
    pub max_bytes: u64,
    pub accept_invalid_certs: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            user_agent: concat!("link-harvester/", env!("CARGO_PKG_VERSION")).to_string(),
            max_bytes: 10 * 1024 * 1024,
            accept_invalid_certs: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    max_bytes: u64,
}

impl ReqwestFetcher {
    // Builds the HTTP client once; it is reused (and connection-pooled)
    // for every page of the crawl.
    pub fn new(settings: FetchSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            max_bytes: settings.max_bytes,
        })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        // A missing header is given the benefit of the doubt
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !is_html(content_type) {
                return Err(FetchError::UnsupportedContentType {
                    content_type: content_type.to_string(),
                });
            }
        }

        if let Some(length) = response.content_length() {
            if length > self.max_bytes {
                return Err(FetchError::TooLarge {
                    max_bytes: self.max_bytes,
                    actual: Some(length),
                });
            }
        }

        // Chunked responses carry no length, so the limit is enforced while reading
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(categorize_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(FetchError::TooLarge {
                    max_bytes: self.max_bytes,
                    actual: Some(next_len),
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!(url = %url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

// Checks the media type part of a Content-Type header ("text/html; charset=utf-8")
fn is_html(content_type: &str) -> bool {
    let media_type = content_type.split(';').next().unwrap_or(content_type).trim();
    HTML_CONTENT_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(media_type))
}

fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network {
            message: error.to_string(),
        }
    }
}
