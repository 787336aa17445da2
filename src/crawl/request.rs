// src/crawl/request.rs
// =============================================================================
// The invocation boundary: raw user input in, filtered links out.
//
// Both front ends (the CLI and the web form) receive a seed URL string and a
// comma-separated extension list. This module validates them, runs the crawl
// and applies the extension filter to what was discovered.
// =============================================================================

use serde::Serialize;
use thiserror::Error;
use url::Url;

use super::engine::{crawl, CrawlConfig, CrawlReport};
use crate::fetch::Fetcher;
use crate::links::{filter_by_extension, parse_extension_list};

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid URL '{input}': {source}")]
    InvalidSeed {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

// A validated crawl request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    pub seed: Url,
    pub extensions: Vec<String>,
}

impl CrawlRequest {
    // Parameters:
    //   seed: must parse as an absolute URL
    //   extensions: split on ',' exactly as given, e.g. ".jpg,.png"
    pub fn parse(seed: &str, extensions: &str) -> Result<Self, CrawlError> {
        let seed = Url::parse(seed).map_err(|source| CrawlError::InvalidSeed {
            input: seed.to_string(),
            source,
        })?;

        Ok(Self {
            seed,
            extensions: parse_extension_list(extensions),
        })
    }
}

// The crawl report together with the links that matched the extension list
#[derive(Debug, Clone, Serialize)]
pub struct Harvest {
    pub extensions: Vec<String>,
    pub matches: Vec<Url>,
    pub report: CrawlReport,
}

pub async fn harvest(request: CrawlRequest, fetcher: &dyn Fetcher, config: &CrawlConfig) -> Harvest {
    let report = crawl(request.seed, fetcher, config).await;
    let matches = filter_by_extension(&report.discovered, &request.extensions);

    Harvest {
        extensions: request.extensions,
        matches,
        report,
    }
}
