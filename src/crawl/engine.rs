// src/crawl/engine.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Take the next unvisited URL and fetch it
// 3. Extract all anchor links from the page
// 4. Every link with the seed's scheme is recorded as discovered and queued
// 5. Repeat until the frontier is empty (or a configured bound trips)
//
// Nothing here is fatal. A page that fails to fetch, or an href that does
// not resolve, is written to the report's `skipped` list and the crawl
// carries on with the rest of the frontier.
//
// Concurrency:
// - With `concurrency = 1` (the default) pages are fetched strictly one after
//   another in breadth-first order.
// - With more, up to N fetches are in flight inside this one task. Results
//   are absorbed one at a time, so the frontier and visited set are only
//   ever touched by the loop below.
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use super::queue::{CrawlItem, Frontier};
use super::scope::Scope;
use crate::fetch::{FetchError, Fetcher};
use crate::links::extract_links;

// Bounds and policy for one crawl. The default is unbounded and sequential.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Stop after this many pages have been fetched
    pub max_pages: Option<usize>,
    /// Do not follow links more than this many hops from the seed
    pub max_depth: Option<usize>,
    /// Wall-clock budget for the whole crawl
    pub timeout: Option<Duration>,
    /// Maximum fetches in flight at once
    pub concurrency: usize,
    /// Only follow links on the seed's host
    pub same_host: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: None,
            max_depth: None,
            timeout: None,
            concurrency: 1,
            same_host: false,
        }
    }
}

// Why the crawl loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Frontier drained
    Exhausted,
    /// `max_pages` reached with unvisited pages left
    PageLimit,
    /// `timeout` elapsed with work left
    Deadline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The page itself could not be fetched
    Fetch { error: FetchError },
    /// An href on the page could not be resolved
    MalformedHref { href: String, reason: String },
}

// One diagnostic: the page URL it concerns, and what went wrong
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLink {
    pub url: Url,
    #[serde(flatten)]
    pub reason: SkipReason,
}

// Everything one crawl produced
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: Url,
    /// Scope-admitted links in discovery order, duplicates included
    pub discovered: Vec<Url>,
    /// Pages handed to the fetcher, in dequeue order
    pub visited: Vec<Url>,
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Links dropped by the scope filter
    pub out_of_scope: usize,
    pub skipped: Vec<SkippedLink>,
    pub stop: StopReason,
}

// Traversal state owned by a single crawl invocation
struct CrawlState {
    frontier: Frontier,
    visited: Vec<Url>,
    discovered: Vec<Url>,
    skipped: Vec<SkippedLink>,
    pages_fetched: usize,
    out_of_scope: usize,
}

impl CrawlState {
    fn new(seed: Url) -> Self {
        Self {
            frontier: Frontier::new(seed),
            visited: Vec::new(),
            discovered: Vec::new(),
            skipped: Vec::new(),
            pages_fetched: 0,
            out_of_scope: 0,
        }
    }

    fn page_limit_reached(&self, max_pages: Option<usize>) -> bool {
        max_pages.is_some_and(|max| self.visited.len() >= max)
    }

    fn absorb(
        &mut self,
        item: CrawlItem,
        result: Result<String, FetchError>,
        scope: &Scope,
        max_depth: Option<usize>,
    ) {
        let html = match result {
            Ok(html) => html,
            Err(error) => {
                // Discovered assets (images, archives) routinely land here
                if matches!(error, FetchError::UnsupportedContentType { .. }) {
                    debug!(url = %item.url, %error, "not an HTML page");
                } else {
                    warn!(url = %item.url, %error, "failed to fetch page");
                }
                self.skipped.push(SkippedLink {
                    url: item.url,
                    reason: SkipReason::Fetch { error },
                });
                return;
            }
        };

        self.pages_fetched += 1;
        let follow = max_depth.map_or(true, |max| item.depth < max);

        for link in extract_links(&html, &item.url) {
            match link {
                Ok(url) if scope.admits(&url) => {
                    if follow {
                        self.frontier.push(CrawlItem {
                            url: url.clone(),
                            depth: item.depth + 1,
                        });
                    }
                    self.discovered.push(url);
                }
                Ok(_) => self.out_of_scope += 1,
                Err(bad) => {
                    debug!(page = %item.url, href = %bad.href, "skipping malformed href");
                    self.skipped.push(SkippedLink {
                        url: item.url.clone(),
                        reason: SkipReason::MalformedHref {
                            href: bad.href,
                            reason: bad.reason,
                        },
                    });
                }
            }
        }
    }

    fn into_report(self, seed: Url, stop: StopReason) -> CrawlReport {
        CrawlReport {
            seed,
            discovered: self.discovered,
            visited: self.visited,
            pages_fetched: self.pages_fetched,
            out_of_scope: self.out_of_scope,
            skipped: self.skipped,
            stop,
        }
    }
}

async fn fetch_page(fetcher: &dyn Fetcher, item: CrawlItem) -> (CrawlItem, Result<String, FetchError>) {
    let result = fetcher.fetch(&item.url).await;
    (item, result)
}

// Crawls from `seed`, following every link whose scheme matches the seed's.
//
// Returns the full report; the discovered links are not filtered here.
pub async fn crawl(seed: Url, fetcher: &dyn Fetcher, config: &CrawlConfig) -> CrawlReport {
    let scope = Scope::new(&seed, config.same_host);
    let deadline = config.timeout.map(|timeout| Instant::now() + timeout);
    let concurrency = config.concurrency.max(1);

    info!(seed = %seed, scheme = scope.scheme(), "starting crawl");

    let mut state = CrawlState::new(seed.clone());
    let mut in_flight = FuturesUnordered::new();
    let mut stop = StopReason::Exhausted;

    loop {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            if !in_flight.is_empty() || state.frontier.has_unvisited() {
                stop = StopReason::Deadline;
            }
            break;
        }

        // Top up the in-flight set from the frontier
        while in_flight.len() < concurrency {
            if state.page_limit_reached(config.max_pages) {
                if state.frontier.has_unvisited() {
                    stop = StopReason::PageLimit;
                }
                break;
            }
            let Some(item) = state.frontier.next_unvisited() else {
                break;
            };
            debug!(depth = item.depth, pending = state.frontier.pending(), url = %item.url, "crawling");
            state.visited.push(item.url.clone());
            in_flight.push(fetch_page(fetcher, item));
        }

        let next = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, in_flight.next()).await {
                Ok(next) => next,
                Err(_) => {
                    stop = StopReason::Deadline;
                    break;
                }
            },
            None => in_flight.next().await,
        };

        // None: nothing in flight and nothing left to start
        let Some((item, result)) = next else {
            break;
        };
        state.absorb(item, result, &scope, config.max_depth);
    }

    let report = state.into_report(seed, stop);
    info!(
        pages = report.pages_fetched,
        discovered = report.discovered.len(),
        skipped = report.skipped.len(),
        stop = ?report.stop,
        "crawl finished"
    );
    report
}
