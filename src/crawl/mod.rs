// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Follows every link with the seed's scheme (optionally same host only)
// - Each page fetched at most once
// - Optional page, depth and time limits, optional concurrent fetching
// - Failures collected in the report instead of aborting the crawl
//
// Submodules:
// - queue: the frontier and visited set
// - scope: which links may be followed
// - engine: the crawl loop itself
// - request: input validation and extension filtering around a crawl
// =============================================================================

mod engine;
mod queue;
mod request;
mod scope;

pub use engine::{CrawlConfig, SkipReason};
pub use request::{harvest, CrawlRequest, Harvest};
