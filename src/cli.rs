// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: crawl once from the terminal and print the matching links
// - serve: run the same crawl behind a small web form
//
// Both share the crawl limits and the HTTP options, flattened in from
// `CrawlArgs` and `FetchArgs`.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Duration;

use crate::crawl::CrawlConfig;
use crate::fetch::FetchSettings;

#[derive(Parser, Debug)]
#[command(
    name = "link-harvester",
    version,
    about = "Crawl a website and collect links with the file extensions you ask for",
    long_about = "link-harvester starts at a URL, follows every link that uses the same scheme, \
                  and reports the discovered links whose file extension is in your list."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and print the links matching the extensions
    ///
    /// Example: link-harvester crawl https://example.com .jpg,.png
    Crawl {
        /// URL to start crawling from
        url: String,

        /// Comma-separated extensions to keep, e.g. ".jpg,.png" (split as given, no trimming)
        extensions: String,

        /// Output results in JSON format instead of a list
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        crawl: CrawlArgs,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Serve the crawl form over HTTP
    ///
    /// Example: link-harvester serve --addr 127.0.0.1:8080
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: SocketAddr,

        #[command(flatten)]
        crawl: CrawlArgs,

        #[command(flatten)]
        fetch: FetchArgs,
    },
}

// Crawl bounds. Everything is unbounded unless given.
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Stop after fetching this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Do not follow links more than this many hops from the start URL
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Give up on the crawl after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Number of pages fetched concurrently
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Only follow links on the start URL's host
    #[arg(long)]
    pub same_host: bool,
}

impl CrawlArgs {
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_pages: self.max_pages,
            max_depth: self.max_depth,
            timeout: self.timeout_secs.map(Duration::from_secs),
            concurrency: self.concurrency,
            same_host: self.same_host,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Accept invalid TLS certificates (self-signed, expired, wrong host)
    #[arg(long)]
    pub insecure: bool,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Largest page body to download, in bytes
    #[arg(long, default_value_t = 10 * 1024 * 1024)]
    pub max_bytes: u64,
}

impl FetchArgs {
    pub fn to_settings(&self) -> FetchSettings {
        let defaults = FetchSettings::default();
        FetchSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            max_bytes: self.max_bytes,
            accept_invalid_certs: self.insecure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_crawl_defaults_are_unbounded() {
        let cli = Cli::parse_from(["link-harvester", "crawl", "http://a.test/", ".jpg"]);
        let Commands::Crawl { url, extensions, json, crawl, fetch } = cli.command else {
            panic!("expected crawl subcommand");
        };
        assert_eq!(url, "http://a.test/");
        assert_eq!(extensions, ".jpg");
        assert!(!json);

        let config = crawl.to_config();
        assert_eq!(config.max_pages, None);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.concurrency, 1);
        assert!(!config.same_host);

        let settings = fetch.to_settings();
        assert!(!settings.accept_invalid_certs);
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_crawl_flags() {
        let cli = Cli::parse_from([
            "link-harvester",
            "crawl",
            "https://a.test/",
            ".pdf,.PDF",
            "--json",
            "--max-pages",
            "50",
            "--max-depth",
            "3",
            "--timeout-secs",
            "60",
            "--concurrency",
            "8",
            "--same-host",
            "--insecure",
        ]);
        let Commands::Crawl { json, crawl, fetch, .. } = cli.command else {
            panic!("expected crawl subcommand");
        };
        assert!(json);

        let config = crawl.to_config();
        assert_eq!(config.max_pages, Some(50));
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.concurrency, 8);
        assert!(config.same_host);
        assert!(fetch.to_settings().accept_invalid_certs);
    }

    #[test]
    fn test_serve_addr() {
        let cli = Cli::parse_from(["link-harvester", "serve", "--addr", "127.0.0.1:9000"]);
        let Commands::Serve { addr, .. } = cli.command else {
            panic!("expected serve subcommand");
        };
        assert_eq!(addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
    }
}
