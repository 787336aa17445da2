// src/main.rs
// =============================================================================
// This is the entry point of the link-harvester CLI.
//
// What happens here:
// 1. Set up logging (RUST_LOG, stderr)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the crawl or serve handler
// 4. Exit with proper code (0 = success, 1 = start page unreachable, 2 = error)
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - frontier, scope and the crawl loop
mod fetch; // src/fetch/ - fetching pages over HTTP
mod links; // src/links/ - link extraction and extension filtering
mod logging; // src/logging.rs - tracing subscriber setup
mod server; // src/server/ - the web form front end

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::error;

use cli::{Cli, Commands, CrawlArgs, FetchArgs};
use crawl::{CrawlRequest, Harvest, SkipReason};
use fetch::ReqwestFetcher;

#[tokio::main]
async fn main() {
    logging::init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = crawl finished (or server shut down)
//   Ok(1) = the start page itself could not be fetched
//   Err   = invalid input or a startup failure
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            url,
            extensions,
            json,
            crawl,
            fetch,
        } => handle_crawl(&url, &extensions, json, &crawl, &fetch).await,
        Commands::Serve { addr, crawl, fetch } => handle_serve(addr, &crawl, &fetch).await,
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(
    url: &str,
    extensions: &str,
    json: bool,
    crawl_args: &CrawlArgs,
    fetch_args: &FetchArgs,
) -> Result<i32> {
    let request = CrawlRequest::parse(url, extensions)?;
    let fetcher =
        ReqwestFetcher::new(fetch_args.to_settings()).context("failed to build HTTP client")?;

    if !json {
        println!("🔍 Crawling: {}", request.seed);
        println!("📎 Extensions: {}", request.extensions.join(", "));
    }

    let harvest = crawl::harvest(request, &fetcher, &crawl_args.to_config()).await;

    print_results(&harvest, json)?;

    if harvest.report.pages_fetched == 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'serve' subcommand
async fn handle_serve(addr: SocketAddr, crawl_args: &CrawlArgs, fetch_args: &FetchArgs) -> Result<i32> {
    let fetcher =
        ReqwestFetcher::new(fetch_args.to_settings()).context("failed to build HTTP client")?;
    let state = server::AppState::new(Arc::new(fetcher), crawl_args.to_config());

    server::serve(addr, state).await?;
    Ok(0)
}

fn print_results(harvest: &Harvest, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(harvest)?);
    } else {
        print_list(harvest);
    }
    Ok(())
}

fn print_list(harvest: &Harvest) {
    println!();
    for link in &harvest.matches {
        println!("{}", link);
    }
    if harvest.matches.is_empty() {
        println!("No matching links found");
    }
    println!();

    let report = &harvest.report;
    let fetch_failures = report
        .skipped
        .iter()
        .filter(|s| matches!(s.reason, SkipReason::Fetch { .. }))
        .count();

    println!("📊 Summary:");
    println!("   📄 Pages crawled: {}", report.pages_fetched);
    println!("   🔗 Links discovered: {}", report.discovered.len());
    println!("   ✅ Matching: {}", harvest.matches.len());
    println!("   ⚠️  Not fetched: {}", fetch_failures);
    println!("   ⏹️  Stopped: {:?}", report.stop);
}
