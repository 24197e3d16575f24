// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up tracing (diagnostics go to stderr)
// 3. Run the crawl from the starting URL
// 4. Exit with proper code (0 = whole crawl succeeded, 1 = anything failed)
//
// Only this file decides exit codes. The crawl itself just returns a
// Result, and any error is printed to stdout here.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - ledger + recursive crawl
mod error; // src/error.rs - CrawlError
mod page; // src/page/ - fetch, archive, link extraction
mod telemetry; // src/telemetry.rs - tracing setup

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;

use cli::Cli;
use crawl::Crawler;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Bad arguments: usage goes to stdout, exit status 1
            println!("{}", e.render());
            std::process::exit(1);
        }
    };

    telemetry::init(cli.verbose);

    let exit_code = match run(&cli).await {
        Ok(()) => 0,
        Err(e) => {
            println!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: &Cli) -> Result<()> {
    let config = cli.crawl_config();
    debug!(?config, start_url = %cli.start_url, "starting crawl");

    let crawler = Crawler::new(&config).context("failed to set up HTTP client")?;
    crawler
        .run(&cli.start_url)
        .await
        .with_context(|| format!("crawl from {} failed", cli.start_url))
}
