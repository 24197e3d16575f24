// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two positional arguments are required:
//   site-mirror <START_URL> <DEST_DIR>
//
// Everything else is an optional flag with a default that matches a plain,
// unbounded crawl.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::crawl::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version = "0.1.0",
    about = "Download every page reachable on a single host",
    long_about = "site-mirror starts at a URL, saves the page under <DEST_DIR>/<host>/, \
                  and recursively follows every link that stays on the same host. \
                  Each page is downloaded exactly once."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com/)
    pub start_url: String,

    /// Directory the mirrored pages are written into
    pub dest_dir: PathBuf,

    /// Maximum number of pages being downloaded at the same time
    ///
    /// Without this flag every discovered link is fetched immediately.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_concurrency: Option<u32>,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            dest_root: self.dest_dir.clone(),
            max_concurrency: self.max_concurrency.map(|n| n as usize),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}
