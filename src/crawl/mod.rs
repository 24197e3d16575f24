// src/crawl/mod.rs
// =============================================================================
// This module handles the recursive, same-host crawl.
//
// Features:
// - Every discovered link gets its own concurrent task
// - Each URL is fetched at most once, even when many pages link to it
// - Parents wait for all of their children before returning
// - Optional cap on how many downloads run at the same time
//
// Submodules:
// - ledger: the shared "already claimed" set
// - crawler: the task tree itself
// =============================================================================

mod crawler;
mod ledger;

pub use crawler::{CrawlConfig, Crawler};
