// src/page/mod.rs
// =============================================================================
// Everything that happens to a single page.
//
// Submodules:
// - fetch: downloads the page over HTTP
// - archive: writes the downloaded bytes under <dest>/<host>/
// - links: finds the same-host links the crawl should follow next
//
// None of these know about recursion or deduplication; that lives in crawl/.
// =============================================================================

mod archive;
mod fetch;
mod links;

pub use archive::Archiver;
pub use fetch::Fetcher;
pub use links::extract_links;
