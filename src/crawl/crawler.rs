// src/crawl/crawler.rs
// =============================================================================
// This module drives the recursive crawl.
//
// How it works, per URL:
// 1. Claim the URL in the ledger (stop here if someone already did)
// 2. Fetch the page once and keep the bytes
// 3. Archive the bytes to <dest>/<host>/<file>, using the URL that served
//    them after redirects
// 4. Extract same-host links from the same bytes, resolved against that
//    final URL (a redirect to another host is archived but not followed)
// 5. Spawn one task per link and wait for all of them
//
// The fan-out is unbounded unless a max concurrency is configured, in which
// case a semaphore limits how many fetch+archive steps run at once. The
// permit is released before waiting on children, otherwise a parent holding
// the last permit would wait forever on a child that needs it.
//
// Errors: a failed fetch or archive ends that URL's subtree. The parent still
// waits for every other child (nothing is cancelled), then returns the first
// error it saw. Which sibling's error "wins" depends on completion order.
// =============================================================================

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info};
use url::Url;

use super::ledger::Ledger;
use crate::error::CrawlError;
use crate::page::{extract_links, Archiver, Fetcher};

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Root directory; pages land in <dest_root>/<host>/
    pub dest_root: PathBuf,
    /// Upper bound on concurrent downloads (None = one task per link, no cap)
    pub max_concurrency: Option<usize>,
    /// Per-request timeout (None = wait as long as the server takes)
    pub timeout: Option<Duration>,
}

pub struct Crawler {
    ledger: Ledger,
    fetcher: Fetcher,
    archiver: Archiver,
    limiter: Option<Arc<Semaphore>>,
}

impl Crawler {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        Ok(Crawler {
            ledger: Ledger::new(),
            fetcher: Fetcher::new(config.timeout)?,
            archiver: Archiver::new(&config.dest_root),
            limiter: config
                .max_concurrency
                .map(|permits| Arc::new(Semaphore::new(permits))),
        })
    }

    // Crawls everything reachable from `seed` on the seed's host
    //
    // Returns once every spawned task has finished. An invalid seed fails
    // before anything is fetched.
    pub async fn run(self, seed: &str) -> Result<(), CrawlError> {
        let seed = parse_seed(seed)?;
        let crawler = Arc::new(self);

        let result = Arc::clone(&crawler).crawl(seed.clone()).await;
        info!(%seed, pages = crawler.ledger.claimed(), "crawl finished");

        result
    }

    // One crawl task. Boxed because it spawns copies of itself.
    fn crawl(self: Arc<Self>, url: Url) -> BoxFuture<'static, Result<(), CrawlError>> {
        self.visit(url).boxed()
    }

    async fn visit(self: Arc<Self>, url: Url) -> Result<(), CrawlError> {
        if self.ledger.check_and_mark(url.as_str()) {
            debug!(%url, "already visited");
            return Ok(());
        }

        let page = {
            let _permit = self.acquire_permit().await;
            let page = self.fetcher.fetch(&url).await?;

            // A redirect target is a URL of its own; claim it too so a page
            // reached both directly and through a redirect is handled once.
            if page.url != url && self.ledger.check_and_mark(page.url.as_str()) {
                debug!(%url, target = %page.url, "redirect target already visited");
                return Ok(());
            }

            self.archiver.store(&page.url, &page.body).await?;
            page
        };
        println!("Downloaded: {}", url);

        if page.url.host_str() != url.host_str() {
            debug!(%url, target = %page.url, "redirected off host, not following links");
            return Ok(());
        }

        let links = extract_links(&page.url, &page.body);
        drop(page);
        debug!(%url, links = links.len(), "dispatching links");

        let mut children = JoinSet::new();
        for link in links {
            children.spawn(Arc::clone(&self).crawl(link));
        }

        let mut first_error = None;
        while let Some(joined) = children.join_next().await {
            let outcome = joined.map_err(CrawlError::from).and_then(|result| result);
            if let Err(e) = outcome {
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    debug!(%url, error = %e, "dropping later child error");
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    // The semaphore is never closed, so acquire only fails if it were
    async fn acquire_permit(&self) -> Option<OwnedSemaphorePermit> {
        match &self.limiter {
            Some(limiter) => Arc::clone(limiter).acquire_owned().await.ok(),
            None => None,
        }
    }
}

// Parses the starting URL, which must name a host
fn parse_seed(seed: &str) -> Result<Url, CrawlError> {
    let mut url = Url::parse(seed).map_err(|source| CrawlError::Parse {
        url: seed.to_string(),
        source,
    })?;
    if url.host_str().is_none() {
        return Err(CrawlError::MissingHost {
            url: seed.to_string(),
        });
    }
    url.set_fragment(None);
    Ok(url)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is crawl() boxed?
//    - An async fn that spawns itself would have an infinitely sized future
//    - BoxFuture puts each level on the heap, so the type has a fixed size
//    - It is also Send + 'static, which tokio::spawn requires
//
// 2. Why self: Arc<Self>?
//    - Every spawned child needs the ledger, HTTP client and archiver
//    - Cloning an Arc is a reference count bump, not a copy
//
// 3. Why JoinSet?
//    - join_next() yields children in the order they finish
//    - Dropping a JoinSet aborts what is left in it, so we always drain it
// -----------------------------------------------------------------------------
