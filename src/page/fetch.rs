// src/page/fetch.rs
// =============================================================================
// Downloads a single page.
//
// One GET per URL. The whole body is read into memory so the same bytes can
// be written to disk and scanned for links without a second request.
//
// Success means exactly 200 OK after redirects have been followed; any other
// final status (including 204 or an unfollowed 3xx) is reported as
// CrawlError::HttpStatus and nothing is returned.
//
// The URL that actually served the body comes back with it. After a
// "/docs" -> "/docs/" redirect, relative links in the body are relative to
// "/docs/", not to what was requested.
// =============================================================================

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::error::CrawlError;

// Same hop limit the reference HTTP client applies by default
const MAX_REDIRECTS: usize = 10;

// Thin wrapper around a reqwest Client
//
// Client is reference counted internally, so cloning a Fetcher is cheap and
// every clone shares one connection pool.
// A downloaded page
#[derive(Debug)]
pub struct FetchedPage {
    /// Where the body was served from, after redirects (fragment removed)
    pub url: Url,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, CrawlError> {
        let mut builder =
            Client::builder().redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(CrawlError::Client)?;

        Ok(Fetcher { client })
    }

    // Fetches `url` and returns the full response body plus its final URL
    //
    // The response is dropped (and its connection released) on every path out
    // of this function, including the early status return.
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, CrawlError> {
        let transport = |source| CrawlError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let mut final_url = response.url().clone();
        final_url.set_fragment(None);

        let body = response.bytes().await.map_err(transport)?;
        debug!(%url, %final_url, bytes = body.len(), "fetched page");

        Ok(FetchedPage {
            url: final_url,
            body: body.to_vec(),
        })
    }
}
