// src/crawl/ledger.rs
// =============================================================================
// The record of every URL some crawl task has already claimed.
//
// check_and_mark() is the only way in. It looks the URL up and records it
// under a single lock acquisition, so when many tasks race on the same URL
// exactly one of them sees "not visited yet" and goes on to fetch it.
//
// The set only grows. It lives as long as the crawl and is never persisted.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct Ledger {
    visited: Mutex<HashSet<String>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` and reports whether it had been recorded before.
    ///
    /// Returns `false` exactly once per distinct URL (the caller that gets
    /// `false` owns the fetch) and `true` for every later call.
    pub fn check_and_mark(&self, url: &str) -> bool {
        // The set stays consistent even if a holder panicked, because
        // insert() is the only mutation.
        let mut visited = self.visited.lock().unwrap_or_else(PoisonError::into_inner);
        !visited.insert(url.to_owned())
    }

    pub fn claimed(&self) -> usize {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
