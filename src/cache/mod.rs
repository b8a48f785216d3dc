//! Fetch cache
//!
//! Response bodies of content fetches, keyed by URL. An entry is reused
//! while it is younger than the caller's revalidation window; after that
//! the next fetch goes to the network and replaces it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A cached response body
#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, revalidate: Duration) -> bool {
        self.fetched_at.elapsed() < revalidate
    }
}

/// URL-keyed body cache shared by all requests
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body cached for `url`, if it is still inside the revalidation window
    pub fn get(&self, url: &str, revalidate: Duration) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.get(url)?;
        if entry.is_fresh(revalidate) {
            tracing::trace!("Fetch cache hit: {}", url);
            Some(entry.body.clone())
        } else {
            tracing::trace!("Fetch cache stale: {}", url);
            None
        }
    }

    /// Store a successful response body; the last writer wins
    pub fn insert(&self, url: impl Into<String>, body: String) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            url.into(),
            CacheEntry {
                body,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of cached URLs, fresh or stale
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
