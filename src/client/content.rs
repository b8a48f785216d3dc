//! Content fetchers
//!
//! Every fetch degrades to an empty list: a listing that failed to load and
//! a listing with nothing in it render the same way.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::cache::FetchCache;
use crate::content::{sort_by_id_desc, Identified, Project, Writing};
use crate::helpers::join_url;

/// Why a fetch produced no content
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-call fetch settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// How long a cached response may be reused
    pub revalidate: Duration,
    /// Keep only the first `n` items after sorting
    pub limit: Option<usize>,
}

impl FetchOptions {
    /// Full listing
    pub fn all(revalidate: Duration) -> Self {
        Self {
            revalidate,
            limit: None,
        }
    }

    /// The `n` most recent items
    pub fn recent(revalidate: Duration, n: usize) -> Self {
        Self {
            revalidate,
            limit: Some(n),
        }
    }
}

/// `/api/writings` answers with a bare list; older deployments wrap it
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WritingsPayload {
    List(Vec<Writing>),
    Envelope {
        #[serde(default)]
        posts: Option<Vec<Writing>>,
    },
}

impl WritingsPayload {
    fn into_vec(self) -> Vec<Writing> {
        match self {
            WritingsPayload::List(writings) => writings,
            WritingsPayload::Envelope { posts } => posts.unwrap_or_default(),
        }
    }
}

/// Client for the content API
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
    cache: FetchCache,
}

impl ContentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            cache: FetchCache::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Projects, highest id first; empty on any failure
    pub async fn fetch_projects(&self, opts: FetchOptions) -> Vec<Project> {
        match self.get_json::<Vec<Project>>("/api/projects", opts).await {
            Ok(projects) => finish(projects, opts),
            Err(e) => {
                tracing::error!("Error fetching projects: {}", e);
                Vec::new()
            }
        }
    }

    /// Writings, highest id first; empty on any failure
    pub async fn fetch_writings(&self, opts: FetchOptions) -> Vec<Writing> {
        match self.get_json::<WritingsPayload>("/api/writings", opts).await {
            Ok(payload) => finish(payload.into_vec(), opts),
            Err(e) => {
                tracing::error!("Error fetching writings: {}", e);
                Vec::new()
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: FetchOptions,
    ) -> Result<T, FetchError> {
        let url = join_url(&self.base_url, path);

        if let Some(body) = self.cache.get(&url, opts.revalidate) {
            return Ok(serde_json::from_str(&body)?);
        }

        tracing::debug!("Fetching {}", url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body)?;
        self.cache.insert(url, body);
        tracing::debug!("Fetch cache holds {} entries", self.cache.len());
        Ok(value)
    }
}

/// Re-sort and truncate a fetched list
fn finish<T: Identified>(mut items: Vec<T>, opts: FetchOptions) -> Vec<T> {
    sort_by_id_desc(&mut items);
    if let Some(limit) = opts.limit {
        items.truncate(limit);
    }
    items
}
