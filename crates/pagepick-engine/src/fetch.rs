//! Page fetching for the detect/preview collaborators.

use crate::config::FetchConfig;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },
}

/// Bounded per-run HTML cache. Past capacity the whole cache is
/// cleared rather than evicting piecemeal; pages are large and a run
/// rarely revisits more than a handful of URLs.
struct PageCache {
    entries: HashMap<String, String>,
    capacity: usize,
}

impl PageCache {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    fn insert(&mut self, url: String, html: String) {
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(url, html);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// HTTP client with a naive per-run HTML cache, so repeated detect and
/// preview calls against the same page hit the network once.
pub struct PageFetcher {
    client: reqwest::Client,
    cache: PageCache,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            cache: PageCache::new(config.cache_capacity),
        })
    }

    /// Fetch a page as text. Non-success statuses are errors; the body
    /// of a successful response is cached.
    pub async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        if let Some(html) = self.cache.get(url) {
            tracing::debug!(url, "cache hit");
            return Ok(html.to_string());
        }

        tracing::debug!(url, "fetching page");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let html = response.text().await?;

        self.cache.insert(url.to_string(), html.clone());
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_builds_from_default_config() {
        let fetcher = PageFetcher::new(&FetchConfig::default()).unwrap();
        assert_eq!(fetcher.cache.len(), 0);
    }

    #[test]
    fn test_cache_hit_and_miss() {
        let mut cache = PageCache::new(10);
        assert_eq!(cache.get("https://a.example"), None);

        cache.insert("https://a.example".into(), "<html>a</html>".into());
        assert_eq!(cache.get("https://a.example"), Some("<html>a</html>"));
        assert_eq!(cache.get("https://b.example"), None);
    }

    #[test]
    fn test_cache_clears_at_capacity() {
        let mut cache = PageCache::new(2);
        cache.insert("https://a.example".into(), "a".into());
        cache.insert("https://b.example".into(), "b".into());
        assert_eq!(cache.len(), 2);

        // Third insert crosses capacity: everything older is dropped,
        // the new entry survives.
        cache.insert("https://c.example".into(), "c".into());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("https://a.example"), None);
        assert_eq!(cache.get("https://b.example"), None);
        assert_eq!(cache.get("https://c.example"), Some("c"));
    }

    #[test]
    fn test_reinsert_refreshes_entry() {
        let mut cache = PageCache::new(10);
        cache.insert("https://a.example".into(), "old".into());
        cache.insert("https://a.example".into(), "new".into());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("https://a.example"), Some("new"));
    }
}
