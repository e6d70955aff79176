//! Feed persistence.
//!
//! Saved feeds live in a single JSON file; every mutation rewrites it.
//! Plenty for a single-operator tool, and trivially relocatable for
//! tests via an explicit path.

use pagepick_common::protocol::{SavedFeed, SelectorMapping};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store corrupted: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("No feed with id {0}")]
    NotFound(u64),
}

pub struct FeedStore {
    path: PathBuf,
    feeds: Vec<SavedFeed>,
}

impl FeedStore {
    /// Default store location: `~/.pagepick/feeds.json`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pagepick")
            .join("feeds.json")
    }

    /// Open a store, loading existing feeds if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let feeds = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };
        Ok(Self { path, feeds })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[SavedFeed] {
        &self.feeds
    }

    pub fn get(&self, id: u64) -> Option<&SavedFeed> {
        self.feeds.iter().find(|f| f.id == id)
    }

    /// Create a feed. Name, url and an item selector are required; the
    /// remaining selectors are optional.
    pub fn create(
        &mut self,
        name: &str,
        url: &str,
        mapping: SelectorMapping,
    ) -> Result<&SavedFeed, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        if url.trim().is_empty() {
            return Err(StoreError::MissingField("url"));
        }
        if mapping.get(pagepick_common::protocol::Role::Item).is_none() {
            return Err(StoreError::MissingField("item_selector"));
        }

        let id = self.feeds.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        self.feeds.push(SavedFeed {
            id,
            name: name.trim().to_string(),
            url: url.trim().to_string(),
            mapping,
        });
        self.persist()?;
        tracing::debug!(id, "feed created");
        Ok(self.feeds.last().expect("just pushed"))
    }

    /// Replace a feed's mapping.
    pub fn update_mapping(
        &mut self,
        id: u64,
        mapping: SelectorMapping,
    ) -> Result<&SavedFeed, StoreError> {
        let idx = self
            .feeds
            .iter()
            .position(|f| f.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.feeds[idx].mapping = mapping;
        self.persist()?;
        Ok(&self.feeds[idx])
    }

    pub fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        let before = self.feeds.len();
        self.feeds.retain(|f| f.id != id);
        if self.feeds.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.feeds)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
