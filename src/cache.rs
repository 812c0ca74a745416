//! Disk cache for fetched document batches.
//!
//! Batches are stored as JSON per source and invalidated by age. Cache
//! failures are logged and degrade to refetching; they never abort startup.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::document::Document;

/// Age-invalidated JSON cache of fetched documents, one file per source.
#[derive(Debug, Clone)]
pub struct DocCache {
    dir: PathBuf,
    max_age: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedBatch {
    fetched_at: DateTime<Utc>,
    documents: Vec<Document>,
}

impl DocCache {
    /// Cache rooted at `dir`, keeping batches for `max_age_hours`.
    pub fn new(dir: impl Into<PathBuf>, max_age_hours: u64) -> Self {
        Self {
            dir: dir.into(),
            max_age: Duration::hours(max_age_hours as i64),
        }
    }

    /// The per-user default cache directory, when one exists on this platform.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("nats-docs-mcp"))
    }

    /// Load a source's cached batch, if present and fresh.
    pub fn load(&self, source: &str) -> Option<Vec<Document>> {
        let path = self.batch_path(source);
        let text = std::fs::read_to_string(&path).ok()?;

        let batch: CachedBatch = match serde_json::from_str(&text) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(source, path = %path.display(), error = %e, "discarding unreadable cache file");
                let _ = std::fs::remove_file(&path);
                return None;
            }
        };

        let age = Utc::now().signed_duration_since(batch.fetched_at);
        if age > self.max_age {
            tracing::debug!(source, age_hours = age.num_hours(), "cache stale, will refetch");
            return None;
        }

        tracing::debug!(source, documents = batch.documents.len(), "loaded documents from cache");
        Some(batch.documents)
    }

    /// Store a source's fetched batch. Failures are logged, not returned.
    pub fn store(&self, source: &str, documents: &[Document]) {
        let batch = CachedBatch {
            fetched_at: Utc::now(),
            documents: documents.to_vec(),
        };

        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), error = %e, "failed to create cache directory");
            return;
        }

        let path = self.batch_path(source);
        match serde_json::to_vec(&batch) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!(path = %path.display(), error = %e, "failed to write cache file");
                } else {
                    tracing::debug!(source, path = %path.display(), "cached fetched documents");
                }
            }
            Err(e) => {
                tracing::warn!(source, error = %e, "failed to serialize cache batch");
            }
        }
    }

    fn batch_path(&self, source: &str) -> PathBuf {
        // Source names come from config; keep the file name tame anyway.
        let safe: String = source
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn doc(id: &str) -> Document {
        Document {
            id: id.to_string(),
            title: "title".to_string(),
            url: format!("https://example.com/{id}"),
            content: "content".to_string(),
            sections: vec![],
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn round_trips_a_fresh_batch() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DocCache::new(dir.path(), 24);

        cache.store("nats", &[doc("a"), doc("b")]);
        let loaded = cache.load("nats").unwrap();
        check!(loaded.len() == 2);
        check!(loaded[0].id == "a");
    }

    #[test]
    fn missing_batch_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DocCache::new(dir.path(), 24);
        check!(cache.load("nats").is_none());
    }

    #[test]
    fn stale_batch_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DocCache::new(dir.path(), 24);

        let stale = CachedBatch {
            fetched_at: Utc::now() - Duration::hours(48),
            documents: vec![doc("old")],
        };
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(
            dir.path().join("nats.json"),
            serde_json::to_vec(&stale).unwrap(),
        )
        .unwrap();

        check!(cache.load("nats").is_none());
    }

    #[test]
    fn corrupt_cache_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DocCache::new(dir.path(), 24);

        let path = dir.path().join("nats.json");
        std::fs::write(&path, "not json").unwrap();

        check!(cache.load("nats").is_none());
        check!(!path.exists());
    }

    #[test]
    fn batches_are_isolated_per_source() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DocCache::new(dir.path(), 24);

        cache.store("nats", &[doc("a")]);
        cache.store("github", &[doc("b")]);

        check!(cache.load("nats").unwrap()[0].id == "a");
        check!(cache.load("github").unwrap()[0].id == "b");
    }
}
