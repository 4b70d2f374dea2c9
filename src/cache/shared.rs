//! Shared Media Cache
//!
//! Cloneable handle around a [`MediaStore`] guarded by a reader/writer lock.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::cache::MediaStore;
use crate::graph::MediaRecord;

// == Media Cache ==
/// Thread-safe media cache shared by handlers and background jobs.
///
/// Reads run concurrently; upserts and clears take the write lock. The lock
/// is only held for in-memory work, never across a network call.
#[derive(Debug, Clone, Default)]
pub struct MediaCache {
    inner: Arc<RwLock<MediaStore>>,
}

impl MediaCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces each record by id and stamps the update time.
    pub async fn upsert_all(&self, records: Vec<MediaRecord>) {
        self.inner.write().await.upsert_all(records);
    }

    /// Records for `ids` in request order; unknown ids are skipped.
    pub async fn get_by_ids(&self, ids: &[String]) -> Vec<MediaRecord> {
        self.inner.read().await.get_by_ids(ids)
    }

    /// Snapshot of every cached record, in no particular order.
    pub async fn get_all(&self) -> Vec<MediaRecord> {
        self.inner.read().await.get_all()
    }

    /// Ids newest first, filtered by media type and truncated to `limit`
    /// (0 means unlimited).
    pub async fn list_ids(&self, limit: usize, media_type: Option<&str>) -> Vec<String> {
        self.inner.read().await.list_ids(limit, media_type)
    }

    /// Whether every id is cached, plus the ids that are not.
    pub async fn has_all(&self, ids: &[String]) -> (bool, Vec<String>) {
        self.inner.read().await.has_all(ids)
    }

    /// Drops every record and resets the update time.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// True when the last upsert happened less than `max_age` ago.
    pub async fn is_fresh(&self, max_age: Duration) -> bool {
        self.inner.read().await.is_fresh(max_age)
    }

    /// Time of the last upsert, if any.
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_updated()
    }

    /// Number of cached records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns true if nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
