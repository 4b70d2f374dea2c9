//! Media Store Module
//!
//! Keyed media storage with upsert, lookup and filtered listing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::graph::MediaRecord;

// == Media Store ==
/// Media records keyed by id plus the instant of the last upsert.
///
/// Records are never evicted; only [`MediaStore::clear`] removes them.
#[derive(Debug, Default)]
pub struct MediaStore {
    /// Records by media id
    media: HashMap<String, MediaRecord>,
    /// Time of the last upsert, None when never populated
    updated_at: Option<DateTime<Utc>>,
}

impl MediaStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Upsert ==
    /// Inserts or replaces each record by id and stamps the store as updated.
    ///
    /// Applying the same batch twice leaves the store unchanged.
    pub fn upsert_all(&mut self, records: impl IntoIterator<Item = MediaRecord>) {
        let mut count = 0usize;
        for record in records {
            self.media.insert(record.id.clone(), record);
            count += 1;
        }
        let now = Utc::now();
        self.updated_at = Some(now);
        debug!(count, total = self.media.len(), updated_at = %now.to_rfc3339(), "Upserted media");
    }

    // == Get By Ids ==
    /// Returns the records found for `ids`, in request order.
    ///
    /// Unknown ids are skipped, so the result may be shorter than the input.
    pub fn get_by_ids(&self, ids: &[String]) -> Vec<MediaRecord> {
        ids.iter()
            .filter_map(|id| self.media.get(id))
            .cloned()
            .collect()
    }

    // == Get All ==
    /// Snapshot of every record, in no particular order.
    pub fn get_all(&self) -> Vec<MediaRecord> {
        self.media.values().cloned().collect()
    }

    // == List Ids ==
    /// Lists ids newest first.
    ///
    /// # Arguments
    /// * `limit` - Maximum number of ids, 0 for no limit
    /// * `media_type` - Exact `media_type` to keep; empty or None keeps all
    pub fn list_ids(&self, limit: usize, media_type: Option<&str>) -> Vec<String> {
        let media_type = media_type.filter(|t| !t.is_empty());

        let mut matching: Vec<&MediaRecord> = self
            .media
            .values()
            .filter(|m| media_type.map_or(true, |t| m.media_type == t))
            .collect();

        // ISO-8601 timestamps sort chronologically as plain strings
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));

        let take = if limit > 0 { limit } else { matching.len() };
        matching
            .into_iter()
            .take(take)
            .map(|m| m.id.clone())
            .collect()
    }

    // == Has All ==
    /// Checks which of `ids` are cached.
    ///
    /// Returns whether all are present, and the missing ones in request order.
    pub fn has_all(&self, ids: &[String]) -> (bool, Vec<String>) {
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !self.media.contains_key(id.as_str()))
            .cloned()
            .collect();
        (missing.is_empty(), missing)
    }

    // == Clear ==
    /// Drops every record and resets the update stamp.
    pub fn clear(&mut self) {
        self.media.clear();
        self.updated_at = None;
    }

    // == Freshness ==
    /// Returns true if the store was updated less than `max_age` ago.
    pub fn is_fresh(&self, max_age: std::time::Duration) -> bool {
        match (self.updated_at, chrono::Duration::from_std(max_age)) {
            (Some(updated), Ok(max_age)) => Utc::now() - updated < max_age,
            // max_age beyond chrono's range: anything populated counts as fresh
            (Some(_), Err(_)) => true,
            (None, _) => false,
        }
    }

    /// Time of the last upsert.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    // == Length ==
    /// Returns the number of cached records.
    pub fn len(&self) -> usize {
        self.media.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }
}
