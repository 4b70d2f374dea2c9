//! Response DTOs for the media API
//!
//! Defines the structure of outgoing HTTP response bodies. Media lists are
//! returned as plain JSON arrays of [`MediaRecord`](crate::graph::MediaRecord).

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response body for `GET /media/getIdsOnly`
#[derive(Debug, Clone, Serialize)]
pub struct MediaIdsResponse {
    /// Media ids, newest first
    pub ids: Vec<String>,
    /// Number of ids returned
    pub count: usize,
}

impl MediaIdsResponse {
    pub fn new(ids: Vec<String>) -> Self {
        Self {
            count: ids.len(),
            ids,
        }
    }
}

/// Response body for `GET /media/status`
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Number of cached media records
    pub total_media: usize,
    /// RFC 3339 time of the last sync, null if never synced
    pub last_updated: Option<String>,
    /// Whether the last sync is within the freshness window
    pub fresh: bool,
}

impl StatusResponse {
    pub fn new(total_media: usize, last_updated: Option<DateTime<Utc>>, fresh: bool) -> Self {
        Self {
            total_media,
            last_updated: last_updated.map(|t| t.to_rfc3339()),
            fresh,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_response_counts() {
        let resp = MediaIdsResponse::new(vec!["a".into(), "b".into()]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["ids"][1], "b");
    }

    #[test]
    fn test_status_response_never_synced() {
        let resp = StatusResponse::new(0, None, false);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["last_updated"].is_null());
        assert_eq!(json["fresh"], false);
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
