//! Graph API payloads.

use serde::{Deserialize, Serialize};

/// A single media item as served by the Graph API and by the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub timestamp: String,
}

/// One page of the media listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub data: Vec<MediaRecord>,
    #[serde(default)]
    pub paging: Paging,
}

/// Continuation cursor of a media page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}

impl MediaPage {
    /// URL of the following page, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.paging.next.as_deref().filter(|url| !url.is_empty())
    }
}

/// Body of the token exchange response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_record_missing_fields_default() {
        let json = r#"{"id":"1","media_type":"IMAGE","media_url":"https://example.com/image.jpg"}"#;
        let record: MediaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1");
        assert_eq!(record.caption, "");
        assert_eq!(record.timestamp, "");
    }

    #[test]
    fn test_page_without_paging_has_no_next() {
        let page: MediaPage = serde_json::from_str(r#"{"data":[{"id":"1"}]}"#).unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(page.next_url().is_none());
    }

    #[test]
    fn test_page_empty_next_is_terminal() {
        let page: MediaPage =
            serde_json::from_str(r#"{"data":[],"paging":{"next":""}}"#).unwrap();
        assert!(page.next_url().is_none());
    }
}
