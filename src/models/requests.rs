//! Request DTOs for the media API
//!
//! Query-string parameters of the media endpoints.

use serde::Deserialize;

/// Query for `GET /media`
///
/// # Fields
/// - `ids`: Optional comma-separated list of media ids
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaQuery {
    #[serde(default)]
    pub ids: Option<String>,
}

impl MediaQuery {
    /// Splits `ids` on commas, trimming whitespace and dropping empty items.
    ///
    /// Returns None when no ids were requested.
    pub fn id_list(&self) -> Option<Vec<String>> {
        let ids: Vec<String> = self
            .ids
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();

        if ids.is_empty() {
            None
        } else {
            Some(ids)
        }
    }
}

/// Query for `GET /media/getIdsOnly`
///
/// `limit` is kept as text so a malformed value falls back to "no limit"
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaIdsQuery {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

impl MediaIdsQuery {
    /// Parsed limit; 0 (unlimited) when absent, malformed or negative.
    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(|n| n.max(0) as usize)
            .unwrap_or(0)
    }

    /// Media type filter, None when absent or empty.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids_query(ids: &str) -> MediaQuery {
        MediaQuery {
            ids: Some(ids.to_string()),
        }
    }

    #[test]
    fn test_id_list_splits_on_commas() {
        assert_eq!(
            ids_query("1,2, 3").id_list(),
            Some(vec!["1".to_string(), "2".to_string(), "3".to_string()])
        );
    }

    #[test]
    fn test_id_list_drops_empty_items() {
        assert_eq!(
            ids_query("1,,2,").id_list(),
            Some(vec!["1".to_string(), "2".to_string()])
        );
        assert_eq!(ids_query(",").id_list(), None);
        assert_eq!(MediaQuery::default().id_list(), None);
    }

    #[test]
    fn test_limit_parsing() {
        let query = |limit: &str| MediaIdsQuery {
            limit: Some(limit.to_string()),
            media_type: None,
        };
        assert_eq!(query("5").limit(), 5);
        assert_eq!(query("abc").limit(), 0);
        assert_eq!(query("-3").limit(), 0);
        assert_eq!(MediaIdsQuery::default().limit(), 0);
    }

    #[test]
    fn test_media_type_empty_is_none() {
        let query = MediaIdsQuery {
            limit: None,
            media_type: Some(String::new()),
        };
        assert_eq!(query.media_type(), None);
    }

    #[test]
    fn test_deserialize_string_limit() {
        let query: MediaIdsQuery =
            serde_json::from_str(r#"{"limit":"2","media_type":"VIDEO"}"#).unwrap();
        assert_eq!(query.limit(), 2);
        assert_eq!(query.media_type(), Some("VIDEO"));
    }
}
