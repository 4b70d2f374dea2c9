//! Graph API Module
//!
//! Remote media source: paginated media listing and access-token exchange.

mod client;
mod models;

use async_trait::async_trait;

use crate::error::Result;
use crate::token::Credential;

pub use client::GraphClient;
pub use models::{MediaPage, MediaRecord, Paging, TokenResponse};

/// Fields requested for every media record.
pub const MEDIA_FIELDS: &str = "id,caption,media_type,media_url,permalink,timestamp";

// == Graph Api Trait ==
/// Operations the service needs from the remote Graph API.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Fetches media for the configured account, following `paging.next`.
    ///
    /// A `limit` of 0 fetches every page.
    async fn fetch_media(&self, access_token: &str, limit: usize) -> Result<Vec<MediaRecord>>;

    /// Exchanges the current secret for a fresh long-lived credential.
    async fn refresh_credential(&self, current: &str) -> Result<Credential>;
}
