//! Graph API Client
//!
//! reqwest-backed implementation of [`GraphApi`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::graph::{GraphApi, MediaPage, MediaRecord, TokenResponse, MEDIA_FIELDS};
use crate::token::Credential;

// == Graph Client ==
/// HTTP client for the Graph API.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: Client,
    base_url: String,
    ig_user_id: String,
    app_id: String,
    app_secret: String,
}

impl GraphClient {
    /// Creates a client with a per-call timeout.
    ///
    /// # Arguments
    /// * `base_url` - Graph API root, e.g. `https://graph.facebook.com`
    /// * `ig_user_id` - Account whose media is listed
    /// * `app_id` / `app_secret` - App credentials for the token exchange
    /// * `timeout` - Applied to every single request
    pub fn new(
        base_url: impl Into<String>,
        ig_user_id: impl Into<String>,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ig_user_id: ig_user_id.into(),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        })
    }

    /// Creates a client from service configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            &config.ig_user_id,
            &config.app_id,
            &config.app_secret,
            config.http_timeout(),
        )
    }

    async fn get_page(&self, request: reqwest::RequestBuilder) -> Result<MediaPage> {
        let response = check_status(request.send().await?)?;
        Ok(response.json::<MediaPage>().await?)
    }
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn fetch_media(&self, access_token: &str, limit: usize) -> Result<Vec<MediaRecord>> {
        let url = format!("{}/{}/media", self.base_url, self.ig_user_id);
        let mut request = self
            .http
            .get(&url)
            .query(&[("fields", MEDIA_FIELDS), ("access_token", access_token)]);
        if limit > 0 {
            request = request.query(&[("limit", limit)]);
        }

        let mut media = Vec::new();
        let mut page = self.get_page(request).await?;
        let mut pages = 1;

        loop {
            media.append(&mut page.data);

            if limit > 0 && media.len() >= limit {
                media.truncate(limit);
                break;
            }

            // Continuation URLs already carry the token and field list
            match page.next_url().map(str::to_string) {
                Some(next) => {
                    page = self.get_page(self.http.get(next)).await?;
                    pages += 1;
                }
                None => break,
            }
        }

        debug!(count = media.len(), pages, "Fetched media from Graph API");
        Ok(media)
    }

    async fn refresh_credential(&self, current: &str) -> Result<Credential> {
        let url = format!("{}/oauth/access_token", self.base_url);
        info!("Exchanging access token with Graph API");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("grant_type", "fb_exchange_token"),
                ("client_id", self.app_id.as_str()),
                ("client_secret", self.app_secret.as_str()),
                ("fb_exchange_token", current),
            ])
            .send()
            .await?;

        let body: TokenResponse = check_status(response)?.json().await?;
        if body.access_token.is_empty() {
            return Err(ServiceError::Remote(
                "token exchange returned an empty access_token".to_string(),
            ));
        }

        ChronoDuration::try_seconds(body.expires_in)
            .and_then(|lifetime| Credential::try_expiring_in(body.access_token, lifetime))
            .ok_or_else(|| {
                ServiceError::Remote(format!("expires_in out of range: {}", body.expires_in))
            })
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(response)
    } else {
        warn!(%status, "Graph API returned an error status");
        Err(ServiceError::Remote(format!("status {}", status)))
    }
}
