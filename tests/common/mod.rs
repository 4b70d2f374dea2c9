//! Shared test doubles for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Duration;
use media_cache::error::{Result, ServiceError};
use media_cache::graph::GraphClient;
use media_cache::persistence::CredentialStore;
use media_cache::Credential;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const IG_USER_ID: &str = "17841400000000000";

/// In-memory credential backend.
#[derive(Default)]
pub struct MemoryStore {
    pub value: Mutex<Option<Credential>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn holding(credential: Credential) -> Self {
        Self {
            value: Mutex::new(Some(credential)),
            fail_writes: false,
        }
    }

    pub fn current(&self) -> Option<Credential> {
        self.value.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Result<Option<Credential>> {
        Ok(self.current())
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        if self.fail_writes {
            return Err(ServiceError::Persistence("read-only store".into()));
        }
        *self.value.lock().unwrap() = Some(credential.clone());
        Ok(())
    }
}

pub fn valid(token: &str) -> Credential {
    Credential::expiring_in(token, Duration::days(30))
}

pub fn expired(token: &str) -> Credential {
    Credential::expiring_in(token, -Duration::hours(1))
}

pub fn graph_client(server: &MockServer) -> GraphClient {
    GraphClient::new(
        server.uri(),
        IG_USER_ID,
        "APP_ID",
        "APP_SECRET",
        std::time::Duration::from_secs(5),
    )
    .unwrap()
}

/// Fake Graph API: exchanges `OLD_TOKEN` for `REFRESHED_TOKEN` and rejects
/// any other token with 401.
pub async fn mount_token_exchange(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .and(query_param("fb_exchange_token", "OLD_TOKEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "REFRESHED_TOKEN",
            "expires_in": 5184000
        })))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid access_token"})),
        )
        .with_priority(10)
        .mount(server)
        .await;
}

/// Fake Graph API media listing with a fixed set of records on one page.
pub async fn mount_media(server: &MockServer, records: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{IG_USER_ID}/media")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": records })))
        .mount(server)
        .await;
}
