//! Redis credential store.
//!
//! Stores the credential as JSON under one key whose TTL tracks the
//! credential's remaining lifetime.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, IntoConnectionInfo};
use tracing::debug;

use crate::error::Result;
use crate::persistence::CredentialStore;
use crate::token::Credential;

/// Key-value credential backend.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    key: String,
}

impl RedisStore {
    /// Connects to Redis and verifies the connection.
    ///
    /// Upstash REST URLs (`https://`) are rewritten to `rediss://`, and the
    /// REST token, when given, is used as the connection password.
    pub async fn connect(url: &str, password: Option<&str>, key: &str) -> Result<Self> {
        let mut info = normalize_url(url).into_connection_info()?;
        if let Some(password) = password {
            info.redis.password = Some(password.to_string());
        }

        let client = redis::Client::open(info)?;
        let mut conn = ConnectionManager::new(client).await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        Ok(Self {
            conn,
            key: key.to_string(),
        })
    }
}

#[async_trait]
impl CredentialStore for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn load(&self) -> Result<Option<Credential>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(&self.key).await?;
        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        let json = serde_json::to_string(credential)?;
        let ttl = credential.ttl_seconds();
        let mut conn = self.conn.clone();

        // EX 0 is rejected by Redis; an already-expired credential is kept without TTL
        if ttl > 0 {
            conn.set_ex::<_, _, ()>(&self.key, json, ttl).await?;
        } else {
            conn.set::<_, _, ()>(&self.key, json).await?;
        }
        debug!(key = %self.key, ttl, "Stored credential in Redis");
        Ok(())
    }
}

fn normalize_url(url: &str) -> String {
    match url.strip_prefix("https://") {
        Some(rest) => format!("rediss://{}", rest),
        None => url.to_string(),
    }
}
