//! Persistence Module
//!
//! Credential backends sharing one load/save contract: a JSON file on disk,
//! a singleton Postgres row and a Redis key with a TTL.

mod disk;
mod postgres;
mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{Config, TokenBackend};
use crate::error::Result;
use crate::token::Credential;

pub use self::disk::DiskStore;
pub use self::postgres::PostgresStore;
pub use self::redis::RedisStore;

// == Credential Store Trait ==
/// A place a credential can be loaded from and saved to.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Loads the stored credential; `Ok(None)` when nothing is stored.
    async fn load(&self) -> Result<Option<Credential>>;

    /// Stores the credential, replacing any previous one.
    async fn save(&self, credential: &Credential) -> Result<()>;
}

/// Connects the durable backend selected by `TOKEN_BACKEND`.
pub async fn connect_durable(config: &Config) -> Result<Arc<dyn CredentialStore>> {
    match config.token_backend {
        TokenBackend::Postgres => {
            let store = PostgresStore::connect(&config.database_url).await?;
            store.ensure_schema().await?;
            info!("Using Postgres credential backend");
            Ok(Arc::new(store))
        }
        TokenBackend::Redis => {
            let store = RedisStore::connect(
                &config.redis_url,
                config.redis_password.as_deref(),
                &config.redis_token_key,
            )
            .await?;
            info!(key = %config.redis_token_key, "Using Redis credential backend");
            Ok(Arc::new(store))
        }
    }
}
