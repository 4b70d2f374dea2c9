//! Postgres credential store.
//!
//! The credential lives in a single row keyed by `id = TRUE`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::Result;
use crate::persistence::CredentialStore;
use crate::token::Credential;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS instagram_tokens (
        id BOOLEAN PRIMARY KEY DEFAULT TRUE,
        access_token TEXT NOT NULL,
        expires_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ DEFAULT now()
    )
"#;

const SELECT_TOKEN: &str = r#"
    SELECT access_token, expires_at
    FROM instagram_tokens
    WHERE id = TRUE
"#;

const UPSERT_TOKEN: &str = r#"
    INSERT INTO instagram_tokens (id, access_token, expires_at)
    VALUES (TRUE, $1, $2)
    ON CONFLICT (id)
    DO UPDATE SET
        access_token = EXCLUDED.access_token,
        expires_at = EXCLUDED.expires_at,
        updated_at = now()
"#;

/// Relational credential backend.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a small pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the credential table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for PostgresStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn load(&self) -> Result<Option<Credential>> {
        let row = sqlx::query_as::<_, (String, DateTime<Utc>)>(SELECT_TOKEN)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(access_token, expires_at)| Credential::new(access_token, expires_at)))
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        sqlx::query(UPSERT_TOKEN)
            .bind(credential.access_token())
            .bind(credential.expires_at())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
