//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::tasks::MAX_PERIOD;

/// Default CORS origins allowed to read the media API.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://127.0.0.1:9292,https://theobesitykiller.com";

const DEFAULT_MEDIA_SYNC_MINUTES: u64 = 45;
const DEFAULT_TOKEN_REFRESH_DAYS: u64 = 30;

// == Token Backend ==
/// Durable credential backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenBackend {
    /// Singleton row in a Postgres table
    Postgres,
    /// Single key in Redis with a TTL
    Redis,
}

impl FromStr for TokenBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(TokenBackend::Postgres),
            "redis" => Ok(TokenBackend::Redis),
            other => Err(format!("unknown token backend: {}", other)),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Account whose media is mirrored
    pub ig_user_id: String,
    /// Graph API base URL, without trailing slash
    pub api_base_url: String,
    /// App id used for the token exchange
    pub app_id: String,
    /// App secret used for the token exchange
    pub app_secret: String,
    /// Media sync period in minutes
    pub media_sync_minutes: u64,
    /// Token refresh check period in days
    pub token_refresh_days: u64,
    /// Disk location of the cached credential
    pub token_path: String,
    /// Durable credential backend
    pub token_backend: TokenBackend,
    /// Postgres connection string
    pub database_url: String,
    /// Redis connection URL
    pub redis_url: String,
    /// Optional Redis password (Upstash REST token)
    pub redis_password: Option<String>,
    /// Redis key holding the credential
    pub redis_token_key: String,
    /// Timeout applied to each outbound Graph API call
    pub http_timeout_secs: u64,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 8000)
    /// - `IG_USER_ID` - Account id whose media is cached
    /// - `FB_API_BASE_URL` - Graph API base URL (default: https://graph.facebook.com)
    /// - `APP_ID` / `APP_SECRET` - App credentials for the token exchange
    /// - `MEDIA_SYNC_TIME` - Media sync period in minutes (default: 45)
    /// - `TOKEN_REFRESH_TIME` - Token refresh check period in days (default: 30)
    /// - `TOKEN_PATH` - Credential file (default: token.json)
    /// - `TOKEN_BACKEND` - `postgres` or `redis` (default: postgres)
    /// - `DATABASE_URL` - Postgres connection string
    /// - `UPSTASH_REDIS_REST_URL` or `REDIS_URL` - Redis URL
    /// - `UPSTASH_REDIS_REST_TOKEN` - Redis password
    /// - `REDIS_TOKEN_KEY` - Redis key (default: instagram_token)
    /// - `HTTP_TIMEOUT_SECS` - Per-call Graph API timeout (default: 5)
    /// - `CORS_ALLOWED_ORIGINS` - Comma-separated origin whitelist
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            tracing::debug!("No .env file found, using process environment");
        }

        let defaults = Self::default();

        Self {
            server_port: parse_var("PORT", defaults.server_port),
            ig_user_id: string_var("IG_USER_ID").unwrap_or(defaults.ig_user_id),
            api_base_url: string_var("FB_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            app_id: string_var("APP_ID").unwrap_or(defaults.app_id),
            app_secret: string_var("APP_SECRET").unwrap_or(defaults.app_secret),
            media_sync_minutes: parse_var("MEDIA_SYNC_TIME", defaults.media_sync_minutes),
            token_refresh_days: parse_var("TOKEN_REFRESH_TIME", defaults.token_refresh_days),
            token_path: string_var("TOKEN_PATH").unwrap_or(defaults.token_path),
            token_backend: parse_var("TOKEN_BACKEND", defaults.token_backend),
            database_url: string_var("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_url: string_var("UPSTASH_REDIS_REST_URL")
                .or_else(|| string_var("REDIS_URL"))
                .unwrap_or(defaults.redis_url),
            redis_password: string_var("UPSTASH_REDIS_REST_TOKEN"),
            redis_token_key: string_var("REDIS_TOKEN_KEY").unwrap_or(defaults.redis_token_key),
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            allowed_origins: string_var("CORS_ALLOWED_ORIGINS")
                .map(|list| split_origins(&list))
                .unwrap_or(defaults.allowed_origins),
        }
    }

    /// Period between media sync ticks.
    ///
    /// Falls back to the default when the value exceeds [`MAX_PERIOD`].
    pub fn media_sync_period(&self) -> Duration {
        period_or_default(self.media_sync_minutes, 60, DEFAULT_MEDIA_SYNC_MINUTES)
    }

    /// Period between token refresh checks.
    ///
    /// Falls back to the default when the value exceeds [`MAX_PERIOD`].
    pub fn token_refresh_period(&self) -> Duration {
        period_or_default(self.token_refresh_days, 24 * 60 * 60, DEFAULT_TOKEN_REFRESH_DAYS)
    }

    /// Timeout for a single outbound HTTP call.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            ig_user_id: String::new(),
            api_base_url: "https://graph.facebook.com".to_string(),
            app_id: String::new(),
            app_secret: String::new(),
            media_sync_minutes: DEFAULT_MEDIA_SYNC_MINUTES,
            token_refresh_days: DEFAULT_TOKEN_REFRESH_DAYS,
            token_path: "token.json".to_string(),
            token_backend: TokenBackend::Postgres,
            database_url: String::new(),
            redis_url: String::new(),
            redis_password: None,
            redis_token_key: "instagram_token".to_string(),
            http_timeout_secs: 5,
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

// == Helpers ==
fn period_or_default(count: u64, unit_secs: u64, default: u64) -> Duration {
    count
        .max(1)
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
        .filter(|period| *period <= MAX_PERIOD)
        .unwrap_or_else(|| {
            warn!(count, default, "Period out of range, using default");
            Duration::from_secs(default * unit_secs)
        })
}

fn string_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn split_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
