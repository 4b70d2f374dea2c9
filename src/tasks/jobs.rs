//! Periodic Jobs
//!
//! Media sync and token refresh, the two jobs driven by the scheduler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::bootstrap::save_best_effort;
use crate::cache::MediaCache;
use crate::error::Result;
use crate::graph::GraphApi;
use crate::persistence::CredentialStore;
use crate::token::TokenRuntime;

// == Scheduled Job Trait ==
/// A side-effecting unit of work fired on every tick.
///
/// Failures are handled inside `run`; the scheduler never sees them.
#[async_trait]
pub trait ScheduledJob: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    async fn run(&self);
}

// == Retry Policy ==
/// Linear backoff: waits `backoff * attempt` after each failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

// == Media Sync ==
/// Pulls the full media listing and upserts it into the cache.
pub struct MediaSync {
    source: Arc<dyn GraphApi>,
    runtime: Arc<TokenRuntime>,
    cache: MediaCache,
}

impl MediaSync {
    pub fn new(source: Arc<dyn GraphApi>, runtime: Arc<TokenRuntime>, cache: MediaCache) -> Self {
        Self {
            source,
            runtime,
            cache,
        }
    }

    /// One fetch-and-upsert attempt. Returns the number of records fetched.
    pub async fn sync_once(&self) -> Result<usize> {
        let token = self.runtime.get().await;
        let media = self.source.fetch_media(&token, 0).await?;
        let count = media.len();
        self.cache.upsert_all(media).await;
        Ok(count)
    }

    /// Runs [`MediaSync::sync_once`] until it succeeds or attempts run out.
    /// Only transient failures are retried.
    ///
    /// Returns true on success. A final failure is logged, not propagated.
    pub async fn sync_with_retry(&self, policy: RetryPolicy) -> bool {
        let max_attempts = policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.sync_once().await {
                Ok(count) => {
                    info!(count, attempt, "Media sync complete");
                    return true;
                }
                Err(e) if !e.is_transient() => {
                    error!(attempt, error = %e, "Media sync failed, not retrying");
                    return false;
                }
                Err(e) => {
                    warn!(attempt, max_attempts, error = %e, "Media sync attempt failed");
                    if attempt < max_attempts {
                        tokio::time::sleep(policy.backoff * attempt).await;
                    }
                }
            }
        }

        error!(max_attempts, "All media sync attempts failed");
        false
    }
}

#[async_trait]
impl ScheduledJob for MediaSync {
    fn name(&self) -> &'static str {
        "media-sync"
    }

    async fn run(&self) {
        self.sync_with_retry(RetryPolicy::default()).await;
    }
}

// == Token Refresher ==
/// Renews the credential once it enters the refresh window.
pub struct TokenRefresher {
    runtime: Arc<TokenRuntime>,
    source: Arc<dyn GraphApi>,
    disk: Arc<dyn CredentialStore>,
    durable: Arc<dyn CredentialStore>,
}

impl TokenRefresher {
    pub fn new(
        runtime: Arc<TokenRuntime>,
        source: Arc<dyn GraphApi>,
        disk: Arc<dyn CredentialStore>,
        durable: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            runtime,
            source,
            disk,
            durable,
        }
    }

    /// Refreshes when due and returns whether a new credential was applied.
    ///
    /// The runtime is updated before persisting, so a failed write never
    /// discards a successful refresh.
    pub async fn refresh_if_due(&self) -> Result<bool> {
        if !self.runtime.needs_refresh().await {
            info!("Access token is outside the refresh window, nothing to do");
            return Ok(false);
        }

        let current = self.runtime.get().await;
        let credential = self.source.refresh_credential(&current).await?;

        self.runtime.set(credential.clone()).await;
        save_best_effort(self.disk.as_ref(), &credential).await;
        save_best_effort(self.durable.as_ref(), &credential).await;

        info!(expires_at = %credential.expires_at(), "Refreshed access token");
        Ok(true)
    }
}

#[async_trait]
impl ScheduledJob for TokenRefresher {
    fn name(&self) -> &'static str {
        "token-refresh"
    }

    async fn run(&self) {
        if let Err(e) = self.refresh_if_due().await {
            error!(error = %e, "Failed to refresh access token");
        }
    }
}
