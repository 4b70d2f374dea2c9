//! Token Bootstrap
//!
//! Establishes the first usable credential at startup by walking the
//! backends in priority order: disk, durable store, then a remote refresh.

use tracing::{info, warn};

use crate::error::{Result, ServiceError};
use crate::graph::GraphApi;
use crate::persistence::CredentialStore;
use crate::token::{Credential, TokenRuntime};

/// Outcome of one backend tier.
enum Tier {
    Usable(Credential),
    Skipped,
}

/// Populates `runtime` with an unexpired credential.
///
/// 1. Disk: used as-is when present and unexpired.
/// 2. Durable store: used when present and unexpired, then mirrored to disk.
/// 3. Remote refresh with whatever secret the runtime holds (possibly empty),
///    then persisted to both stores.
///
/// Missing or expired entries only fall through to the next tier. Failing
/// persistence writes are logged and ignored. The only error returned is a
/// failed remote refresh, which is fatal to startup.
pub async fn init_token(
    runtime: &TokenRuntime,
    disk: &dyn CredentialStore,
    durable: &dyn CredentialStore,
    source: &dyn GraphApi,
) -> Result<Credential> {
    // 1. Disk
    if let Tier::Usable(credential) = try_tier(disk).await {
        runtime.set(credential.clone()).await;
        info!(backend = disk.name(), expires_at = %credential.expires_at(), "Loaded token");
        return Ok(credential);
    }

    // 2. Durable backend
    if let Tier::Usable(credential) = try_tier(durable).await {
        runtime.set(credential.clone()).await;
        info!(backend = durable.name(), expires_at = %credential.expires_at(), "Loaded token");
        save_best_effort(disk, &credential).await;
        return Ok(credential);
    }

    // 3. Remote refresh
    info!("Refreshing token from Graph API");
    let current = runtime.get().await;
    let credential = source
        .refresh_credential(&current)
        .await
        .map_err(|e| ServiceError::Bootstrap(format!("no stored token and refresh failed: {e}")))?;

    info!(expires_at = %credential.expires_at(), "Obtained new token");
    runtime.set(credential.clone()).await;
    save_best_effort(disk, &credential).await;
    save_best_effort(durable, &credential).await;

    Ok(credential)
}

async fn try_tier(store: &dyn CredentialStore) -> Tier {
    match store.load().await {
        Ok(Some(credential)) if !credential.is_expired() => Tier::Usable(credential),
        Ok(Some(credential)) => {
            warn!(
                backend = store.name(),
                expires_at = %credential.expires_at(),
                "Stored token is expired or empty"
            );
            Tier::Skipped
        }
        Ok(None) => {
            info!(backend = store.name(), "No token found");
            Tier::Skipped
        }
        Err(e) => {
            warn!(backend = store.name(), error = %e, "Could not read token");
            Tier::Skipped
        }
    }
}

/// Writes `credential` to `store`, logging rather than returning failures.
pub(crate) async fn save_best_effort(store: &dyn CredentialStore, credential: &Credential) {
    if let Err(e) = store.save(credential).await {
        warn!(backend = store.name(), error = %e, "Failed to persist token");
    }
}
