//! Token Runtime
//!
//! Concurrency-safe holder of the credential currently in use.

use chrono::Duration;
use tokio::sync::RwLock;

use crate::token::{Credential, REFRESH_WINDOW_DAYS};

/// Holds the current credential behind a reader/writer lock.
///
/// Constructed once by `main` and shared through `Arc` with the bootstrap
/// sequence, the refresh job and the media sync.
#[derive(Debug)]
pub struct TokenRuntime {
    credential: RwLock<Credential>,
    refresh_window: Duration,
}

impl TokenRuntime {
    /// Creates an empty runtime with the default refresh window.
    pub fn new() -> Self {
        Self::with_refresh_window(Duration::days(REFRESH_WINDOW_DAYS))
    }

    /// Creates an empty runtime with a custom refresh window.
    pub fn with_refresh_window(refresh_window: Duration) -> Self {
        Self {
            credential: RwLock::new(Credential::default()),
            refresh_window,
        }
    }

    /// Current secret, or an empty string when none has been set.
    pub async fn get(&self) -> String {
        self.credential.read().await.access_token().to_string()
    }

    /// Copy of the whole credential.
    pub async fn snapshot(&self) -> Credential {
        self.credential.read().await.clone()
    }

    /// Replaces the held credential. Last writer wins.
    pub async fn set(&self, credential: Credential) {
        *self.credential.write().await = credential;
    }

    /// Returns true when there is no secret or it expires inside the refresh window.
    pub async fn needs_refresh(&self) -> bool {
        self.credential.read().await.needs_refresh(self.refresh_window)
    }
}

impl Default for TokenRuntime {
    fn default() -> Self {
        Self::new()
    }
}
