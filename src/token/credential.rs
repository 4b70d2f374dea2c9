//! Credential Module
//!
//! Immutable snapshot of an access token and its expiry instant.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// == Credential ==
/// An access token plus the instant it stops being accepted.
///
/// Serialized with `AccessToken` / `ExpiresAt` keys so credential files
/// written by earlier deployments stay readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credential {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl Credential {
    // == Constructors ==
    /// Creates a credential expiring at a fixed instant.
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Creates a credential expiring `lifetime` from now.
    ///
    /// Saturates at the representable range instead of overflowing.
    pub fn expiring_in(access_token: impl Into<String>, lifetime: Duration) -> Self {
        let expires_at = Utc::now().checked_add_signed(lifetime).unwrap_or(
            if lifetime < Duration::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            },
        );
        Self::new(access_token, expires_at)
    }

    /// Like [`Credential::expiring_in`], but `None` when the expiry instant
    /// is out of range.
    pub fn try_expiring_in(access_token: impl Into<String>, lifetime: Duration) -> Option<Self> {
        Utc::now()
            .checked_add_signed(lifetime)
            .map(|expires_at| Self::new(access_token, expires_at))
    }

    // == Accessors ==
    /// The secret presented to the Graph API.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Instant after which the remote rejects the token.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    // == Validity ==
    /// An empty secret counts as no credential at all.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty()
    }

    /// Returns true once `now >= expires_at`, or when the secret is empty.
    pub fn is_expired(&self) -> bool {
        self.is_empty() || Utc::now() >= self.expires_at
    }

    /// Time left before expiry; negative once expired.
    pub fn remaining(&self) -> Duration {
        self.expires_at - Utc::now()
    }

    /// Remaining lifetime in whole seconds, floored at zero.
    pub fn ttl_seconds(&self) -> u64 {
        self.remaining().num_seconds().max(0) as u64
    }

    /// Returns true when the credential is absent or expires within `window`.
    pub fn needs_refresh(&self, window: Duration) -> bool {
        self.is_empty() || self.remaining() < window
    }
}
