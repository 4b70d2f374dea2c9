//! Token Module
//!
//! Access credential value type and the shared runtime holder the jobs read from.

mod credential;
mod runtime;

pub use credential::Credential;
pub use runtime::TokenRuntime;

// == Public Constants ==
/// Lead time before expiry during which a credential is renewed.
pub const REFRESH_WINDOW_DAYS: i64 = 7;
