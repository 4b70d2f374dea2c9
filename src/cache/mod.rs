//! Cache Module
//!
//! In-memory media cache keyed by media id, with store-level freshness tracking.

mod shared;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use shared::MediaCache;
pub use store::MediaStore;

// == Public Constants ==
/// Age after which the cache is no longer considered fresh
pub const FRESHNESS_WINDOW: std::time::Duration = std::time::Duration::from_secs(60 * 60);
