//! Media Cache - Graph API media mirror
//!
//! Serves social-media posts from memory, keeping them in sync with the
//! Graph API and keeping the access token renewed on a schedule.

pub mod api;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod persistence;
pub mod tasks;
pub mod token;

pub use api::AppState;
pub use bootstrap::init_token;
pub use cache::MediaCache;
pub use config::Config;
pub use error::{Result, ServiceError};
pub use token::{Credential, TokenRuntime};
