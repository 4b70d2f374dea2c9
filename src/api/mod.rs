//! API Module
//!
//! HTTP handlers and routing for the media REST API.
//!
//! # Endpoints
//! - `GET /media` - Cached media, optionally by `ids`
//! - `GET /media/getIdsOnly` - Media ids with optional `limit` and `media_type`
//! - `GET /media/status` - Cache size and freshness
//! - `GET /ready` - Liveness probe

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
