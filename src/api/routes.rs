//! API Routes
//!
//! Configures the Axum router with all media endpoints.

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{media_handler, media_ids_handler, ready_handler, status_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /media` - All cached media, or `?ids=a,b` for specific ids
/// - `GET /media/getIdsOnly` - Ids only, `?limit=N&media_type=T`
/// - `GET /media/status` - Cache size and freshness
/// - `GET /ready` - Liveness probe
///
/// # Middleware
/// - CORS: Only `allowed_origins` receive CORS headers, with credentials
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/media", get(media_handler))
        .route("/media/getIdsOnly", get(media_ids_handler))
        .route("/media/status", get(status_handler))
        .route("/ready", get(ready_handler))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
