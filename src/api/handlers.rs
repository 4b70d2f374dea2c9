//! API Handlers
//!
//! HTTP request handlers for each media endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::cache::{MediaCache, FRESHNESS_WINDOW};
use crate::error::{Result, ServiceError};
use crate::graph::MediaRecord;
use crate::models::{MediaIdsQuery, MediaIdsResponse, MediaQuery, StatusResponse};
use crate::tasks::MediaSync;

/// Maximum number of ids accepted by a single `GET /media?ids=` request
pub const MAX_IDS_PER_REQUEST: usize = 100;

/// Application state shared across all handlers.
///
/// The cache is read directly; the sync is used for on-demand refreshes
/// when a requested id is not cached yet.
#[derive(Clone)]
pub struct AppState {
    /// Shared media cache
    pub cache: MediaCache,
    /// Media sync used on cache misses
    pub sync: Arc<MediaSync>,
}

impl AppState {
    /// Creates a new AppState.
    pub fn new(cache: MediaCache, sync: Arc<MediaSync>) -> Self {
        Self { cache, sync }
    }
}

/// Handler for GET /media
///
/// With `ids=a,b,c`, returns the cached records for those ids. If any are
/// missing, one synchronous sync attempt runs first; the answer then holds
/// whatever is cached afterwards. Without `ids`, returns every record.
pub async fn media_handler(
    State(state): State<AppState>,
    Query(query): Query<MediaQuery>,
) -> Result<Json<Vec<MediaRecord>>> {
    let Some(ids) = query.id_list() else {
        return Ok(Json(state.cache.get_all().await));
    };

    if ids.len() > MAX_IDS_PER_REQUEST {
        return Err(ServiceError::InvalidRequest(format!(
            "At most {} ids may be requested at once",
            MAX_IDS_PER_REQUEST
        )));
    }

    let (all_present, missing) = state.cache.has_all(&ids).await;
    if !all_present {
        info!(?missing, "Requested media not cached, syncing");
        match state.sync.sync_once().await {
            Ok(count) => info!(count, "Refreshed cache on demand"),
            Err(e) => warn!(error = %e, "On-demand media sync failed"),
        }
    }

    Ok(Json(state.cache.get_by_ids(&ids).await))
}

/// Handler for GET /media/getIdsOnly
///
/// Lists cached ids newest first, optionally filtered by `media_type` and
/// truncated to `limit`.
pub async fn media_ids_handler(
    State(state): State<AppState>,
    Query(query): Query<MediaIdsQuery>,
) -> Json<MediaIdsResponse> {
    let ids = state
        .cache
        .list_ids(query.limit(), query.media_type())
        .await;
    Json(MediaIdsResponse::new(ids))
}

/// Handler for GET /media/status
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let cache = &state.cache;
    Json(StatusResponse::new(
        cache.len().await,
        cache.last_updated().await,
        cache.is_fresh(FRESHNESS_WINDOW).await,
    ))
}

/// Handler for GET /ready
pub async fn ready_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
