//! Read-only views of album tracks grouped per album.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::error::ApiResult;
use super::state::{GuardedCatalogStore, ServerState};
use crate::catalog_store::{AlbumGroup, CatalogError};

async fn list_grouped_tracks(
    State(store): State<GuardedCatalogStore>,
) -> ApiResult<Json<Vec<AlbumGroup>>> {
    Ok(Json(store.get_grouped_tracks()?))
}

/// The association's group, still wrapped in a list so clients can share
/// one decoder with the listing.
async fn get_grouped_track(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<AlbumGroup>>> {
    store
        .get_grouped_track(id)?
        .map(Json)
        .ok_or_else(|| CatalogError::not_found("album track", id).into())
}

pub fn make_tracks_routes(state: ServerState) -> Router {
    Router::new()
        .route("/tracks-grouped", get(list_grouped_tracks))
        .route("/tracks-grouped/{id}", get(get_grouped_track))
        .with_state(state)
}
