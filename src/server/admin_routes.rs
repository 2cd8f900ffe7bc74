//! Maintenance endpoints: catalog statistics and track renumbering.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::error::ApiResult;
use super::state::{GuardedCatalogStore, ServerState};
use crate::catalog_store::{AlbumStats, ArtistStats, RenumberOutcome, SongStats};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenumberBody {
    album_ids: Vec<i64>,
}

async fn artist_stats(
    State(store): State<GuardedCatalogStore>,
) -> ApiResult<Json<Vec<ArtistStats>>> {
    Ok(Json(store.get_artist_stats()?))
}

async fn album_stats(State(store): State<GuardedCatalogStore>) -> ApiResult<Json<Vec<AlbumStats>>> {
    Ok(Json(store.get_album_stats()?))
}

async fn song_stats(State(store): State<GuardedCatalogStore>) -> ApiResult<Json<Vec<SongStats>>> {
    Ok(Json(store.get_song_stats()?))
}

async fn renumber(
    State(store): State<GuardedCatalogStore>,
    body: Result<Json<RenumberBody>, JsonRejection>,
) -> ApiResult<Json<RenumberOutcome>> {
    let Json(body) = body?;
    Ok(Json(store.renumber_album_tracks(&body.album_ids)?))
}

pub fn make_admin_routes(state: ServerState) -> Router {
    Router::new()
        .route("/stats/artists", get(artist_stats))
        .route("/stats/albums", get(album_stats))
        .route("/stats/songs", get(song_stats))
        .route("/renumber", post(renumber))
        .with_state(state)
}
