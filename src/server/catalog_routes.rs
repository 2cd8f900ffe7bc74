//! CRUD routes for artists, songs and albums.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer};

use super::error::ApiResult;
use super::state::{GuardedCatalogStore, ServerState};
use crate::catalog_store::validation::{self, TrackSpecInput, MAY_NOT_BE_NULL};
use crate::catalog_store::{
    Album, AlbumPatch, AlbumSummary, Artist, CatalogError, FieldErrors, NewAlbum, Song, TrackSpec,
};

type JsonBody<T> = Result<Json<T>, JsonRejection>;

#[derive(Debug, Deserialize)]
struct ArtistBody {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SongBody {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlbumBody {
    artist_id: Option<i64>,
    release_date: Option<String>,
    /// Outer `None`: field omitted. `Some(None)`: explicit null.
    #[serde(default, deserialize_with = "deserialize_present")]
    tracks: Option<Option<Vec<TrackSpecInput>>>,
}

fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn found<T>(value: Option<T>, entity: &'static str, id: i64) -> ApiResult<T> {
    value.ok_or_else(|| CatalogError::not_found(entity, id).into())
}

// =============================================================================
// Artists
// =============================================================================

async fn list_artists(State(store): State<GuardedCatalogStore>) -> ApiResult<Json<Vec<Artist>>> {
    Ok(Json(store.list_artists()?))
}

async fn get_artist(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Artist>> {
    Ok(Json(found(store.get_artist(id)?, "artist", id)?))
}

async fn create_artist(
    State(store): State<GuardedCatalogStore>,
    body: JsonBody<ArtistBody>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let mut errors = FieldErrors::new();
    let name = validation::require_text(&mut errors, "name", body.name);
    let name = errors.finish(name)?;

    let artist = store.create_artist(&name)?;
    Ok((StatusCode::CREATED, Json(artist)))
}

fn update_artist(
    store: &GuardedCatalogStore,
    id: i64,
    body: ArtistBody,
    partial: bool,
) -> ApiResult<Json<Artist>> {
    found(store.get_artist(id)?, "artist", id)?;

    let mut errors = FieldErrors::new();
    let name = if partial {
        validation::optional_text(&mut errors, "name", body.name)
    } else {
        validation::require_text(&mut errors, "name", body.name)
    };
    errors.into_result(())?;

    Ok(Json(store.update_artist(id, name.as_deref())?))
}

async fn put_artist(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
    body: JsonBody<ArtistBody>,
) -> ApiResult<Json<Artist>> {
    let Json(body) = body?;
    update_artist(&store, id, body, false)
}

async fn patch_artist(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
    body: JsonBody<ArtistBody>,
) -> ApiResult<Json<Artist>> {
    let Json(body) = body?;
    update_artist(&store, id, body, true)
}

async fn delete_artist(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    store.delete_artist(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Songs
// =============================================================================

async fn list_songs(State(store): State<GuardedCatalogStore>) -> ApiResult<Json<Vec<Song>>> {
    Ok(Json(store.list_songs()?))
}

async fn get_song(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Song>> {
    Ok(Json(found(store.get_song(id)?, "song", id)?))
}

async fn create_song(
    State(store): State<GuardedCatalogStore>,
    body: JsonBody<SongBody>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let mut errors = FieldErrors::new();
    let title = validation::require_text(&mut errors, "title", body.title);
    let title = errors.finish(title)?;

    let song = store.create_song(&title)?;
    Ok((StatusCode::CREATED, Json(song)))
}

fn update_song(
    store: &GuardedCatalogStore,
    id: i64,
    body: SongBody,
    partial: bool,
) -> ApiResult<Json<Song>> {
    found(store.get_song(id)?, "song", id)?;

    let mut errors = FieldErrors::new();
    let title = if partial {
        validation::optional_text(&mut errors, "title", body.title)
    } else {
        validation::require_text(&mut errors, "title", body.title)
    };
    errors.into_result(())?;

    Ok(Json(store.update_song(id, title.as_deref())?))
}

async fn put_song(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
    body: JsonBody<SongBody>,
) -> ApiResult<Json<Song>> {
    let Json(body) = body?;
    update_song(&store, id, body, false)
}

async fn patch_song(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
    body: JsonBody<SongBody>,
) -> ApiResult<Json<Song>> {
    let Json(body) = body?;
    update_song(&store, id, body, true)
}

async fn delete_song(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    store.delete_song(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Albums
// =============================================================================

/// `None` when the field was omitted, an error entry when it was null.
fn parse_album_tracks(
    errors: &mut FieldErrors,
    tracks: Option<Option<Vec<TrackSpecInput>>>,
) -> Option<Vec<TrackSpec>> {
    match tracks? {
        None => {
            errors.add("tracks", MAY_NOT_BE_NULL);
            None
        }
        Some(inputs) => Some(validation::parse_tracks(errors, inputs)),
    }
}

async fn list_albums(
    State(store): State<GuardedCatalogStore>,
) -> ApiResult<Json<Vec<AlbumSummary>>> {
    Ok(Json(store.list_albums()?))
}

async fn get_album(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
) -> ApiResult<Json<AlbumSummary>> {
    Ok(Json(found(store.get_album_summary(id)?, "album", id)?))
}

async fn create_album(
    State(store): State<GuardedCatalogStore>,
    body: JsonBody<AlbumBody>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let mut errors = FieldErrors::new();
    let artist_id = validation::require_id(&mut errors, "artistId", body.artist_id);
    let release_date = validation::require_date(&mut errors, "releaseDate", body.release_date);
    let tracks = parse_album_tracks(&mut errors, body.tracks).unwrap_or_default();
    let (artist_id, release_date) = errors.finish(artist_id.zip(release_date))?;

    let album = store.create_album(&NewAlbum {
        artist_id,
        release_date,
        tracks,
    })?;
    Ok((StatusCode::CREATED, Json(album)))
}

fn update_album(
    store: &GuardedCatalogStore,
    id: i64,
    body: AlbumBody,
    partial: bool,
) -> ApiResult<Json<Album>> {
    found(store.get_album_summary(id)?, "album", id)?;

    let mut errors = FieldErrors::new();
    let (artist_id, release_date) = if partial {
        (
            body.artist_id,
            validation::optional_date(&mut errors, "releaseDate", body.release_date),
        )
    } else {
        (
            validation::require_id(&mut errors, "artistId", body.artist_id),
            validation::require_date(&mut errors, "releaseDate", body.release_date),
        )
    };
    let tracks = parse_album_tracks(&mut errors, body.tracks);
    errors.into_result(())?;

    let album = store.update_album(
        id,
        &AlbumPatch {
            artist_id,
            release_date,
            tracks,
        },
    )?;
    Ok(Json(album))
}

async fn put_album(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
    body: JsonBody<AlbumBody>,
) -> ApiResult<Json<Album>> {
    let Json(body) = body?;
    update_album(&store, id, body, false)
}

async fn patch_album(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
    body: JsonBody<AlbumBody>,
) -> ApiResult<Json<Album>> {
    let Json(body) = body?;
    update_album(&store, id, body, true)
}

async fn delete_album(
    State(store): State<GuardedCatalogStore>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    store.delete_album(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn make_catalog_routes(state: ServerState) -> Router {
    Router::new()
        .route("/artists", get(list_artists).post(create_artist))
        .route(
            "/artists/{id}",
            get(get_artist)
                .put(put_artist)
                .patch(patch_artist)
                .delete(delete_artist),
        )
        .route("/songs", get(list_songs).post(create_song))
        .route(
            "/songs/{id}",
            get(get_song)
                .put(put_song)
                .patch(patch_song)
                .delete(delete_song),
        )
        .route("/albums", get(list_albums).post(create_album))
        .route(
            "/albums/{id}",
            get(get_album)
                .put(put_album)
                .patch(patch_album)
                .delete(delete_album),
        )
        .with_state(state)
}
