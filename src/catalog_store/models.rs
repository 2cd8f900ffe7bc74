//! Catalog entities and the read views built on top of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
}

/// A title/position pair, used both to describe an album's desired track
/// list and to report it back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSpec {
    pub title: String,
    pub position: u32,
}

impl TrackSpec {
    pub fn new<S: Into<String>>(title: S, position: u32) -> Self {
        TrackSpec {
            title: title.into(),
            position,
        }
    }
}

/// Album as seen by writers: owning artist, release date and the ordered
/// track list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: i64,
    pub artist_id: i64,
    pub release_date: NaiveDate,
    pub tracks: Vec<TrackSpec>,
}

/// Public read view of an album. The internal id and the track detail are
/// intentionally left out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub artist_name: String,
    pub release_date: NaiveDate,
}

/// One row of the album/song join table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumTrack {
    pub id: i64,
    pub album_id: i64,
    pub song_id: i64,
    pub song_title: String,
    pub position: u32,
}

/// A track association joined with its album summary and song title, as
/// fed to [`super::group_by_album`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumTrackRow {
    pub album_id: i64,
    pub album: AlbumSummary,
    pub song_title: String,
    pub position: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumGroup {
    pub album: AlbumSummary,
    pub tracks: Vec<TrackSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAlbum {
    pub artist_id: i64,
    pub release_date: NaiveDate,
    pub tracks: Vec<TrackSpec>,
}

/// Partial album update. `tracks: None` leaves the current track list alone,
/// `Some(vec![])` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlbumPatch {
    pub artist_id: Option<i64>,
    pub release_date: Option<NaiveDate>,
    pub tracks: Option<Vec<TrackSpec>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenumberOutcome {
    pub albums_renumbered: usize,
    pub positions_changed: usize,
}

// =============================================================================
// Statistics (read-only helpers)
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistStats {
    pub id: i64,
    pub name: String,
    pub albums_count: usize,
    pub tracks_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumStats {
    pub id: i64,
    pub artist_name: String,
    pub release_date: NaiveDate,
    pub tracks_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongStats {
    pub id: i64,
    pub title: String,
    pub albums_count: usize,
}
