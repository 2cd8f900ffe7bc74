//! CatalogStore trait definition.

use super::error::CatalogResult;
use super::models::{
    Album, AlbumGroup, AlbumPatch, AlbumStats, AlbumSummary, AlbumTrack, Artist, ArtistStats,
    NewAlbum, RenumberOutcome, Song, SongStats, TrackSpec,
};

/// Storage backend for the catalog.
///
/// Every write is atomic: either all of its effects become visible or none
/// of them do.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Artists
    // =========================================================================

    /// All artists, ordered by name.
    fn list_artists(&self) -> CatalogResult<Vec<Artist>>;

    fn get_artist(&self, id: i64) -> CatalogResult<Option<Artist>>;

    fn create_artist(&self, name: &str) -> CatalogResult<Artist>;

    /// Renames the artist when `name` is given. `None` leaves it untouched.
    fn update_artist(&self, id: i64, name: Option<&str>) -> CatalogResult<Artist>;

    /// Deletes the artist together with its albums and their tracks.
    fn delete_artist(&self, id: i64) -> CatalogResult<()>;

    // =========================================================================
    // Songs
    // =========================================================================

    /// All songs, ordered by title.
    fn list_songs(&self) -> CatalogResult<Vec<Song>>;

    fn get_song(&self, id: i64) -> CatalogResult<Option<Song>>;

    fn create_song(&self, title: &str) -> CatalogResult<Song>;

    fn update_song(&self, id: i64, title: Option<&str>) -> CatalogResult<Song>;

    /// Deletes the song and every album track that points at it.
    fn delete_song(&self, id: i64) -> CatalogResult<()>;

    // =========================================================================
    // Albums
    // =========================================================================

    /// Read views of all albums, by release date then artist name.
    fn list_albums(&self) -> CatalogResult<Vec<AlbumSummary>>;

    fn get_album_summary(&self, id: i64) -> CatalogResult<Option<AlbumSummary>>;

    /// Write view of an album, tracks ordered by position.
    fn get_album(&self, id: i64) -> CatalogResult<Option<Album>>;

    /// Creates the album and its tracks. If any track fails the album is not
    /// created either.
    fn create_album(&self, album: &NewAlbum) -> CatalogResult<Album>;

    /// Applies the given fields. When `patch.tracks` is set the album's track
    /// list is replaced with it.
    fn update_album(&self, id: i64, patch: &AlbumPatch) -> CatalogResult<Album>;

    fn delete_album(&self, id: i64) -> CatalogResult<()>;

    // =========================================================================
    // Album tracks
    // =========================================================================

    /// Replaces the album's whole track list, creating songs for unseen titles.
    fn replace_album_tracks(&self, album_id: i64, tracks: &[TrackSpec])
        -> CatalogResult<Vec<TrackSpec>>;

    /// Raw associations of one album, ordered by position.
    fn get_album_tracks(&self, album_id: i64) -> CatalogResult<Vec<AlbumTrack>>;

    /// Every association grouped per album.
    fn get_grouped_tracks(&self) -> CatalogResult<Vec<AlbumGroup>>;

    /// The single association `album_track_id`, wrapped as a one-group list.
    fn get_grouped_track(&self, album_track_id: i64) -> CatalogResult<Option<Vec<AlbumGroup>>>;

    /// Rewrites positions of each listed album to 1..N keeping their order.
    fn renumber_album_tracks(&self, album_ids: &[i64]) -> CatalogResult<RenumberOutcome>;

    // =========================================================================
    // Statistics
    // =========================================================================

    fn get_artist_stats(&self) -> CatalogResult<Vec<ArtistStats>>;

    fn get_album_stats(&self) -> CatalogResult<Vec<AlbumStats>>;

    fn get_song_stats(&self) -> CatalogResult<Vec<SongStats>>;

    fn get_artists_count(&self) -> usize;

    fn get_albums_count(&self) -> usize;

    fn get_songs_count(&self) -> usize;
}
