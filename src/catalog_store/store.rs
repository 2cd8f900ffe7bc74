//! SQLite-backed catalog store.
//!
//! Writes go through a single connection guarded by a mutex and always run
//! inside a `BEGIN IMMEDIATE` transaction. Reads are spread round-robin over
//! a pool of read-only connections, which WAL mode lets proceed while a
//! write is in flight.

use super::error::{CatalogError, CatalogResult, FieldErrors};
use super::grouping::group_by_album;
use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use super::validation::{check_name, check_tracks};
use crate::sqlite_persistence::migrate_if_needed;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_MAX_CONFLICT_RETRIES: usize = 3;
/// How long one write attempt waits on another writer's lock before it
/// counts as a conflict.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 250;

const GROUPED_TRACKS_SELECT: &str = "SELECT t.album_id, ar.name, al.release_date, s.title, t.position \
     FROM album_tracks t \
     JOIN albums al ON al.id = t.album_id \
     JOIN artists ar ON ar.id = al.artist_id \
     JOIN songs s ON s.id = t.song_id";

#[derive(Clone)]
pub struct SqliteCatalogStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
    max_conflict_retries: usize,
}

/// A poisoned lock only means another thread panicked mid-call; any open
/// transaction on the connection is rolled back before the next `BEGIN`.
fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SqliteCatalogStore {
    /// Opens (creating and migrating if needed) the catalog database.
    ///
    /// * `read_pool_size` - read-only connections to keep open, at least one
    /// * `max_conflict_retries` - how many times a write unit is re-run when
    ///   SQLite reports the database busy
    pub fn new<P: AsRef<Path>>(
        db_path: P,
        read_pool_size: usize,
        max_conflict_retries: usize,
    ) -> Result<Self> {
        let db_path_ref = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path_ref,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database {:?}", db_path_ref))?;

        migrate_if_needed(&mut write_conn, CATALOG_VERSIONED_SCHEMAS)?;

        write_conn.pragma_update(None, "journal_mode", "WAL")?;
        write_conn.pragma_update(None, "foreign_keys", "ON")?;
        write_conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;

        let count = |table: &str| -> i64 {
            write_conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                    r.get(0)
                })
                .unwrap_or_else(|err| {
                    warn!("Failed to count {}: {}", table, err);
                    0
                })
        };
        info!(
            "Opened catalog {:?}: {} artists, {} albums, {} songs",
            db_path_ref,
            count("artists"),
            count("albums"),
            count("songs")
        );

        let read_pool_size = read_pool_size.max(1);
        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let read_conn = Connection::open_with_flags(
                db_path_ref,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_conn.pragma_update(None, "foreign_keys", "ON")?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        Ok(SqliteCatalogStore {
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
            max_conflict_retries,
        })
    }

    /// Replaces the wait applied to each write attempt when another
    /// connection holds the database lock.
    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
        lock(&self.write_conn)
            .busy_timeout(timeout)
            .context("Failed to set busy timeout")
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn read<T>(&self, f: impl FnOnce(&Connection) -> CatalogResult<T>) -> CatalogResult<T> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn);
        f(&conn)
    }

    /// Runs `f` as one atomic unit, re-running it from scratch when the
    /// database reports a conflicting writer.
    fn write<T>(
        &self,
        operation: &str,
        f: impl Fn(&Connection) -> CatalogResult<T>,
    ) -> CatalogResult<T> {
        let mut retries = 0;
        loop {
            match self.write_once(&f) {
                Err(CatalogError::ConcurrencyConflict(reason)) => {
                    if retries >= self.max_conflict_retries {
                        warn!(
                            "{} gave up after {} retries: {}",
                            operation, retries, reason
                        );
                        return Err(CatalogError::ConstraintViolation {
                            field: None,
                            message: format!(
                                "Could not apply the change because of concurrent updates: {}",
                                reason
                            ),
                        });
                    }
                    retries += 1;
                    debug!(
                        "{} conflicted with another writer ({}), retry {}/{}",
                        operation, reason, retries, self.max_conflict_retries
                    );
                }
                result => return result,
            }
        }
    }

    fn write_once<T>(&self, f: &impl Fn(&Connection) -> CatalogResult<T>) -> CatalogResult<T> {
        let conn = lock(&self.write_conn);
        conn.execute("BEGIN IMMEDIATE", [])?;

        match f(&conn) {
            Ok(value) => {
                if let Err(e) = conn.execute("COMMIT", []) {
                    let _ = conn.execute("ROLLBACK", []);
                    return Err(e.into());
                }
                Ok(value)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    // =========================================================================
    // Row helpers
    // =========================================================================

    fn artist_from_row(row: &Row) -> rusqlite::Result<Artist> {
        Ok(Artist {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn song_from_row(row: &Row) -> rusqlite::Result<Song> {
        Ok(Song {
            id: row.get(0)?,
            title: row.get(1)?,
        })
    }

    fn album_summary_from_row(row: &Row) -> rusqlite::Result<AlbumSummary> {
        Ok(AlbumSummary {
            artist_name: row.get(0)?,
            release_date: row.get(1)?,
        })
    }

    fn track_row_from_row(row: &Row) -> rusqlite::Result<AlbumTrackRow> {
        Ok(AlbumTrackRow {
            album_id: row.get(0)?,
            album: AlbumSummary {
                artist_name: row.get(1)?,
                release_date: row.get(2)?,
            },
            song_title: row.get(3)?,
            position: row.get(4)?,
        })
    }

    fn load_artist(conn: &Connection, id: i64) -> CatalogResult<Option<Artist>> {
        Ok(conn
            .query_row(
                "SELECT id, name FROM artists WHERE id = ?1",
                params![id],
                Self::artist_from_row,
            )
            .optional()?)
    }

    fn load_song(conn: &Connection, id: i64) -> CatalogResult<Option<Song>> {
        Ok(conn
            .query_row(
                "SELECT id, title FROM songs WHERE id = ?1",
                params![id],
                Self::song_from_row,
            )
            .optional()?)
    }

    fn album_exists(conn: &Connection, id: i64) -> CatalogResult<bool> {
        Ok(conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM albums WHERE id = ?1)",
            params![id],
            |r| r.get(0),
        )?)
    }

    /// Unknown artist references are reported against the `artistId` field.
    fn ensure_artist_exists(conn: &Connection, artist_id: i64) -> CatalogResult<()> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?1)",
            params![artist_id],
            |r| r.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(CatalogError::Validation(FieldErrors::single(
                "artistId",
                format!("Invalid pk \"{}\" - object does not exist.", artist_id),
            )))
        }
    }

    fn load_track_specs(conn: &Connection, album_id: i64) -> CatalogResult<Vec<TrackSpec>> {
        let mut stmt = conn.prepare(
            "SELECT s.title, t.position FROM album_tracks t \
             JOIN songs s ON s.id = t.song_id \
             WHERE t.album_id = ?1 ORDER BY t.position",
        )?;
        let tracks = stmt
            .query_map(params![album_id], |row| {
                Ok(TrackSpec {
                    title: row.get(0)?,
                    position: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tracks)
    }

    fn load_album(conn: &Connection, id: i64) -> CatalogResult<Option<Album>> {
        let head = conn
            .query_row(
                "SELECT artist_id, release_date FROM albums WHERE id = ?1",
                params![id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        match head {
            None => Ok(None),
            Some((artist_id, release_date)) => Ok(Some(Album {
                id,
                artist_id,
                release_date,
                tracks: Self::load_track_specs(conn, id)?,
            })),
        }
    }

    /// Returns the id of the song titled exactly `title`, inserting it first
    /// when no such song exists. Concurrent callers converge on one row.
    fn resolve_song(conn: &Connection, title: &str) -> CatalogResult<i64> {
        conn.execute(
            "INSERT INTO songs (title) VALUES (?1) ON CONFLICT(title) DO NOTHING",
            params![title],
        )?;
        conn.query_row(
            "SELECT id FROM songs WHERE title = ?1",
            params![title],
            |r| r.get(0),
        )
        .optional()?
        .ok_or_else(|| {
            CatalogError::ConcurrencyConflict(format!("song '{}' vanished while resolving", title))
        })
    }

    /// Deletes every association of the album, then inserts one per spec.
    /// Any failure is left to the enclosing transaction to roll back.
    fn replace_tracks_in(conn: &Connection, album_id: i64, tracks: &[TrackSpec]) -> CatalogResult<()> {
        let removed = conn.execute(
            "DELETE FROM album_tracks WHERE album_id = ?1",
            params![album_id],
        )?;

        let mut resolved = Vec::with_capacity(tracks.len());
        for spec in tracks {
            let song_id = Self::resolve_song(conn, spec.title.trim())?;
            resolved.push((song_id, spec.position));
        }

        let mut insert = conn.prepare(
            "INSERT INTO album_tracks (album_id, song_id, position) VALUES (?1, ?2, ?3)",
        )?;
        for (song_id, position) in resolved {
            insert.execute(params![album_id, song_id, position])?;
        }

        debug!(
            "Album {}: replaced {} tracks with {}",
            album_id,
            removed,
            tracks.len()
        );
        Ok(())
    }

    fn renumber_album(
        conn: &Connection,
        album_id: i64,
        outcome: &mut RenumberOutcome,
    ) -> CatalogResult<()> {
        if !Self::album_exists(conn, album_id)? {
            return Err(CatalogError::not_found("album", album_id));
        }

        let tracks = {
            let mut stmt = conn.prepare(
                "SELECT id, position FROM album_tracks WHERE album_id = ?1 ORDER BY position, id",
            )?;
            let rows = stmt
                .query_map(params![album_id], |r| {
                    Ok((r.get::<_, i64>(0)?, r.get::<_, u32>(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        // Walking upwards, a target position is always free: it is either the
        // row's own or one vacated by an earlier row.
        let mut update = conn.prepare("UPDATE album_tracks SET position = ?1 WHERE id = ?2")?;
        for (index, (track_id, position)) in tracks.iter().enumerate() {
            let expected = index as u32 + 1;
            if *position != expected {
                update.execute(params![expected, track_id])?;
                outcome.positions_changed += 1;
            }
        }
        outcome.albums_renumbered += 1;
        Ok(())
    }

    fn count_rows(&self, table: &str) -> usize {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn);
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
            r.get::<_, i64>(0)
        })
        .unwrap_or_else(|err| {
            warn!("Failed to count {}: {}", table, err);
            0
        }) as usize
    }
}

impl CatalogStore for SqliteCatalogStore {
    // =========================================================================
    // Artists
    // =========================================================================

    fn list_artists(&self) -> CatalogResult<Vec<Artist>> {
        self.read(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM artists ORDER BY name, id")?;
            let artists = stmt
                .query_map([], Self::artist_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(artists)
        })
    }

    fn get_artist(&self, id: i64) -> CatalogResult<Option<Artist>> {
        self.read(|conn| Self::load_artist(conn, id))
    }

    fn create_artist(&self, name: &str) -> CatalogResult<Artist> {
        check_name("name", name)?;
        let name = name.trim();
        self.write("create_artist", |conn| {
            conn.execute("INSERT INTO artists (name) VALUES (?1)", params![name])?;
            Ok(Artist {
                id: conn.last_insert_rowid(),
                name: name.to_string(),
            })
        })
    }

    fn update_artist(&self, id: i64, name: Option<&str>) -> CatalogResult<Artist> {
        if let Some(name) = name {
            check_name("name", name)?;
        }
        self.write("update_artist", |conn| {
            let mut artist =
                Self::load_artist(conn, id)?.ok_or_else(|| CatalogError::not_found("artist", id))?;
            if let Some(name) = name.map(str::trim) {
                conn.execute(
                    "UPDATE artists SET name = ?1 WHERE id = ?2",
                    params![name, id],
                )?;
                artist.name = name.to_string();
            }
            Ok(artist)
        })
    }

    fn delete_artist(&self, id: i64) -> CatalogResult<()> {
        self.write("delete_artist", |conn| {
            if conn.execute("DELETE FROM artists WHERE id = ?1", params![id])? == 0 {
                return Err(CatalogError::not_found("artist", id));
            }
            info!("Deleted artist {} with its albums", id);
            Ok(())
        })
    }

    // =========================================================================
    // Songs
    // =========================================================================

    fn list_songs(&self) -> CatalogResult<Vec<Song>> {
        self.read(|conn| {
            let mut stmt = conn.prepare("SELECT id, title FROM songs ORDER BY title, id")?;
            let songs = stmt
                .query_map([], Self::song_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(songs)
        })
    }

    fn get_song(&self, id: i64) -> CatalogResult<Option<Song>> {
        self.read(|conn| Self::load_song(conn, id))
    }

    fn create_song(&self, title: &str) -> CatalogResult<Song> {
        check_name("title", title)?;
        let title = title.trim();
        self.write("create_song", |conn| {
            conn.execute("INSERT INTO songs (title) VALUES (?1)", params![title])?;
            Ok(Song {
                id: conn.last_insert_rowid(),
                title: title.to_string(),
            })
        })
    }

    fn update_song(&self, id: i64, title: Option<&str>) -> CatalogResult<Song> {
        if let Some(title) = title {
            check_name("title", title)?;
        }
        self.write("update_song", |conn| {
            let mut song =
                Self::load_song(conn, id)?.ok_or_else(|| CatalogError::not_found("song", id))?;
            if let Some(title) = title.map(str::trim) {
                conn.execute(
                    "UPDATE songs SET title = ?1 WHERE id = ?2",
                    params![title, id],
                )?;
                song.title = title.to_string();
            }
            Ok(song)
        })
    }

    fn delete_song(&self, id: i64) -> CatalogResult<()> {
        self.write("delete_song", |conn| {
            if conn.execute("DELETE FROM songs WHERE id = ?1", params![id])? == 0 {
                return Err(CatalogError::not_found("song", id));
            }
            Ok(())
        })
    }

    // =========================================================================
    // Albums
    // =========================================================================

    fn list_albums(&self) -> CatalogResult<Vec<AlbumSummary>> {
        self.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT ar.name, al.release_date FROM albums al \
                 JOIN artists ar ON ar.id = al.artist_id \
                 ORDER BY al.release_date, ar.name, al.id",
            )?;
            let albums = stmt
                .query_map([], Self::album_summary_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(albums)
        })
    }

    fn get_album_summary(&self, id: i64) -> CatalogResult<Option<AlbumSummary>> {
        self.read(|conn| {
            Ok(conn
                .query_row(
                    "SELECT ar.name, al.release_date FROM albums al \
                     JOIN artists ar ON ar.id = al.artist_id WHERE al.id = ?1",
                    params![id],
                    Self::album_summary_from_row,
                )
                .optional()?)
        })
    }

    fn get_album(&self, id: i64) -> CatalogResult<Option<Album>> {
        self.read(|conn| Self::load_album(conn, id))
    }

    fn create_album(&self, album: &NewAlbum) -> CatalogResult<Album> {
        check_tracks(&album.tracks)?;
        self.write("create_album", |conn| {
            Self::ensure_artist_exists(conn, album.artist_id)?;
            conn.execute(
                "INSERT INTO albums (artist_id, release_date) VALUES (?1, ?2)",
                params![album.artist_id, album.release_date],
            )?;
            let album_id = conn.last_insert_rowid();
            Self::replace_tracks_in(conn, album_id, &album.tracks)?;
            Self::load_album(conn, album_id)?
                .ok_or_else(|| CatalogError::not_found("album", album_id))
        })
    }

    fn update_album(&self, id: i64, patch: &AlbumPatch) -> CatalogResult<Album> {
        if let Some(tracks) = &patch.tracks {
            check_tracks(tracks)?;
        }
        self.write("update_album", |conn| {
            if !Self::album_exists(conn, id)? {
                return Err(CatalogError::not_found("album", id));
            }
            if let Some(artist_id) = patch.artist_id {
                Self::ensure_artist_exists(conn, artist_id)?;
                conn.execute(
                    "UPDATE albums SET artist_id = ?1 WHERE id = ?2",
                    params![artist_id, id],
                )?;
            }
            if let Some(release_date) = patch.release_date {
                conn.execute(
                    "UPDATE albums SET release_date = ?1 WHERE id = ?2",
                    params![release_date, id],
                )?;
            }
            if let Some(tracks) = &patch.tracks {
                Self::replace_tracks_in(conn, id, tracks)?;
            }
            Self::load_album(conn, id)?.ok_or_else(|| CatalogError::not_found("album", id))
        })
    }

    fn delete_album(&self, id: i64) -> CatalogResult<()> {
        self.write("delete_album", |conn| {
            if conn.execute("DELETE FROM albums WHERE id = ?1", params![id])? == 0 {
                return Err(CatalogError::not_found("album", id));
            }
            Ok(())
        })
    }

    // =========================================================================
    // Album tracks
    // =========================================================================

    fn replace_album_tracks(
        &self,
        album_id: i64,
        tracks: &[TrackSpec],
    ) -> CatalogResult<Vec<TrackSpec>> {
        check_tracks(tracks)?;
        self.write("replace_album_tracks", |conn| {
            if !Self::album_exists(conn, album_id)? {
                return Err(CatalogError::not_found("album", album_id));
            }
            Self::replace_tracks_in(conn, album_id, tracks)?;
            Self::load_track_specs(conn, album_id)
        })
    }

    fn get_album_tracks(&self, album_id: i64) -> CatalogResult<Vec<AlbumTrack>> {
        self.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT t.id, t.album_id, t.song_id, s.title, t.position \
                 FROM album_tracks t JOIN songs s ON s.id = t.song_id \
                 WHERE t.album_id = ?1 ORDER BY t.position",
            )?;
            let tracks = stmt
                .query_map(params![album_id], |row| {
                    Ok(AlbumTrack {
                        id: row.get(0)?,
                        album_id: row.get(1)?,
                        song_id: row.get(2)?,
                        song_title: row.get(3)?,
                        position: row.get(4)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tracks)
        })
    }

    fn get_grouped_tracks(&self) -> CatalogResult<Vec<AlbumGroup>> {
        self.read(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{} ORDER BY t.album_id, t.position",
                GROUPED_TRACKS_SELECT
            ))?;
            let rows = stmt
                .query_map([], Self::track_row_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(group_by_album(rows))
        })
    }

    fn get_grouped_track(&self, album_track_id: i64) -> CatalogResult<Option<Vec<AlbumGroup>>> {
        self.read(|conn| {
            let row = conn
                .query_row(
                    &format!("{} WHERE t.id = ?1", GROUPED_TRACKS_SELECT),
                    params![album_track_id],
                    Self::track_row_from_row,
                )
                .optional()?;
            Ok(row.map(|row| group_by_album(std::iter::once(row))))
        })
    }

    fn renumber_album_tracks(&self, album_ids: &[i64]) -> CatalogResult<RenumberOutcome> {
        let mut album_ids = album_ids.to_vec();
        album_ids.sort_unstable();
        album_ids.dedup();

        let outcome = self.write("renumber_album_tracks", |conn| {
            let mut outcome = RenumberOutcome::default();
            for album_id in &album_ids {
                Self::renumber_album(conn, *album_id, &mut outcome)?;
            }
            Ok(outcome)
        })?;
        info!(
            "Renumbered {} albums, {} positions changed",
            outcome.albums_renumbered, outcome.positions_changed
        );
        Ok(outcome)
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    fn get_artist_stats(&self) -> CatalogResult<Vec<ArtistStats>> {
        self.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT ar.id, ar.name, COUNT(DISTINCT al.id), COUNT(t.id) \
                 FROM artists ar \
                 LEFT JOIN albums al ON al.artist_id = ar.id \
                 LEFT JOIN album_tracks t ON t.album_id = al.id \
                 GROUP BY ar.id ORDER BY ar.name, ar.id",
            )?;
            let stats = stmt
                .query_map([], |row| {
                    Ok(ArtistStats {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        albums_count: row.get::<_, i64>(2)? as usize,
                        tracks_count: row.get::<_, i64>(3)? as usize,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(stats)
        })
    }

    fn get_album_stats(&self) -> CatalogResult<Vec<AlbumStats>> {
        self.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT al.id, ar.name, al.release_date, COUNT(t.id) \
                 FROM albums al \
                 JOIN artists ar ON ar.id = al.artist_id \
                 LEFT JOIN album_tracks t ON t.album_id = al.id \
                 GROUP BY al.id ORDER BY al.release_date DESC, ar.name, al.id",
            )?;
            let stats = stmt
                .query_map([], |row| {
                    Ok(AlbumStats {
                        id: row.get(0)?,
                        artist_name: row.get(1)?,
                        release_date: row.get(2)?,
                        tracks_count: row.get::<_, i64>(3)? as usize,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(stats)
        })
    }

    fn get_song_stats(&self) -> CatalogResult<Vec<SongStats>> {
        self.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT s.id, s.title, COUNT(t.id) \
                 FROM songs s LEFT JOIN album_tracks t ON t.song_id = s.id \
                 GROUP BY s.id ORDER BY s.title, s.id",
            )?;
            let stats = stmt
                .query_map([], |row| {
                    Ok(SongStats {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        albums_count: row.get::<_, i64>(2)? as usize,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(stats)
        })
    }

    fn get_artists_count(&self) -> usize {
        self.count_rows("artists")
    }

    fn get_albums_count(&self) -> usize {
        self.count_rows("albums")
    }

    fn get_songs_count(&self) -> usize {
        self.count_rows("songs")
    }
}
