//! SQLite schema for the music catalog database.
//!
//! Albums hang off artists, and `album_tracks` joins albums to songs. Both
//! relations cascade on delete so removing an artist takes its albums and
//! their track associations with it.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_artists_name", "name")],
    unique_constraints: &[],
};

const ALBUMS_TABLE: Table = Table {
    name: "albums",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "artists",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("release_date", &SqlType::Text, non_null = true), // YYYY-MM-DD
    ],
    indices: &[
        ("idx_albums_artist", "artist_id"),
        ("idx_albums_release_date", "release_date"),
    ],
    unique_constraints: &[],
};

/// Songs are shared across albums and looked up by exact title.
const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true, is_unique = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const ALBUM_TRACKS_TABLE: Table = Table {
    name: "album_tracks",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "album_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "albums",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "song_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "songs",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_album_tracks_song", "song_id")],
    unique_constraints: &[&["album_id", "position"], &["album_id", "song_id"]],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[ARTISTS_TABLE, ALBUMS_TABLE, SONGS_TABLE, ALBUM_TRACKS_TABLE],
    migration: None,
}];

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    fn create_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        let schema = &CATALOG_VERSIONED_SCHEMAS[0];
        schema.create(&conn).unwrap();
        schema.validate(&conn).unwrap();
        conn
    }

    fn insert_album_with_song(conn: &Connection) -> (i64, i64) {
        conn.execute("INSERT INTO artists (name) VALUES ('Nina Simone')", [])
            .unwrap();
        let artist_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO albums (artist_id, release_date) VALUES (?1, '1965-06-01')",
            params![artist_id],
        )
        .unwrap();
        let album_id = conn.last_insert_rowid();
        conn.execute("INSERT INTO songs (title) VALUES ('Feeling Good')", [])
            .unwrap();
        let song_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO album_tracks (album_id, song_id, position) VALUES (?1, ?2, 1)",
            params![album_id, song_id],
        )
        .unwrap();
        (album_id, song_id)
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
            r.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_schema_creates_successfully() {
        create_schema();
    }

    #[test]
    fn test_song_titles_are_unique() {
        let conn = create_schema();
        conn.execute("INSERT INTO songs (title) VALUES ('Sinnerman')", [])
            .unwrap();
        assert!(conn
            .execute("INSERT INTO songs (title) VALUES ('Sinnerman')", [])
            .is_err());
        // Titles compare case-sensitively.
        conn.execute("INSERT INTO songs (title) VALUES ('sinnerman')", [])
            .unwrap();
    }

    #[test]
    fn test_position_and_song_unique_per_album() {
        let conn = create_schema();
        let (album_id, song_id) = insert_album_with_song(&conn);
        conn.execute("INSERT INTO songs (title) VALUES ('Strange Fruit')", [])
            .unwrap();
        let other_song = conn.last_insert_rowid();

        let same_position = conn.execute(
            "INSERT INTO album_tracks (album_id, song_id, position) VALUES (?1, ?2, 1)",
            params![album_id, other_song],
        );
        assert!(same_position.is_err());

        let same_song = conn.execute(
            "INSERT INTO album_tracks (album_id, song_id, position) VALUES (?1, ?2, 2)",
            params![album_id, song_id],
        );
        assert!(same_song.is_err());
    }

    #[test]
    fn test_deleting_artist_cascades() {
        let conn = create_schema();
        insert_album_with_song(&conn);

        conn.execute("DELETE FROM artists", []).unwrap();
        assert_eq!(count(&conn, "albums"), 0);
        assert_eq!(count(&conn, "album_tracks"), 0);
        assert_eq!(count(&conn, "songs"), 1);
    }

    #[test]
    fn test_deleting_song_cascades() {
        let conn = create_schema();
        insert_album_with_song(&conn);

        conn.execute("DELETE FROM songs", []).unwrap();
        assert_eq!(count(&conn, "album_tracks"), 0);
        assert_eq!(count(&conn, "albums"), 1);
    }
}
