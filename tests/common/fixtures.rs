//! Seed data for end-to-end tests

use super::constants::*;
use anyhow::Result;
use chrono::NaiveDate;
use music_catalog_server::catalog_store::{CatalogStore, NewAlbum, TrackSpec};

fn tracks(specs: &[(&str, u32)]) -> Vec<TrackSpec> {
    specs
        .iter()
        .map(|(title, position)| TrackSpec::new(*title, *position))
        .collect()
}

fn date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

/// Inserts two artists with one album each into an empty store.
pub fn seed_catalog(store: &dyn CatalogStore) -> Result<()> {
    let first = store.create_artist(ARTIST_1_NAME)?;
    let second = store.create_artist(ARTIST_2_NAME)?;
    assert_eq!((first.id, second.id), (ARTIST_1_ID, ARTIST_2_ID));

    let album_1 = store.create_album(&NewAlbum {
        artist_id: first.id,
        release_date: date(ALBUM_1_RELEASE_DATE)?,
        tracks: tracks(ALBUM_1_TRACKS),
    })?;
    let album_2 = store.create_album(&NewAlbum {
        artist_id: second.id,
        release_date: date(ALBUM_2_RELEASE_DATE)?,
        tracks: tracks(ALBUM_2_TRACKS),
    })?;
    assert_eq!((album_1.id, album_2.id), (ALBUM_1_ID, ALBUM_2_ID));
    Ok(())
}
