use super::models::{AlbumGroup, AlbumTrackRow, TrackSpec};

/// Folds track rows into one group per album in a single pass.
///
/// Rows must arrive ordered by album and then by position: a new group is
/// started whenever the album id differs from the previous row's, so rows of
/// the same album that are not contiguous end up in separate groups.
pub fn group_by_album<I>(rows: I) -> Vec<AlbumGroup>
where
    I: IntoIterator<Item = AlbumTrackRow>,
{
    let mut groups = Vec::new();
    let mut current: Option<(i64, AlbumGroup)> = None;

    for row in rows {
        let starts_group = current
            .as_ref()
            .map_or(true, |(album_id, _)| *album_id != row.album_id);
        if starts_group {
            if let Some((_, finished)) = current.take() {
                groups.push(finished);
            }
            current = Some((
                row.album_id,
                AlbumGroup {
                    album: row.album,
                    tracks: Vec::new(),
                },
            ));
        }
        if let Some((_, group)) = current.as_mut() {
            group.tracks.push(TrackSpec {
                title: row.song_title,
                position: row.position,
            });
        }
    }

    if let Some((_, last)) = current {
        groups.push(last);
    }
    groups
}
