//! Shared constants for end-to-end tests
//!
//! Ids are the ones SQLite hands out when the fixtures are inserted into a
//! fresh database, in the order `fixtures.rs` inserts them.

// ============================================================================
// Seeded catalog
// ============================================================================

pub const ARTIST_1_ID: i64 = 1;
pub const ARTIST_1_NAME: &str = "Aretha Franklin";

pub const ARTIST_2_ID: i64 = 2;
pub const ARTIST_2_NAME: &str = "Miles Davis";

/// Album by Aretha Franklin with two tracks
pub const ALBUM_1_ID: i64 = 1;
pub const ALBUM_1_RELEASE_DATE: &str = "1967-03-10";
pub const ALBUM_1_TRACKS: &[(&str, u32)] = &[("Respect", 1), ("Drown in My Own Tears", 2)];

/// Album by Miles Davis with three tracks
pub const ALBUM_2_ID: i64 = 2;
pub const ALBUM_2_RELEASE_DATE: &str = "1959-08-17";
pub const ALBUM_2_TRACKS: &[(&str, u32)] =
    &[("So What", 1), ("Freddie Freeloader", 2), ("Blue in Green", 3)];

/// First album track of album 2 ("So What")
pub const ALBUM_2_FIRST_TRACK_ID: i64 = 3;

pub const SEEDED_SONGS_COUNT: usize = 5;

/// Never handed out by the fixtures
pub const MISSING_ID: i64 = 9999;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
