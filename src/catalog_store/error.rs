//! Error type shared by every catalog store operation.

use rusqlite::ErrorCode;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Per-field validation messages, keyed by the field name as it appears on
/// the wire (e.g. `name`, `tracks[1].position`).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add<F: Into<String>, M: Into<String>>(&mut self, field: F, message: M) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when nothing was reported, the collected errors otherwise.
    pub fn into_result<T>(self, value: T) -> CatalogResult<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(CatalogError::Validation(self))
        }
    }

    /// Ends a parsing pass: the parsed value when nothing was reported. A
    /// missing value counts as invalid input even with no message recorded.
    pub fn finish<T>(self, value: Option<T>) -> CatalogResult<T> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(CatalogError::Validation(self)),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("constraint violation: {message}")]
    ConstraintViolation {
        field: Option<&'static str>,
        message: String,
    },

    #[error("concurrent write conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("storage error: {0}")]
    Storage(rusqlite::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        CatalogError::NotFound { entity, id }
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, message) => match failure.code {
                ErrorCode::ConstraintViolation => {
                    let raw = message.clone().unwrap_or_else(|| failure.to_string());
                    let (field, message) = describe_constraint(&raw);
                    CatalogError::ConstraintViolation { field, message }
                }
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                    CatalogError::ConcurrencyConflict(
                        message.clone().unwrap_or_else(|| failure.to_string()),
                    )
                }
                _ => CatalogError::Storage(err),
            },
            _ => CatalogError::Storage(err),
        }
    }
}

/// Turns SQLite's constraint message into something a client can act on.
fn describe_constraint(raw: &str) -> (Option<&'static str>, String) {
    if raw.contains("album_tracks.album_id, album_tracks.position") {
        (
            Some("tracks"),
            "Track positions must be unique within an album.".to_string(),
        )
    } else if raw.contains("album_tracks.album_id, album_tracks.song_id") {
        (
            Some("tracks"),
            "A song can appear only once in an album.".to_string(),
        )
    } else if raw.contains("songs.title") {
        (
            Some("title"),
            "A song with this title already exists.".to_string(),
        )
    } else if raw.contains("FOREIGN KEY") {
        (None, "Referenced object does not exist.".to_string())
    } else {
        (None, raw.to_string())
    }
}
