//! Field validation for catalog writes.
//!
//! Checks are accumulated into a [`FieldErrors`] so a single request reports
//! every offending field at once. The `require_*`/`optional_*` helpers parse
//! loosely-typed request input, the `validate_*` ones re-check values that
//! are already typed and are also run by the store before writing.

use super::error::{CatalogResult, FieldErrors};
use super::models::TrackSpec;
use chrono::NaiveDate;
use serde::Deserialize;

pub const MAX_NAME_LENGTH: usize = 100;

pub const REQUIRED: &str = "This field is required.";
pub const MAY_NOT_BE_NULL: &str = "This field may not be null.";
pub const MAY_NOT_BE_BLANK: &str = "This field may not be blank.";
pub const BAD_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
pub const POSITION_TOO_SMALL: &str = "Ensure this value is greater than or equal to 1.";

fn too_long() -> String {
    format!(
        "Ensure this field has no more than {} characters.",
        MAX_NAME_LENGTH
    )
}

/// A track entry as it arrives over the wire, before any check.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrackSpecInput {
    pub title: Option<String>,
    pub position: Option<i64>,
}

/// Checks an already-trimmed name or title.
pub fn validate_name(errors: &mut FieldErrors, field: &str, value: &str) -> bool {
    if value.is_empty() {
        errors.add(field, MAY_NOT_BE_BLANK);
        false
    } else if value.chars().count() > MAX_NAME_LENGTH {
        errors.add(field, too_long());
        false
    } else {
        true
    }
}

pub fn validate_tracks(errors: &mut FieldErrors, tracks: &[TrackSpec]) {
    for (index, track) in tracks.iter().enumerate() {
        validate_name(errors, &format!("tracks[{}].title", index), track.title.trim());
        if track.position < 1 {
            errors.add(format!("tracks[{}].position", index), POSITION_TOO_SMALL);
        }
    }
}

/// Store-side entry point: the same checks as the request layer, as a
/// `Result`.
pub fn check_name(field: &str, value: &str) -> CatalogResult<()> {
    let mut errors = FieldErrors::new();
    validate_name(&mut errors, field, value.trim());
    errors.into_result(())
}

pub fn check_tracks(tracks: &[TrackSpec]) -> CatalogResult<()> {
    let mut errors = FieldErrors::new();
    validate_tracks(&mut errors, tracks);
    errors.into_result(())
}

/// Trims and checks a mandatory text field.
pub fn require_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(value) => optional_text(errors, field, Some(value)),
    }
}

/// Trims and checks a text field that may be left out of a partial update.
pub fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if validate_name(errors, field, trimmed) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

pub fn require_date(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
) -> Option<NaiveDate> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(value) => optional_date(errors, field, Some(value)),
    }
}

pub fn optional_date(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
) -> Option<NaiveDate> {
    let value = value?;
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, BAD_DATE);
            None
        }
    }
}

pub fn require_id(errors: &mut FieldErrors, field: &str, value: Option<i64>) -> Option<i64> {
    if value.is_none() {
        errors.add(field, REQUIRED);
    }
    value
}

/// Converts raw track entries, reporting problems as `tracks[i].title` and
/// `tracks[i].position`. Titles come back trimmed.
pub fn parse_tracks(errors: &mut FieldErrors, inputs: Vec<TrackSpecInput>) -> Vec<TrackSpec> {
    let mut tracks = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.into_iter().enumerate() {
        let title = require_text(errors, &format!("tracks[{}].title", index), input.title);

        let position_field = format!("tracks[{}].position", index);
        let position = match input.position {
            None => {
                errors.add(position_field, REQUIRED);
                None
            }
            Some(position) if position < 1 => {
                errors.add(position_field, POSITION_TOO_SMALL);
                None
            }
            Some(position) => match u32::try_from(position) {
                Ok(position) => Some(position),
                Err(_) => {
                    errors.add(
                        position_field,
                        format!("Ensure this value is less than or equal to {}.", u32::MAX),
                    );
                    None
                }
            },
        };

        if let (Some(title), Some(position)) = (title, position) {
            tracks.push(TrackSpec { title, position });
        }
    }
    tracks
}
