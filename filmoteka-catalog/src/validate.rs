//! Candidate validation, applied at the input boundary.
//!
//! The engine assumes candidates have already passed these checks; it
//! never validates on its own. The CLI runs them before every create or
//! edit.

use chrono::{Datelike, Utc};
use thiserror::Error;

use crate::normalize;
use crate::types::MovieCandidate;

/// Year of the first motion picture; nothing in the catalog predates it.
pub const MIN_YEAR: i32 = 1878;

/// Years past the current one a release may be announced for.
const YEAR_HEADROOM: i32 = 9;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("year {year} is out of range ({min}..={max})")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("cast name must not be empty")]
    EmptyActorName,
    #[error("cast name '{0}' contains unsupported characters")]
    InvalidActorName(String),
}

/// Latest acceptable release year: current year plus headroom for
/// announced titles.
pub fn max_year() -> i32 {
    Utc::now().year() + YEAR_HEADROOM
}

/// Clean a title and reject it when nothing is left.
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let cleaned = normalize::clean(title);
    if cleaned.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(cleaned)
}

pub fn validate_year(year: i32) -> Result<i32, ValidationError> {
    let max = max_year();
    if year < MIN_YEAR || year > max {
        return Err(ValidationError::YearOutOfRange {
            year,
            min: MIN_YEAR,
            max,
        });
    }
    Ok(year)
}

/// Clean a cast name and check it against the allowed charset: Latin and
/// Ukrainian-Cyrillic letters, digits, space, hyphen, comma, period.
pub fn validate_actor_name(name: &str) -> Result<String, ValidationError> {
    let cleaned = normalize::clean(name);
    if cleaned.is_empty() {
        return Err(ValidationError::EmptyActorName);
    }
    if !cleaned.chars().all(allowed_name_char) {
        return Err(ValidationError::InvalidActorName(cleaned));
    }
    Ok(cleaned)
}

/// Validate a whole candidate, returning a copy with cleaned fields.
pub fn validate_candidate(candidate: &MovieCandidate) -> Result<MovieCandidate, ValidationError> {
    let title = validate_title(&candidate.title)?;
    let year = validate_year(candidate.year)?;
    let actors = candidate
        .actors
        .iter()
        .map(|name| validate_actor_name(name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MovieCandidate {
        title,
        year,
        format: candidate.format,
        actors,
    })
}

fn allowed_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(ch, ' ' | '-' | ',' | '.')
        || matches!(ch, 'А'..='я')
        || matches!(ch, 'і' | 'І' | 'ї' | 'Ї' | 'є' | 'Є' | 'ґ' | 'Ґ')
}
