//! Data model types for the movie catalog.
//!
//! Movies carry their cast as attached [`Actor`] records. Timestamps are
//! SQLite `datetime('now')` text, assigned by the storage layer; their
//! lexicographic order is chronological.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Movie ───────────────────────────────────────────────────────────────────

/// A catalog entry with its cast attached.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub format: MovieFormat,
    /// Cast in association order; the order carries no meaning.
    pub actors: Vec<Actor>,
    pub created_at: String,
    pub updated_at: String,
}

/// Projection of a movie without its cast, used in search results and
/// import reports.
#[derive(Debug, Clone, Serialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub format: MovieFormat,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            format: movie.format,
            created_at: movie.created_at.clone(),
            updated_at: movie.updated_at.clone(),
        }
    }
}

/// Physical media format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovieFormat {
    #[serde(rename = "VHS")]
    Vhs,
    #[serde(rename = "DVD")]
    Dvd,
    #[serde(rename = "Blu-ray")]
    BluRay,
}

impl MovieFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vhs => "VHS",
            Self::Dvd => "DVD",
            Self::BluRay => "Blu-ray",
        }
    }

    /// Parse a format, tolerating case and separator variations
    /// ("blu-ray", "Blu Ray", "bluray").
    pub fn parse_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "").as_str() {
            "vhs" => Some(Self::Vhs),
            "dvd" => Some(Self::Dvd),
            "bluray" => Some(Self::BluRay),
            _ => None,
        }
    }
}

impl fmt::Display for MovieFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized format string.
#[derive(Debug, Error)]
#[error("unknown format '{0}' (expected VHS, DVD, or Blu-ray)")]
pub struct ParseFormatError(pub String);

impl std::str::FromStr for MovieFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_loose(s).ok_or_else(|| ParseFormatError(s.to_string()))
    }
}

// ── Actor ───────────────────────────────────────────────────────────────────

/// A cast member. Created on first reference and shared across movies;
/// never deleted by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

// ── Candidate / Update ──────────────────────────────────────────────────────

/// Input for creating a movie. Callers validate and clean the fields
/// before handing a candidate to the engine.
#[derive(Debug, Clone)]
pub struct MovieCandidate {
    pub title: String,
    pub year: i32,
    pub format: MovieFormat,
    /// Raw cast names; resolution to actor records happens in the engine.
    pub actors: Vec<String>,
}

/// Partial update for an existing movie. `None` fields are left alone;
/// `actors: Some(..)` replaces the cast wholesale.
#[derive(Debug, Clone, Default)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub format: Option<MovieFormat>,
    pub actors: Option<Vec<String>>,
}
