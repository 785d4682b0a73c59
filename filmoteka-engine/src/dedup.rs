//! Duplicate detection: is a candidate "the same movie" as an existing
//! catalog entry?
//!
//! Two records are duplicates when their folded titles are equal (exact
//! equality, not substring matching) and year, format, and cast set all
//! match. Cast comparison is order-insensitive and locale-normalized.

use filmoteka_catalog::normalize;
use filmoteka_catalog::store::{MovieStore, StoreError};
use filmoteka_catalog::types::MovieFormat;

/// True when the catalog already holds a movie matching the candidate on
/// folded title, year, format, and cast set. Cost is one full catalog
/// scan per call.
pub fn is_duplicate<S: MovieStore>(
    store: &S,
    title: &str,
    year: i32,
    format: MovieFormat,
    actor_names: &[String],
) -> Result<bool, StoreError> {
    is_duplicate_excluding(store, title, year, format, actor_names, None)
}

/// Duplicate check that ignores one existing movie, so an update does
/// not conflict with the record it is changing.
pub fn is_duplicate_excluding<S: MovieStore>(
    store: &S,
    title: &str,
    year: i32,
    format: MovieFormat,
    actor_names: &[String],
    excluding: Option<i64>,
) -> Result<bool, StoreError> {
    let folded_title = normalize::fold(title);
    let candidates = store.movies_with_folded_title(&folded_title)?;
    let candidate_cast = cast_key(actor_names.iter().map(String::as_str));

    for movie in &candidates {
        if Some(movie.id) == excluding {
            continue;
        }
        if movie.year != year || movie.format != format {
            continue;
        }
        let existing_cast = cast_key(movie.actors.iter().map(|a| a.name.as_str()));
        if existing_cast == candidate_cast {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Order-insensitive comparison key for a cast list: folded names sorted
/// by the locale collator, blanks dropped. Two casts are the same people
/// exactly when their keys are equal (duplicated entries must match in
/// number too).
fn cast_key<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut folded: Vec<String> = names
        .map(normalize::fold)
        .filter(|name| !name.is_empty())
        .collect();
    folded.sort_by(|a, b| normalize::collate_folded(a, b));
    folded
}
