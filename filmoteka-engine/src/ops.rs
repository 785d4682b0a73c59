//! Catalog operations: create, update, delete, fetch.
//!
//! Duplicate and not-found are outcomes, not errors; only storage
//! failures surface as `Err`.

use filmoteka_catalog::store::{ActorStore, MovieChanges, MovieStore, NewMovie, StoreError};
use filmoteka_catalog::types::{Movie, MovieCandidate, MovieUpdate};

use crate::dedup;
use crate::resolver;

/// Result of a create attempt.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(Movie),
    Duplicate,
}

/// Result of an update attempt.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Movie),
    NotFound,
    Duplicate,
}

/// Create a movie unless an equivalent one already exists.
///
/// Cast names are resolved to actor records (created on first reference)
/// and associated with the new movie. The returned record is re-read
/// from the store, so ids and timestamps are authoritative and the cast
/// is attached.
pub fn create_movie<S>(store: &S, candidate: &MovieCandidate) -> Result<CreateOutcome, StoreError>
where
    S: MovieStore + ActorStore,
{
    if dedup::is_duplicate(
        store,
        &candidate.title,
        candidate.year,
        candidate.format,
        &candidate.actors,
    )? {
        log::debug!("rejecting duplicate candidate '{}'", candidate.title);
        return Ok(CreateOutcome::Duplicate);
    }

    let actors = resolver::resolve_actors(store, &candidate.actors)?;
    let created = store.create_movie(&NewMovie {
        title: &candidate.title,
        year: candidate.year,
        format: candidate.format,
    })?;
    let actor_ids: Vec<i64> = actors.iter().map(|a| a.id).collect();
    store.add_actors(created.id, &actor_ids)?;

    // Re-read so the cast list is attached; the row was just written.
    let movie = store.movie_by_id(created.id)?.unwrap_or(created);
    Ok(CreateOutcome::Created(movie))
}

/// Apply a partial update unless the resulting record would collide with
/// another movie.
///
/// The duplicate check runs against the post-update state and skips the
/// movie itself, so saving a record unchanged never conflicts. When
/// `actors` is given the cast is replaced wholesale; otherwise it is
/// left alone.
pub fn update_movie<S>(
    store: &S,
    id: i64,
    update: &MovieUpdate,
) -> Result<UpdateOutcome, StoreError>
where
    S: MovieStore + ActorStore,
{
    let Some(current) = store.movie_by_id(id)? else {
        return Ok(UpdateOutcome::NotFound);
    };

    let title = update.title.as_deref().unwrap_or(&current.title);
    let year = update.year.unwrap_or(current.year);
    let format = update.format.unwrap_or(current.format);
    let cast: Vec<String> = match &update.actors {
        Some(names) => names.clone(),
        None => current.actors.iter().map(|a| a.name.clone()).collect(),
    };

    if dedup::is_duplicate_excluding(store, title, year, format, &cast, Some(id))? {
        log::debug!("rejecting update of movie {id}: would duplicate another entry");
        return Ok(UpdateOutcome::Duplicate);
    }

    let updated = store.update_movie(
        id,
        &MovieChanges {
            title: update.title.as_deref(),
            year: update.year,
            format: update.format,
        },
    )?;
    if updated.is_none() {
        return Ok(UpdateOutcome::NotFound);
    }

    if let Some(names) = &update.actors {
        let resolved = resolver::resolve_actors(store, names)?;
        let ids: Vec<i64> = resolved.iter().map(|a| a.id).collect();
        store.set_actors(id, &ids)?;
    }

    match store.movie_by_id(id)? {
        Some(movie) => Ok(UpdateOutcome::Updated(movie)),
        None => Ok(UpdateOutcome::NotFound),
    }
}

/// Remove a movie. Returns `false` when the id is unknown.
pub fn delete_movie<S: MovieStore>(store: &S, id: i64) -> Result<bool, StoreError> {
    store.delete_movie(id)
}

/// Fetch a movie with its cast.
pub fn movie_by_id<S: MovieStore>(store: &S, id: i64) -> Result<Option<Movie>, StoreError> {
    store.movie_by_id(id)
}
