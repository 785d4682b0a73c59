//! Abstract persistence interface consumed by the consistency engine.
//!
//! `filmoteka-db` provides the SQLite implementation. The engine only
//! sees these traits, so the duplicate detector and search evaluator can
//! be exercised against any backend.

use thiserror::Error;

use crate::types::{Actor, Movie, MovieFormat};

/// Error returned by store implementations.
///
/// The engine propagates these uninterpreted; it never retries or
/// rewrites a backend failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Scalar fields for a new movie row. Cast associations are added
/// separately.
#[derive(Debug, Clone)]
pub struct NewMovie<'a> {
    pub title: &'a str,
    pub year: i32,
    pub format: MovieFormat,
}

/// Scalar fields of a movie update. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct MovieChanges<'a> {
    pub title: Option<&'a str>,
    pub year: Option<i32>,
    pub format: Option<MovieFormat>,
}

/// Movie persistence operations required by the engine.
pub trait MovieStore {
    fn create_movie(&self, movie: &NewMovie<'_>) -> Result<Movie, StoreError>;

    /// Apply scalar changes. Returns `None` when no movie has this id.
    fn update_movie(&self, id: i64, changes: &MovieChanges<'_>)
        -> Result<Option<Movie>, StoreError>;

    /// Returns `true` when a row was deleted.
    fn delete_movie(&self, id: i64) -> Result<bool, StoreError>;

    fn movie_by_id(&self, id: i64) -> Result<Option<Movie>, StoreError>;

    /// Every movie in the catalog, cast attached, in id order.
    fn all_movies(&self) -> Result<Vec<Movie>, StoreError>;

    /// Movies whose folded title equals `folded` (see
    /// [`crate::normalize::fold`]). Implementations compare app-side.
    fn movies_with_folded_title(&self, folded: &str) -> Result<Vec<Movie>, StoreError>;

    /// Associate actors with a movie, keeping existing associations.
    fn add_actors(&self, movie_id: i64, actor_ids: &[i64]) -> Result<(), StoreError>;

    /// Replace a movie's associations with exactly this set.
    fn set_actors(&self, movie_id: i64, actor_ids: &[i64]) -> Result<(), StoreError>;
}

/// Actor persistence operations required by the cast resolver.
pub trait ActorStore {
    /// Find an actor whose folded name equals `folded`. When several
    /// spellings fold together, the oldest record wins.
    fn actor_by_folded_name(&self, folded: &str) -> Result<Option<Actor>, StoreError>;

    fn create_actor(&self, name: &str) -> Result<Actor, StoreError>;
}
