//! Store trait implementations backed by SQLite.
//!
//! Folded-title and folded-name lookups scan the table and compare in
//! application code: SQLite's collations don't understand Ukrainian
//! case folding, so the database is never asked to.

use filmoteka_catalog::normalize;
use filmoteka_catalog::store::{ActorStore, MovieChanges, MovieStore, NewMovie, StoreError};
use filmoteka_catalog::types::{Actor, Movie};
use rusqlite::Connection;

use crate::operations::{self, OperationError};
use crate::queries;

/// SQLite-backed catalog store.
///
/// Wraps an open connection; construct one via [`crate::open_database`]
/// or [`crate::open_memory`].
pub struct SqliteCatalog {
    conn: Connection,
}

impl SqliteCatalog {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Access the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl From<OperationError> for StoreError {
    fn from(err: OperationError) -> Self {
        StoreError::backend(err)
    }
}

/// Re-read a row that this store just wrote.
fn require_movie(conn: &Connection, id: i64) -> Result<Movie, StoreError> {
    match queries::movie_by_id(conn, id)? {
        Some(movie) => Ok(movie),
        None => Err(StoreError::backend(OperationError::Sqlite(
            rusqlite::Error::QueryReturnedNoRows,
        ))),
    }
}

impl MovieStore for SqliteCatalog {
    fn create_movie(&self, movie: &NewMovie<'_>) -> Result<Movie, StoreError> {
        let id = operations::insert_movie(&self.conn, movie.title, movie.year, movie.format)?;
        require_movie(&self.conn, id)
    }

    fn update_movie(
        &self,
        id: i64,
        changes: &MovieChanges<'_>,
    ) -> Result<Option<Movie>, StoreError> {
        let found = operations::update_movie_fields(
            &self.conn,
            id,
            changes.title,
            changes.year,
            changes.format,
        )?;
        if !found {
            return Ok(None);
        }
        require_movie(&self.conn, id).map(Some)
    }

    fn delete_movie(&self, id: i64) -> Result<bool, StoreError> {
        Ok(operations::delete_movie(&self.conn, id)?)
    }

    fn movie_by_id(&self, id: i64) -> Result<Option<Movie>, StoreError> {
        Ok(queries::movie_by_id(&self.conn, id)?)
    }

    fn all_movies(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(queries::all_movies(&self.conn)?)
    }

    fn movies_with_folded_title(&self, folded: &str) -> Result<Vec<Movie>, StoreError> {
        let movies = queries::all_movies(&self.conn)?;
        Ok(movies
            .into_iter()
            .filter(|m| normalize::fold(&m.title) == folded)
            .collect())
    }

    fn add_actors(&self, movie_id: i64, actor_ids: &[i64]) -> Result<(), StoreError> {
        Ok(operations::add_movie_actors(&self.conn, movie_id, actor_ids)?)
    }

    fn set_actors(&self, movie_id: i64, actor_ids: &[i64]) -> Result<(), StoreError> {
        Ok(operations::set_movie_actors(&self.conn, movie_id, actor_ids)?)
    }
}

impl ActorStore for SqliteCatalog {
    fn actor_by_folded_name(&self, folded: &str) -> Result<Option<Actor>, StoreError> {
        let actors = queries::all_actors(&self.conn)?;
        Ok(actors
            .into_iter()
            .find(|a| normalize::fold(&a.name) == folded))
    }

    fn create_actor(&self, name: &str) -> Result<Actor, StoreError> {
        let id = operations::insert_actor(&self.conn, name)?;
        match queries::actor_by_id(&self.conn, id)? {
            Some(actor) => Ok(actor),
            None => Err(StoreError::backend(OperationError::Sqlite(
                rusqlite::Error::QueryReturnedNoRows,
            ))),
        }
    }
}
