//! Read queries for movies, actors, and catalog statistics.

use filmoteka_catalog::types::{Actor, Movie, MovieFormat};
use rusqlite::{params, Connection};

use crate::operations::OperationError;

// ── Movie Lookups ───────────────────────────────────────────────────────────

/// Fetch one movie with its cast attached.
pub fn movie_by_id(conn: &Connection, id: i64) -> Result<Option<Movie>, OperationError> {
    let result = conn.query_row(
        "SELECT id, title, year, format, created_at, updated_at
         FROM movies WHERE id = ?1",
        params![id],
        row_to_movie,
    );
    let mut movie = match result {
        Ok(m) => m,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    movie.actors = actors_for_movie(conn, movie.id)?;
    Ok(Some(movie))
}

/// List every movie with its cast attached, in id order.
pub fn all_movies(conn: &Connection) -> Result<Vec<Movie>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, year, format, created_at, updated_at
         FROM movies ORDER BY id",
    )?;
    let rows = stmt.query_map([], row_to_movie)?;
    let mut movies = rows.collect::<Result<Vec<_>, _>>()?;
    for movie in &mut movies {
        movie.actors = actors_for_movie(conn, movie.id)?;
    }
    Ok(movies)
}

// ── Actor Lookups ───────────────────────────────────────────────────────────

/// Cast of one movie, in actor-id order.
pub fn actors_for_movie(conn: &Connection, movie_id: i64) -> Result<Vec<Actor>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, a.created_at, a.updated_at
         FROM actors a
         JOIN movie_actors ma ON ma.actor_id = a.id
         WHERE ma.movie_id = ?1
         ORDER BY a.id",
    )?;
    let rows = stmt.query_map(params![movie_id], row_to_actor)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Fetch one actor.
pub fn actor_by_id(conn: &Connection, id: i64) -> Result<Option<Actor>, OperationError> {
    let result = conn.query_row(
        "SELECT id, name, created_at, updated_at FROM actors WHERE id = ?1",
        params![id],
        row_to_actor,
    );
    match result {
        Ok(actor) => Ok(Some(actor)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List every actor, oldest first.
pub fn all_actors(conn: &Connection) -> Result<Vec<Actor>, OperationError> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_at, updated_at FROM actors ORDER BY id")?;
    let rows = stmt.query_map([], row_to_actor)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Aggregate row counts for the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogStats {
    pub movies: i64,
    pub actors: i64,
    pub associations: i64,
}

pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let movies = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
    let actors = conn.query_row("SELECT COUNT(*) FROM actors", [], |row| row.get(0))?;
    let associations =
        conn.query_row("SELECT COUNT(*) FROM movie_actors", [], |row| row.get(0))?;
    Ok(CatalogStats {
        movies,
        actors,
        associations,
    })
}

// ── Row Mappers ─────────────────────────────────────────────────────────────

fn row_to_movie(row: &rusqlite::Row<'_>) -> rusqlite::Result<Movie> {
    let format_str: String = row.get(3)?;
    let format = MovieFormat::parse_loose(&format_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown movie format '{format_str}'").into(),
        )
    })?;
    Ok(Movie {
        id: row.get(0)?,
        title: row.get(1)?,
        year: row.get(2)?,
        format,
        actors: Vec::new(),
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn row_to_actor(row: &rusqlite::Row<'_>) -> rusqlite::Result<Actor> {
    Ok(Actor {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}
