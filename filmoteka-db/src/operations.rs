//! Write operations for movies, actors, and cast associations.

use filmoteka_catalog::types::MovieFormat;
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

// ── Movie Operations ────────────────────────────────────────────────────────

/// Insert a movie row. Returns the new id.
pub fn insert_movie(
    conn: &Connection,
    title: &str,
    year: i32,
    format: MovieFormat,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO movies (title, year, format) VALUES (?1, ?2, ?3)",
        params![title, year, format.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update the given scalar fields of a movie and bump `updated_at`.
/// Returns `false` when no row has this id.
pub fn update_movie_fields(
    conn: &Connection,
    id: i64,
    title: Option<&str>,
    year: Option<i32>,
    format: Option<MovieFormat>,
) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "UPDATE movies SET
             title = COALESCE(?2, title),
             year = COALESCE(?3, year),
             format = COALESCE(?4, format),
             updated_at = datetime('now')
         WHERE id = ?1",
        params![id, title, year, format.map(|f| f.as_str())],
    )?;
    Ok(changed > 0)
}

/// Delete a movie; its cast associations cascade. Returns `true` when a
/// row was deleted.
pub fn delete_movie(conn: &Connection, id: i64) -> Result<bool, OperationError> {
    let changed = conn.execute("DELETE FROM movies WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

// ── Actor Operations ────────────────────────────────────────────────────────

/// Insert an actor. Returns the new id.
pub fn insert_actor(conn: &Connection, name: &str) -> Result<i64, OperationError> {
    conn.execute("INSERT INTO actors (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

// ── Association Operations ──────────────────────────────────────────────────

/// Associate actors with a movie, keeping any existing associations.
pub fn add_movie_actors(
    conn: &Connection,
    movie_id: i64,
    actor_ids: &[i64],
) -> Result<(), OperationError> {
    for actor_id in actor_ids {
        conn.execute(
            "INSERT OR IGNORE INTO movie_actors (movie_id, actor_id) VALUES (?1, ?2)",
            params![movie_id, actor_id],
        )?;
    }
    Ok(())
}

/// Replace a movie's cast with exactly the given actors.
pub fn set_movie_actors(
    conn: &Connection,
    movie_id: i64,
    actor_ids: &[i64],
) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM movie_actors WHERE movie_id = ?1",
        params![movie_id],
    )?;
    add_movie_actors(conn, movie_id, actor_ids)
}
