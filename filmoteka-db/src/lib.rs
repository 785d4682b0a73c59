//! SQLite persistence for the movie catalog.
//!
//! Provides schema creation, CRUD operations, and read queries backed by
//! SQLite (via rusqlite with the bundled feature), plus the
//! [`SqliteCatalog`] store consumed by `filmoteka-engine`.

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store_impl;

pub use operations::{
    add_movie_actors, delete_movie, insert_actor, insert_movie, set_movie_actors,
    update_movie_fields, OperationError,
};
pub use queries::{
    actor_by_id, actors_for_movie, all_actors, all_movies, catalog_stats, movie_by_id,
    CatalogStats,
};
pub use schema::{open_database, open_memory, SchemaError};
pub use store_impl::SqliteCatalog;
