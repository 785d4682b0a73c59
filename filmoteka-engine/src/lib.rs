//! Catalog consistency and query engine.
//!
//! Decides whether two records are "the same movie", resolves cast names
//! to shared actor records, and answers filtered/sorted/paginated
//! queries. All text comparison goes through
//! `filmoteka_catalog::normalize`, so Latin and Ukrainian-Cyrillic input
//! behave identically regardless of storage collation. The engine
//! consumes the store traits only; it performs no I/O of its own.

pub mod dedup;
pub mod ops;
pub mod resolver;
pub mod search;

pub use dedup::{is_duplicate, is_duplicate_excluding};
pub use ops::{create_movie, delete_movie, movie_by_id, update_movie, CreateOutcome, UpdateOutcome};
pub use resolver::resolve_actors;
pub use search::{search, SearchCriteria, SearchOutcome, SortField, SortOrder, DEFAULT_LIMIT};
