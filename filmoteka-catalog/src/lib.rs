//! Movie catalog data model, Ukrainian-aware text normalization, and the
//! storage interface consumed by the consistency engine.
//!
//! This crate defines the domain types without any database dependency.
//! Consumers can use these types directly for validation, display, or
//! passing to `filmoteka-db` for persistence.

pub mod normalize;
pub mod store;
pub mod types;
pub mod validate;

pub use store::{ActorStore, MovieChanges, MovieStore, NewMovie, StoreError};
pub use types::*;
pub use validate::{validate_candidate, ValidationError, MIN_YEAR};
