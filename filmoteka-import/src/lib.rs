//! Bulk text import for the movie catalog.
//!
//! Parses blank-line-separated `Key: value` blocks into movie candidates
//! and feeds them through the consistency engine one at a time,
//! collecting per-record outcomes into an [`ImportReport`].

pub mod parser;
pub mod pipeline;
pub mod progress;

pub use parser::parse_candidates;
pub use pipeline::{import_from_text, ImportReport};
pub use progress::{ImportProgress, SilentProgress};
