//! Sequential import of parsed candidates into the catalog.

use serde::Serialize;

use filmoteka_catalog::store::{ActorStore, MovieStore};
use filmoteka_catalog::types::MovieSummary;
use filmoteka_engine::{create_movie, CreateOutcome};

use crate::parser;
use crate::progress::ImportProgress;

/// Outcome of one import run.
#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    /// Movies created by this run, in input order.
    pub created: Vec<MovieSummary>,
    /// Candidates parsed from the input (complete blocks only).
    pub total_parsed: usize,
    /// How many candidates became new movies.
    pub imported: usize,
    /// Titles that were rejected: duplicates and storage failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}

/// Parse `content` and import every complete candidate, in input order.
///
/// Candidates are processed strictly sequentially, so a later block that
/// duplicates an earlier one in the same file is rejected as a
/// duplicate. Every per-candidate failure (duplicate or storage) is
/// recorded in the report and the run continues. Actors created before
/// a failed movie creation are kept; a retry re-resolves them by name.
pub fn import_from_text<S>(store: &S, content: &str, progress: &dyn ImportProgress) -> ImportReport
where
    S: MovieStore + ActorStore,
{
    let candidates = parser::parse_candidates(content);
    let total = candidates.len();
    progress.on_phase(&format!("Importing {total} movie candidates"));

    let mut report = ImportReport {
        total_parsed: total,
        ..Default::default()
    };

    for (i, candidate) in candidates.iter().enumerate() {
        match create_movie(store, candidate) {
            Ok(CreateOutcome::Created(movie)) => {
                report.imported += 1;
                report.created.push(MovieSummary::from(&movie));
            }
            Ok(CreateOutcome::Duplicate) => {
                report.failed.push(candidate.title.clone());
            }
            Err(err) => {
                log::warn!("import of '{}' failed: {}", candidate.title, err);
                report.failed.push(candidate.title.clone());
            }
        }
        progress.on_candidate(i + 1, total, &candidate.title);
    }

    progress.on_complete(&format!(
        "Imported {} of {} candidates",
        report.imported, report.total_parsed
    ));
    report
}
