//! In-memory catalog search: filter, locale-aware sort, paginate.
//!
//! The whole candidate set is loaded and evaluated in application code;
//! matching and ordering go through the normalizer, never storage
//! collation.

use std::cmp::Ordering;

use serde::Serialize;

use filmoteka_catalog::normalize;
use filmoteka_catalog::store::{MovieStore, StoreError};
use filmoteka_catalog::types::{Movie, MovieSummary};

/// Page size used when the criteria give none.
pub const DEFAULT_LIMIT: i64 = 20;

/// Field to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Title,
    Year,
    Format,
    CreatedAt,
    UpdatedAt,
    /// Unrecognized field name; sorting becomes a stable no-op.
    Unknown,
}

impl SortField {
    /// Parse a user-supplied field name. Accepts snake_case and
    /// camelCase spellings; anything else becomes [`SortField::Unknown`].
    pub fn parse_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "id" => Self::Id,
            "title" => Self::Title,
            "year" => Self::Year,
            "format" => Self::Format,
            "createdat" | "created_at" | "created" => Self::CreatedAt,
            "updatedat" | "updated_at" | "updated" => Self::UpdatedAt,
            _ => Self::Unknown,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a direction; anything that isn't descending is ascending.
    pub fn parse_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "desc" | "descending" => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Search parameters. `Default` gives the unfiltered first page in id
/// order.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    /// Substring filter on the title (folded matching).
    pub title: Option<String>,
    /// Substring filter on any cast member's name.
    pub actor: Option<String>,
    /// Combined filter: matches title OR cast. When set, `title` and
    /// `actor` are ignored.
    pub search: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
    /// Page size; `None` or negative falls back to [`DEFAULT_LIMIT`].
    pub limit: Option<i64>,
    /// Rows to skip; `None` or negative falls back to 0.
    pub offset: Option<i64>,
}

/// Search results plus the match count before pagination.
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<MovieSummary>,
    pub total_matched: usize,
}

/// Evaluate `criteria` over the full catalog.
///
/// Filters are folded-substring containment. Without `search`, `title`
/// and `actor` combine with AND. Sorting is stable, so ties and the
/// unknown-field no-op preserve id order; pagination is applied last.
pub fn search<S: MovieStore>(
    store: &S,
    criteria: &SearchCriteria,
) -> Result<SearchOutcome, StoreError> {
    let movies = store.all_movies()?;

    let combined = criteria.search.as_deref().map(normalize::fold);
    let by_title = criteria.title.as_deref().map(normalize::fold);
    let by_actor = criteria.actor.as_deref().map(normalize::fold);

    let mut matched: Vec<&Movie> = movies
        .iter()
        .filter(|movie| {
            matches(
                movie,
                combined.as_deref(),
                by_title.as_deref(),
                by_actor.as_deref(),
            )
        })
        .collect();

    matched.sort_by(|a, b| compare_movies(a, b, criteria.sort, criteria.order));

    let total_matched = matched.len();
    let offset = clamp_or(criteria.offset, 0);
    let limit = clamp_or(criteria.limit, DEFAULT_LIMIT);

    let results = matched
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .map(MovieSummary::from)
        .collect();

    Ok(SearchOutcome {
        results,
        total_matched,
    })
}

/// Does one movie satisfy the (pre-folded) filters?
fn matches(
    movie: &Movie,
    combined: Option<&str>,
    by_title: Option<&str>,
    by_actor: Option<&str>,
) -> bool {
    let title = normalize::fold(&movie.title);
    let cast_contains =
        |needle: &str| movie.actors.iter().any(|a| normalize::fold(&a.name).contains(needle));

    if let Some(needle) = combined {
        return title.contains(needle) || cast_contains(needle);
    }
    if let Some(needle) = by_title {
        if !title.contains(needle) {
            return false;
        }
    }
    if let Some(needle) = by_actor {
        if !cast_contains(needle) {
            return false;
        }
    }
    true
}

fn compare_movies(a: &Movie, b: &Movie, field: SortField, order: SortOrder) -> Ordering {
    let ord = match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => normalize::collate(&a.title, &b.title),
        SortField::Year => a.year.cmp(&b.year),
        SortField::Format => normalize::collate(a.format.as_str(), b.format.as_str()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Unknown => Ordering::Equal,
    };
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Clamp an optional index to `default` when absent or negative.
fn clamp_or(value: Option<i64>, default: i64) -> i64 {
    match value {
        Some(v) if v >= 0 => v,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmoteka_catalog::types::MovieFormat;

    fn movie(id: i64, title: &str, year: i32) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            year,
            format: MovieFormat::Dvd,
            actors: Vec::new(),
            created_at: format!("2024-01-0{id} 00:00:00"),
            updated_at: format!("2024-01-0{id} 00:00:00"),
        }
    }

    #[test]
    fn sort_field_parses_both_spellings() {
        assert_eq!(SortField::parse_loose("createdAt"), SortField::CreatedAt);
        assert_eq!(SortField::parse_loose("created_at"), SortField::CreatedAt);
        assert_eq!(SortField::parse_loose("YEAR"), SortField::Year);
        assert_eq!(SortField::parse_loose("director"), SortField::Unknown);
    }

    #[test]
    fn sort_order_defaults_to_ascending() {
        assert_eq!(SortOrder::parse_loose("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse_loose("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse_loose("sideways"), SortOrder::Asc);
    }

    #[test]
    fn unknown_field_compares_everything_equal() {
        let a = movie(1, "Б", 2000);
        let b = movie(2, "А", 1990);
        assert_eq!(
            compare_movies(&a, &b, SortField::Unknown, SortOrder::Asc),
            Ordering::Equal
        );
        assert_eq!(
            compare_movies(&a, &b, SortField::Unknown, SortOrder::Desc),
            Ordering::Equal
        );
    }

    #[test]
    fn title_comparison_uses_the_collator() {
        let yenot = movie(1, "Єнот", 2000);
        let zhuk = movie(2, "Жук", 2000);
        assert_eq!(
            compare_movies(&yenot, &zhuk, SortField::Title, SortOrder::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_movies(&yenot, &zhuk, SortField::Title, SortOrder::Desc),
            Ordering::Greater
        );
    }

    #[test]
    fn negative_paging_falls_back_to_defaults() {
        assert_eq!(clamp_or(Some(-5), DEFAULT_LIMIT), DEFAULT_LIMIT);
        assert_eq!(clamp_or(Some(-1), 0), 0);
        assert_eq!(clamp_or(None, DEFAULT_LIMIT), DEFAULT_LIMIT);
        assert_eq!(clamp_or(Some(7), DEFAULT_LIMIT), 7);
        assert_eq!(clamp_or(Some(0), DEFAULT_LIMIT), 0);
    }
}
