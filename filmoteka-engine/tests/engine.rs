use filmoteka_catalog::types::{MovieCandidate, MovieFormat, MovieUpdate};
use filmoteka_db::{open_memory, SqliteCatalog};
use filmoteka_engine::{
    create_movie, delete_movie, is_duplicate, movie_by_id, search, update_movie, CreateOutcome,
    SearchCriteria, SortField, SortOrder, UpdateOutcome,
};

fn memory_store() -> SqliteCatalog {
    SqliteCatalog::new(open_memory().unwrap())
}

fn candidate(title: &str, year: i32, format: MovieFormat, actors: &[&str]) -> MovieCandidate {
    MovieCandidate {
        title: title.to_string(),
        year,
        format,
        actors: actors.iter().map(|s| s.to_string()).collect(),
    }
}

fn must_create(store: &SqliteCatalog, c: &MovieCandidate) -> i64 {
    match create_movie(store, c).unwrap() {
        CreateOutcome::Created(movie) => movie.id,
        CreateOutcome::Duplicate => panic!("unexpected duplicate for '{}'", c.title),
    }
}

// ── Duplicate detection ─────────────────────────────────────────────────────

#[test]
fn exact_duplicate_is_rejected() {
    let store = memory_store();
    let heat = candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino", "Robert De Niro"]);
    must_create(&store, &heat);

    assert!(matches!(
        create_movie(&store, &heat).unwrap(),
        CreateOutcome::Duplicate
    ));
}

#[test]
fn duplicate_detection_ignores_case_in_title_and_cast() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino"]),
    );

    let shouted = candidate("HEAT", 1995, MovieFormat::BluRay, &["al pacino"]);
    assert!(matches!(
        create_movie(&store, &shouted).unwrap(),
        CreateOutcome::Duplicate
    ));
}

#[test]
fn duplicate_detection_is_symmetric_in_actor_order() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("Sleepless in Seattle", 1993, MovieFormat::Vhs, &["Tom Hanks", "Meg Ryan"]),
    );

    let reordered = candidate(
        "Sleepless in Seattle",
        1993,
        MovieFormat::Vhs,
        &["Meg Ryan", "Tom Hanks"],
    );
    assert!(matches!(
        create_movie(&store, &reordered).unwrap(),
        CreateOutcome::Duplicate
    ));
}

#[test]
fn differing_year_format_or_cast_is_not_a_duplicate() {
    let store = memory_store();
    let base = candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino"]);
    must_create(&store, &base);

    let other_year = candidate("Heat", 1996, MovieFormat::BluRay, &["Al Pacino"]);
    let other_format = candidate("Heat", 1995, MovieFormat::Dvd, &["Al Pacino"]);
    let bigger_cast = candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino", "Val Kilmer"]);

    assert!(matches!(create_movie(&store, &other_year).unwrap(), CreateOutcome::Created(_)));
    assert!(matches!(create_movie(&store, &other_format).unwrap(), CreateOutcome::Created(_)));
    assert!(matches!(create_movie(&store, &bigger_cast).unwrap(), CreateOutcome::Created(_)));
}

#[test]
fn dedup_title_match_is_exact_not_substring() {
    let store = memory_store();
    must_create(&store, &candidate("Heat", 1995, MovieFormat::BluRay, &[]));

    // "Heat 2" contains "heat" but is a different movie
    assert!(!is_duplicate(&store, "Heat 2", 1995, MovieFormat::BluRay, &[]).unwrap());
    assert!(is_duplicate(&store, " heat ", 1995, MovieFormat::BluRay, &[]).unwrap());
}

#[test]
fn ukrainian_titles_dedup_under_folding() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("Тіні забутих предків", 1964, MovieFormat::Dvd, &["Іван Миколайчук"]),
    );

    let upper = candidate(
        "ТІНІ ЗАБУТИХ ПРЕДКІВ",
        1964,
        MovieFormat::Dvd,
        &["ІВАН МИКОЛАЙЧУК"],
    );
    assert!(matches!(
        create_movie(&store, &upper).unwrap(),
        CreateOutcome::Duplicate
    ));

    // і and ї are different letters, so this is a different title
    let misspelled = is_duplicate(
        &store,
        "Тіні забутих предкїв",
        1964,
        MovieFormat::Dvd,
        &["Іван Миколайчук".to_string()],
    )
    .unwrap();
    assert!(!misspelled);
}

// ── Resolver ────────────────────────────────────────────────────────────────

#[test]
fn actors_are_shared_across_movies() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino"]),
    );
    must_create(
        &store,
        &candidate("The Godfather", 1972, MovieFormat::Dvd, &["AL PACINO"]),
    );

    let stats = filmoteka_db::catalog_stats(store.connection()).unwrap();
    assert_eq!(stats.actors, 1);
    assert_eq!(stats.associations, 2);
}

#[test]
fn repeated_name_in_one_candidate_resolves_once() {
    let store = memory_store();
    let id = must_create(
        &store,
        &candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino", "al pacino"]),
    );

    let movie = movie_by_id(&store, id).unwrap().unwrap();
    assert_eq!(movie.actors.len(), 1);
    assert_eq!(movie.actors[0].name, "Al Pacino");
}

// ── Update ──────────────────────────────────────────────────────────────────

#[test]
fn update_unknown_id_is_not_found() {
    let store = memory_store();
    let outcome = update_movie(&store, 4242, &MovieUpdate::default()).unwrap();
    assert!(matches!(outcome, UpdateOutcome::NotFound));
}

#[test]
fn update_does_not_conflict_with_itself() {
    let store = memory_store();
    let id = must_create(
        &store,
        &candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino"]),
    );

    // Saving identical values back must not report a duplicate
    let outcome = update_movie(
        &store,
        id,
        &MovieUpdate {
            year: Some(1995),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(matches!(outcome, UpdateOutcome::Updated(_)));
}

#[test]
fn update_that_collides_with_another_movie_is_rejected() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino"]),
    );
    let other = must_create(
        &store,
        &candidate("Heat", 1996, MovieFormat::BluRay, &["Al Pacino"]),
    );

    let outcome = update_movie(
        &store,
        other,
        &MovieUpdate {
            year: Some(1995),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(matches!(outcome, UpdateOutcome::Duplicate));
}

#[test]
fn update_replaces_cast_when_actors_given() {
    let store = memory_store();
    let id = must_create(
        &store,
        &candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino"]),
    );

    let outcome = update_movie(
        &store,
        id,
        &MovieUpdate {
            actors: Some(vec!["Robert De Niro".to_string(), "Val Kilmer".to_string()]),
            ..Default::default()
        },
    )
    .unwrap();

    let UpdateOutcome::Updated(movie) = outcome else {
        panic!("expected update to succeed");
    };
    let names: Vec<_> = movie.actors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Robert De Niro", "Val Kilmer"]);
}

#[test]
fn update_without_actors_keeps_cast() {
    let store = memory_store();
    let id = must_create(
        &store,
        &candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino"]),
    );

    let outcome = update_movie(
        &store,
        id,
        &MovieUpdate {
            title: Some("Heat Remastered".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    let UpdateOutcome::Updated(movie) = outcome else {
        panic!("expected update to succeed");
    };
    assert_eq!(movie.title, "Heat Remastered");
    assert_eq!(movie.actors.len(), 1);
}

// ── Delete / fetch ──────────────────────────────────────────────────────────

#[test]
fn delete_then_fetch() {
    let store = memory_store();
    let id = must_create(&store, &candidate("Heat", 1995, MovieFormat::BluRay, &[]));

    assert!(delete_movie(&store, id).unwrap());
    assert!(!delete_movie(&store, id).unwrap());
    assert!(movie_by_id(&store, id).unwrap().is_none());
}

// ── Search ──────────────────────────────────────────────────────────────────

fn seed_numbered(store: &SqliteCatalog, count: i32) {
    for i in 1..=count {
        must_create(
            store,
            &candidate(&format!("Movie {i:02}"), 1990 + i, MovieFormat::Dvd, &[]),
        );
    }
}

#[test]
fn default_search_returns_first_page_in_id_order() {
    let store = memory_store();
    seed_numbered(&store, 25);

    let outcome = search(&store, &SearchCriteria::default()).unwrap();
    assert_eq!(outcome.results.len(), 20);
    assert_eq!(outcome.total_matched, 25);

    let ids: Vec<_> = outcome.results.iter().map(|m| m.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(ids[0], 1);
}

#[test]
fn pagination_reconstructs_the_full_result_set() {
    let store = memory_store();
    seed_numbered(&store, 25);

    let mut seen = Vec::new();
    for page in 0..3 {
        let outcome = search(
            &store,
            &SearchCriteria {
                limit: Some(10),
                offset: Some(page * 10),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(outcome.total_matched, 25);
        seen.extend(outcome.results.iter().map(|m| m.id));
    }

    let expected: Vec<i64> = (1..=25).collect();
    assert_eq!(seen, expected);
}

#[test]
fn negative_paging_falls_back_to_defaults() {
    let store = memory_store();
    seed_numbered(&store, 25);

    let outcome = search(
        &store,
        &SearchCriteria {
            limit: Some(-3),
            offset: Some(-7),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(outcome.results.len(), 20);
    assert_eq!(outcome.results[0].id, 1);
}

#[test]
fn offset_past_the_end_gives_empty_results() {
    let store = memory_store();
    seed_numbered(&store, 5);

    let outcome = search(
        &store,
        &SearchCriteria {
            offset: Some(100),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.total_matched, 5);
}

#[test]
fn combined_search_matches_title_or_cast() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("The Heat of the Night", 1967, MovieFormat::Dvd, &["Sidney Poitier"]),
    );
    must_create(
        &store,
        &candidate("Bowfinger", 1999, MovieFormat::Vhs, &["Heather Graham"]),
    );
    must_create(
        &store,
        &candidate("Casablanca", 1942, MovieFormat::Vhs, &["Humphrey Bogart"]),
    );

    let outcome = search(
        &store,
        &SearchCriteria {
            search: Some("heat".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(outcome.total_matched, 2);
}

#[test]
fn title_and_actor_filters_combine_with_and() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("The Heat of the Night", 1967, MovieFormat::Dvd, &["Sidney Poitier"]),
    );
    must_create(
        &store,
        &candidate("Bowfinger", 1999, MovieFormat::Vhs, &["Heather Graham"]),
    );

    let outcome = search(
        &store,
        &SearchCriteria {
            title: Some("heat".to_string()),
            actor: Some("poitier".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(outcome.total_matched, 1);
    assert_eq!(outcome.results[0].title, "The Heat of the Night");

    // Same title filter with a cast filter that matches nothing
    let none = search(
        &store,
        &SearchCriteria {
            title: Some("heat".to_string()),
            actor: Some("bogart".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(none.total_matched, 0);
}

#[test]
fn combined_search_overrides_title_and_actor() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("The Heat of the Night", 1967, MovieFormat::Dvd, &["Sidney Poitier"]),
    );
    must_create(
        &store,
        &candidate("Bowfinger", 1999, MovieFormat::Vhs, &["Heather Graham"]),
    );

    // title/actor would match nothing together, but search wins
    let outcome = search(
        &store,
        &SearchCriteria {
            search: Some("heat".to_string()),
            title: Some("zzz".to_string()),
            actor: Some("zzz".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(outcome.total_matched, 2);
}

#[test]
fn ukrainian_search_is_case_insensitive() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("Тіні забутих предків", 1964, MovieFormat::Dvd, &["Іван Миколайчук"]),
    );

    let by_title = search(
        &store,
        &SearchCriteria {
            search: Some("ЗАБУТИХ".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(by_title.total_matched, 1);

    let by_actor = search(
        &store,
        &SearchCriteria {
            actor: Some("миколайчук".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(by_actor.total_matched, 1);
}

#[test]
fn title_sort_follows_ukrainian_alphabet() {
    let store = memory_store();
    for title in ["Жук", "Єва", "Ґава", "Гуси"] {
        must_create(&store, &candidate(title, 2000, MovieFormat::Dvd, &[]));
    }

    let outcome = search(
        &store,
        &SearchCriteria {
            sort: SortField::Title,
            ..Default::default()
        },
    )
    .unwrap();
    let titles: Vec<_> = outcome.results.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Гуси", "Ґава", "Єва", "Жук"]);
}

#[test]
fn year_sort_descending() {
    let store = memory_store();
    seed_numbered(&store, 3);

    let outcome = search(
        &store,
        &SearchCriteria {
            sort: SortField::Year,
            order: SortOrder::Desc,
            ..Default::default()
        },
    )
    .unwrap();
    let years: Vec<_> = outcome.results.iter().map(|m| m.year).collect();
    assert_eq!(years, vec![1993, 1992, 1991]);
}

#[test]
fn unknown_sort_field_preserves_id_order() {
    let store = memory_store();
    seed_numbered(&store, 5);

    let outcome = search(
        &store,
        &SearchCriteria {
            sort: SortField::Unknown,
            order: SortOrder::Desc,
            ..Default::default()
        },
    )
    .unwrap();
    let ids: Vec<_> = outcome.results.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn search_results_are_summaries_without_cast() {
    let store = memory_store();
    must_create(
        &store,
        &candidate("Heat", 1995, MovieFormat::BluRay, &["Al Pacino"]),
    );

    let outcome = search(&store, &SearchCriteria::default()).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    let first = &json["results"][0];
    assert!(first.get("actors").is_none());
    assert_eq!(first["format"], "Blu-ray");
}
