//! filmoteka CLI
//!
//! Command-line interface for a personal movie catalog: add, edit, and
//! remove entries, run locale-aware searches, and bulk-import records
//! from text files.

mod error;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use filmoteka_catalog::types::{MovieCandidate, MovieFormat, MovieSummary, MovieUpdate};
use filmoteka_catalog::validate;
use filmoteka_db::SqliteCatalog;
use filmoteka_engine::{
    CreateOutcome, SearchCriteria, SortField, SortOrder, UpdateOutcome, create_movie, delete_movie,
    movie_by_id, search, update_movie,
};
use filmoteka_import::{ImportProgress, SilentProgress, import_from_text};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "filmoteka")]
#[command(about = "Manage a personal movie catalog", long_about = None)]
struct Cli {
    /// Catalog database file (defaults to the configured or standard path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a movie to the catalog
    Add {
        /// Movie title
        #[arg(short, long)]
        title: String,

        /// Release year
        #[arg(short, long)]
        year: i32,

        /// Media format (VHS, DVD, Blu-ray)
        #[arg(short, long)]
        format: MovieFormat,

        /// Cast names, comma separated
        #[arg(short, long, value_delimiter = ',')]
        actors: Vec<String>,

        /// Print the created record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit an existing movie
    Edit {
        /// Movie id
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New release year
        #[arg(short, long)]
        year: Option<i32>,

        /// New media format (VHS, DVD, Blu-ray)
        #[arg(short, long)]
        format: Option<MovieFormat>,

        /// Replacement cast names, comma separated
        #[arg(short, long, value_delimiter = ',')]
        actors: Option<Vec<String>>,

        /// Print the updated record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one movie with its full cast
    Show {
        /// Movie id
        id: i64,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a movie from the catalog
    Rm {
        /// Movie id
        id: i64,
    },

    /// Search and list catalog entries
    Search {
        /// Free-text query matching title or cast
        query: Option<String>,

        /// Substring filter on the title
        #[arg(short, long)]
        title: Option<String>,

        /// Substring filter on cast names
        #[arg(short, long)]
        actor: Option<String>,

        /// Sort field (id, title, year, format, created, updated)
        #[arg(short, long, default_value = "id")]
        sort: String,

        /// Sort direction (asc, desc)
        #[arg(short, long, default_value = "asc")]
        order: String,

        /// Maximum number of results per page
        #[arg(short, long)]
        limit: Option<i64>,

        /// Number of results to skip
        #[arg(long)]
        offset: Option<i64>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bulk-import movies from a text file
    Import {
        /// Text file with blank-line-separated "Key: value" blocks
        file: PathBuf,

        /// Print the import report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show catalog statistics
    Stats,

    /// Manage the saved catalog location
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the settings file and the resolved database path
    Show,

    /// Save a catalog database path for future runs
    SetDb {
        /// Database file to record in settings.toml
        path: PathBuf,
    },

    /// Remove the saved database path
    ClearDb,

    /// Print the settings file path
    Path,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            title,
            year,
            format,
            actors,
            json,
        } => run_add(cli.db, title, year, format, actors, json),
        Commands::Edit {
            id,
            title,
            year,
            format,
            actors,
            json,
        } => run_edit(cli.db, id, title, year, format, actors, json),
        Commands::Show { id, json } => run_show(cli.db, id, json),
        Commands::Rm { id } => run_rm(cli.db, id),
        Commands::Search {
            query,
            title,
            actor,
            sort,
            order,
            limit,
            offset,
            json,
        } => run_search(cli.db, query, title, actor, sort, order, limit, offset, json),
        Commands::Import { file, json } => run_import(cli.db, file, json),
        Commands::Stats => run_stats(cli.db),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::SetDb { path } => run_config_set_db(path),
            ConfigAction::ClearDb => run_config_clear_db(),
            ConfigAction::Path => run_config_path(),
        },
    };

    if let Err(e) = result {
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

/// Open (creating if needed) the catalog database for this invocation.
fn open_store(db_override: Option<PathBuf>) -> Result<SqliteCatalog, CliError> {
    let path = settings::resolve_db_path(db_override);
    log::debug!("opening catalog at {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = filmoteka_db::open_database(&path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog at {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(SqliteCatalog::new(conn))
}

/// Print a one-line movie listing.
fn print_summary(movie: &MovieSummary) {
    println!(
        "  {} {} {}",
        format!("#{}", movie.id).if_supports_color(Stdout, |t| t.dimmed()),
        movie.title.if_supports_color(Stdout, |t| t.bold()),
        format!("({}, {})", movie.year, movie.format).if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Run the add command.
fn run_add(
    db: Option<PathBuf>,
    title: String,
    year: i32,
    format: MovieFormat,
    actors: Vec<String>,
    json: bool,
) -> Result<(), CliError> {
    let candidate = validate::validate_candidate(&MovieCandidate {
        title,
        year,
        format,
        actors,
    })?;
    let store = open_store(db)?;

    match create_movie(&store, &candidate).map_err(CliError::store)? {
        CreateOutcome::Created(movie) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&movie)?);
            } else {
                println!(
                    "{} Added {} ({}, {}) as #{}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    movie.title.if_supports_color(Stdout, |t| t.bold()),
                    movie.year,
                    movie.format,
                    movie.id,
                );
            }
            Ok(())
        }
        CreateOutcome::Duplicate => {
            eprintln!(
                "{} An equivalent movie is already in the catalog",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            );
            std::process::exit(1);
        }
    }
}

/// Run the edit command.
fn run_edit(
    db: Option<PathBuf>,
    id: i64,
    title: Option<String>,
    year: Option<i32>,
    format: Option<MovieFormat>,
    actors: Option<Vec<String>>,
    json: bool,
) -> Result<(), CliError> {
    let title = title.as_deref().map(validate::validate_title).transpose()?;
    let year = year.map(validate::validate_year).transpose()?;
    let actors = actors
        .map(|names| {
            names
                .iter()
                .map(|n| validate::validate_actor_name(n))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let update = MovieUpdate {
        title,
        year,
        format,
        actors,
    };
    let store = open_store(db)?;

    match update_movie(&store, id, &update).map_err(CliError::store)? {
        UpdateOutcome::Updated(movie) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&movie)?);
            } else {
                println!(
                    "{} Updated #{}: {} ({}, {})",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    movie.id,
                    movie.title.if_supports_color(Stdout, |t| t.bold()),
                    movie.year,
                    movie.format,
                );
            }
            Ok(())
        }
        UpdateOutcome::NotFound => {
            eprintln!(
                "{} No movie with id {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                id,
            );
            std::process::exit(1);
        }
        UpdateOutcome::Duplicate => {
            eprintln!(
                "{} Rejected: the edited record would duplicate another movie",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            );
            std::process::exit(1);
        }
    }
}

/// Run the show command.
fn run_show(db: Option<PathBuf>, id: i64, json: bool) -> Result<(), CliError> {
    let store = open_store(db)?;

    let Some(movie) = movie_by_id(&store, id).map_err(CliError::store)? else {
        eprintln!(
            "{} No movie with id {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            id,
        );
        std::process::exit(1);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&movie)?);
        return Ok(());
    }

    println!(
        "{} {}",
        movie.title.if_supports_color(Stdout, |t| t.bold()),
        format!("({}, {})", movie.year, movie.format).if_supports_color(Stdout, |t| t.dimmed()),
    );
    println!(
        "  {}      {}",
        "Id:".if_supports_color(Stdout, |t| t.cyan()),
        movie.id,
    );
    println!(
        "  {}   {}",
        "Added:".if_supports_color(Stdout, |t| t.cyan()),
        movie.created_at,
    );
    println!(
        "  {} {}",
        "Updated:".if_supports_color(Stdout, |t| t.cyan()),
        movie.updated_at,
    );
    if movie.actors.is_empty() {
        println!(
            "  {}    {}",
            "Cast:".if_supports_color(Stdout, |t| t.cyan()),
            "(none)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        println!("  {}", "Cast:".if_supports_color(Stdout, |t| t.cyan()));
        for actor in &movie.actors {
            println!("    {}", actor.name);
        }
    }
    Ok(())
}

/// Run the rm command.
fn run_rm(db: Option<PathBuf>, id: i64) -> Result<(), CliError> {
    let store = open_store(db)?;

    if delete_movie(&store, id).map_err(CliError::store)? {
        println!(
            "{} Removed movie #{}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            id,
        );
        Ok(())
    } else {
        eprintln!(
            "{} No movie with id {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            id,
        );
        std::process::exit(1);
    }
}

/// Run the search command.
#[allow(clippy::too_many_arguments)]
fn run_search(
    db: Option<PathBuf>,
    query: Option<String>,
    title: Option<String>,
    actor: Option<String>,
    sort: String,
    order: String,
    limit: Option<i64>,
    offset: Option<i64>,
    json: bool,
) -> Result<(), CliError> {
    let store = open_store(db)?;

    let criteria = SearchCriteria {
        title,
        actor,
        search: query,
        sort: SortField::parse_loose(&sort),
        order: SortOrder::parse_loose(&order),
        limit,
        offset,
    };

    let outcome = search(&store, &criteria).map_err(CliError::store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if outcome.results.is_empty() {
        println!(
            "{}",
            "No matching movies.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    for movie in &outcome.results {
        print_summary(movie);
    }
    println!();
    println!(
        "{} of {} matching movies shown",
        outcome.results.len(),
        outcome.total_matched,
    );
    Ok(())
}

/// Spinner-backed progress display for interactive imports.
struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("/-\\|"),
        );
        Self { pb }
    }
}

impl ImportProgress for SpinnerProgress {
    fn on_candidate(&self, current: usize, total: usize, title: &str) {
        self.pb.set_message(format!("[{current}/{total}] {title}"));
        self.pb.tick();
    }

    fn on_phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
        self.pb.tick();
    }

    fn on_complete(&self, _message: &str) {
        self.pb.finish_and_clear();
    }
}

/// Run the import command.
fn run_import(db: Option<PathBuf>, file: PathBuf, json: bool) -> Result<(), CliError> {
    let content = std::fs::read_to_string(&file)
        .map_err(|e| CliError::other(format!("Failed to read {}: {}", file.display(), e)))?;
    let store = open_store(db)?;

    if json {
        let report = import_from_text(&store, &content, &SilentProgress);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Importing from: {}",
        file.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    let report = import_from_text(&store, &content, &SpinnerProgress::new());

    for movie in &report.created {
        print_summary(movie);
    }
    println!();
    println!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    println!(
        "  {} {} of {} candidates imported",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.imported,
        report.total_parsed,
    );
    for title in &report.failed {
        println!(
            "  {} {} skipped",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            title,
        );
    }
    Ok(())
}

/// Run the stats command.
fn run_stats(db: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings::resolve_db_path(db);

    if !path.exists() {
        println!(
            "{}",
            format!("No catalog database at {}", path.display())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        println!("Run 'filmoteka add' or 'filmoteka import' to create one.");
        return Ok(());
    }

    let conn = filmoteka_db::open_database(&path)
        .map_err(|e| CliError::database(format!("Failed to open catalog: {}", e)))?;
    let stats = filmoteka_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to read catalog stats: {}", e)))?;

    println!(
        "{}",
        "Catalog statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();
    println!(
        "  {}   {}",
        "Database:".if_supports_color(Stdout, |t| t.cyan()),
        path.display(),
    );
    println!(
        "  {}     {}",
        "Movies:".if_supports_color(Stdout, |t| t.cyan()),
        stats.movies,
    );
    println!(
        "  {}     {}",
        "Actors:".if_supports_color(Stdout, |t| t.cyan()),
        stats.actors,
    );
    println!(
        "  {} {}",
        "Cast links:".if_supports_color(Stdout, |t| t.cyan()),
        stats.associations,
    );
    Ok(())
}

// -- Config subcommands --

/// Show the settings file and the resolved database path.
fn run_config_show() -> Result<(), CliError> {
    let path = settings::settings_path();
    if path.exists() {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        println!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    match settings::load_db_path() {
        Some(db) => {
            println!(
                "  Catalog:       {}",
                db.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        None => {
            println!(
                "  Catalog:       {} {}",
                settings::default_db_path()
                    .display()
                    .if_supports_color(Stdout, |t| t.cyan()),
                "(default)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    Ok(())
}

/// Save the catalog database path for future runs.
fn run_config_set_db(path: PathBuf) -> Result<(), CliError> {
    settings::save_db_path(Some(&path))
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    println!(
        "{} Catalog path saved: {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Remove the saved catalog database path.
fn run_config_clear_db() -> Result<(), CliError> {
    settings::save_db_path(None)
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    println!(
        "{} Saved catalog path cleared",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}

/// Print the settings file path.
fn run_config_path() -> Result<(), CliError> {
    println!("{}", settings::settings_path().display());
    Ok(())
}
