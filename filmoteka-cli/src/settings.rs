//! Application settings (catalog database location, config file location).
//!
//! The settings file is always `~/.config/filmoteka/settings.toml` and
//! database-path resolution follows the same priority chain for every
//! command.

use std::io;
use std::path::{Path, PathBuf};

/// Canonical path to the settings file: `~/.config/filmoteka/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("filmoteka").join("settings.toml")
}

/// Default location of the catalog database when nothing is configured.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("filmoteka").join("catalog.db")
}

/// Resolve the catalog database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `catalog.db_path` in `settings.toml`
/// 3. The platform data directory
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_db_path() {
        return p;
    }
    default_db_path()
}

/// Read `catalog.db_path` from `settings.toml`, if set.
pub(crate) fn load_db_path() -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let path = doc.get("catalog")?.get("db_path")?.as_str()?;
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Save (or clear) the catalog database path in `settings.toml`.
///
/// Uses `toml::Value` for a surgical update so unrelated fields in the
/// file are preserved.
pub(crate) fn save_db_path(path: Option<&Path>) -> io::Result<()> {
    let settings = settings_path();
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(&settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    // Ensure [catalog] table exists
    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let catalog = table
        .entry("catalog")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let catalog_table = catalog
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[catalog] is not a table"))?;

    match path {
        Some(p) => {
            catalog_table.insert(
                "db_path".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            catalog_table.remove("db_path");
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, &settings)?;

    Ok(())
}
