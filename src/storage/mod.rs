//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - app_settings(id, language, units, theme, default_logbook_id)
//! - aircraft_types(id, type_designator, icao, name, characteristic flags)
//! - logbooks(id, name, description, created, field configuration)
//! - flights(id, logbook_id, date, aircraft, times, landings, remarks)

pub mod connection;
pub mod schema;

pub use connection::{ConnectionManager, SharedConnection};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HdvConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("heuredevol.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".heuredevol").join("heuredevol.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<HdvConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: HdvConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &HdvConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
