use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use wmigen_core::ConflictPolicy;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Knobs shared by the `fetch` and `generate` subcommands. Every field
/// has a default so a partial `wmigen.toml` is enough.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub vehicle_types: Vec<String>,
    pub country_policy: ConflictPolicy,
    pub manufacturer_policy: ConflictPolicy,
    pub fetch_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("dicts"),
            vehicle_types: ["car", "bus", "motorcycle", "truck", "mpv"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            country_policy: ConflictPolicy::Overwrite,
            manufacturer_policy: ConflictPolicy::FirstWins,
            fetch_timeout_secs: 30,
        }
    }
}

/// Reads the settings file when present, otherwise falls back to the
/// defaults. A missing file is not an error and is never created.
pub fn load_or_default(path: &Path) -> Result<Settings, SettingsError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        return Ok(settings);
    }
    Ok(Settings::default())
}
