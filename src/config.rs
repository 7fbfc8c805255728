// Configuration loaded from YAML

use crate::date::DateZone;
use crate::filter::StatusFilter;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime settings for the store and CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Zone whose calendar is used for `YYYY-MM-DD` dates
    pub timezone: DateZone,
    /// Request payload file (`.json` array or `.jsonl`)
    pub source: Option<PathBuf>,
    /// Filter the CLI applies when none is given
    pub default_filter: StatusFilter,
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// `<config dir>/requeststore/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("requeststore").join("config.yaml"))
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!(path = ?path, "Loading config");
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))
    }
}
