//! Application configuration management.
//!
//! Configuration is stored at `~/.config/rostercard/config.json` and holds the
//! roster source location, an optional position filter applied at startup,
//! and the header text.
//!
//! The roster path is resolved from, in order: the command line, the
//! `ROSTERCARD_ROSTER` environment variable (a `.env` file works too), the
//! config file, then `ravens_roster.csv` in the working directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/log directory paths
const APP_NAME: &str = "rostercard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable naming the roster source
pub const ROSTER_ENV_VAR: &str = "ROSTERCARD_ROSTER";

/// Roster file looked for in the working directory when nothing else is set
const DEFAULT_ROSTER_FILE: &str = "ravens_roster.csv";

const DEFAULT_TITLE: &str = "BALTIMORE RAVENS";
const DEFAULT_SUBTITLE: &str = "2024-25 Roster & Coaching Staff";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub roster_path: Option<PathBuf>,
    /// Position token applied after the first load, e.g. "qb"
    pub default_filter: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the log file.
    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Pick the roster source from the command line, environment and config.
    pub fn resolve_roster_path(&self, cli_path: Option<&str>) -> PathBuf {
        let env_path = std::env::var(ROSTER_ENV_VAR).ok();
        self.resolve_roster_path_with(cli_path, env_path.as_deref())
    }

    fn resolve_roster_path_with(&self, cli_path: Option<&str>, env_path: Option<&str>) -> PathBuf {
        cli_path
            .or(env_path)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| self.roster_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROSTER_FILE))
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or(DEFAULT_SUBTITLE)
    }
}
