//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! where the roster table lives, which logo image to try at render time,
//! and the default output filename.
//!
//! Configuration is stored at `~/.config/sisjornada/config.json`; a missing
//! file means defaults.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::report::{DEFAULT_LOGO_NAME, DEFAULT_OUTPUT_NAME};

/// Application name used for the config directory path
const APP_NAME: &str = "sisjornada";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Roster table filename used when no config exists
const DEFAULT_ROSTER_NAME: &str = "dados.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub roster_path: PathBuf,
    pub logo_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_NAME),
            logo_path: PathBuf::from(DEFAULT_LOGO_NAME),
            output_path: PathBuf::from(DEFAULT_OUTPUT_NAME),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
