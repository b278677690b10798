//! Engine settings loaded from `stockfish.toml`.
//!
//! Settings select which bundled binary to run and how long each search
//! may think. A missing file means "all defaults".

use crate::executable;
use crate::option::EngineOption;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the settings file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the settings file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for spawning and querying the engine.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EngineSettings {
    /// Target platform of the bundled binary: `windows` or `linux`.
    /// Anything else autodetects from the host OS.
    #[serde(default = "default_platform")]
    pub platform: String,
    /// CPU feature variant: `BMI2`, `POPCNT` or `DEFAULT`.
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Directory holding the bundled binaries.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    /// Explicit engine executable. Bypasses platform/variant resolution.
    #[serde(default)]
    pub executable: Option<PathBuf>,
    /// Think time handed to `go movetime`.
    #[serde(default = "default_movetime_ms")]
    pub movetime_ms: u64,
    /// Options applied right after the engine starts.
    #[serde(default)]
    pub options: BTreeMap<String, i32>,
}

fn default_platform() -> String {
    "auto".to_string()
}

fn default_variant() -> String {
    "DEFAULT".to_string()
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from(executable::DEFAULT_ASSETS_DIR)
}

fn default_movetime_ms() -> u64 {
    1000
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            variant: default_variant(),
            assets_dir: default_assets_dir(),
            executable: None,
            movetime_ms: default_movetime_ms(),
            options: BTreeMap::new(),
        }
    }
}

impl EngineSettings {
    /// Loads settings from [`Self::config_path()`], or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Loads settings from `path`, or defaults if it does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the path to the settings file: `stockfish.toml` in the working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("stockfish.toml")
    }

    /// The executable to spawn: the explicit override, or the bundled binary
    /// matching `platform` and `variant`.
    pub fn executable_path(&self) -> PathBuf {
        match &self.executable {
            Some(path) => path.clone(),
            None => executable::resolve(&self.assets_dir, &self.platform, &self.variant),
        }
    }

    /// Configured options in name order.
    pub fn engine_options(&self) -> Vec<EngineOption> {
        self.options
            .iter()
            .map(|(name, value)| EngineOption::new(name.clone(), *value))
            .collect()
    }
}
