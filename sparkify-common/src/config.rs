//! Configuration loading and data root resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "sparkify.db";
/// Default song metadata root
pub const DEFAULT_SONG_DATA: &str = "data/song_data";
/// Default activity log root
pub const DEFAULT_LOG_DATA: &str = "data/log_data";
/// Default data file extension (without the dot)
pub const DEFAULT_DATA_EXTENSION: &str = "json";

/// Contents of the optional TOML config file
///
/// Every key is optional; missing keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub song_data: Option<PathBuf>,
    pub log_data: Option<PathBuf>,
    pub data_extension: Option<String>,
    pub ignore_patterns: Option<Vec<String>>,
}

/// Values supplied on the command line (or through their env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_path: Option<PathBuf>,
    pub song_data: Option<PathBuf>,
    pub log_data: Option<PathBuf>,
    pub reset_schema: bool,
}

/// Fully resolved loader configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EtlConfig {
    /// SQLite database file holding the star schema
    pub database_path: PathBuf,
    /// Root of the song metadata tree
    pub song_data: PathBuf,
    /// Root of the activity log tree
    pub log_data: PathBuf,
    /// Extension that marks a data file
    pub data_extension: String,
    /// File or directory name fragments excluded from discovery
    pub ignore_patterns: Vec<String>,
    /// Drop and recreate all tables before loading
    pub reset_schema: bool,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            song_data: PathBuf::from(DEFAULT_SONG_DATA),
            log_data: PathBuf::from(DEFAULT_LOG_DATA),
            data_extension: DEFAULT_DATA_EXTENSION.to_string(),
            ignore_patterns: Vec::new(),
            reset_schema: false,
        }
    }
}

impl EtlConfig {
    /// Merge configuration sources
    ///
    /// Priority order per field:
    /// 1. Command-line argument / environment variable (highest priority)
    /// 2. TOML config file
    /// 3. Compiled default (fallback)
    pub fn resolve(cli: CliOverrides, toml_config: Option<TomlConfig>) -> Self {
        let toml_config = toml_config.unwrap_or_default();
        let defaults = Self::default();

        let data_extension = toml_config
            .data_extension
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(defaults.data_extension);

        Self {
            database_path: cli
                .database_path
                .or(toml_config.database_path)
                .unwrap_or(defaults.database_path),
            song_data: cli
                .song_data
                .or(toml_config.song_data)
                .unwrap_or(defaults.song_data),
            log_data: cli
                .log_data
                .or(toml_config.log_data)
                .unwrap_or(defaults.log_data),
            data_extension,
            ignore_patterns: toml_config.ignore_patterns.unwrap_or(defaults.ignore_patterns),
            reset_schema: cli.reset_schema,
        }
    }
}

/// Load the TOML config file
///
/// An explicitly requested file must exist. Without one, the platform
/// config directory is probed (`~/.config/sparkify/config.toml` on Linux)
/// and a missing file there is not an error.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(None);
            }
            None => return Ok(None),
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(Some(config))
}

/// Parse TOML text into a [`TomlConfig`]
pub fn parse_toml_config(content: &str) -> std::result::Result<TomlConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Platform config file location, if the platform has a config directory
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sparkify").join("config.toml"))
}
