//! Bootstrap configuration loading and config file resolution
//!
//! Configuration sources, highest priority first:
//! 1. Command-line argument (`--config`)
//! 2. Environment variable (`MEDIACTL_CONFIG`)
//! 3. Per-user config file (`<config_dir>/mediactl/config.toml`)
//! 4. Built-in defaults
//!
//! A missing config file is never fatal: a warning is logged and defaults are
//! used. A config file that exists but cannot be parsed is an error.

use crate::{Error, FadeCurve, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MEDIACTL_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// HTTP control port
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite database holding persisted settings (optional)
    ///
    /// When absent, settings live in memory for the lifetime of the process.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Sound played once after boot (optional)
    #[serde(default)]
    pub boot_sound: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub media: MediaSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Orchestrator timing and volume defaults
///
/// All durations are milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    /// Delay before refreshing playing sounds when no boot sound is configured
    #[serde(default = "default_boot_refresh_delay_ms")]
    pub boot_refresh_delay_ms: u64,

    /// Delay before refreshing playing sounds after the boot sound finished
    #[serde(default = "default_boot_sound_refresh_delay_ms")]
    pub boot_sound_refresh_delay_ms: u64,

    /// Fade duration used by teardown when no transition is requested
    #[serde(default = "default_fade_ms")]
    pub default_fade_ms: u64,

    /// Master volume used until a persisted value is loaded
    #[serde(default = "default_master_volume")]
    pub default_master_volume: i32,

    /// Curve used by the reference backend for channel fades
    #[serde(default)]
    pub fade_curve: FadeCurve,

    /// Tick interval of the reference backend's fade loop
    #[serde(default = "default_fade_step_ms")]
    pub fade_step_ms: u64,

    /// Virtual playback length of sounds in the reference backend
    #[serde(default = "default_sound_length_ms")]
    pub default_sound_length_ms: u64,
}

fn default_port() -> u16 {
    5780
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_boot_refresh_delay_ms() -> u64 {
    500
}

fn default_boot_sound_refresh_delay_ms() -> u64 {
    1000
}

fn default_fade_ms() -> u64 {
    500
}

fn default_master_volume() -> i32 {
    80
}

fn default_fade_step_ms() -> u64 {
    20
}

fn default_sound_length_ms() -> u64 {
    3000
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_path: None,
            boot_sound: None,
            logging: LoggingConfig::default(),
            media: MediaSettings::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            boot_refresh_delay_ms: default_boot_refresh_delay_ms(),
            boot_sound_refresh_delay_ms: default_boot_sound_refresh_delay_ms(),
            default_fade_ms: default_fade_ms(),
            default_master_volume: default_master_volume(),
            fade_curve: FadeCurve::default(),
            fade_step_ms: default_fade_step_ms(),
            default_sound_length_ms: default_sound_length_ms(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`, falling back to defaults
    ///
    /// `None` or a path that does not exist yields defaults with a warning.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            info!("No config file found, using built-in defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            warn!("Config file {} does not exist, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Resolves which config file to read
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Config file path by priority, or `None` when no source names one
    pub fn resolve(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        user_config_path().filter(|path| path.exists())
    }
}

/// `<config_dir>/mediactl/config.toml` for the current platform
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mediactl").join("config.toml"))
}
