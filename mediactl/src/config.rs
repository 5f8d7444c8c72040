//! Runtime configuration for mediactl
//!
//! Converts the bootstrap TOML (`mediactl_common::config::TomlConfig`) into
//! typed values. Every fixed delay the orchestrator uses is a named field here
//! so it can be tuned and tested independently.

use mediactl_common::config::{MediaSettings, TomlConfig};
use mediactl_common::FadeCurve;
use std::path::PathBuf;
use std::time::Duration;

/// Orchestrator timing and volume configuration
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Refresh delay when no boot sound is configured
    pub boot_refresh_delay: Duration,

    /// Refresh delay after the boot sound finished playing
    ///
    /// Longer than `boot_refresh_delay` to cover the sound's trailing tail.
    pub boot_sound_refresh_delay: Duration,

    /// Teardown fade duration when the request carries no transition
    pub default_fade: Duration,

    /// Master volume before any value has been set
    pub default_master_volume: i32,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self::from(&MediaSettings::default())
    }
}

impl From<&MediaSettings> for MediaConfig {
    fn from(settings: &MediaSettings) -> Self {
        Self {
            boot_refresh_delay: Duration::from_millis(settings.boot_refresh_delay_ms),
            boot_sound_refresh_delay: Duration::from_millis(settings.boot_sound_refresh_delay_ms),
            default_fade: Duration::from_millis(settings.default_fade_ms),
            default_master_volume: settings.default_master_volume,
        }
    }
}

/// Settings for the in-process collaborator backend
#[derive(Debug, Clone, Copy)]
pub struct BackendConfig {
    pub fade_curve: FadeCurve,
    pub fade_step: Duration,
    pub sound_length: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::from(&MediaSettings::default())
    }
}

impl From<&MediaSettings> for BackendConfig {
    fn from(settings: &MediaSettings) -> Self {
        Self {
            fade_curve: settings.fade_curve,
            // A zero tick would spin the fade loop
            fade_step: Duration::from_millis(settings.fade_step_ms.max(1)),
            sound_length: Duration::from_millis(settings.default_sound_length_ms),
        }
    }
}

/// Complete service configuration after CLI overrides
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: Option<PathBuf>,
    pub boot_sound: Option<String>,
    pub media: MediaConfig,
    pub backend: BackendConfig,
}

impl From<&TomlConfig> for Config {
    fn from(toml: &TomlConfig) -> Self {
        Self {
            port: toml.port,
            database_path: toml.database_path.clone(),
            boot_sound: toml.boot_sound.clone(),
            media: MediaConfig::from(&toml.media),
            backend: BackendConfig::from(&toml.media),
        }
    }
}
