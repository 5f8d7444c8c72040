//! Settings persistence
//!
//! The orchestrator mirrors every accepted master volume into a
//! [`SettingsStore`]. The binary uses the SQLite store when a database path
//! is configured and the in-memory store otherwise.

pub mod init;
pub mod settings;

pub use settings::SqliteSettings;

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Key under which the master volume is stored
pub const VOLUME_KEY: &str = "volume";

/// Key-value store for user settings
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn save_volume(&self, volume: i32) -> Result<()>;

    /// Persisted volume, `None` if never saved
    async fn load_volume(&self) -> Result<Option<i32>>;
}

/// Process-lifetime store
#[derive(Debug, Default)]
pub struct MemorySettings {
    volume: Mutex<Option<i32>>,
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn save_volume(&self, volume: i32) -> Result<()> {
        *self.volume.lock().unwrap_or_else(PoisonError::into_inner) = Some(volume);
        Ok(())
    }

    async fn load_volume(&self) -> Result<Option<i32>> {
        Ok(*self.volume.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
