//! SQLite-backed settings store
//!
//! Values are stored as text in the `settings` table and parsed on read.

use super::{SettingsStore, VOLUME_KEY};
use crate::error::{Error, Result};
use async_trait::async_trait;
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::warn;

/// [`SettingsStore`] over a SQLite pool
#[derive(Clone)]
pub struct SqliteSettings {
    pool: Pool<Sqlite>,
}

impl SqliteSettings {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl SettingsStore for SqliteSettings {
    async fn save_volume(&self, volume: i32) -> Result<()> {
        set_setting(&self.pool, VOLUME_KEY, volume).await
    }

    async fn load_volume(&self) -> Result<Option<i32>> {
        match get_setting::<i32>(&self.pool, VOLUME_KEY).await {
            Ok(volume) => Ok(volume),
            Err(Error::Config(msg)) => {
                // Corrupt value: behave as if nothing was saved
                warn!("Ignoring stored volume: {}", msg);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Generic setting getter
pub async fn get_setting<T: FromStr>(db: &Pool<Sqlite>, key: &str) -> Result<Option<T>> {
    let row: Option<(Option<String>,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await?;

    match row.and_then(|(value,)| value) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("Invalid value for setting '{}': {}", key, value))),
        None => Ok(None),
    }
}

/// Generic setting setter
pub async fn set_setting<T: ToString>(db: &Pool<Sqlite>, key: &str, value: T) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(key)
    .bind(value.to_string())
    .execute(db)
    .await?;

    Ok(())
}
