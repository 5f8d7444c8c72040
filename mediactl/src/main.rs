//! mediactl - playback orchestrator service
//!
//! Runs the orchestrator over the in-process collaborator backend and serves
//! the HTTP/SSE control surface.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediactl::backend::LocalMixer;
use mediactl::config::Config;
use mediactl::db::{init::open_database, MemorySettings, SettingsStore, SqliteSettings};
use mediactl::view::LogView;
use mediactl::{api, MediaManager};
use mediactl_common::config::{ConfigResolver, TomlConfig};

/// Command-line arguments for mediactl
#[derive(Parser, Debug)]
#[command(name = "mediactl")]
#[command(about = "Playback orchestrator for boot sound, master volume and channel teardown")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "MEDIACTL_PORT")]
    port: Option<u16>,

    /// SQLite database for persisted settings
    #[arg(short, long, env = "MEDIACTL_DATABASE")]
    database: Option<PathBuf>,

    /// Sound to play once after boot
    #[arg(short, long, env = "MEDIACTL_BOOT_SOUND")]
    boot_sound: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = ConfigResolver::new(args.config.clone()).resolve();
    let toml = TomlConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("mediactl={},tower_http=debug", toml.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from(&toml);
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = args.database {
        config.database_path = Some(database);
    }
    if let Some(boot_sound) = args.boot_sound {
        config.boot_sound = Some(boot_sound);
    }

    match &config_path {
        Some(path) => info!("Configuration source: {}", path.display()),
        None => info!("Configuration source: built-in defaults"),
    }

    let settings: Arc<dyn SettingsStore> = match &config.database_path {
        Some(path) => {
            let pool = open_database(path)
                .await
                .context("Failed to open settings database")?;
            Arc::new(SqliteSettings::new(pool))
        }
        None => {
            warn!("No database configured, settings will not survive a restart");
            Arc::new(MemorySettings::default())
        }
    };

    let mixer = Arc::new(LocalMixer::new(
        config.media.default_master_volume,
        config.backend,
    ));
    let manager = Arc::new(MediaManager::new(
        mixer,
        settings,
        Arc::new(LogView),
        config.media.clone(),
    ));

    manager.restore_master_volume().await;
    let outcome = manager.post_boot(config.boot_sound.as_deref());
    info!("Post-boot: {:?}", outcome);

    api::run(config.port, manager, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
