//! Master volume propagation

use super::MediaManager;
use crate::view::volume_label;
use mediactl_common::MediaEvent;
use tracing::{debug, info, warn};

impl MediaManager {
    /// Accept a new master volume
    ///
    /// Stores the value, shows its label, persists it and forwards it to the
    /// mixer. The value is not validated or clamped. Concurrent setters are
    /// serialized, so the mixer always ends up holding the last value stored.
    pub async fn set_master_volume(&self, volume: i32) {
        let mut current = self.state.lock_volume().await;
        *current = volume;

        self.view.render_label(&volume_label(volume));

        if let Err(e) = self.settings.save_volume(volume).await {
            warn!("Failed to persist master volume {}: {}", volume, e);
        }

        self.mixer.set_master_volume(volume);
        drop(current);

        debug!("Master volume set to {}", volume);
        self.state.broadcast_event(MediaEvent::volume_changed(volume));
    }

    /// Programmatic volume change
    ///
    /// Moves the input control to `volume` first so it stays in step with a
    /// change the user did not make through it.
    pub async fn change_volume(&self, volume: i32) {
        self.view.move_slider(volume);
        self.set_master_volume(volume).await;
    }

    pub async fn get_master_volume(&self) -> i32 {
        self.state.get_volume().await
    }

    /// Apply the persisted master volume, or the configured default
    ///
    /// Returns the value applied.
    pub async fn restore_master_volume(&self) -> i32 {
        let volume = match self.settings.load_volume().await {
            Ok(Some(volume)) => volume,
            Ok(None) => self.config.default_master_volume,
            Err(e) => {
                warn!("Could not read persisted volume, using default: {}", e);
                self.config.default_master_volume
            }
        };

        info!("Restoring master volume {}", volume);
        self.change_volume(volume).await;
        volume
    }
}
