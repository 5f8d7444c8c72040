//! Playback orchestrator
//!
//! [`MediaManager`] owns no audio state. It reacts to four triggers and
//! sequences calls on the [`Mixer`] and the channels and sounds it hands out:
//!
//! - application boot ([`MediaManager::post_boot`])
//! - volume changes ([`MediaManager::set_master_volume`], [`MediaManager::change_volume`])
//! - teardown requests ([`MediaManager::destroy_sounds`])
//! - ambiance setup ([`MediaManager::setup_ambiance_sound`])
//!
//! None of these return errors: failures degrade to log lines, because the
//! orchestrator is the top of its call chain. Deferred work (load
//! continuations, fade completions, delayed refreshes) runs on spawned tokio
//! tasks, so the trigger methods must be called from within a runtime.

mod boot;
mod teardown;
mod volume;

pub use boot::BootOutcome;
pub use teardown::{effective_fade, Selection};

use crate::config::MediaConfig;
use crate::db::SettingsStore;
use crate::media::Mixer;
use crate::state::SharedState;
use crate::view::VolumeView;
use mediactl_common::MediaEvent;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

pub struct MediaManager {
    mixer: Arc<dyn Mixer>,
    state: Arc<SharedState>,
    settings: Arc<dyn SettingsStore>,
    view: Arc<dyn VolumeView>,
    config: MediaConfig,
    booted: AtomicBool,
}

impl MediaManager {
    pub fn new(
        mixer: Arc<dyn Mixer>,
        settings: Arc<dyn SettingsStore>,
        view: Arc<dyn VolumeView>,
        config: MediaConfig,
    ) -> Self {
        let state = Arc::new(SharedState::new(config.default_master_volume));
        Self {
            mixer,
            state,
            settings,
            view,
            config,
            booted: AtomicBool::new(false),
        }
    }

    pub fn mixer(&self) -> &Arc<dyn Mixer> {
        &self.mixer
    }

    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<MediaEvent> {
        self.state.subscribe_events()
    }

    /// Hand an ambiance source to the mixer
    ///
    /// Absent or empty sources are ignored.
    pub fn setup_ambiance_sound(&self, source: Option<&str>) {
        let Some(source) = source.filter(|s| !s.is_empty()) else {
            debug!("Ignoring empty ambiance source");
            return;
        };

        info!("Setting up ambiance sound {}", source);
        self.mixer.setup_ambiance_sound(source);
        self.state.broadcast_event(MediaEvent::ambiance_changed(source));
    }

    /// Refresh the mixer's playing-sound bookkeeping after `delay`
    fn schedule_refresh(&self, delay: Duration) {
        schedule_refresh(Arc::clone(&self.mixer), Arc::clone(&self.state), delay);
    }
}

fn schedule_refresh(mixer: Arc<dyn Mixer>, state: Arc<SharedState>, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        mixer.update_playing_sounds();
        state.broadcast_event(MediaEvent::playing_sounds_refreshed());
    });
}
