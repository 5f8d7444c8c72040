//! Boot sound sequencing

use super::{schedule_refresh, MediaManager};
use crate::media::{FULL_CHANNEL_VOLUME, STARTSOUND_TAG};
use mediactl_common::MediaEvent;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which path `post_boot` took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    /// No boot sound: only a delayed refresh was scheduled
    RefreshScheduled,

    /// Boot sound is loading; it plays once the load succeeds
    BootSoundPending,

    /// Boot already ran this session; nothing was done
    AlreadyBooted,
}

impl MediaManager {
    /// Run the post-boot sequence, once per session
    ///
    /// Without a boot sound, refreshes the mixer's playing sounds after
    /// `boot_refresh_delay` to pick up sounds that started loading during
    /// boot. With one, builds a `startsound` channel and plays the sound once
    /// it has loaded; the refresh then follows `boot_sound_refresh_delay`
    /// after playback ends.
    ///
    /// A load that fails or never resolves means the boot sound never plays.
    pub fn post_boot(&self, boot_source: Option<&str>) -> BootOutcome {
        if self.booted.swap(true, Ordering::SeqCst) {
            warn!("Post-boot sequence already ran, ignoring");
            return BootOutcome::AlreadyBooted;
        }

        let Some(source) = boot_source.filter(|s| !s.is_empty()) else {
            debug!(
                "No boot sound configured, refreshing playing sounds in {:?}",
                self.config.boot_refresh_delay
            );
            self.schedule_refresh(self.config.boot_refresh_delay);
            return BootOutcome::RefreshScheduled;
        };

        let channel = self.mixer.new_channel(STARTSOUND_TAG);
        let sound = self.mixer.new_sound(source);

        let finished = sound.on_finish();
        let mixer = Arc::clone(&self.mixer);
        let state = Arc::clone(&self.state);
        let tail_delay = self.config.boot_sound_refresh_delay;
        tokio::spawn(async move {
            if finished.await.is_fired() {
                schedule_refresh(mixer, state, tail_delay);
            }
        });

        let mixer = Arc::clone(&self.mixer);
        let state = Arc::clone(&self.state);
        let source = source.to_string();
        tokio::spawn(async move {
            if let Err(e) = sound.finalize().await {
                info!("Boot sound {} will not play: {}", source, e);
                state.broadcast_event(MediaEvent::boot_sound_failed(&source, e.to_string()));
                return;
            }

            mixer.add_channel(Arc::clone(&channel));
            channel.add_sound(Arc::clone(&sound));
            channel.set_channel_volume(FULL_CHANNEL_VOLUME);
            channel.update_from_master_volume();
            sound.finish();

            info!("Boot sound {} started on channel {}", source, channel.id());
            state.broadcast_event(MediaEvent::boot_sound_started(&source, channel.id()));
        });

        BootOutcome::BootSoundPending
    }
}
