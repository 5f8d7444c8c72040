//! In-process mixer holding the active channel set

use super::{LocalChannel, LocalSound};
use crate::config::BackendConfig;
use crate::media::{Channel, ChannelId, Mixer, Sound};
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Reference [`Mixer`] implementation
pub struct LocalMixer {
    channels: Mutex<Vec<Arc<dyn Channel>>>,
    master: Arc<AtomicI32>,
    playing: Mutex<Vec<String>>,
    refreshes: AtomicUsize,
    ambiance: Mutex<Option<String>>,
    config: BackendConfig,
}

impl LocalMixer {
    pub fn new(initial_master: i32, config: BackendConfig) -> Self {
        Self {
            channels: Mutex::new(Vec::new()),
            master: Arc::new(AtomicI32::new(initial_master)),
            playing: Mutex::new(Vec::new()),
            refreshes: AtomicUsize::new(0),
            ambiance: Mutex::new(None),
            config,
        }
    }

    /// Channel carrying several tags, sharing this mixer's master volume
    pub fn new_tagged_channel(&self, tags: &[&str]) -> Arc<LocalChannel> {
        Arc::new(LocalChannel::new(tags, Arc::clone(&self.master), self.config))
    }

    /// Sources counted as playing at the last refresh
    pub fn playing_sounds(&self) -> Vec<String> {
        self.playing.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    pub fn ambiance_source(&self) -> Option<String> {
        self.ambiance.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Mixer for LocalMixer {
    fn new_channel(&self, tag: &str) -> Arc<dyn Channel> {
        self.new_tagged_channel(&[tag])
    }

    fn new_sound(&self, source: &str) -> Arc<dyn Sound> {
        Arc::new(LocalSound::new(source, self.config.sound_length))
    }

    fn add_channel(&self, channel: Arc<dyn Channel>) {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        if channels.iter().any(|c| c.id() == channel.id()) {
            debug!("Channel {} already registered", channel.id());
            return;
        }
        debug!("Adding channel {} {:?}", channel.id(), channel.tags());
        channels.push(channel);
    }

    fn remove_channel(&self, id: ChannelId) {
        let removed = {
            let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
            let index = channels.iter().position(|c| c.id() == id);
            index.map(|index| channels.remove(index))
        };

        // A sound never outlives its channel
        if let Some(channel) = removed {
            for sound in channel.sounds() {
                sound.stop();
            }
            debug!("Removed channel {}", id);
        }
    }

    fn channels(&self) -> Vec<Arc<dyn Channel>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_master_volume(&self, volume: i32) {
        self.master.store(volume, Ordering::SeqCst);
        for channel in self.channels() {
            channel.update_from_master_volume();
        }
    }

    fn master_volume(&self) -> i32 {
        self.master.load(Ordering::SeqCst)
    }

    fn update_playing_sounds(&self) {
        let playing: Vec<String> = self
            .channels()
            .iter()
            .flat_map(|channel| channel.sounds())
            .filter(|sound| sound.is_playing() && !sound.got_shut_down())
            .map(|sound| sound.source().to_string())
            .collect();

        debug!("Playing sounds refreshed: {} active", playing.len());
        *self.playing.lock().unwrap_or_else(PoisonError::into_inner) = playing;
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }

    fn setup_ambiance_sound(&self, source: &str) {
        info!("Ambiance source set to {}", source);
        *self.ambiance.lock().unwrap_or_else(PoisonError::into_inner) = Some(source.to_string());
    }
}
