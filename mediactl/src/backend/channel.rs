//! In-process channel with stepped volume fades

use crate::config::BackendConfig;
use crate::media::{completion, Channel, ChannelId, Completion, Sound};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// Reference [`Channel`] implementation
///
/// Local volume and the master volume it last applied are tracked
/// separately; the effective output level is their product.
pub struct LocalChannel {
    id: ChannelId,
    tags: BTreeSet<String>,
    volume: Arc<AtomicI32>,
    /// Mixer-owned master volume
    master: Arc<AtomicI32>,
    applied_master: AtomicI32,
    sounds: Mutex<Vec<Arc<dyn Sound>>>,
    config: BackendConfig,
}

impl LocalChannel {
    pub fn new<S: AsRef<str>>(tags: &[S], master: Arc<AtomicI32>, config: BackendConfig) -> Self {
        let applied = master.load(Ordering::SeqCst);
        Self {
            id: Uuid::new_v4(),
            tags: tags.iter().map(|t| t.as_ref().to_string()).collect(),
            volume: Arc::new(AtomicI32::new(0)),
            master,
            applied_master: AtomicI32::new(applied),
            sounds: Mutex::new(Vec::new()),
            config,
        }
    }

    /// Effective output level, 1.0 being full scale
    pub fn output_level(&self) -> f32 {
        let volume = self.volume.load(Ordering::SeqCst) as f32 / 100.0;
        let master = self.applied_master.load(Ordering::SeqCst) as f32 / 100.0;
        volume * master
    }
}

impl Channel for LocalChannel {
    fn id(&self) -> ChannelId {
        self.id
    }

    fn tags(&self) -> Vec<String> {
        self.tags.iter().cloned().collect()
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    fn add_sound(&self, sound: Arc<dyn Sound>) {
        self.sounds.lock().unwrap_or_else(PoisonError::into_inner).push(sound);
    }

    fn sounds(&self) -> Vec<Arc<dyn Sound>> {
        self.sounds.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_channel_volume(&self, volume: i32) {
        self.volume.store(volume, Ordering::SeqCst);
    }

    fn channel_volume(&self) -> i32 {
        self.volume.load(Ordering::SeqCst)
    }

    fn update_from_master_volume(&self) {
        self.applied_master
            .store(self.master.load(Ordering::SeqCst), Ordering::SeqCst);
    }

    fn fade_channel(&self, target: i32, duration: Duration) -> Completion {
        let (signal, done) = completion();
        let volume = Arc::clone(&self.volume);
        let curve = self.config.fade_curve;
        let step = self.config.fade_step;
        let id = self.id;

        tokio::spawn(async move {
            let from = volume.load(Ordering::SeqCst) as f32;

            if duration.is_zero() {
                // Completion stays asynchronous even for instant fades
                tokio::task::yield_now().await;
            } else {
                let start = Instant::now();
                let mut ticker = tokio::time::interval(step);
                loop {
                    ticker.tick().await;
                    let elapsed = start.elapsed();
                    if elapsed >= duration {
                        break;
                    }
                    let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
                    let level = curve.interpolate(from, target as f32, progress);
                    volume.store(level.round() as i32, Ordering::SeqCst);
                }
            }

            volume.store(target, Ordering::SeqCst);
            debug!("Channel {} faded to {} over {:?}", id, target, duration);
            signal.fire();
        });

        done
    }
}
