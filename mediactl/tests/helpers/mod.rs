//! Test helpers for mediactl integration tests
//!
//! Recording mock collaborators: every call the orchestrator makes on the
//! mixer, its channels and its sounds lands in one shared, ordered call log.

#![allow(dead_code)]

use async_trait::async_trait;
use mediactl::db::SettingsStore;
use mediactl::media::{completion, Channel, ChannelId, Completion, CompletionSignal, Mixer, Sound};
use mediactl::view::VolumeView;
use mediactl::{Error, Result};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use uuid::Uuid;

/// One observed collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AddChannel(ChannelId),
    RemoveChannel(ChannelId),
    SetMasterVolume(i32),
    UpdatePlayingSounds,
    SetupAmbiance(String),
    AddSound { channel: ChannelId, source: String },
    SetChannelVolume { channel: ChannelId, volume: i32 },
    UpdateFromMaster { channel: ChannelId, master: i32 },
    Fade { channel: ChannelId, target: i32, duration: Duration },
    Finalize(String),
    Finish(String),
    MarkShutDown(String),
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    pub fn fades(&self) -> Vec<(ChannelId, i32, Duration)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Fade { channel, target, duration } => Some((channel, target, duration)),
                _ => None,
            })
            .collect()
    }

    pub fn removals(&self) -> Vec<ChannelId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::RemoveChannel(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

/// How a mock sound's finalize behaves
#[derive(Clone)]
pub enum FinalizeBehavior {
    Immediate,
    Fail,
    Never,
    Gated(Arc<Notify>),
}

pub struct MockSound {
    source: String,
    log: CallLog,
    behavior: FinalizeBehavior,
    shut_down: AtomicBool,
    playing: AtomicBool,
    finish_signal: Mutex<Option<CompletionSignal>>,
}

impl MockSound {
    pub fn new(source: &str, log: CallLog, behavior: FinalizeBehavior) -> Self {
        Self {
            source: source.to_string(),
            log,
            behavior,
            shut_down: AtomicBool::new(false),
            playing: AtomicBool::new(false),
            finish_signal: Mutex::new(None),
        }
    }

    /// Simulate the natural end of playback
    pub fn end_playback(&self) {
        self.playing.store(false, Ordering::SeqCst);
        if let Some(signal) = self.finish_signal.lock().unwrap().take() {
            signal.fire();
        }
    }
}

#[async_trait]
impl Sound for MockSound {
    fn source(&self) -> &str {
        &self.source
    }

    async fn finalize(&self) -> Result<()> {
        self.log.push(Call::Finalize(self.source.clone()));
        match &self.behavior {
            FinalizeBehavior::Immediate => Ok(()),
            FinalizeBehavior::Fail => Err(Error::Load(format!("{} not found", self.source))),
            FinalizeBehavior::Never => std::future::pending().await,
            FinalizeBehavior::Gated(gate) => {
                gate.notified().await;
                Ok(())
            }
        }
    }

    fn on_finish(&self) -> Completion {
        let (signal, done) = completion();
        *self.finish_signal.lock().unwrap() = Some(signal);
        done
    }

    fn finish(&self) {
        self.log.push(Call::Finish(self.source.clone()));
        self.playing.store(true, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
        self.finish_signal.lock().unwrap().take();
    }

    fn mark_shut_down(&self) {
        self.log.push(Call::MarkShutDown(self.source.clone()));
        self.shut_down.store(true, Ordering::SeqCst);
    }

    fn got_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

pub struct MockChannel {
    id: ChannelId,
    tags: BTreeSet<String>,
    log: CallLog,
    master: Arc<AtomicI32>,
    volume: AtomicI32,
    sounds: Mutex<Vec<Arc<dyn Sound>>>,
}

impl Channel for MockChannel {
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
        self.log.push(Call::AddSound {
            channel: self.id,
            source: sound.source().to_string(),
        });
        self.sounds.lock().unwrap().push(sound);
    }

    fn sounds(&self) -> Vec<Arc<dyn Sound>> {
        self.sounds.lock().unwrap().clone()
    }

    fn set_channel_volume(&self, volume: i32) {
        self.log.push(Call::SetChannelVolume { channel: self.id, volume });
        self.volume.store(volume, Ordering::SeqCst);
    }

    fn channel_volume(&self) -> i32 {
        self.volume.load(Ordering::SeqCst)
    }

    fn update_from_master_volume(&self) {
        self.log.push(Call::UpdateFromMaster {
            channel: self.id,
            master: self.master.load(Ordering::SeqCst),
        });
    }

    fn fade_channel(&self, target: i32, duration: Duration) -> Completion {
        self.log.push(Call::Fade { channel: self.id, target, duration });
        let (signal, done) = completion();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            if !duration.is_zero() {
                tokio::time::sleep(duration).await;
            }
            signal.fire();
        });
        done
    }
}

pub struct MockMixer {
    log: CallLog,
    master: Arc<AtomicI32>,
    channels: Mutex<Vec<Arc<dyn Channel>>>,
    created_channels: Mutex<Vec<Arc<MockChannel>>>,
    created_sounds: Mutex<Vec<Arc<MockSound>>>,
    finalize: FinalizeBehavior,
}

impl MockMixer {
    pub fn new(finalize: FinalizeBehavior) -> Self {
        Self {
            log: CallLog::default(),
            master: Arc::new(AtomicI32::new(0)),
            channels: Mutex::new(Vec::new()),
            created_channels: Mutex::new(Vec::new()),
            created_sounds: Mutex::new(Vec::new()),
            finalize,
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Register a channel with `tags` and one sound per entry of `sources`,
    /// then clear the call log
    pub fn seed_channel(&self, tags: &[&str], sources: &[&str]) -> Arc<MockChannel> {
        let channel = self.make_channel(tags);
        for source in sources {
            let sound = Arc::new(MockSound::new(source, self.log.clone(), FinalizeBehavior::Immediate));
            self.created_sounds.lock().unwrap().push(Arc::clone(&sound));
            channel.add_sound(sound);
        }
        self.add_channel(channel.clone());
        self.log.clear();
        channel
    }

    pub fn created_channels(&self) -> Vec<Arc<MockChannel>> {
        self.created_channels.lock().unwrap().clone()
    }

    pub fn created_sounds(&self) -> Vec<Arc<MockSound>> {
        self.created_sounds.lock().unwrap().clone()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.lock().unwrap().len()
    }

    fn make_channel(&self, tags: &[&str]) -> Arc<MockChannel> {
        let channel = Arc::new(MockChannel {
            id: Uuid::new_v4(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            log: self.log.clone(),
            master: Arc::clone(&self.master),
            volume: AtomicI32::new(100),
            sounds: Mutex::new(Vec::new()),
        });
        self.created_channels.lock().unwrap().push(Arc::clone(&channel));
        channel
    }
}

impl Mixer for MockMixer {
    fn new_channel(&self, tag: &str) -> Arc<dyn Channel> {
        self.make_channel(&[tag])
    }

    fn new_sound(&self, source: &str) -> Arc<dyn Sound> {
        let sound = Arc::new(MockSound::new(source, self.log.clone(), self.finalize.clone()));
        self.created_sounds.lock().unwrap().push(Arc::clone(&sound));
        sound
    }

    fn add_channel(&self, channel: Arc<dyn Channel>) {
        self.log.push(Call::AddChannel(channel.id()));
        self.channels.lock().unwrap().push(channel);
    }

    fn remove_channel(&self, id: ChannelId) {
        self.log.push(Call::RemoveChannel(id));
        self.channels.lock().unwrap().retain(|c| c.id() != id);
    }

    fn channels(&self) -> Vec<Arc<dyn Channel>> {
        self.channels.lock().unwrap().clone()
    }

    fn set_master_volume(&self, volume: i32) {
        self.log.push(Call::SetMasterVolume(volume));
        self.master.store(volume, Ordering::SeqCst);
    }

    fn master_volume(&self) -> i32 {
        self.master.load(Ordering::SeqCst)
    }

    fn update_playing_sounds(&self) {
        self.log.push(Call::UpdatePlayingSounds);
    }

    fn setup_ambiance_sound(&self, source: &str) {
        self.log.push(Call::SetupAmbiance(source.to_string()));
    }
}

/// View that remembers what it was asked to show
#[derive(Debug, Default)]
pub struct RecordingView {
    labels: Mutex<Vec<String>>,
    slider_moves: Mutex<Vec<i32>>,
}

impl RecordingView {
    pub fn labels(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }

    pub fn slider_moves(&self) -> Vec<i32> {
        self.slider_moves.lock().unwrap().clone()
    }
}

impl VolumeView for RecordingView {
    fn render_label(&self, label: &str) {
        self.labels.lock().unwrap().push(label.to_string());
    }

    fn move_slider(&self, volume: i32) {
        self.slider_moves.lock().unwrap().push(volume);
    }
}

/// Settings store whose writes always fail
#[derive(Default)]
pub struct FailingSettings;

#[async_trait]
impl SettingsStore for FailingSettings {
    async fn save_volume(&self, _volume: i32) -> Result<()> {
        Err(Error::Config("settings store offline".to_string()))
    }

    async fn load_volume(&self) -> Result<Option<i32>> {
        Err(Error::Config("settings store offline".to_string()))
    }
}

/// Let spawned tasks run until they block
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
