//! End-to-end tests over the in-process backend
//!
//! Runs on real (short) timers because sound loading touches the filesystem.

use mediactl::backend::LocalMixer;
use mediactl::config::{BackendConfig, MediaConfig};
use mediactl::db::MemorySettings;
use mediactl::manager::BootOutcome;
use mediactl::media::{Channel, Mixer, Sound, STARTSOUND_TAG};
use mediactl::view::LogView;
use mediactl::MediaManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

fn fast_config() -> (MediaConfig, BackendConfig) {
    let media = MediaConfig {
        boot_refresh_delay: Duration::from_millis(20),
        boot_sound_refresh_delay: Duration::from_millis(40),
        default_fade: Duration::from_millis(60),
        default_master_volume: 80,
    };
    let backend = BackendConfig {
        fade_step: Duration::from_millis(5),
        sound_length: Duration::from_millis(50),
        ..BackendConfig::default()
    };
    (media, backend)
}

fn setup() -> (MediaManager, Arc<LocalMixer>) {
    let (_, backend) = fast_config();
    setup_with(backend)
}

fn setup_with(backend: BackendConfig) -> (MediaManager, Arc<LocalMixer>) {
    let (media, _) = fast_config();
    let mixer = Arc::new(LocalMixer::new(media.default_master_volume, backend));
    let manager = MediaManager::new(
        mixer.clone(),
        Arc::new(MemorySettings::default()),
        Arc::new(LogView),
        media,
    );
    (manager, mixer)
}

/// Poll `check` until it holds or two seconds pass
async fn wait_until(check: impl Fn() -> bool) -> bool {
    timeout(Duration::from_secs(2), async {
        while !check() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .is_ok()
}

/// Load and start a sound on `mixer`
async fn play(mixer: &LocalMixer, source: &str) -> Arc<dyn Sound> {
    let sound = mixer.new_sound(source);
    sound.finalize().await.unwrap();
    sound.finish();
    sound
}

#[tokio::test]
async fn test_boot_sound_plays_then_refreshes() {
    let (_, backend) = fast_config();
    let (manager, mixer) = setup_with(BackendConfig {
        sound_length: Duration::from_millis(200),
        ..backend
    });
    let file = tempfile::NamedTempFile::new().unwrap();
    let source = file.path().to_string_lossy().to_string();

    assert_eq!(manager.post_boot(Some(&source)), BootOutcome::BootSoundPending);

    assert!(wait_until(|| mixer.channel_count() == 1).await);
    let channel = mixer.channels().remove(0);
    assert!(channel.has_tag(STARTSOUND_TAG));
    assert_eq!(channel.channel_volume(), 100);
    assert_eq!(channel.sounds()[0].source(), source);

    let sound = channel.sounds().remove(0);
    assert!(sound.is_playing());

    // The refresh follows the end of playback, so the boot sound is gone from it
    assert!(wait_until(|| mixer.refresh_count() == 1).await);
    assert!(!sound.is_playing());
    assert!(mixer.playing_sounds().is_empty());
}

#[tokio::test]
async fn test_removed_boot_channel_never_triggers_refresh() {
    let (_, backend) = fast_config();
    let (manager, mixer) = setup_with(BackendConfig {
        sound_length: Duration::from_millis(300),
        ..backend
    });
    let file = tempfile::NamedTempFile::new().unwrap();
    let source = file.path().to_string_lossy().to_string();

    manager.post_boot(Some(&source));
    assert!(wait_until(|| mixer.channel_count() == 1).await);
    let sound = mixer.channels()[0].sounds().remove(0);

    assert_eq!(manager.destroy_sounds(None, false, true, None), 1);
    assert!(wait_until(|| mixer.channel_count() == 0).await);
    assert!(!sound.is_playing());

    // Well past the sound's length plus the refresh delay
    sleep(Duration::from_millis(600)).await;
    assert_eq!(mixer.refresh_count(), 0);
}

#[tokio::test]
async fn test_missing_boot_sound_never_plays() {
    let (manager, mixer) = setup();

    manager.post_boot(Some("/nonexistent/mediactl/boot.ogg"));
    sleep(Duration::from_millis(300)).await;

    assert_eq!(mixer.channel_count(), 0);
    assert_eq!(mixer.refresh_count(), 0);
}

#[tokio::test]
async fn test_boot_without_sound_refreshes() {
    let (manager, mixer) = setup();

    assert_eq!(manager.post_boot(None), BootOutcome::RefreshScheduled);
    assert!(wait_until(|| mixer.refresh_count() == 1).await);
    assert!(mixer.playing_sounds().is_empty());
}

#[tokio::test]
async fn test_master_volume_reaches_registered_channels() {
    let (manager, mixer) = setup();
    let channel = mixer.new_tagged_channel(&["music"]);
    channel.set_channel_volume(100);
    mixer.add_channel(channel.clone());

    manager.set_master_volume(25).await;

    assert_eq!(mixer.master_volume(), 25);
    assert!((channel.output_level() - 0.25).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_teardown_fades_before_removal() {
    let (manager, mixer) = setup();
    let music = mixer.new_tagged_channel(&["music"]);
    music.set_channel_volume(100);
    mixer.add_channel(music.clone());
    let region = mixer.new_tagged_channel(&["REGION"]);
    region.set_channel_volume(100);
    mixer.add_channel(region.clone());

    assert_eq!(manager.destroy_sounds(None, false, false, Some(200)), 1);

    sleep(Duration::from_millis(60)).await;
    assert_eq!(mixer.channel_count(), 2, "channel removed before its fade finished");
    assert!(music.channel_volume() < 100);

    assert!(wait_until(|| mixer.channel_count() == 1).await);
    assert_eq!(music.channel_volume(), 0);
    assert_eq!(mixer.channels()[0].id(), region.id());
    assert_eq!(region.channel_volume(), 100);
}

#[tokio::test]
async fn test_tagged_teardown_excludes_sounds_from_refresh() {
    let (_, backend) = fast_config();
    let (manager, mixer) = setup_with(BackendConfig {
        sound_length: Duration::from_secs(10),
        ..backend
    });

    let music = mixer.new_channel("music");
    music.add_sound(play(&mixer, "https://cdn.example.com/song.mp3").await);
    mixer.add_channel(music.clone());
    let sfx = mixer.new_channel("sfx");
    sfx.add_sound(play(&mixer, "https://cdn.example.com/hit.wav").await);
    mixer.add_channel(sfx);

    mixer.update_playing_sounds();
    assert_eq!(mixer.playing_sounds().len(), 2);

    manager.destroy_sounds(Some("music"), false, false, Some(500));
    // Still fading, but already out of the playing set
    mixer.update_playing_sounds();

    assert_eq!(mixer.channel_count(), 2);
    assert_eq!(
        mixer.playing_sounds(),
        vec!["https://cdn.example.com/hit.wav".to_string()]
    );
}

#[tokio::test]
async fn test_instant_teardown_of_everything() {
    let (manager, mixer) = setup();
    for tag in ["SPECIAL", "SPEAKER", "music"] {
        mixer.add_channel(mixer.new_channel(tag));
    }

    assert_eq!(manager.destroy_sounds(None, true, true, None), 3);
    assert!(wait_until(|| mixer.channel_count() == 0).await);
}

#[tokio::test]
async fn test_ambiance_forwarding() {
    let (manager, mixer) = setup();

    manager.setup_ambiance_sound(Some(""));
    manager.setup_ambiance_sound(None);
    assert!(mixer.ambiance_source().is_none());

    manager.setup_ambiance_sound(Some("forest.ogg"));
    assert_eq!(mixer.ambiance_source().as_deref(), Some("forest.ogg"));
}
