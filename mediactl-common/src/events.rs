//! Event types for the mediactl event stream
//!
//! Events are broadcast by the orchestrator whenever observable media state
//! changes, and are forwarded verbatim to SSE clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// mediactl event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MediaEvent {
    /// Master volume accepted and propagated to the mixer
    VolumeChanged {
        volume: i32,
        timestamp: DateTime<Utc>,
    },

    /// Boot sound finished loading and started playing
    BootSoundStarted {
        source: String,
        channel_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// Boot sound could not be loaded; it will never play this session
    BootSoundFailed {
        source: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Mixer reconciled its bookkeeping of playing sounds
    PlayingSoundsRefreshed {
        timestamp: DateTime<Utc>,
    },

    /// Channel selected for teardown and fading towards silence
    ChannelFadeStarted {
        channel_id: Uuid,
        tags: Vec<String>,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// Channel removed from the mixer after its fade completed
    ChannelRemoved {
        channel_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// Ambiance source handed to the mixer
    AmbianceChanged {
        source: String,
        timestamp: DateTime<Utc>,
    },
}

impl MediaEvent {
    pub fn volume_changed(volume: i32) -> Self {
        MediaEvent::VolumeChanged {
            volume,
            timestamp: Utc::now(),
        }
    }

    pub fn boot_sound_started(source: impl Into<String>, channel_id: Uuid) -> Self {
        MediaEvent::BootSoundStarted {
            source: source.into(),
            channel_id,
            timestamp: Utc::now(),
        }
    }

    pub fn boot_sound_failed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        MediaEvent::BootSoundFailed {
            source: source.into(),
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn playing_sounds_refreshed() -> Self {
        MediaEvent::PlayingSoundsRefreshed {
            timestamp: Utc::now(),
        }
    }

    pub fn channel_fade_started(channel_id: Uuid, tags: Vec<String>, duration_ms: u64) -> Self {
        MediaEvent::ChannelFadeStarted {
            channel_id,
            tags,
            duration_ms,
            timestamp: Utc::now(),
        }
    }

    pub fn channel_removed(channel_id: Uuid) -> Self {
        MediaEvent::ChannelRemoved {
            channel_id,
            timestamp: Utc::now(),
        }
    }

    pub fn ambiance_changed(source: impl Into<String>) -> Self {
        MediaEvent::AmbianceChanged {
            source: source.into(),
            timestamp: Utc::now(),
        }
    }

    /// Event name used as the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            MediaEvent::VolumeChanged { .. } => "VolumeChanged",
            MediaEvent::BootSoundStarted { .. } => "BootSoundStarted",
            MediaEvent::BootSoundFailed { .. } => "BootSoundFailed",
            MediaEvent::PlayingSoundsRefreshed { .. } => "PlayingSoundsRefreshed",
            MediaEvent::ChannelFadeStarted { .. } => "ChannelFadeStarted",
            MediaEvent::ChannelRemoved { .. } => "ChannelRemoved",
            MediaEvent::AmbianceChanged { .. } => "AmbianceChanged",
        }
    }
}
