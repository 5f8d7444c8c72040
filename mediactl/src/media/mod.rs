//! Collaborator contracts driven by the orchestrator
//!
//! The orchestrator owns no audio state. It sequences calls across three
//! collaborators:
//!
//! - [`Mixer`]: owns the active channels and the mirrored master volume
//! - [`Channel`]: a tagged group of sounds sharing one local volume
//! - [`Sound`]: one loadable, playable asset
//!
//! Ownership is strictly top-down (a mixer owns many channels, a channel owns many sounds).

pub mod completion;

pub use completion::{completion, Completion, CompletionOutcome, CompletionSignal};

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Explicit handle for a channel
pub type ChannelId = Uuid;

/// Tag carried by the channel created for the boot sound
pub const STARTSOUND_TAG: &str = "startsound";

/// Channel classes left alone by an untargeted teardown
pub const RESERVED_TAGS: [&str; 3] = ["SPECIAL", "REGION", "SPEAKER"];

/// Local volume a freshly started channel plays at, before master scaling
pub const FULL_CHANNEL_VOLUME: i32 = 100;

/// One loadable, playable audio asset
#[async_trait]
pub trait Sound: Send + Sync {
    /// Source reference (path or URI)
    fn source(&self) -> &str;

    /// Load and prepare the asset
    ///
    /// May fail, or never resolve if the asset never becomes available.
    async fn finalize(&self) -> Result<()>;

    /// Completion that fires once, at natural end of playback
    ///
    /// Registering again replaces the previous registration, which then
    /// resolves as abandoned.
    fn on_finish(&self) -> Completion;

    /// Begin playback
    fn finish(&self);

    /// Started and not yet ended, naturally or by `stop`
    fn is_playing(&self) -> bool;

    /// End playback early
    ///
    /// A pending `on_finish` completion resolves as abandoned, never fired.
    fn stop(&self);

    /// Flag this sound as stopped by a forced teardown
    ///
    /// The flag is monotonic: nothing clears it once set.
    fn mark_shut_down(&self);

    fn got_shut_down(&self) -> bool;
}

/// Tagged group of sounds sharing one local volume
pub trait Channel: Send + Sync {
    fn id(&self) -> ChannelId;

    fn tags(&self) -> Vec<String>;

    /// Exact membership check against the tag set
    fn has_tag(&self, tag: &str) -> bool;

    fn add_sound(&self, sound: Arc<dyn Sound>);

    /// Member sounds in insertion order
    fn sounds(&self) -> Vec<Arc<dyn Sound>>;

    /// Set local volume (pre-master-scaling)
    fn set_channel_volume(&self, volume: i32);

    fn channel_volume(&self) -> i32;

    /// Recompute effective output from the mixer's master volume
    fn update_from_master_volume(&self);

    /// Move local volume to `target` over `duration`
    ///
    /// The returned completion fires exactly once and always asynchronously,
    /// including for a zero duration.
    fn fade_channel(&self, target: i32, duration: Duration) -> Completion;
}

/// Owner of the active channel set and the mirrored master volume
pub trait Mixer: Send + Sync {
    /// Create a channel carrying a single tag (not yet registered)
    fn new_channel(&self, tag: &str) -> Arc<dyn Channel>;

    /// Create a sound bound to `source` (not yet loaded)
    fn new_sound(&self, source: &str) -> Arc<dyn Sound>;

    fn add_channel(&self, channel: Arc<dyn Channel>);

    /// Deregister a channel and stop its sounds; no-op when absent
    fn remove_channel(&self, id: ChannelId);

    /// Owned snapshot of the registered channels
    ///
    /// Callers may remove channels while walking the snapshot.
    fn channels(&self) -> Vec<Arc<dyn Channel>>;

    /// Mirror the master volume and apply it to every channel
    fn set_master_volume(&self, volume: i32);

    fn master_volume(&self) -> i32;

    /// Reconcile bookkeeping of currently playing sounds (idempotent)
    fn update_playing_sounds(&self);

    /// Start or replace the ambiance source
    fn setup_ambiance_sound(&self, source: &str);
}
