//! Tag-based fade-out and removal of channels

use super::MediaManager;
use crate::media::{Channel, CompletionOutcome, RESERVED_TAGS};
use mediactl_common::MediaEvent;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Which channels a teardown request applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every channel
    All,

    /// Every channel without a reserved tag (`SPECIAL`, `REGION`, `SPEAKER`)
    Ordinary,

    /// Channels carrying exactly this tag; their sounds are flagged as shut down
    Tagged(String),
}

impl Selection {
    /// `all` wins over `sound_id`; an absent or empty id means ordinary channels
    pub fn from_request(sound_id: Option<&str>, all: bool) -> Self {
        if all {
            return Selection::All;
        }
        match sound_id {
            Some(id) if !id.is_empty() => Selection::Tagged(id.to_string()),
            _ => Selection::Ordinary,
        }
    }

    pub fn matches(&self, channel: &dyn Channel) -> bool {
        match self {
            Selection::All => true,
            Selection::Ordinary => !RESERVED_TAGS.iter().any(|tag| channel.has_tag(tag)),
            Selection::Tagged(tag) => channel.has_tag(tag),
        }
    }
}

/// Fade duration for a teardown
///
/// `instantly` forces zero, otherwise the requested transition or `default`.
pub fn effective_fade(transition: Option<Duration>, instantly: bool, default: Duration) -> Duration {
    if instantly {
        return Duration::ZERO;
    }
    transition.unwrap_or(default)
}

impl MediaManager {
    /// Fade out and remove channels
    ///
    /// `transition` is in milliseconds (default `default_fade`); `instantly`
    /// overrides it with zero. Selection runs over a snapshot of the mixer's
    /// channels. Each selected channel fades to zero and is removed only
    /// after its fade completes. Returns how many channels were selected;
    /// zero matches is not an error.
    pub fn destroy_sounds(
        &self,
        sound_id: Option<&str>,
        all: bool,
        instantly: bool,
        transition: Option<u64>,
    ) -> usize {
        debug!("starting to quit fade {:?}", sound_id);

        let selection = Selection::from_request(sound_id, all);
        let duration = effective_fade(
            transition.map(Duration::from_millis),
            instantly,
            self.config.default_fade,
        );

        let mut selected = 0;
        for channel in self.mixer.channels() {
            if !selection.matches(channel.as_ref()) {
                continue;
            }

            if let Selection::Tagged(_) = selection {
                for sound in channel.sounds() {
                    sound.mark_shut_down();
                }
            }

            self.fade_and_remove(channel, duration);
            selected += 1;
        }

        debug!("{:?} teardown selected {} channel(s) over {:?}", selection, selected, duration);
        selected
    }

    fn fade_and_remove(&self, channel: Arc<dyn Channel>, duration: Duration) {
        let id = channel.id();
        self.state.broadcast_event(MediaEvent::channel_fade_started(
            id,
            channel.tags(),
            duration.as_millis() as u64,
        ));

        let faded = channel.fade_channel(0, duration);
        let mixer = Arc::clone(&self.mixer);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            match faded.await {
                CompletionOutcome::Fired => {
                    mixer.remove_channel(id);
                    state.broadcast_event(MediaEvent::channel_removed(id));
                }
                CompletionOutcome::Abandoned => {
                    warn!("Fade of channel {} never completed, leaving it registered", id);
                }
            }
        });
    }
}
