//! In-process sound with a virtual playback clock
//!
//! No decoding happens here: `finalize` checks that a local source exists,
//! and playback is a timer of the configured length that `stop` can cut short.

use crate::error::{Error, Result};
use crate::media::{completion, Completion, CompletionSignal, Sound};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Sound lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundState {
    Created,
    Ready,
    Playing,
    Finished,
}

struct Inner {
    source: String,
    length: Duration,
    state: Mutex<SoundState>,
    shut_down: AtomicBool,
    finish_signal: Mutex<Option<CompletionSignal>>,
}

/// Reference [`Sound`] implementation
pub struct LocalSound {
    inner: Arc<Inner>,
}

impl LocalSound {
    pub fn new(source: impl Into<String>, length: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                source: source.into(),
                length,
                state: Mutex::new(SoundState::Created),
                shut_down: AtomicBool::new(false),
                finish_signal: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> SoundState {
        *self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: SoundState) {
        *self.inner.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

/// Local filesystem path named by `source`, if any
///
/// `file://` URIs and scheme-less strings are local; anything else with a
/// scheme (`http://`, `https://`, ...) is remote.
fn local_path(source: &str) -> Option<&Path> {
    if let Some(path) = source.strip_prefix("file://") {
        return Some(Path::new(path));
    }
    if source.contains("://") {
        return None;
    }
    Some(Path::new(source))
}

#[async_trait]
impl Sound for LocalSound {
    fn source(&self) -> &str {
        &self.inner.source
    }

    async fn finalize(&self) -> Result<()> {
        let source = self.inner.source.trim();
        if source.is_empty() {
            return Err(Error::Load("empty sound source".to_string()));
        }

        if let Some(path) = local_path(source) {
            tokio::fs::metadata(path)
                .await
                .map_err(|e| Error::Load(format!("{}: {}", source, e)))?;
        }

        self.set_state(SoundState::Ready);
        debug!("Sound ready: {}", source);
        Ok(())
    }

    fn on_finish(&self) -> Completion {
        let (signal, completion) = completion();
        *self.inner.finish_signal.lock().unwrap_or_else(PoisonError::into_inner) = Some(signal);
        completion
    }

    fn finish(&self) {
        {
            let mut state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state != SoundState::Ready {
                warn!("Ignoring playback start for {} in state {:?}", self.inner.source, *state);
                return;
            }
            *state = SoundState::Playing;
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.length).await;

            {
                let mut state = inner.state.lock().unwrap_or_else(PoisonError::into_inner);
                if *state != SoundState::Playing {
                    // Stopped early
                    return;
                }
                *state = SoundState::Finished;
            }
            let signal = inner.finish_signal.lock().unwrap_or_else(PoisonError::into_inner).take();

            // A forced shutdown is not a natural end; the pending completion is abandoned
            if inner.shut_down.load(Ordering::SeqCst) {
                debug!("Sound {} ended after shutdown", inner.source);
                return;
            }

            debug!("Sound {} finished playing", inner.source);
            if let Some(signal) = signal {
                signal.fire();
            }
        });
    }

    fn is_playing(&self) -> bool {
        self.state() == SoundState::Playing
    }

    fn stop(&self) {
        let previous = {
            let mut state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *state, SoundState::Finished)
        };
        // Dropping the signal abandons the pending completion
        self.inner.finish_signal.lock().unwrap_or_else(PoisonError::into_inner).take();

        if previous == SoundState::Playing {
            debug!("Sound {} stopped", self.inner.source);
        }
    }

    fn mark_shut_down(&self) {
        self.inner.shut_down.store(true, Ordering::SeqCst);
    }

    fn got_shut_down(&self) -> bool {
        self.inner.shut_down.load(Ordering::SeqCst)
    }
}
