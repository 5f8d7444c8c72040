//! Shared orchestrator state
//!
//! Holds the master volume and the event broadcaster. The volume lives behind
//! an async mutex that volume setters hold for their whole update, so the
//! stored value and the mixer's mirror always move together.

use mediactl_common::MediaEvent;
use tokio::sync::{broadcast, Mutex, MutexGuard};

/// State shared by the orchestrator and the HTTP surface
pub struct SharedState {
    /// Master volume (nominally 0-100, not clamped)
    master_volume: Mutex<i32>,

    /// Event broadcaster for SSE listeners
    event_tx: broadcast::Sender<MediaEvent>,
}

impl SharedState {
    pub fn new(initial_volume: i32) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            master_volume: Mutex::new(initial_volume),
            event_tx,
        }
    }

    /// Broadcast an event to all listeners
    pub fn broadcast_event(&self, event: MediaEvent) {
        // No receivers is fine
        let _ = self.event_tx.send(event);
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<MediaEvent> {
        self.event_tx.subscribe()
    }

    pub async fn get_volume(&self) -> i32 {
        *self.master_volume.lock().await
    }

    /// Exclusive access to the master volume for a full set-and-propagate step
    pub async fn lock_volume(&self) -> MutexGuard<'_, i32> {
        self.master_volume.lock().await
    }
}
