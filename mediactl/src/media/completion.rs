//! Single-fire completion signals
//!
//! Asynchronous collaborator operations (fades, natural end of playback)
//! report completion through a [`Completion`] future paired with a
//! [`CompletionSignal`]. Firing consumes the signal, so a completion can
//! resolve at most once. A signal dropped without firing resolves the future
//! as [`CompletionOutcome::Abandoned`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// How a completion resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The operation signalled completion
    Fired,

    /// The signal was dropped without firing
    Abandoned,
}

impl CompletionOutcome {
    pub fn is_fired(self) -> bool {
        self == CompletionOutcome::Fired
    }
}

/// Sending half, held by the collaborator performing the operation
#[derive(Debug)]
pub struct CompletionSignal {
    tx: oneshot::Sender<()>,
}

impl CompletionSignal {
    /// Signal completion
    pub fn fire(self) {
        // Receiver gone means nobody is waiting
        let _ = self.tx.send(());
    }
}

/// Receiving half, awaited by the orchestrator
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<()>,
}

/// Create a linked signal/completion pair
pub fn completion() -> (CompletionSignal, Completion) {
    let (tx, rx) = oneshot::channel();
    (CompletionSignal { tx }, Completion { rx })
}

impl Future for Completion {
    type Output = CompletionOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx).poll(cx).map(|result| match result {
            Ok(()) => CompletionOutcome::Fired,
            Err(_) => CompletionOutcome::Abandoned,
        })
    }
}
