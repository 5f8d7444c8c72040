//! In-process collaborator backend
//!
//! Implements [`Mixer`](crate::media::Mixer), [`Channel`](crate::media::Channel)
//! and [`Sound`](crate::media::Sound) without an audio device: volumes and
//! fades are bookkeeping, and playback runs on a virtual clock. Used by the
//! `mediactl` binary and by end-to-end tests.

pub mod channel;
pub mod mixer;
pub mod sound;

pub use channel::LocalChannel;
pub use mixer::LocalMixer;
pub use sound::{LocalSound, SoundState};
