//! # mediactl Playback Orchestrator Library
//!
//! Sequences playback lifecycle for a small audio subsystem:
//! - plays a one-shot boot sound once the asset has loaded
//! - propagates a single master volume down Mixer → Channel → Sound
//! - fades out and removes channels selected by tag
//!
//! Decoding, mixing and fading belong to the [`media`] collaborators
//! ([`Mixer`], [`Channel`], [`Sound`]); [`MediaManager`] only decides *when*
//! their operations run. [`backend`] provides an in-process implementation
//! of the collaborators with volume bookkeeping and a virtual playback clock.

pub mod api;
pub mod backend;
pub mod config;
pub mod db;
pub mod error;
pub mod manager;
pub mod media;
pub mod state;
pub mod view;

pub use error::{Error, Result};
pub use manager::MediaManager;
pub use media::{Channel, ChannelId, Completion, Mixer, Sound};
pub use state::SharedState;
