//! # mediactl Common Library
//!
//! Shared code for the mediactl workspace:
//! - Error type used by configuration loading
//! - Event types (`MediaEvent`) broadcast by the orchestrator
//! - Bootstrap configuration loading
//! - Fade curve definitions used by channel fades

pub mod config;
pub mod error;
pub mod events;
pub mod fade_curves;

pub use error::{Error, Result};
pub use events::MediaEvent;
pub use fade_curves::FadeCurve;
