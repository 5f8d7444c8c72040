//! Fade curves for channel volume transitions
//!
//! A channel fade moves a channel's local volume from its current level to a
//! target level over a duration. The curve shapes how the level travels
//! between the two points; `progress` runs from 0.0 (fade start) to 1.0
//! (fade end).

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Fade curve types
///
/// - Linear: constant rate of change
/// - Exponential: slow start, fast finish
/// - Logarithmic: fast start, slow finish (natural-sounding fade-out)
/// - SCurve: smooth acceleration and deceleration
/// - EqualPower: constant perceived loudness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    /// v(t) = t
    #[default]
    Linear,

    /// v(t) = t²
    Exponential,

    /// v(t) = 1 - (1-t)²
    Logarithmic,

    /// v(t) = 0.5 × (1 - cos(π × t))
    SCurve,

    /// v(t) = sin(t × π/2)
    EqualPower,
}

impl FadeCurve {
    /// Fraction of the transition covered at `progress` (0.0 to 1.0)
    pub fn shape(&self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);

        match self {
            FadeCurve::Linear => t,
            FadeCurve::Exponential => t * t,
            FadeCurve::Logarithmic => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
            FadeCurve::SCurve => 0.5 * (1.0 - (std::f32::consts::PI * t).cos()),
            FadeCurve::EqualPower => (t * FRAC_PI_2).sin(),
        }
    }

    /// Level between `from` and `to` at `progress`
    ///
    /// Works in both directions: fading down (`from > to`) and up.
    pub fn interpolate(&self, from: f32, to: f32, progress: f32) -> f32 {
        from + (to - from) * self.shape(progress)
    }
}
