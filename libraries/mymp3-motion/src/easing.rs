//! Easing curves for drawer motion
//!
//! Every curve is monotonic on `[0, 1]`, maps 0 to 0 and 1 to 1, and never
//! leaves that range. A tween driven by any of them therefore stays on the
//! segment between its endpoints.
//! - Linear: constant speed
//! - InCubic: slow start, fast finish
//! - OutCubic: fast start, gentle landing (default for sliding panels)
//! - InOutSine: slow start and end
//! - OutQuad: milder version of OutCubic

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Easing curve type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    Linear,

    /// Cubic ease-in: t^3
    InCubic,

    /// Cubic ease-out: 1 - (1 - t)^3
    ///
    /// Fast initial movement that decelerates into place. Panels feel
    /// responsive to the click and do not slam into their resting position.
    #[default]
    OutCubic,

    /// Sinusoidal ease-in-out
    InOutSine,

    /// Quadratic ease-out: 1 - (1 - t)^2
    OutQuad,
}

impl Easing {
    /// Eased progress for linear progress `t`
    ///
    /// # Arguments
    /// * `t` - Normalized time (clamped to 0.0..=1.0)
    ///
    /// # Returns
    /// Fraction of the distance covered (0.0 to 1.0)
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let eased = match self {
            Easing::Linear => t,
            Easing::InCubic => t * t * t,
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::InOutSine => (1.0 - (PI * t).cos()) * 0.5,
            Easing::OutQuad => 1.0 - (1.0 - t).powi(2),
        };

        // Float rounding in the trig form can land a hair outside
        eased.clamp(0.0, 1.0)
    }

    /// Get a human-readable name for the curve
    pub fn display_name(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::InCubic => "Cubic In",
            Easing::OutCubic => "Cubic Out",
            Easing::InOutSine => "Sine In-Out",
            Easing::OutQuad => "Quadratic Out",
        }
    }
}
