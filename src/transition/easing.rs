//! Easing curves for property transitions

use serde::{Deserialize, Serialize};

/// Interpolation curve applied to the normalized transition progress.
///
/// Both curves map [0, 1] onto [0, 1] monotonically and are exact at the
/// endpoints, so a finished transition always lands on its submitted end
/// value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    /// Identity curve, constant speed
    Linear,
    /// Smoothstep curve (3f² − 2f³), slow start and finish
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map a normalized progress fraction through the curve.
    ///
    /// Input outside [0, 1] is clamped before the curve is applied.
    pub fn apply(self, fraction: f32) -> f32 {
        let f = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => f,
            Easing::EaseInOut => f * f * (3.0 - 2.0 * f),
        }
    }
}
