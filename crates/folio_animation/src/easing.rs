//! Easing curves
//!
//! Every curve except [`Easing::ScrollExpo`] maps 0 to exactly 0 and 1 to
//! exactly 1, so a tween rendered at either end lands on its keyframe value
//! without rounding drift.

/// Easing function applied to linear progress in `[0, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// No easing
    #[default]
    Linear,
    /// Cubic ease-in (`power2.in`)
    EaseInCubic,
    /// Cubic ease-in-out
    EaseInOutCubic,
    /// Quartic ease-out (`power3.out`)
    EaseOutQuart,
    /// Exponential ease-out (`expo.out`)
    EaseOutExpo,
    /// Exponential ease-in-out (`expo.inOut`)
    EaseInOutExpo,
    /// Smooth-scroll curve `min(1, 1.001 - 2^(-10 t))`
    ///
    /// Starts slightly above zero, which makes the first frame of a wheel
    /// gesture move immediately.
    ScrollExpo,
}

impl Easing {
    /// Map linear progress to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInCubic => t * t * t,
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::EaseInOutExpo => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::ScrollExpo => (1.001 - 2f32.powf(-10.0 * t)).min(1.0),
        }
    }
}
