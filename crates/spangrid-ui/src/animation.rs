//! Width transitions for the settle phase.
//!
//! Hosts with native CSS-style transitions only need the start and target
//! widths the controller publishes. Hosts that draw frames themselves sample
//! a [`WidthTween`] instead.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use spangrid_ui::animation::{EasingFunction, WidthTween};
//!
//! let mut tween = WidthTween::new(250.0, 500.0, Duration::from_millis(200))
//!     .easing(EasingFunction::Linear);
//!
//! tween.update(Duration::from_millis(100));
//! assert!((tween.value() - 375.0).abs() < 0.01);
//! ```

use std::time::Duration;

/// Easing curves matching the CSS keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// `linear`
    Linear,
    /// `ease`, the CSS default: `cubic-bezier(0.25, 0.1, 0.25, 1.0)`
    #[default]
    Ease,
    /// `ease-in`
    EaseIn,
    /// `ease-out`
    EaseOut,
    /// `ease-in-out`
    EaseInOut,
}

impl EasingFunction {
    /// CSS keyword for this curve.
    pub fn css_name(&self) -> &'static str {
        match self {
            EasingFunction::Linear => "linear",
            EasingFunction::Ease => "ease",
            EasingFunction::EaseIn => "ease-in",
            EasingFunction::EaseOut => "ease-out",
            EasingFunction::EaseInOut => "ease-in-out",
        }
    }

    /// Apply the easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            EasingFunction::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            EasingFunction::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            EasingFunction::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

/// Evaluate a CSS cubic-bezier timing curve at progress `t`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }

    let bezier = |p1: f32, p2: f32, s: f32| {
        let u = 1.0 - s;
        3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
    };
    let slope = |p1: f32, p2: f32, s: f32| {
        let u = 1.0 - s;
        3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    };

    // Newton-Raphson on x(s) = t, falling back to bisection on flat slopes.
    let mut s = t;
    for _ in 0..8 {
        let error = bezier(x1, x2, s) - t;
        if error.abs() < 1e-5 {
            return bezier(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= error / d;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = t;
    for _ in 0..32 {
        let x = bezier(x1, x2, s);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(y1, y2, s)
}

/// Animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Running,
    Completed,
}

/// Interpolates a pixel width over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthTween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFunction,
    state: AnimationState,
}

impl WidthTween {
    /// Create a tween from `from` to `to` pixels.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: EasingFunction::Ease,
            state: AnimationState::Running,
        }
    }

    /// Set the easing function.
    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn from_width(&self) -> f32 {
        self.from
    }

    pub fn to_width(&self) -> f32 {
        self.to
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Current width.
    pub fn value(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Advance by `dt`.
    ///
    /// Returns true if the tween is still running.
    pub fn update(&mut self, dt: Duration) -> bool {
        if self.state == AnimationState::Completed {
            return false;
        }

        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.elapsed >= self.duration {
            self.state = AnimationState::Completed;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_easing() {
        let easing = EasingFunction::Linear;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_bezier_curves_hit_endpoints() {
        for easing in [
            EasingFunction::Ease,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            let mid = easing.apply(0.5);
            assert!(mid > 0.0 && mid < 1.0, "{easing:?} at 0.5 gave {mid}");
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let mid = EasingFunction::EaseInOut.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_ease_front_loads_progress() {
        // CSS `ease` is ahead of linear at the midpoint.
        assert!(EasingFunction::Ease.apply(0.5) > 0.7);
    }

    #[test]
    fn test_tween_update() {
        let mut tween = WidthTween::new(100.0, 300.0, Duration::from_secs(1))
            .easing(EasingFunction::Linear);

        assert_eq!(tween.value(), 100.0);

        assert!(tween.update(Duration::from_millis(500)));
        assert!((tween.value() - 200.0).abs() < 0.01);

        assert!(!tween.update(Duration::from_millis(500)));
        assert_eq!(tween.value(), 300.0);
        assert_eq!(tween.state(), AnimationState::Completed);
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let tween = WidthTween::new(100.0, 300.0, Duration::ZERO);
        assert_eq!(tween.value(), 300.0);
    }
}
