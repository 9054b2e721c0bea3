//! Pointer and window events fed into the grid by the host.

use std::time::Duration;

use spangrid_core::math::Vec2;

/// Mouse button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A pointer-down delivered to a resize handle.
///
/// The handler records whether default host behaviour (text selection,
/// native drag) was suppressed and whether bubbling to ancestor handlers was
/// stopped, so the host can honour both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in window coordinates.
    pub position: Vec2,
    /// Button that went down.
    pub button: MouseButton,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    /// Primary-button press at `position`.
    pub fn new(position: Vec2) -> Self {
        Self::with_button(position, MouseButton::Left)
    }

    /// Press of `button` at `position`.
    pub fn with_button(position: Vec2, button: MouseButton) -> Self {
        Self {
            position,
            button,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Primary-button press at horizontal position `x`.
    pub fn at_x(x: f32) -> Self {
        Self::new(Vec2::new(x, 0.0))
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Window-level events, delivered to every mounted grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// Pointer moved anywhere in the window.
    PointerMove { x: f32 },
    /// Pointer button released anywhere in the window.
    PointerUp { x: f32 },
    /// The gesture was interrupted (blur, lost capture).
    PointerCancel,
    /// An animation-frame boundary.
    AnimationFrame,
    /// Wall-clock time advanced by the given amount.
    Tick(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_event_flags() {
        let mut event = PointerEvent::at_x(100.0);
        assert!(!event.default_prevented());
        assert!(!event.propagation_stopped());

        event.prevent_default();
        event.stop_propagation();

        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
        assert_eq!(event.button, MouseButton::Left);
    }
}
