//! Drag session tracking for handle resizes.

use crate::item::ItemKey;

/// Divisor applied to one column width to get the smallest preview width.
pub const MIN_PREVIEW_COLUMN_DIVISOR: f32 = 1.5;

/// The ephemeral state of one resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    /// Item being resized.
    pub item_key: ItemKey,
    /// Position of the item in the collection when the drag started.
    pub item_index: usize,
    /// Pointer x at pointer-down.
    pub start_pointer_x: f32,
    /// Rendered width of the item at pointer-down.
    pub start_width: f32,
}

impl ResizeSession {
    /// Raw preview width for a pointer at `pointer_x`.
    pub fn unclamped_width(&self, pointer_x: f32) -> f32 {
        self.start_width + (pointer_x - self.start_pointer_x)
    }
}

/// Closed interval a preview width is clamped to.
///
/// The lower bound keeps an item from collapsing below two thirds of one
/// column; the upper bound is the container itself.
pub fn preview_bounds(container_width: f32, columns: u32) -> (f32, f32) {
    if !container_width.is_finite() || container_width <= 0.0 || columns == 0 {
        return (0.0, 0.0);
    }
    let min = container_width / columns as f32 / MIN_PREVIEW_COLUMN_DIVISOR;
    (min, container_width)
}

/// Clamp `width` into [`preview_bounds`].
pub fn clamp_preview_width(width: f32, container_width: f32, columns: u32) -> f32 {
    let (min, max) = preview_bounds(container_width, columns);
    width.max(min).min(max)
}

/// Owns the single active drag session of a grid.
#[derive(Debug, Default)]
pub struct DragManager {
    session: Option<ResizeSession>,
}

impl DragManager {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Start a session. Returns false, keeping the current one, if a session
    /// is already active.
    pub fn start(&mut self, session: ResizeSession) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(session);
        true
    }

    /// Check if there's an active session.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Check if `key` is the item being dragged.
    pub fn is_dragging_item(&self, key: &ItemKey) -> bool {
        self.session.as_ref().is_some_and(|s| &s.item_key == key)
    }

    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// End the session and return it.
    pub fn end(&mut self) -> Option<ResizeSession> {
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(key: &str) -> ResizeSession {
        ResizeSession {
            item_key: key.into(),
            item_index: 0,
            start_pointer_x: 100.0,
            start_width: 250.0,
        }
    }

    #[test]
    fn test_single_session() {
        let mut manager = DragManager::new();

        assert!(manager.start(session("1")));
        assert!(!manager.start(session("2")));
        assert!(manager.is_dragging_item(&"1".into()));
        assert!(!manager.is_dragging_item(&"2".into()));

        let ended = manager.end().unwrap();
        assert_eq!(ended.item_key, ItemKey::from("1"));
        assert!(!manager.is_dragging());
        assert!(manager.end().is_none());
    }

    #[test]
    fn test_unclamped_width() {
        let s = session("1");
        assert_eq!(s.unclamped_width(450.0), 600.0);
        assert_eq!(s.unclamped_width(0.0), 150.0);
    }

    #[test]
    fn test_clamp_preview_width() {
        let min = 1000.0 / 4.0 / 1.5;
        assert!((clamp_preview_width(-5000.0, 1000.0, 4) - min).abs() < 1e-3);
        assert_eq!(clamp_preview_width(9000.0, 1000.0, 4), 1000.0);
        assert_eq!(clamp_preview_width(400.0, 1000.0, 4), 400.0);
    }

    #[test]
    fn test_degenerate_container() {
        assert_eq!(preview_bounds(0.0, 4), (0.0, 0.0));
        assert_eq!(clamp_preview_width(300.0, f32::NAN, 4), 0.0);
    }
}
