//! Mock width source for testing.

use std::sync::Arc;

use parking_lot::Mutex;
use spangrid_ui::{GridMeasure, ItemKey};

/// Container width the mock reports unless told otherwise.
pub const MOCK_CONTAINER_WIDTH: f32 = 1000.0;

/// Item width the mock reports for items without an override.
pub const MOCK_ITEM_WIDTH: f32 = 250.0;

/// Records a measurement query for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureCall {
    ContainerWidth,
    ItemWidth(ItemKey),
}

#[derive(Debug)]
struct State {
    container_width: f32,
    default_item_width: Option<f32>,
    item_widths: Vec<(ItemKey, f32)>,
}

/// Mock implementation of [`GridMeasure`].
///
/// Clones share state, so a test can keep one handle while the controller
/// owns another and change widths between events.
#[derive(Debug, Clone)]
pub struct MockMeasure {
    state: Arc<Mutex<State>>,
    calls: Arc<Mutex<Vec<MeasureCall>>>,
}

impl MockMeasure {
    /// A 1000px container whose items are all 250px wide.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                container_width: MOCK_CONTAINER_WIDTH,
                default_item_width: Some(MOCK_ITEM_WIDTH),
                item_widths: Vec::new(),
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock that has laid nothing out.
    pub fn unmeasured() -> Self {
        let mock = Self::new();
        {
            let mut state = mock.state.lock();
            state.container_width = 0.0;
            state.default_item_width = None;
        }
        mock
    }

    pub fn set_container_width(&self, width: f32) {
        self.state.lock().container_width = width;
    }

    pub fn set_default_item_width(&self, width: Option<f32>) {
        self.state.lock().default_item_width = width;
    }

    /// Override the width of one item.
    pub fn set_item_width(&self, key: impl Into<ItemKey>, width: f32) {
        let key = key.into();
        let mut state = self.state.lock();
        match state.item_widths.iter_mut().find(|(k, _)| *k == key) {
            Some((_, w)) => *w = width,
            None => state.item_widths.push((key, width)),
        }
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<MeasureCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn count_container_queries(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, MeasureCall::ContainerWidth))
            .count()
    }

    pub fn count_item_queries(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, MeasureCall::ItemWidth(_)))
            .count()
    }
}

impl Default for MockMeasure {
    fn default() -> Self {
        Self::new()
    }
}

impl GridMeasure for MockMeasure {
    fn container_width(&self) -> f32 {
        self.calls.lock().push(MeasureCall::ContainerWidth);
        self.state.lock().container_width
    }

    fn item_width(&self, key: &ItemKey) -> Option<f32> {
        self.calls.lock().push(MeasureCall::ItemWidth(key.clone()));
        let state = self.state.lock();
        state
            .item_widths
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, width)| *width)
            .or(state.default_item_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mock = MockMeasure::new();
        assert_eq!(mock.container_width(), 1000.0);
        assert_eq!(mock.item_width(&"x".into()), Some(250.0));
    }

    #[test]
    fn test_overrides_and_calls() {
        let mock = MockMeasure::new();
        let handle = mock.clone();
        handle.set_item_width("a", 492.0);
        handle.set_container_width(800.0);

        assert_eq!(mock.item_width(&"a".into()), Some(492.0));
        assert_eq!(mock.container_width(), 800.0);
        assert_eq!(handle.count_item_queries(), 1);
        assert_eq!(handle.count_container_queries(), 1);

        handle.clear_calls();
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_unmeasured() {
        let mock = MockMeasure::unmeasured();
        assert_eq!(mock.container_width(), 0.0);
        assert_eq!(mock.item_width(&"a".into()), None);
    }
}
