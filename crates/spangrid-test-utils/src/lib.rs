//! Test utilities for spangrid.
//!
//! Hosts measure rendered widths and receive commits; these doubles stand in
//! for both so the resize lifecycle can be driven without a real toolkit.
//!
//! - [`MockMeasure`] - fixed container and item widths, records every query
//! - [`CommitRecorder`] - collects every committed collection
//! - [`sample_fields`] - a ready-made item collection
//!
//! # Example
//!
//! ```rust
//! use spangrid_test_utils::{CommitRecorder, MockMeasure, sample_fields};
//! use spangrid_ui::{GridConfig, GridController};
//!
//! let measure = MockMeasure::new();
//! let recorder = CommitRecorder::new();
//! let grid = GridController::new(sample_fields(4), GridConfig::default(), measure.clone())
//!     .unwrap()
//!     .on_commit(recorder.callback());
//!
//! assert_eq!(grid.items().len(), 4);
//! assert_eq!(recorder.count(), 0);
//! ```

pub mod commit_recorder;
pub mod mock_measure;

pub use commit_recorder::CommitRecorder;
pub use mock_measure::{MeasureCall, MockMeasure};

use spangrid_ui::Field;

/// `count` fields keyed `"1"..=count` with no persisted span.
pub fn sample_fields(count: usize) -> Vec<Field<String>> {
    (1..=count)
        .map(|n| Field::new(n.to_string(), format!("Field {n}")))
        .collect()
}
