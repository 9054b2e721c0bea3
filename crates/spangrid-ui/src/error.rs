//! Error type for grid construction and pointer routing.

use crate::item::ItemKey;

/// Errors raised when a grid is configured or addressed incorrectly.
///
/// Resize policy outcomes (full-span fallback, `NaN` percentages, ignored
/// pointer events) are values, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The grid was configured with zero columns.
    ZeroColumns,
    /// The gap is negative or not finite.
    InvalidGap(f32),
    /// Two items in one collection share a key.
    DuplicateKey(ItemKey),
    /// A pointer-down named an item that is not in the grid.
    UnknownItem(ItemKey),
    /// The layout engine rejected the view.
    Layout(String),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ZeroColumns => write!(f, "Grid must have at least one column"),
            GridError::InvalidGap(gap) => write!(f, "Invalid grid gap {gap}"),
            GridError::DuplicateKey(key) => write!(f, "Duplicate item key {key}"),
            GridError::UnknownItem(key) => write!(f, "Item {key} not found in grid"),
            GridError::Layout(message) => write!(f, "Layout failed: {message}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
