//! Grid configuration.

use std::time::Duration;

use crate::error::{GridError, GridResult};

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u32 = 4;

/// Default gap between cells in pixels.
pub const DEFAULT_GAP: f32 = 16.0;

/// Default settle animation length.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(1000);

/// Immutable-per-render grid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Total number of columns.
    pub columns: u32,
    /// Pixel gap between cells.
    pub gap: f32,
    /// Length of the settle transition.
    pub animation_duration: Duration,
    /// Whether each cell shows its percentage chip.
    pub show_percentage: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            gap: DEFAULT_GAP,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            show_percentage: false,
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column count.
    pub fn columns(mut self, columns: u32) -> Self {
        self.columns = columns;
        self
    }

    /// Set the gap in pixels.
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the settle animation length.
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Show or hide the percentage chip.
    pub fn show_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    /// Check the configuration can drive a grid.
    pub fn validate(&self) -> GridResult<()> {
        if self.columns == 0 {
            return Err(GridError::ZeroColumns);
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(GridError::InvalidGap(self.gap));
        }
        Ok(())
    }

    /// Width of one column in a container of `container_width` pixels.
    pub fn column_width(&self, container_width: f32) -> f32 {
        container_width / self.columns as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.columns, 4);
        assert_eq!(config.gap, 16.0);
        assert_eq!(config.animation_duration, Duration::from_secs(1));
        assert!(!config.show_percentage);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_columns() {
        assert_eq!(GridConfig::new().columns(0).validate(), Err(GridError::ZeroColumns));
    }

    #[test]
    fn test_validate_rejects_bad_gap() {
        assert_eq!(
            GridConfig::new().gap(-1.0).validate(),
            Err(GridError::InvalidGap(-1.0))
        );
        assert!(GridConfig::new().gap(f32::NAN).validate().is_err());
    }
}
