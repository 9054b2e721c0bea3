//! Conversions between column counts, spans and container percentages.
//!
//! All functions here are pure. The threshold ladder is the heart of span
//! resolution: a width has to strictly exceed the lower bound of a span to be
//! promoted to it, and anything that matches no bound snaps to the full width
//! of the grid.

/// A lower-bound percentage paired with the span it promotes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanThreshold {
    /// Lower bound, in percent of the container width.
    pub percent: f64,
    /// Span assigned to widths strictly above `percent`.
    pub span: i32,
}

impl SpanThreshold {
    pub const fn new(percent: f64, span: i32) -> Self {
        Self { percent, span }
    }
}

/// Descending lower-bound thresholds, one per span from `columns` down to 1.
///
/// Entry `i` is `(100 / columns) * (columns - i) - (100 / columns)`, so four
/// columns yield `[75, 50, 25, 0]`. Zero columns yield an empty ladder.
pub fn column_percentage_ladder(columns: u32) -> Vec<f64> {
    if columns == 0 {
        return Vec::new();
    }

    let per_column = 100.0 / f64::from(columns);
    (1..=columns)
        .rev()
        .map(|index| per_column * f64::from(index) - per_column)
        .collect()
}

/// Pairs each ladder entry with its span (`columns - ladder_index`).
pub fn span_threshold_table(columns: u32) -> Vec<SpanThreshold> {
    column_percentage_ladder(columns)
        .into_iter()
        .enumerate()
        .map(|(index, percent)| SpanThreshold::new(percent, columns as i32 - index as i32))
        .collect()
}

/// Resolve a width percentage to a span.
///
/// Returns the span of the first threshold (in descending order) that
/// `field_width_percent` strictly exceeds. Values that exceed none of them,
/// including zero, negatives and NaN, resolve to `columns`.
pub fn resolve_span(field_width_percent: f64, columns: u32) -> i32 {
    span_threshold_table(columns)
        .into_iter()
        .find(|threshold| field_width_percent > threshold.percent)
        .map_or(columns as i32, |threshold| threshold.span)
}

/// Percentage of the container covered by `span` columns, rounded.
///
/// A span outside `[1, columns]` yields `NaN`.
pub fn span_to_percentage(columns: u32, span: i32) -> f64 {
    let per_column = 100.0 / f64::from(columns);
    let cumulative: Vec<f64> = (1..=columns)
        .map(|index| per_column * f64::from(index))
        .collect();

    usize::try_from(span - 1)
        .ok()
        .and_then(|index| cumulative.get(index))
        .map_or(f64::NAN, |percent| percent.round())
}

/// `declared` when it is present and nonzero, otherwise `default`.
///
/// Zero counts as unset. Negative sizes are passed through untouched.
pub fn resolve_layout_size(declared: Option<i32>, default: i32) -> i32 {
    match declared {
        Some(size) if size != 0 => size,
        _ => default,
    }
}

/// Pixel width of `span` columns with the gap share taken off.
///
/// `gap_span` is the span used in the gap term; the settle transition passes
/// the new span here even when `span` is the old one.
///
/// The result is not clamped: negative spans or a zero column width give
/// zero, negative or `NaN` widths, which callers must not apply.
pub fn gap_adjusted_width(column_width: f32, span: i32, gap: f32, gap_span: i32) -> f32 {
    let gap_share = gap * (gap_span - 1) as f32 / gap_span as f32;
    column_width * span as f32 - gap_share
}

/// `width` if it can be applied as a box width: finite and positive.
pub fn usable_width(width: f32) -> Option<f32> {
    (width.is_finite() && width > 0.0).then_some(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_four_columns() {
        assert_eq!(column_percentage_ladder(4), vec![75.0, 50.0, 25.0, 0.0]);
    }

    #[test]
    fn test_ladder_zero_columns_is_empty() {
        assert!(column_percentage_ladder(0).is_empty());
    }

    #[test]
    fn test_threshold_table() {
        assert_eq!(
            span_threshold_table(4),
            vec![
                SpanThreshold::new(75.0, 4),
                SpanThreshold::new(50.0, 3),
                SpanThreshold::new(25.0, 2),
                SpanThreshold::new(0.0, 1),
            ]
        );
        assert_eq!(span_threshold_table(1), vec![SpanThreshold::new(0.0, 1)]);
    }

    #[test]
    fn test_resolve_span_first_match() {
        assert_eq!(resolve_span(60.0, 4), 3);
        assert_eq!(resolve_span(80.0, 4), 4);
        assert_eq!(resolve_span(10.0, 4), 1);
        // Exactly on a threshold does not promote.
        assert_eq!(resolve_span(50.0, 4), 2);
    }

    #[test]
    fn test_resolve_span_falls_back_to_full_span() {
        assert_eq!(resolve_span(-10.0, 4), 4);
        assert_eq!(resolve_span(0.0, 4), 4);
        assert_eq!(resolve_span(f64::NAN, 4), 4);
    }

    #[test]
    fn test_resolve_span_is_stable() {
        assert_eq!(resolve_span(42.5, 6), resolve_span(42.5, 6));
    }

    #[test]
    fn test_span_to_percentage() {
        let four: Vec<f64> = (1..=4).map(|span| span_to_percentage(4, span)).collect();
        assert_eq!(four, vec![25.0, 50.0, 75.0, 100.0]);

        let three: Vec<f64> = (1..=3).map(|span| span_to_percentage(3, span)).collect();
        assert_eq!(three, vec![33.0, 67.0, 100.0]);
    }

    #[test]
    fn test_span_to_percentage_out_of_range() {
        assert!(span_to_percentage(4, 0).is_nan());
        assert!(span_to_percentage(4, 10).is_nan());
        assert!(span_to_percentage(4, -3).is_nan());
    }

    #[test]
    fn test_resolve_layout_size() {
        assert_eq!(resolve_layout_size(Some(3), 4), 3);
        assert_eq!(resolve_layout_size(None, 4), 4);
        assert_eq!(resolve_layout_size(Some(0), 4), 4);
        assert_eq!(resolve_layout_size(Some(-2), 4), -2);
    }

    #[test]
    fn test_gap_adjusted_width() {
        // 1000px container, 4 columns, 16px gap, span 2.
        let width = gap_adjusted_width(250.0, 2, 16.0, 2);
        assert!((width - 492.0).abs() < 1e-4);

        // Old span 2 with the gap term of new span 3.
        let width = gap_adjusted_width(250.0, 2, 16.0, 3);
        assert!((width - (500.0 - 32.0 / 3.0)).abs() < 1e-3);
    }

    #[test]
    fn test_gap_adjusted_width_unclamped() {
        // Span -2 of a 250px column with the gap term of span 1.
        assert_eq!(gap_adjusted_width(250.0, -2, 16.0, 1), -500.0);
        assert!(gap_adjusted_width(0.0, 3, 16.0, 3) < 0.0);
        assert!(gap_adjusted_width(f32::NAN, 3, 16.0, 3).is_nan());
    }

    #[test]
    fn test_usable_width() {
        assert_eq!(usable_width(492.0), Some(492.0));
        assert_eq!(usable_width(0.0), None);
        assert_eq!(usable_width(-500.0), None);
        assert_eq!(usable_width(f32::NAN), None);
        assert_eq!(usable_width(f32::INFINITY), None);
    }
}
