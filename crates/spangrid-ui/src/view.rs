//! Grid item renderer and the view tree it produces.
//!
//! Views are plain data: a host turns them into whatever its toolkit draws.
//! Every element carries one of the stable class names in [`classes`] so
//! hosts and tests can find it.

use std::time::Duration;

use crate::animation::EasingFunction;
use crate::item::{GridItem, ItemKey};
use crate::span::{resolve_layout_size, span_to_percentage};
use crate::style::StyleOverrides;

/// Stable class names of the grid elements.
pub mod classes {
    /// Container wrapper around all cells.
    pub const CONTAINER: &str = "sg-container";
    /// One grid cell per item.
    pub const CELL: &str = "sg-cell";
    /// Resize handle inside each cell.
    pub const HANDLE: &str = "sg-cell-resize-handle";
    /// Drag preview overlay, present only while dragging.
    pub const OVERLAY: &str = "sg-overlay";
    /// Percentage chip, present only when enabled.
    pub const PERCENTAGE: &str = "sg-percentage";
}

/// Span a cell falls back to when its item has none.
///
/// Fixed at four regardless of the configured column count.
pub const RENDERER_DEFAULT_SPAN: i32 = 4;

/// Renders the content of one item.
///
/// Any `Fn(&T) -> O` is a renderer.
pub trait ItemRenderer<T> {
    type Output;

    fn render(&self, item: &T) -> Self::Output;
}

impl<T, O, F> ItemRenderer<T> for F
where
    F: Fn(&T) -> O,
{
    type Output = O;

    fn render(&self, item: &T) -> O {
        self(item)
    }
}

/// Width transition applied while a width override is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthTransition {
    pub duration: Duration,
    pub easing: EasingFunction,
}

impl WidthTransition {
    /// CSS shorthand, e.g. `width 1000ms ease`.
    pub fn css(&self) -> String {
        format!(
            "width {}ms {}",
            self.duration.as_millis(),
            self.easing.css_name()
        )
    }
}

/// Drag preview overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    /// Live preview width in pixels.
    pub width: f32,
    /// Caller overrides with `width` applied on top.
    pub style: StyleOverrides,
}

/// Resize handle. Pointer-downs on it go to the controller with the key.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleView {
    pub item_key: ItemKey,
    pub item_index: usize,
}

/// Percentage chip.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentageView {
    /// Rounded percentage, `NaN` for a span outside the grid.
    pub value: f64,
    pub style: StyleOverrides,
}

impl PercentageView {
    /// Text shown in the chip.
    pub fn text(&self) -> String {
        if self.value.is_nan() {
            "NaN".to_owned()
        } else {
            format!("{}", self.value as i64)
        }
    }
}

/// One rendered grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView<O> {
    pub key: ItemKey,
    pub index: usize,
    /// Columns occupied.
    pub span: i32,
    /// Forced width during the settle transition.
    pub width: Option<f32>,
    /// Present exactly when `width` is.
    pub transition: Option<WidthTransition>,
    /// Output of the caller's renderer.
    pub content: O,
    pub overlay: Option<OverlayView>,
    pub handle: HandleView,
    pub percentage: Option<PercentageView>,
}

impl<O> CellView<O> {
    /// CSS `grid-column` value.
    pub fn grid_column(&self) -> String {
        format!("span {}", self.span)
    }

    /// CSS `transition` value.
    pub fn transition_css(&self) -> String {
        self.transition
            .as_ref()
            .map_or_else(|| "none".to_owned(), WidthTransition::css)
    }

    /// Class names of every element in this cell.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut found = vec![classes::CELL];
        if self.overlay.is_some() {
            found.push(classes::OVERLAY);
        }
        found.push(classes::HANDLE);
        if self.percentage.is_some() {
            found.push(classes::PERCENTAGE);
        }
        found
    }
}

/// Inputs of one cell render.
#[derive(Debug)]
pub struct CellProps<'a, T> {
    pub item: &'a T,
    pub index: usize,
    /// Whether this item is the active drag target.
    pub is_active: bool,
    pub preview_width: Option<f32>,
    pub animated_width: Option<f32>,
    pub animation_duration: Duration,
    pub overlay_style: &'a StyleOverrides,
    pub percentage_style: &'a StyleOverrides,
    pub show_percentage: bool,
    pub columns: u32,
}

/// Render one item into a cell.
pub fn render_cell<T, R>(props: CellProps<'_, T>, renderer: &R) -> CellView<R::Output>
where
    T: GridItem,
    R: ItemRenderer<T> + ?Sized,
{
    let span = resolve_layout_size(props.item.layout_size(), RENDERER_DEFAULT_SPAN);

    let overlay = props
        .preview_width
        .filter(|width| props.is_active && *width != 0.0 && !width.is_nan())
        .map(|width| OverlayView {
            width,
            style: props
                .overlay_style
                .merged_with([("width", format!("{width}px"))]),
        });

    let transition = props.animated_width.map(|_| WidthTransition {
        duration: props.animation_duration,
        easing: EasingFunction::Ease,
    });

    let percentage = props.show_percentage.then(|| {
        let value = span_to_percentage(props.columns, span);
        if value.is_nan() {
            tracing::warn!(span, columns = props.columns, "span outside the grid columns");
        }
        PercentageView {
            value,
            style: props.percentage_style.clone(),
        }
    });

    CellView {
        key: props.item.key(),
        index: props.index,
        span,
        width: props.animated_width,
        transition,
        content: renderer.render(props.item),
        overlay,
        handle: HandleView {
            item_key: props.item.key(),
            item_index: props.index,
        },
        percentage,
    }
}

/// Container wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerView {
    pub columns: u32,
    pub gap: f32,
    /// Caller overrides with `gap` and `grid-template-columns` on top.
    pub style: StyleOverrides,
}

impl ContainerView {
    pub fn new(columns: u32, gap: f32, overrides: &StyleOverrides) -> Self {
        let style = overrides.merged_with([
            ("gap", format!("{gap}px")),
            ("grid-template-columns", format!("repeat({columns}, 1fr)")),
        ]);
        Self {
            columns,
            gap,
            style,
        }
    }
}

/// The whole rendered grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView<O> {
    pub container: ContainerView,
    pub cells: Vec<CellView<O>>,
}

impl<O> GridView<O> {
    /// Number of elements carrying `class`.
    pub fn query(&self, class: &str) -> usize {
        let container = usize::from(class == classes::CONTAINER);
        container
            + self
                .cells
                .iter()
                .map(|cell| cell.classes().iter().filter(|c| **c == class).count())
                .sum::<usize>()
    }

    /// Cell rendered for `key`.
    pub fn cell(&self, key: &ItemKey) -> Option<&CellView<O>> {
        self.cells.iter().find(|cell| &cell.key == key)
    }

    /// First overlay in document order.
    pub fn overlay(&self) -> Option<&OverlayView> {
        self.cells.iter().find_map(|cell| cell.overlay.as_ref())
    }
}
