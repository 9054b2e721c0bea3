//! Measurement of rendered boxes.
//!
//! The controller never assumes a width: it asks a [`GridMeasure`]. Hosts
//! with a real layout engine implement the trait over their own boxes;
//! headless hosts use [`GridLayout`], which lays the view out as a CSS grid
//! with Taffy.

use std::rc::Rc;

use spangrid_core::alloc::HashMap;
use spangrid_core::profiling::profile_function;
use taffy::style_helpers::evenly_sized_tracks;
use taffy::{
    AvailableSpace, Dimension, Display, GridPlacement, LengthPercentage, Line, NodeId, Size,
    Style, TaffyTree,
};

use crate::error::{GridError, GridResult};
use crate::item::ItemKey;
use crate::view::{CellView, ContainerView, GridView};

/// Source of rendered pixel widths.
pub trait GridMeasure {
    /// Rendered width of the container.
    fn container_width(&self) -> f32;

    /// Rendered width of the cell holding `key`, if it is laid out.
    fn item_width(&self, key: &ItemKey) -> Option<f32>;
}

impl<M: GridMeasure + ?Sized> GridMeasure for Rc<M> {
    fn container_width(&self) -> f32 {
        (**self).container_width()
    }

    fn item_width(&self, key: &ItemKey) -> Option<f32> {
        (**self).item_width(key)
    }
}

impl<M: GridMeasure + ?Sized> GridMeasure for Box<M> {
    fn container_width(&self) -> f32 {
        (**self).container_width()
    }

    fn item_width(&self, key: &ItemKey) -> Option<f32> {
        (**self).item_width(key)
    }
}

/// Widths captured from one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    container_width: f32,
    item_widths: HashMap<ItemKey, f32>,
}

impl LayoutSnapshot {
    /// Snapshot with a container width and no laid out items.
    pub fn empty(container_width: f32) -> Self {
        Self {
            container_width,
            item_widths: HashMap::new(),
        }
    }

    /// Record the width of one cell.
    pub fn with_item(mut self, key: impl Into<ItemKey>, width: f32) -> Self {
        self.item_widths.insert(key.into(), width);
        self
    }

    pub fn len(&self) -> usize {
        self.item_widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_widths.is_empty()
    }
}

impl GridMeasure for LayoutSnapshot {
    fn container_width(&self) -> f32 {
        self.container_width
    }

    fn item_width(&self, key: &ItemKey) -> Option<f32> {
        self.item_widths.get(key).copied()
    }
}

/// Lays a [`GridView`] out with Taffy's CSS grid solver.
pub struct GridLayout;

impl GridLayout {
    /// Lay `view` out in a container `container_width` pixels wide.
    pub fn compute<O>(view: &GridView<O>, container_width: f32) -> GridResult<LayoutSnapshot> {
        profile_function!();

        let mut tree: TaffyTree<()> = TaffyTree::new();
        let mut cells: Vec<(ItemKey, NodeId)> = Vec::with_capacity(view.cells.len());
        for cell in &view.cells {
            let node = tree.new_leaf(cell_style(cell)).map_err(layout_error)?;
            cells.push((cell.key.clone(), node));
        }

        let children: Vec<NodeId> = cells.iter().map(|(_, node)| *node).collect();
        let root = tree
            .new_with_children(container_style(&view.container, container_width), &children)
            .map_err(layout_error)?;

        tree.compute_layout(
            root,
            Size {
                width: AvailableSpace::Definite(container_width),
                height: AvailableSpace::MaxContent,
            },
        )
        .map_err(layout_error)?;

        let measured = tree.layout(root).map_err(layout_error)?.size.width;
        let mut snapshot = LayoutSnapshot::empty(measured);
        for (key, node) in cells {
            let width = tree.layout(node).map_err(layout_error)?.size.width;
            snapshot.item_widths.insert(key, width);
        }

        tracing::trace!(
            container_width = measured,
            cells = snapshot.len(),
            "grid layout computed"
        );
        Ok(snapshot)
    }
}

/// Taffy style of the container wrapper.
pub fn container_style(container: &ContainerView, container_width: f32) -> Style {
    let columns = u16::try_from(container.columns).unwrap_or(u16::MAX);
    Style {
        display: Display::Grid,
        size: Size {
            width: Dimension::Length(container_width),
            height: Dimension::Auto,
        },
        gap: Size {
            width: LengthPercentage::Length(container.gap),
            height: LengthPercentage::Length(container.gap),
        },
        grid_template_columns: evenly_sized_tracks(columns),
        ..Style::default()
    }
}

/// Taffy style of one cell.
pub fn cell_style<O>(cell: &CellView<O>) -> Style {
    // Taffy spans are at least one track.
    let span = cell.span.clamp(1, i32::from(u16::MAX)) as u16;
    Style {
        grid_column: Line {
            start: GridPlacement::Span(span),
            end: GridPlacement::Auto,
        },
        size: Size {
            width: cell.width.map_or(Dimension::Auto, Dimension::Length),
            height: Dimension::Auto,
        },
        ..Style::default()
    }
}

fn layout_error(error: taffy::TaffyError) -> GridError {
    GridError::Layout(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleOverrides;
    use crate::view::HandleView;

    fn cell(key: &str, span: i32, width: Option<f32>) -> CellView<()> {
        CellView {
            key: key.into(),
            index: 0,
            span,
            width,
            transition: None,
            content: (),
            overlay: None,
            handle: HandleView {
                item_key: key.into(),
                item_index: 0,
            },
            percentage: None,
        }
    }

    fn view(cells: Vec<CellView<()>>) -> GridView<()> {
        GridView {
            container: ContainerView::new(4, 16.0, &StyleOverrides::new()),
            cells,
        }
    }

    #[test]
    fn test_spans_share_container() {
        let snapshot =
            GridLayout::compute(&view(vec![cell("a", 2, None), cell("b", 1, None)]), 1000.0)
                .unwrap();

        assert_eq!(snapshot.container_width(), 1000.0);
        // Three gaps of 16px leave 952px for four 238px tracks.
        let a = snapshot.item_width(&"a".into()).unwrap();
        let b = snapshot.item_width(&"b".into()).unwrap();
        assert!((b - 238.0).abs() < 0.5, "b = {b}");
        assert!((a - (2.0 * 238.0 + 16.0)).abs() < 0.5, "a = {a}");
    }

    #[test]
    fn test_width_override_is_honoured() {
        let snapshot = GridLayout::compute(&view(vec![cell("a", 2, Some(300.0))]), 1000.0).unwrap();
        let a = snapshot.item_width(&"a".into()).unwrap();
        assert!((a - 300.0).abs() < 0.5, "a = {a}");
    }

    #[test]
    fn test_unknown_item_has_no_width() {
        let snapshot = LayoutSnapshot::empty(800.0).with_item("a", 200.0);
        assert_eq!(snapshot.item_width(&"a".into()), Some(200.0));
        assert_eq!(snapshot.item_width(&"z".into()), None);
    }

    #[test]
    fn test_measure_through_rc() {
        let snapshot: Rc<dyn GridMeasure> = Rc::new(LayoutSnapshot::empty(640.0));
        assert_eq!(snapshot.container_width(), 640.0);
    }
}
