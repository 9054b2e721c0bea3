//! Grid layout controller: the resize state machine.
//!
//! ```text
//! Idle --pointer-down--> Dragging --pointer-up--> Settling --timer--> Idle
//!                          |  ^                      |
//!                          +--+ pointer-move         +--animation frame (start -> target)
//! ```
//!
//! The controller owns the item collection, the single drag session, the
//! preview and animated width maps, and the pending settle task. It reads
//! rendered widths through an injected [`GridMeasure`] and hands every
//! committed collection to the caller's commit callback.

use std::time::Duration;

use spangrid_core::alloc::{HashMap, HashSet};
use spangrid_core::profiling::profile_function;

use crate::animation::WidthTween;
use crate::config::GridConfig;
use crate::drag::{DragManager, ResizeSession, clamp_preview_width};
use crate::error::{GridError, GridResult};
use crate::event::{MouseButton, PointerEvent, WindowEvent};
use crate::item::{GridItem, ItemKey};
use crate::layout::{GridLayout, GridMeasure};
use crate::span::{gap_adjusted_width, resolve_layout_size, resolve_span, usable_width};
use crate::style::GridStyles;
use crate::view::{CellProps, ContainerView, GridView, ItemRenderer, render_cell};

/// Callback receiving the whole collection after each committed resize.
pub type CommitCallback<T> = Box<dyn FnMut(&[T])>;

/// Grid-wide interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    /// No gesture in progress.
    Idle,
    /// A handle is being dragged.
    Dragging,
    /// The pointer was released and the width transition is running.
    Settling,
}

/// Why a pointer-down did not start a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another handle is already being dragged.
    SessionActive,
    /// The item is still animating from its previous resize.
    ItemSettling,
    /// Only the primary button resizes.
    NonPrimaryButton,
}

/// Outcome of feeding one pointer event to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeResponse {
    /// A drag session started.
    Started { key: ItemKey, start_width: f32 },
    /// The preview width of the dragged item changed.
    Previewed { key: ItemKey, width: f32 },
    /// The pointer was released; the item animates towards `new_span`.
    Settling {
        key: ItemKey,
        new_span: i32,
        start_width: f32,
        target_width: f32,
    },
    /// The session ended without a resize.
    Cancelled { key: ItemKey },
    /// The pointer-down was not accepted.
    Ignored(IgnoreReason),
    /// No session was active; nothing happened.
    NoSession,
}

/// Where the settle transition currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePhase {
    /// Start width applied, waiting for the next animation frame.
    AwaitingFrame,
    /// Target width applied, transition running.
    Animating,
}

/// The pending continuation of a released resize.
#[derive(Debug, Clone)]
struct SettleTask {
    key: ItemKey,
    new_span: i32,
    start_width: f32,
    target_width: f32,
    phase: SettlePhase,
    remaining: Duration,
    tween: Option<WidthTween>,
}

/// Stateful orchestrator of one resizable grid.
pub struct GridController<T: GridItem> {
    items: Vec<T>,
    config: GridConfig,
    styles: GridStyles,
    measure: Box<dyn GridMeasure>,
    drag: DragManager,
    preview_widths: HashMap<ItemKey, f32>,
    animated_widths: HashMap<ItemKey, f32>,
    settle: Option<SettleTask>,
    on_commit: Option<CommitCallback<T>>,
    /// Hold commits for delivery outside the controller instead of calling
    /// `on_commit` in place.
    defer_commits: bool,
    pending_commit: Option<Vec<T>>,
    commit_count: u64,
}

impl<T: GridItem> GridController<T> {
    /// Create a controller over `items`.
    ///
    /// Fails if the configuration is invalid or two items share a key.
    pub fn new(
        items: Vec<T>,
        config: GridConfig,
        measure: impl GridMeasure + 'static,
    ) -> GridResult<Self> {
        config.validate()?;
        ensure_unique_keys(&items)?;

        Ok(Self {
            items,
            config,
            styles: GridStyles::default(),
            measure: Box::new(measure),
            drag: DragManager::new(),
            preview_widths: HashMap::new(),
            animated_widths: HashMap::new(),
            settle: None,
            on_commit: None,
            defer_commits: false,
            pending_commit: None,
            commit_count: 0,
        })
    }

    /// Set the style overrides.
    pub fn with_styles(mut self, styles: GridStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Set the commit callback.
    ///
    /// On a bare controller the callback runs inside the controller and must
    /// not call back into it. A [`MountedGrid`](crate::MountedGrid) delivers
    /// commits after releasing the controller, so the callback may inspect
    /// the grid.
    pub fn on_commit(mut self, callback: impl FnMut(&[T]) + 'static) -> Self {
        self.on_commit = Some(Box::new(callback));
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn styles(&self) -> &GridStyles {
        &self.styles
    }

    /// Number of resizes committed so far.
    pub fn commit_count(&self) -> u64 {
        self.commit_count
    }

    /// Replace the item collection.
    ///
    /// A drag session whose item is gone is cancelled.
    pub fn set_items(&mut self, items: Vec<T>) -> GridResult<()> {
        ensure_unique_keys(&items)?;
        self.items = items;

        let orphaned = self
            .drag
            .session()
            .is_some_and(|session| self.index_of(&session.item_key).is_none());
        if orphaned {
            self.pointer_cancel();
        }
        Ok(())
    }

    /// Replace the measurement source.
    pub fn set_measure(&mut self, measure: impl GridMeasure + 'static) {
        self.measure = Box::new(measure);
    }

    /// Lay the current view out with Taffy and measure from the result.
    pub fn relayout(&mut self, container_width: f32) -> GridResult<()> {
        let view = self.view(&|_: &T| ());
        let snapshot = GridLayout::compute(&view, container_width)?;
        self.set_measure(snapshot);
        Ok(())
    }

    pub fn state(&self) -> GridState {
        if self.drag.is_dragging() {
            GridState::Dragging
        } else if self.settle.is_some() {
            GridState::Settling
        } else {
            GridState::Idle
        }
    }

    /// The active drag session, if any.
    pub fn session(&self) -> Option<&ResizeSession> {
        self.drag.session()
    }

    /// Whether `key` is the item being dragged.
    pub fn is_active(&self, key: &ItemKey) -> bool {
        self.drag.is_dragging_item(key)
    }

    /// Live preview width of `key` while it is dragged.
    pub fn preview_width(&self, key: &ItemKey) -> Option<f32> {
        self.preview_widths.get(key).copied()
    }

    /// Forced width of `key` during the settle transition.
    pub fn animated_width(&self, key: &ItemKey) -> Option<f32> {
        self.animated_widths.get(key).copied()
    }

    /// Interpolated width of `key` for hosts that draw transitions
    /// themselves.
    pub fn transition_width(&self, key: &ItemKey) -> Option<f32> {
        let settle = self.settle.as_ref().filter(|settle| &settle.key == key)?;
        let width = match (&settle.phase, &settle.tween) {
            (SettlePhase::Animating, Some(tween)) => tween.value(),
            _ => settle.start_width,
        };
        usable_width(width)
    }

    /// Current settle phase, if settling.
    pub fn settle_phase(&self) -> Option<SettlePhase> {
        self.settle.as_ref().map(|settle| settle.phase)
    }

    /// Pointer-down on the resize handle of `key`.
    ///
    /// On success the event's default action is prevented and its
    /// propagation stopped.
    pub fn pointer_down(
        &mut self,
        key: &ItemKey,
        event: &mut PointerEvent,
    ) -> GridResult<ResizeResponse> {
        profile_function!();

        let index = self
            .index_of(key)
            .ok_or_else(|| GridError::UnknownItem(key.clone()))?;

        if event.button != MouseButton::Left {
            return Ok(ResizeResponse::Ignored(IgnoreReason::NonPrimaryButton));
        }
        // A drag session implies nothing is settling: starting it committed
        // any pending settle.
        if let Some(settle) = &self.settle {
            if &settle.key == key {
                tracing::debug!(item = %key, "resize ignored, item is still settling");
                return Ok(ResizeResponse::Ignored(IgnoreReason::ItemSettling));
            }
            self.commit_settle();
        }

        let start_width = self
            .measure
            .item_width(key)
            .unwrap_or_else(|| self.estimated_width(index));

        let started = self.drag.start(ResizeSession {
            item_key: key.clone(),
            item_index: index,
            start_pointer_x: event.position.x,
            start_width,
        });
        if !started {
            tracing::debug!(item = %key, "resize ignored, another session is active");
            return Ok(ResizeResponse::Ignored(IgnoreReason::SessionActive));
        }
        self.preview_widths.clear();
        self.preview_widths.insert(key.clone(), start_width);

        event.prevent_default();
        event.stop_propagation();

        tracing::debug!(item = %key, index, start_width, "resize started");
        Ok(ResizeResponse::Started {
            key: key.clone(),
            start_width,
        })
    }

    /// Pointer moved to `x`.
    pub fn pointer_move(&mut self, x: f32) -> ResizeResponse {
        profile_function!();

        let Some(session) = self.drag.session() else {
            return ResizeResponse::NoSession;
        };

        let width = clamp_preview_width(
            session.unclamped_width(x),
            self.measure.container_width(),
            self.config.columns,
        );
        let key = session.item_key.clone();

        self.preview_widths.clear();
        self.preview_widths.insert(key.clone(), width);

        tracing::trace!(item = %key, width, "resize preview");
        ResizeResponse::Previewed { key, width }
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) -> ResizeResponse {
        profile_function!();

        let Some(session) = self.drag.end() else {
            return ResizeResponse::NoSession;
        };
        let key = session.item_key;

        let container_width = self.measure.container_width();
        let preview_width = self
            .preview_widths
            .get(&key)
            .copied()
            .unwrap_or(session.start_width);
        let percent = width_percent(preview_width, container_width);

        let columns = self.config.columns;
        let new_span = resolve_span(percent, columns);
        let column_width = self.config.column_width(container_width);

        let old_span = self
            .index_of(&key)
            .map(|index| resolve_layout_size(self.items[index].layout_size(), columns as i32))
            .unwrap_or(new_span);

        let gap = self.config.gap;
        let target_width = gap_adjusted_width(column_width, new_span, gap, new_span);
        // The gap term uses the new span for the start width as well.
        let start_width = gap_adjusted_width(column_width, old_span, gap, new_span);

        self.preview_widths.clear();
        self.animated_widths.clear();
        // Unusable widths (unmeasured container, negative span) leave the
        // item at its natural width; only the commit happens.
        if let Some(width) = usable_width(start_width) {
            self.animated_widths.insert(key.clone(), width);
        }
        self.settle = Some(SettleTask {
            key: key.clone(),
            new_span,
            start_width,
            target_width,
            phase: SettlePhase::AwaitingFrame,
            remaining: self.config.animation_duration,
            tween: None,
        });

        tracing::debug!(
            item = %key,
            percent,
            old_span,
            new_span,
            start_width,
            target_width,
            "resize released, settling"
        );
        ResizeResponse::Settling {
            key,
            new_span,
            start_width,
            target_width,
        }
    }

    /// The gesture was interrupted; drop the session without resizing.
    pub fn pointer_cancel(&mut self) -> ResizeResponse {
        let Some(session) = self.drag.end() else {
            return ResizeResponse::NoSession;
        };
        self.preview_widths.clear();

        tracing::debug!(item = %session.item_key, "resize cancelled");
        ResizeResponse::Cancelled {
            key: session.item_key,
        }
    }

    /// An animation-frame boundary: a settle waiting on its first frame
    /// switches to the target width.
    ///
    /// Returns true if the animated width changed.
    pub fn animation_frame(&mut self) -> bool {
        let Some(settle) = self
            .settle
            .as_mut()
            .filter(|settle| settle.phase == SettlePhase::AwaitingFrame)
        else {
            return false;
        };

        settle.phase = SettlePhase::Animating;
        settle.tween = Some(WidthTween::new(
            settle.start_width,
            settle.target_width,
            settle.remaining,
        ));
        let Some(width) = usable_width(settle.target_width) else {
            return self.animated_widths.remove(&settle.key).is_some();
        };
        self.animated_widths.insert(settle.key.clone(), width);

        tracing::trace!(item = %settle.key, width, "settle target applied");
        true
    }

    /// Advance the settle timer by `dt`.
    ///
    /// Returns true if a resize was committed.
    pub fn update(&mut self, dt: Duration) -> bool {
        profile_function!();

        let Some(settle) = self.settle.as_mut() else {
            return false;
        };

        settle.remaining = settle.remaining.saturating_sub(dt);
        if let Some(tween) = settle.tween.as_mut() {
            tween.update(dt);
        }

        if settle.remaining.is_zero() {
            return self.commit_settle();
        }
        false
    }

    /// Route a window event to the matching handler.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::PointerMove { x } => {
                self.pointer_move(x);
            }
            WindowEvent::PointerUp { .. } => {
                self.pointer_up();
            }
            WindowEvent::PointerCancel => {
                self.pointer_cancel();
            }
            WindowEvent::AnimationFrame => {
                self.animation_frame();
            }
            WindowEvent::Tick(dt) => {
                self.update(dt);
            }
        }
    }

    /// Drop a pending settle without committing it.
    ///
    /// Used when the grid goes away before the timer fires.
    pub fn cancel_settle(&mut self) {
        if let Some(settle) = self.settle.take() {
            tracing::debug!(item = %settle.key, "settle cancelled");
        }
        self.animated_widths.clear();
    }

    /// Render the grid with `renderer` producing each cell's content.
    pub fn view<R>(&self, renderer: &R) -> GridView<R::Output>
    where
        R: ItemRenderer<T> + ?Sized,
    {
        profile_function!();

        let container = ContainerView::new(
            self.config.columns,
            self.config.gap,
            &self.styles.container,
        );
        let cells = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let key = item.key();
                render_cell(
                    CellProps {
                        item,
                        index,
                        is_active: self.drag.is_dragging_item(&key),
                        preview_width: self.preview_width(&key),
                        animated_width: self.animated_width(&key),
                        animation_duration: self.config.animation_duration,
                        overlay_style: &self.styles.overlay,
                        percentage_style: &self.styles.percentage,
                        show_percentage: self.config.show_percentage,
                        columns: self.config.columns,
                    },
                    renderer,
                )
            })
            .collect();

        GridView { container, cells }
    }

    /// Apply the pending settle to the collection and notify the caller.
    fn commit_settle(&mut self) -> bool {
        let Some(settle) = self.settle.take() else {
            return false;
        };
        self.animated_widths.clear();

        let Some(index) = self.index_of(&settle.key) else {
            tracing::warn!(item = %settle.key, "resized item left the grid before commit");
            return false;
        };

        let mut next = self.items.clone();
        next[index] = self.items[index].with_layout_size(settle.new_span);
        self.items = next;
        self.commit_count += 1;

        tracing::debug!(item = %settle.key, span = settle.new_span, "resize committed");
        if self.defer_commits {
            self.pending_commit = Some(self.items.clone());
        } else if let Some(callback) = self.on_commit.as_mut() {
            callback(&self.items);
        }
        true
    }

    pub(crate) fn set_defer_commits(&mut self, defer: bool) {
        self.defer_commits = defer;
        if !defer {
            self.pending_commit = None;
        }
    }

    /// Take a held commit together with the callback that should receive it.
    ///
    /// The callback is lent out; hand it back with
    /// [`restore_commit_callback`](Self::restore_commit_callback).
    pub(crate) fn take_pending_commit(&mut self) -> Option<(Vec<T>, CommitCallback<T>)> {
        let items = self.pending_commit.take()?;
        let callback = self.on_commit.take()?;
        Some((items, callback))
    }

    pub(crate) fn restore_commit_callback(&mut self, callback: CommitCallback<T>) {
        if self.on_commit.is_none() {
            self.on_commit = Some(callback);
        }
    }

    fn index_of(&self, key: &ItemKey) -> Option<usize> {
        self.items.iter().position(|item| &item.key() == key)
    }

    /// Width of an item that the measure has not laid out.
    fn estimated_width(&self, index: usize) -> f32 {
        let columns = self.config.columns;
        let span = resolve_layout_size(self.items[index].layout_size(), columns as i32);
        let column_width = self.config.column_width(self.measure.container_width());
        usable_width(gap_adjusted_width(
            column_width,
            span,
            self.config.gap,
            span.max(1),
        ))
        .unwrap_or(0.0)
    }
}

impl<T: GridItem + std::fmt::Debug> std::fmt::Debug for GridController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridController")
            .field("items", &self.items)
            .field("config", &self.config)
            .field("state", &self.state())
            .field("session", &self.drag.session())
            .field("commit_count", &self.commit_count)
            .finish_non_exhaustive()
    }
}

/// Preview width as a percentage of the container.
///
/// `NaN` for an unmeasurable container, which span resolution turns into
/// the full-span fallback.
fn width_percent(preview_width: f32, container_width: f32) -> f64 {
    if !container_width.is_finite() || container_width <= 0.0 {
        tracing::warn!(container_width, "container has no usable width");
        return f64::NAN;
    }
    f64::from(preview_width) / f64::from(container_width) * 100.0
}

fn ensure_unique_keys<T: GridItem>(items: &[T]) -> GridResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let key = item.key();
        if !seen.insert(key.clone()) {
            return Err(GridError::DuplicateKey(key));
        }
    }
    Ok(())
}
