//! Spangrid UI - headless resizable span grid
//!
//! This crate drives a grid of items laid out on a fixed number of equal
//! columns, where each item spans some of them:
//! - Drag the resize handle to preview a new width
//! - Release to snap the width to the nearest column span
//! - Animate from the old span to the new one
//! - Commit the updated collection to the caller
//!
//! Rendering is left to the host: the controller produces a [`GridView`]
//! of plain data, and layout can be resolved with Taffy through
//! [`GridLayout`].
//!
//! ## Quick Start
//!
//! ```rust
//! # use spangrid_ui::{Field, GridConfig, GridController, LayoutSnapshot, PointerEvent, WindowEvent, WindowListeners};
//! # use std::time::Duration;
//! let items = vec![Field::new("a", "Name"), Field::new("b", "Email").span(2)];
//! let measure = LayoutSnapshot::empty(1000.0)
//!     .with_item("a", 250.0)
//!     .with_item("b", 492.0);
//!
//! let window = WindowListeners::new();
//! let grid = GridController::new(items, GridConfig::default(), measure)
//!     .unwrap()
//!     .on_commit(|items| println!("resized: {items:?}"))
//!     .mount(&window);
//!
//! let mut down = PointerEvent::at_x(250.0);
//! grid.pointer_down(&"a".into(), &mut down).unwrap();
//! window.dispatch(&WindowEvent::PointerMove { x: 600.0 });
//! window.dispatch(&WindowEvent::PointerUp { x: 600.0 });
//! window.dispatch(&WindowEvent::AnimationFrame);
//! window.dispatch(&WindowEvent::Tick(Duration::from_secs(1)));
//! ```

pub mod animation;
pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod event;
pub mod item;
pub mod layout;
pub mod listener;
pub mod mount;
pub mod span;
pub mod style;
pub mod view;

pub use animation::{AnimationState, EasingFunction, WidthTween};
pub use config::{DEFAULT_ANIMATION_DURATION, DEFAULT_COLUMNS, DEFAULT_GAP, GridConfig};
pub use controller::{
    CommitCallback, GridController, GridState, IgnoreReason, ResizeResponse, SettlePhase,
};
pub use drag::{DragManager, ResizeSession};
pub use error::{GridError, GridResult};
pub use event::{MouseButton, PointerEvent, WindowEvent};
pub use item::{Field, GridItem, ItemKey};
pub use layout::{GridLayout, GridMeasure, LayoutSnapshot};
pub use listener::{ListenerGuard, WindowListeners};
pub use mount::MountedGrid;
pub use span::{resolve_layout_size, resolve_span, span_to_percentage};
pub use style::{GridStyles, StyleOverrides};
pub use view::{CellView, GridView, ItemRenderer, classes};

pub use spangrid_core::math::Vec2;
