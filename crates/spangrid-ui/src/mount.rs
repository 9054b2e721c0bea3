//! Mounting a controller on a window.
//!
//! A mounted grid subscribes to window pointer and timing events for as long
//! as it lives. The subscription only holds a weak reference to the
//! controller, so events that arrive after the grid is gone are dropped.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::controller::{GridController, ResizeResponse};
use crate::error::GridResult;
use crate::event::PointerEvent;
use crate::item::{GridItem, ItemKey};
use crate::listener::{ListenerGuard, WindowListeners};
use crate::view::{GridView, ItemRenderer};

/// A controller attached to a window's event stream.
///
/// Dropping it unsubscribes and cancels any pending settle without
/// committing. Commits reach the callback after the controller is released,
/// so the callback may read the grid through [`MountedGrid::controller`].
pub struct MountedGrid<T: GridItem + 'static> {
    controller: Rc<RefCell<GridController<T>>>,
    guard: Option<ListenerGuard>,
}

impl<T: GridItem + 'static> GridController<T> {
    /// Attach to `window` and start receiving its events.
    pub fn mount(mut self, window: &WindowListeners) -> MountedGrid<T> {
        self.set_defer_commits(true);
        let controller = Rc::new(RefCell::new(self));
        let weak = Rc::downgrade(&controller);

        let guard = window.subscribe(move |event| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            {
                // Busy means the event was raised from inside the controller.
                let Ok(mut controller) = controller.try_borrow_mut() else {
                    tracing::trace!(?event, "grid busy, window event dropped");
                    return;
                };
                controller.handle_window_event(event);
            }
            deliver_commit(&controller);
        });
        tracing::debug!(listeners = window.len(), "grid mounted");

        MountedGrid {
            controller,
            guard: Some(guard),
        }
    }
}

impl<T: GridItem + 'static> MountedGrid<T> {
    /// Pointer-down on the handle of `key`.
    pub fn pointer_down(
        &self,
        key: &ItemKey,
        event: &mut PointerEvent,
    ) -> GridResult<ResizeResponse> {
        let response = self.controller.borrow_mut().pointer_down(key, event);
        // Starting a drag may have committed another item's settle.
        deliver_commit(&self.controller);
        response
    }

    /// Render the current state.
    pub fn view<R>(&self, renderer: &R) -> GridView<R::Output>
    where
        R: ItemRenderer<T> + ?Sized,
    {
        self.controller.borrow().view(renderer)
    }

    pub fn controller(&self) -> Ref<'_, GridController<T>> {
        self.controller.borrow()
    }

    /// The controller, or `None` while it is handling an event.
    pub fn try_controller(&self) -> Option<Ref<'_, GridController<T>>> {
        self.controller.try_borrow().ok()
    }

    /// Run `f` on the controller, then deliver any commit it produced.
    pub fn with_controller_mut<U>(&self, f: impl FnOnce(&mut GridController<T>) -> U) -> U {
        let result = f(&mut self.controller.borrow_mut());
        deliver_commit(&self.controller);
        result
    }

    /// Detach from the window and hand the controller back.
    ///
    /// A pending settle is cancelled; an active drag session is kept.
    /// Returns `None` only if the controller is still shared elsewhere.
    pub fn unmount(mut self) -> Option<GridController<T>> {
        self.detach();
        let controller = Rc::clone(&self.controller);
        drop(self);
        let mut controller = Rc::into_inner(controller).map(RefCell::into_inner)?;
        controller.set_defer_commits(false);
        Some(controller)
    }

    fn detach(&mut self) {
        if self.guard.take().is_none() {
            return;
        }
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.cancel_settle();
        }
        tracing::debug!("grid unmounted");
    }
}

/// Hand a held commit to the commit callback with the controller released.
fn deliver_commit<T: GridItem>(controller: &RefCell<GridController<T>>) {
    let Some((items, mut callback)) = controller
        .try_borrow_mut()
        .ok()
        .and_then(|mut controller| controller.take_pending_commit())
    else {
        return;
    };

    callback(&items);

    if let Ok(mut controller) = controller.try_borrow_mut() {
        controller.restore_commit_callback(callback);
    }
}

impl<T: GridItem + 'static> Drop for MountedGrid<T> {
    fn drop(&mut self) {
        self.detach();
    }
}
