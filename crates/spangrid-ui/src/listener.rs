//! Window-level listener registry.
//!
//! Drag tracking has to follow the pointer outside the handle, so grids
//! listen at the window level. A subscription lives exactly as long as the
//! returned [`ListenerGuard`]; dropping the guard removes the listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::event::WindowEvent;

type Listener = Rc<RefCell<dyn FnMut(&WindowEvent)>>;

/// Identifier of one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ListenerId(u64);

#[derive(Default)]
struct Slots {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

/// Window event source that grids subscribe to.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct WindowListeners {
    slots: Rc<RefCell<Slots>>,
}

impl WindowListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned guard is dropped.
    #[must_use = "dropping the guard unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl FnMut(&WindowEvent) + 'static) -> ListenerGuard {
        let mut slots = self.slots.borrow_mut();
        let id = ListenerId(slots.next_id);
        slots.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        slots.listeners.push((id, listener));
        tracing::trace!(?id, "window listener added");

        ListenerGuard {
            slots: Rc::downgrade(&self.slots),
            id,
        }
    }

    /// Deliver `event` to every live listener in subscription order.
    ///
    /// Listeners may subscribe or unsubscribe while handling; the set of
    /// receivers is fixed when dispatch starts.
    pub fn dispatch(&self, event: &WindowEvent) {
        let receivers: Vec<Listener> = self
            .slots
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in receivers {
            // A listener that re-enters dispatch is skipped for the nested event.
            if let Ok(mut listener) = listener.try_borrow_mut() {
                (*listener)(event);
            }
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.slots.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a window subscription alive. Dropping it unsubscribes.
pub struct ListenerGuard {
    slots: Weak<RefCell<Slots>>,
    id: ListenerId,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
            tracing::trace!(id = ?self.id, "window listener removed");
        }
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}
