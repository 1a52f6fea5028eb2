//! Subscriber bookkeeping for the [`Store`](crate::Store).
//!
//! A [`Registry`] holds the callbacks in registration order. Each call to
//! [`Registry::subscribe`] hands back a [`Subscription`] that removes the
//! callback when dropped.
//!
//! Publication iterates over a copy of the entry list, so callbacks may
//! subscribe, unsubscribe or send further actions while being notified:
//!
//! - a callback registered during a publication is first called on the next one
//! - a callback removed during a publication is not called again, even if it
//!   had not been reached yet
//! - a publication started from inside a callback supersedes the one that
//!   was running; the outer one stops and the callbacks it had not reached
//!   only see the newer snapshot

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback<S> = Box<dyn Fn(&S)>;

struct Entry<S> {
    id: u64,
    active: Cell<bool>,
    callback: Callback<S>,
}

/// Ordered list of snapshot observers.
pub(crate) struct Registry<S> {
    next_id: Cell<u64>,
    publication: Cell<u64>,
    entries: RefCell<Vec<Rc<Entry<S>>>>,
}

impl<S: 'static> Registry<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            publication: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn subscribe<F>(this: &Rc<Self>, callback: F) -> Subscription
    where
        F: Fn(&S) + 'static,
    {
        let id = this.next_id.get();
        this.next_id.set(id + 1);

        this.entries.borrow_mut().push(Rc::new(Entry {
            id,
            active: Cell::new(true),
            callback: Box::new(callback),
        }));

        let registry: Weak<Self> = Rc::downgrade(this);
        Subscription {
            id,
            detach: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.remove(id);
                }
            })),
        }
    }

    fn remove(&self, id: u64) {
        // The entry is dropped after the borrow ends; its callback may own
        // other subscriptions on this registry.
        let removed = {
            let mut entries = self.entries.borrow_mut();
            entries
                .iter()
                .position(|entry| entry.id == id)
                .map(|index| entries.remove(index))
        };
        if let Some(entry) = removed {
            entry.active.set(false);
            tracing::debug!(subscribers = self.len(), "Subscriber removed");
        }
    }

    /// Call every active callback with `snapshot`; returns how many ran.
    ///
    /// Stops early once a callback triggers a newer publication.
    pub(crate) fn notify(&self, snapshot: &S) -> usize {
        let publication = self.publication.get().wrapping_add(1);
        self.publication.set(publication);

        let entries: Vec<Rc<Entry<S>>> = self.entries.borrow().clone();
        let mut delivered = 0;
        for entry in entries {
            if self.publication.get() != publication {
                tracing::trace!(delivered, "Publication superseded");
                break;
            }
            if entry.active.get() {
                (entry.callback)(snapshot);
                delivered += 1;
            }
        }
        delivered
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

/// Handle for a registered store observer.
///
/// Dropping it unregisters the callback. Use [`Subscription::forget`] to keep
/// the callback alive for as long as the store itself.
#[must_use = "dropping the Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Identifier of this subscription, unique within its store
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Unregister the callback now
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    /// Keep the callback registered until the store is dropped
    ///
    /// A callback that owns a clone of its own store keeps that store alive,
    /// so after `forget` neither is ever freed.
    pub fn forget(mut self) {
        self.detach = None;
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.detach.is_some())
            .finish()
    }
}
