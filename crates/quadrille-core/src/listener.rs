//! Ordered registries of trait-object listeners.
//!
//! [`Signal`](crate::Signal) covers fire-and-forget notification, but some
//! listeners answer back (the editor's preview votes). [`ListenerList`]
//! holds such listeners as `Rc<T>` trait objects with the same ordering and
//! snapshot discipline as signals: listeners are visited in registration
//! order, and the list is snapshotted before a round begins so a listener
//! may remove itself (or others) mid-round without disturbing delivery.

use std::rc::Rc;

use parking_lot::Mutex;

/// A unique identifier for a registered listener.
///
/// Returned by [`ListenerList::add`]; pass to [`ListenerList::remove`] to
/// unregister. Removal is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// An ordered, snapshot-iterable registry of `Rc<T>` listeners.
pub struct ListenerList<T: ?Sized> {
    entries: Mutex<Vec<(ListenerId, Rc<T>)>>,
    next_id: Mutex<u64>,
}

impl<T: ?Sized> Default for ListenerList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> ListenerList<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
        }
    }

    /// Register a listener, returning its ID.
    pub fn add(&self, listener: Rc<T>) -> ListenerId {
        let mut next_id = self.next_id.lock();
        let id = ListenerId(*next_id);
        *next_id += 1;

        self.entries.lock().push((id, listener));
        id
    }

    /// Unregister a listener by ID.
    ///
    /// Returns `true` if the listener was found and removed. Removing an
    /// unknown or already-removed ID returns `false`.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Remove every registered listener.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// The number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// A snapshot of the current listeners, in registration order.
    ///
    /// Mutations made after the snapshot is taken do not affect it.
    pub fn snapshot(&self) -> Vec<Rc<T>> {
        self.entries
            .lock()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}
