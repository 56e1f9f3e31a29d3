//! Signal/slot system for Quadrille.
//!
//! This module provides a type-safe signal/slot mechanism for controller
//! change notification. Signals are emitted by controllers when their state
//! changes, and connected slots (callbacks) are invoked in response.
//!
//! # Ordering
//!
//! Slots are invoked synchronously, in registration order, and the
//! connection list is snapshotted before a fan-out begins: a slot may
//! connect or disconnect slots (including itself) without affecting the
//! round that is currently firing.
//!
//! # Example
//!
//! ```
//! use quadrille_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//!
//! text_changed.disconnect(conn_id);
//! ```

use std::rc::Rc;

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for a signal-slot connection.
///
/// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
/// The ID remains valid until the connection is explicitly disconnected or
/// the signal is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

/// Internal storage for a single connection.
struct Connection<Args> {
    id: ConnectionId,
    slot: Rc<dyn Fn(&Args)>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with a
/// reference to the provided arguments, in the order they were connected.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments, or a tuple for multiple arguments.
pub struct Signal<Args> {
    /// All active connections, in registration order.
    connections: Mutex<Vec<Connection<Args>>>,
    /// Monotonic source for connection IDs.
    next_id: Mutex<u64>,
    /// Whether signal emission is temporarily blocked.
    blocked: Mutex<bool>,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
            blocked: Mutex::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + 'static,
    {
        let mut next_id = self.next_id.lock();
        let id = ConnectionId(*next_id);
        *next_id += 1;

        self.connections.lock().push(Connection {
            id,
            slot: Rc::new(slot),
        });
        id
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false`
    /// otherwise. Disconnecting an already-removed ID is a harmless no-op.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut connections = self.connections.lock();
        let before = connections.len();
        connections.retain(|conn| conn.id != id);
        connections.len() != before
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. This is useful during
    /// batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        *self.blocked.lock() = blocked;
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        *self.blocked.lock()
    }

    /// Emit the signal, invoking all connected slots in registration order.
    ///
    /// If the signal is blocked, this does nothing. The connection list is
    /// snapshotted before the first slot runs, so connects and disconnects
    /// performed by slots take effect from the next emission onward.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        // Snapshot under the lock, invoke outside it. Slots may re-enter
        // connect/disconnect/emit on this same signal.
        let snapshot: Vec<Rc<dyn Fn(&Args)>> = {
            let connections = self.connections.lock();
            connections.iter().map(|conn| Rc::clone(&conn.slot)).collect()
        };
        tracing::trace!(
            target: targets::SIGNAL,
            connection_count = snapshot.len(),
            "emitting signal"
        );

        for slot in snapshot {
            slot(&args);
        }
    }
}
