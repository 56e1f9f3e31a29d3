//! Foundation crate for Quadrille.
//!
//! This crate provides the notification primitives the grid controllers are
//! built on:
//!
//! - [`Signal`] - ordered, synchronous signal/slot notifications
//! - [`Vote`] - aggregate veto results for preview rounds
//! - [`ListenerList`] - ordered registry of trait-object listeners
//! - [`logging`] - tracing target constants for log filtering
//!
//! Everything here is single-threaded by design: slots and listeners run
//! synchronously, in registration order, before the emitting call returns.

pub mod listener;
pub mod logging;
pub mod signal;
pub mod vote;

pub use listener::{ListenerId, ListenerList};
pub use signal::{ConnectionId, Signal};
pub use vote::Vote;
