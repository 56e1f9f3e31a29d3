//! Row-disabling predicate.
//!
//! [`RowDisablerController`] holds one optional, swappable predicate over
//! row indices. A disabled row ignores hover, press, and double-tap input.
//! The change notification carries the *previous* predicate so observers
//! that cached decisions against it can diff.

use std::rc::Rc;

use quadrille_core::Signal;
use quadrille_core::logging::targets;

use crate::view::link::GridLink;

/// A predicate deciding whether a row is disabled.
pub type RowPredicate = Rc<dyn Fn(usize) -> bool>;

/// Manages the grid's row-disabling predicate.
pub struct RowDisablerController {
    filter: Option<RowPredicate>,
    link: Option<Rc<GridLink>>,

    /// Emitted when the predicate is replaced, carrying the previous one.
    pub changed: Signal<Option<RowPredicate>>,
}

impl Default for RowDisablerController {
    fn default() -> Self {
        Self::new()
    }
}

impl RowDisablerController {
    /// Create a controller with no predicate (no row disabled).
    pub fn new() -> Self {
        Self {
            filter: None,
            link: None,
            changed: Signal::new(),
        }
    }

    /// The current predicate, if any.
    pub fn filter(&self) -> Option<&RowPredicate> {
        self.filter.as_ref()
    }

    /// Replace the predicate.
    ///
    /// No-op when handed the same predicate instance (or `None` twice);
    /// otherwise swaps and notifies listeners with the previous predicate.
    pub fn set_filter(&mut self, filter: Option<RowPredicate>) {
        let unchanged = match (&self.filter, &filter) {
            (None, None) => true,
            (Some(old), Some(new)) => Rc::ptr_eq(old, new),
            _ => false,
        };
        if unchanged {
            return;
        }

        tracing::debug!(
            target: targets::DISABLER,
            installed = filter.is_some(),
            "row disabler predicate replaced"
        );
        let previous = std::mem::replace(&mut self.filter, filter);
        self.changed.emit(previous);
    }

    /// Whether the row is disabled under the current predicate.
    pub fn is_row_disabled(&self, row: usize) -> bool {
        self.filter.as_ref().is_some_and(|filter| filter(row))
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    pub(crate) fn attach(&mut self, link: Rc<GridLink>) {
        assert!(
            self.link.is_none(),
            "RowDisablerController is already attached to a grid"
        );
        self.link = Some(link);
    }

    pub(crate) fn detach(&mut self) {
        self.link = None;
    }

    /// Whether the controller is currently attached to a grid.
    pub fn is_attached(&self) -> bool {
        self.link.is_some()
    }
}
