//! Row-selection state.
//!
//! [`SelectionController`] owns one [`RangeSet`] of selected rows and
//! enforces the active [`SelectionMode`]'s invariants. Every mutation that
//! changes the observable selection fires a single coarse `changed`
//! notification carrying the controller's full current contents; observers
//! (the grid included) re-derive what to repaint from that snapshot rather
//! than receiving a diff.
//!
//! # Contract violations
//!
//! Mode-gated methods assert the mode they require, and range arguments are
//! asserted against the attached grid's row count. These are programming
//! errors by the caller, not recoverable conditions.
//!
//! # Example
//!
//! ```
//! use quadrille::model::{SelectionController, SelectionMode, Span};
//!
//! let mut selection = SelectionController::new(SelectionMode::Multi);
//! selection.changed.connect(|ranges| {
//!     println!("{} rows selected", ranges.row_count());
//! });
//!
//! selection.add_selected_range(Span::new(2, 5));
//! assert!(selection.is_row_selected(3));
//! ```

use std::rc::Rc;

use quadrille_core::Signal;
use quadrille_core::logging::targets;

use super::span::{RangeSet, Span};
use crate::view::link::GridLink;

/// How many rows may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No rows can be selected.
    None,
    /// At most one row can be selected (default).
    #[default]
    Single,
    /// Any set of rows can be selected.
    Multi,
}

/// Manages which rows of a grid are selected.
pub struct SelectionController {
    mode: SelectionMode,
    ranges: RangeSet,
    link: Option<Rc<GridLink>>,

    /// Emitted after every observable selection change, carrying the full
    /// current contents.
    pub changed: Signal<RangeSet>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

impl SelectionController {
    /// Create a controller with the given mode and an empty selection.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ranges: RangeSet::new(),
            link: None,
            changed: Signal::new(),
        }
    }

    // =========================================================================
    // Mode
    // =========================================================================

    /// The current selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the selection mode.
    ///
    /// If the existing selection violates the new mode's invariant it is
    /// reduced: switching to `Single` keeps only the first selected row,
    /// switching to `None` clears.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        match mode {
            SelectionMode::None => {
                if !self.ranges.is_empty() {
                    self.ranges.clear();
                    self.emit_changed();
                }
            }
            SelectionMode::Single => {
                if self.ranges.row_count() > 1 {
                    let first = self.ranges.first().expect("non-empty set has a first row");
                    self.ranges = RangeSet::from_span(Span::single(first));
                    self.emit_changed();
                }
            }
            SelectionMode::Multi => {}
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether the row is selected.
    pub fn is_row_selected(&self, row: usize) -> bool {
        self.ranges.contains(row)
    }

    /// Whether any row is selected.
    pub fn has_selection(&self) -> bool {
        !self.ranges.is_empty()
    }

    /// The selected ranges, disjoint and ordered.
    pub fn selected_ranges(&self) -> &RangeSet {
        &self.ranges
    }

    /// The selected rows in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.ranges.rows().collect()
    }

    /// The first selected range, if any.
    pub fn selected_range(&self) -> Option<Span> {
        self.ranges.spans().first().copied()
    }

    /// The selected row in `Single` mode.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not `Single`.
    pub fn selected_index(&self) -> Option<usize> {
        assert_eq!(
            self.mode,
            SelectionMode::Single,
            "selected_index requires SelectionMode::Single"
        );
        self.ranges.first()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Select exactly the given row, or clear with `None`.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not `Single` or the row is out of bounds.
    pub fn set_selected_index(&mut self, row: Option<usize>) {
        assert_eq!(
            self.mode,
            SelectionMode::Single,
            "set_selected_index requires SelectionMode::Single"
        );
        match row {
            Some(row) => self.set_ranges(RangeSet::from_span(Span::single(row))),
            None => self.clear_selection(),
        }
    }

    /// Select exactly the given range, or clear with `None`.
    ///
    /// # Panics
    ///
    /// Panics on a mode violation (a multi-row range in `Single` mode, any
    /// range in `None` mode) or an out-of-bounds range.
    pub fn set_selected_range(&mut self, range: Option<Span>) {
        match range {
            Some(span) => self.set_ranges(RangeSet::from_span(span)),
            None => self.clear_selection(),
        }
    }

    /// Replace the selection with the given ranges.
    ///
    /// # Panics
    ///
    /// Panics on a mode violation or an out-of-bounds range.
    pub fn set_selected_ranges(&mut self, ranges: impl IntoIterator<Item = Span>) {
        self.set_ranges(ranges.into_iter().collect());
    }

    /// Add a range to the selection. Multi mode only.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not `Multi` or the range is out of bounds.
    pub fn add_selected_range(&mut self, range: Span) {
        assert_eq!(
            self.mode,
            SelectionMode::Multi,
            "add_selected_range requires SelectionMode::Multi"
        );
        self.assert_in_bounds(range);
        if !self.ranges.add_range(range).is_empty() {
            self.emit_changed();
        }
    }

    /// Remove a range from the selection. Multi mode only.
    ///
    /// # Panics
    ///
    /// Panics if the mode is not `Multi` or the range is out of bounds.
    pub fn remove_selected_range(&mut self, range: Span) {
        assert_eq!(
            self.mode,
            SelectionMode::Multi,
            "remove_selected_range requires SelectionMode::Multi"
        );
        self.assert_in_bounds(range);
        if !self.ranges.remove_range(range).is_empty() {
            self.emit_changed();
        }
    }

    /// Select every row of the attached grid. Multi mode only; no-op in
    /// `Single` and `None` modes.
    ///
    /// # Panics
    ///
    /// Panics if the controller is not attached (the row count lives on the
    /// grid).
    pub fn select_all(&mut self) {
        if self.mode != SelectionMode::Multi {
            return;
        }
        let link = self
            .link
            .as_ref()
            .expect("select_all requires an attached grid");
        let row_count = link.row_count();
        if row_count == 0 {
            return;
        }
        if !self.ranges.add_range(Span::new(0, row_count - 1)).is_empty() {
            self.emit_changed();
        }
    }

    /// Deselect every row.
    pub fn clear_selection(&mut self) {
        if self.ranges.is_empty() {
            return;
        }
        self.ranges.clear();
        self.emit_changed();
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    pub(crate) fn attach(&mut self, link: Rc<GridLink>) {
        assert!(
            self.link.is_none(),
            "SelectionController is already attached to a grid"
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

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn set_ranges(&mut self, ranges: RangeSet) {
        match self.mode {
            SelectionMode::None => assert!(
                ranges.is_empty(),
                "cannot select rows in SelectionMode::None"
            ),
            SelectionMode::Single => assert!(
                ranges.row_count() <= 1,
                "SelectionMode::Single holds at most one row, got {}",
                ranges.row_count()
            ),
            SelectionMode::Multi => {}
        }
        for &span in ranges.spans() {
            self.assert_in_bounds(span);
        }
        if self.ranges == ranges {
            return;
        }
        self.ranges = ranges;
        self.emit_changed();
    }

    fn assert_in_bounds(&self, span: Span) {
        if let Some(link) = &self.link {
            assert!(
                span.end < link.row_count(),
                "selection range {}..={} exceeds row count {}",
                span.start,
                span.end,
                link.row_count()
            );
        }
    }

    fn emit_changed(&self) {
        tracing::debug!(
            target: targets::SELECTION,
            rows = self.ranges.row_count(),
            "selection changed"
        );
        self.changed.emit(self.ranges.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn default_is_single_and_empty() {
        let selection = SelectionController::default();
        assert_eq!(selection.mode(), SelectionMode::Single);
        assert!(!selection.has_selection());
    }

    #[test]
    fn single_mode_set_and_replace_index() {
        let mut selection = SelectionController::new(SelectionMode::Single);
        selection.set_selected_index(Some(5));
        assert_eq!(selection.selected_index(), Some(5));

        selection.set_selected_index(Some(2));
        assert_eq!(selection.selected_index(), Some(2));
        assert!(!selection.is_row_selected(5));
    }

    #[test]
    #[should_panic(expected = "at most one row")]
    fn single_mode_rejects_multi_row_range() {
        let mut selection = SelectionController::new(SelectionMode::Single);
        selection.set_selected_ranges([Span::new(5, 5)]);
        selection.set_selected_ranges([Span::new(1, 3)]);
    }

    #[test]
    #[should_panic(expected = "requires SelectionMode::Multi")]
    fn add_range_rejected_in_single_mode() {
        let mut selection = SelectionController::new(SelectionMode::Single);
        selection.add_selected_range(Span::new(1, 2));
    }

    #[test]
    #[should_panic(expected = "cannot select rows in SelectionMode::None")]
    fn none_mode_rejects_selection() {
        let mut selection = SelectionController::new(SelectionMode::None);
        selection.set_selected_range(Some(Span::single(0)));
    }

    #[test]
    fn multi_mode_add_and_remove() {
        let mut selection = SelectionController::new(SelectionMode::Multi);
        selection.add_selected_range(Span::new(2, 5));
        selection.remove_selected_range(Span::new(3, 3));

        assert_eq!(selection.selected_rows(), vec![2, 4, 5]);
    }

    #[test]
    fn changed_fires_once_per_observable_change() {
        let mut selection = SelectionController::new(SelectionMode::Multi);
        let count = Rc::new(RefCell::new(0));

        let count_clone = count.clone();
        selection.changed.connect(move |_| {
            *count_clone.borrow_mut() += 1;
        });

        selection.add_selected_range(Span::new(2, 5));
        assert_eq!(*count.borrow(), 1);

        // Already covered: no observable change, no notification.
        selection.add_selected_range(Span::new(3, 4));
        assert_eq!(*count.borrow(), 1);

        selection.clear_selection();
        assert_eq!(*count.borrow(), 2);

        // Clearing an empty selection is silent.
        selection.clear_selection();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn changed_carries_current_contents() {
        let mut selection = SelectionController::new(SelectionMode::Multi);
        let seen = Rc::new(RefCell::new(RangeSet::new()));

        let seen_clone = seen.clone();
        selection.changed.connect(move |ranges| {
            *seen_clone.borrow_mut() = ranges.clone();
        });

        selection.add_selected_range(Span::new(1, 3));
        selection.add_selected_range(Span::new(7, 7));

        assert_eq!(seen.borrow().spans(), &[Span::new(1, 3), Span::new(7, 7)]);
    }

    #[test]
    fn set_mode_single_collapses_to_first_row() {
        let mut selection = SelectionController::new(SelectionMode::Multi);
        selection.add_selected_range(Span::new(4, 8));

        selection.set_mode(SelectionMode::Single);
        assert_eq!(selection.selected_index(), Some(4));
    }

    #[test]
    fn set_mode_none_clears() {
        let mut selection = SelectionController::new(SelectionMode::Multi);
        selection.add_selected_range(Span::new(4, 8));

        selection.set_mode(SelectionMode::None);
        assert!(!selection.has_selection());
    }

    #[test]
    fn replace_with_identical_ranges_is_silent() {
        let mut selection = SelectionController::new(SelectionMode::Multi);
        selection.set_selected_ranges([Span::new(1, 2)]);

        let count = Rc::new(RefCell::new(0));
        let count_clone = count.clone();
        selection.changed.connect(move |_| {
            *count_clone.borrow_mut() += 1;
        });

        selection.set_selected_ranges([Span::new(1, 2)]);
        assert_eq!(*count.borrow(), 0);
    }
}
