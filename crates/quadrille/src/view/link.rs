//! Shared attachment state between a grid and its controllers.
//!
//! [`GridLink`] is the handle a controller receives when it is attached to
//! a [`GridView`](crate::view::GridView): row count and column list for
//! bounds checks, the dirty-cell accumulator, and a weak back-reference to
//! the attached editor so structural changes can force-cancel an edit from
//! anywhere. The grid holds the only strong `Rc` besides the controllers'
//! own; the editor back-reference is weak to avoid an ownership cycle.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use quadrille_core::Signal;
use quadrille_core::logging::targets;

use crate::model::{CellRange, CellRect, Column, EditorController};

pub(crate) struct GridLink {
    row_count: Cell<usize>,
    columns: RefCell<Vec<Column>>,
    /// Accumulated dirty region since the renderer last drained it.
    dirty: RefCell<Option<CellRange>>,
    /// Fired once per `mark_cells_dirty` call with the newly dirtied range.
    pub(crate) cells_dirtied: Signal<CellRange>,
    /// Fired whenever any cells were dirtied; coarse repaint trigger.
    pub(crate) repaint_requested: Signal<()>,
    /// The attached editor, if any; used for forced cancellation.
    editor: RefCell<Weak<RefCell<EditorController>>>,
}

impl GridLink {
    pub(crate) fn new() -> Self {
        Self {
            row_count: Cell::new(0),
            columns: RefCell::new(Vec::new()),
            dirty: RefCell::new(None),
            cells_dirtied: Signal::new(),
            repaint_requested: Signal::new(),
            editor: RefCell::new(Weak::new()),
        }
    }

    pub(crate) fn row_count(&self) -> usize {
        self.row_count.get()
    }

    pub(crate) fn set_row_count(&self, count: usize) {
        self.row_count.set(count);
    }

    pub(crate) fn column_count(&self) -> usize {
        self.columns.borrow().len()
    }

    /// Run a closure against the column list without cloning it.
    pub(crate) fn with_columns<R>(&self, f: impl FnOnce(&[Column]) -> R) -> R {
        f(&self.columns.borrow())
    }

    /// Run a closure against the column list mutably.
    pub(crate) fn with_columns_mut<R>(&self, f: impl FnOnce(&mut Vec<Column>) -> R) -> R {
        f(&mut self.columns.borrow_mut())
    }

    /// The index of the column with the given sort key, if present.
    pub(crate) fn column_index_of(&self, key: &str) -> Option<usize> {
        self.columns
            .borrow()
            .iter()
            .position(|column| column.key() == key)
    }

    // =========================================================================
    // Dirty-region accumulation
    // =========================================================================

    /// Record that `range` must be repainted and notify the sink.
    pub(crate) fn mark_cells_dirty(&self, range: CellRange) {
        tracing::trace!(target: targets::GRID, ?range, "marking cells dirty");
        {
            let mut dirty = self.dirty.borrow_mut();
            match dirty.as_mut() {
                Some(accumulated) => {
                    for rect in range.rects() {
                        accumulated.add_rect(rect);
                    }
                }
                None => *dirty = Some(range.clone()),
            }
        }
        self.cells_dirtied.emit(range);
        self.repaint_requested.emit(());
    }

    /// Mark every cell of the given rows dirty.
    pub(crate) fn mark_rows_dirty(&self, row_start: usize, row_end: usize) {
        let column_count = self.column_count();
        if column_count == 0 {
            return;
        }
        self.mark_cells_dirty(CellRange::Rect(CellRect::rows(
            row_start,
            row_end,
            column_count,
        )));
    }

    /// Mark every cell of one column dirty.
    pub(crate) fn mark_column_dirty(&self, column: usize) {
        let row_count = self.row_count();
        if row_count == 0 {
            return;
        }
        self.mark_cells_dirty(CellRange::Rect(CellRect {
            row_start: 0,
            column_start: column,
            row_end: row_count - 1,
            column_end: column,
        }));
    }

    /// Mark the full grid dirty (every column of every row).
    pub(crate) fn mark_all_dirty(&self) {
        if self.row_count() == 0 {
            return;
        }
        self.mark_rows_dirty(0, self.row_count() - 1);
    }

    /// Drain the accumulated dirty region.
    pub(crate) fn take_dirty(&self) -> Option<CellRange> {
        self.dirty.borrow_mut().take()
    }

    // =========================================================================
    // Editor back-reference
    // =========================================================================

    pub(crate) fn set_editor(&self, editor: &Rc<RefCell<EditorController>>) {
        *self.editor.borrow_mut() = Rc::downgrade(editor);
    }

    pub(crate) fn clear_editor(&self) {
        *self.editor.borrow_mut() = Weak::new();
    }

    /// Cancel any in-progress edit without a vote.
    ///
    /// Used when a structural change (row count, columns, sort controller,
    /// disabler predicate) invalidates the edit's premises.
    pub(crate) fn force_cancel_edit(&self) {
        let editor = self.editor.borrow().upgrade();
        if let Some(editor) = editor {
            let mut editor = editor.borrow_mut();
            if editor.is_editing() {
                tracing::debug!(target: targets::GRID, "force-canceling active edit");
                editor.cancel();
            }
        }
    }
}
