//! The edit state machine.
//!
//! [`EditorController`] governs at most one in-progress edit. Starting and
//! saving an edit are gated by a two-phase vote: every registered
//! [`EditListener`] casts a [`Vote`] in a preview round, and any `Deny`
//! wins. Cancellation is unconditional - it cannot be vetoed.
//!
//! ```text
//!             start(r,c): preview vote
//!        ┌──────── approve ────────┐
//!        │                         ▼
//!     ┌──────┐                ┌─────────────┐
//!     │ Idle │                │ Editing(r,c)│──┐ save(): preview vote
//!     └──────┘                └─────────────┘  │   deny -> stays Editing
//!        ▲                         │  │        │
//!        │◄──── save() approved ───┘  │ ◄──────┘
//!        │◄──── cancel(), always ─────┘
//! ```
//!
//! A denied round leaves the machine exactly as it was - no partial
//! effects. Listener notifications run synchronously, in registration
//! order, from a snapshot taken before the round begins.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use quadrille::model::{EditBehavior, EditListener, EditorController};
//! use quadrille_core::Vote;
//!
//! struct RejectFirstColumn;
//!
//! impl EditListener for RejectFirstColumn {
//!     fn preview_edit_started(&self, _row: usize, column: usize) -> Vote {
//!         if column == 0 { Vote::Deny } else { Vote::Approve }
//!     }
//! }
//!
//! let mut editor = EditorController::new(EditBehavior::SingleCell);
//! editor.add_listener(Rc::new(RejectFirstColumn));
//!
//! assert!(!editor.start(2, 0));
//! assert!(editor.start(2, 3));
//! ```

use std::cell::Cell;
use std::rc::Rc;

use quadrille_core::logging::targets;
use quadrille_core::{ListenerId, ListenerList, Vote};

use super::cell_range::{CellRange, CellRect};
use crate::view::link::GridLink;

/// The scope of an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditBehavior {
    /// Editing disabled entirely.
    None,
    /// An edit covers exactly one cell (default).
    #[default]
    SingleCell,
    /// An edit covers every column of one row.
    WholeRow,
}

/// Current machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// No edit in progress.
    Idle,
    /// An edit is in progress at the given cell. With
    /// [`EditBehavior::WholeRow`] the column records where the edit was
    /// initiated; the edited region spans the whole row.
    Editing { row: usize, column: usize },
}

/// How an edit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit finished through an approved `save()`.
    Saved,
    /// The edit was canceled (explicitly or by a structural change).
    Canceled,
}

/// Observer of the edit lifecycle. Preview methods cast votes; the commit
/// methods are plain notifications. All methods default to inert.
pub trait EditListener {
    /// Cast a vote on whether an edit may start at `(row, column)`.
    fn preview_edit_started(&self, row: usize, column: usize) -> Vote {
        let _ = (row, column);
        Vote::Approve
    }

    /// An edit has started at `(row, column)`.
    fn edit_started(&self, row: usize, column: usize) {
        let _ = (row, column);
    }

    /// Cast a vote on whether the in-progress edit may be saved.
    fn preview_edit_finished(&self, row: usize, column: usize) -> Vote {
        let _ = (row, column);
        Vote::Approve
    }

    /// The edit at `(row, column)` has finished with the given outcome.
    fn edit_finished(&self, row: usize, column: usize, outcome: EditOutcome) {
        let _ = (row, column, outcome);
    }
}

/// Governs the grid's single in-progress edit.
pub struct EditorController {
    /// Shared with the grid's repaint watcher, which must read the scope
    /// during a notification without re-borrowing this controller.
    behavior: Rc<Cell<EditBehavior>>,
    state: EditState,
    listeners: ListenerList<dyn EditListener>,
    link: Option<Rc<GridLink>>,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new(EditBehavior::default())
    }
}

impl EditorController {
    /// Create a controller with the given behavior, in the `Idle` state.
    pub fn new(behavior: EditBehavior) -> Self {
        Self {
            behavior: Rc::new(Cell::new(behavior)),
            state: EditState::Idle,
            listeners: ListenerList::new(),
            link: None,
        }
    }

    // =========================================================================
    // Behavior
    // =========================================================================

    /// The current edit scope.
    pub fn behavior(&self) -> EditBehavior {
        self.behavior.get()
    }

    /// Change the edit scope. Force-cancels any in-progress edit first,
    /// since the edited region's shape would change underneath it.
    pub fn set_behavior(&mut self, behavior: EditBehavior) {
        if self.is_editing() {
            self.cancel();
        }
        self.behavior.set(behavior);
    }

    pub(crate) fn shared_behavior(&self) -> Rc<Cell<EditBehavior>> {
        Rc::clone(&self.behavior)
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register a listener. Listeners are notified in registration order.
    pub fn add_listener(&self, listener: Rc<dyn EditListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unregister a listener. Idempotent.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The machine state.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Whether an edit is in progress.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// The cell where the in-progress edit was initiated, if any.
    pub fn editing_cell(&self) -> Option<(usize, usize)> {
        match self.state {
            EditState::Idle => None,
            EditState::Editing { row, column } => Some((row, column)),
        }
    }

    /// Whether the given cell is part of the edited region.
    ///
    /// `false` whenever idle or the behavior is `None`. `SingleCell`
    /// behavior requires an exact cell match; `WholeRow` requires only the
    /// row to match.
    pub fn is_editing_cell(&self, row: usize, column: usize) -> bool {
        let EditState::Editing {
            row: editing_row,
            column: editing_column,
        } = self.state
        else {
            return false;
        };
        match self.behavior.get() {
            EditBehavior::None => false,
            EditBehavior::SingleCell => editing_row == row && editing_column == column,
            EditBehavior::WholeRow => editing_row == row,
        }
    }

    /// The region covered by the in-progress edit.
    ///
    /// # Panics
    ///
    /// Panics if idle, or if the behavior is `WholeRow` and the controller
    /// is not attached (the column count lives on the grid).
    pub fn cells_being_edited(&self) -> CellRange {
        let (row, column) = self
            .editing_cell()
            .expect("cells_being_edited requires an edit in progress");
        match self.behavior.get() {
            EditBehavior::None => unreachable!("start asserts behavior != None"),
            EditBehavior::SingleCell => CellRange::single(row, column),
            EditBehavior::WholeRow => {
                let link = self
                    .link
                    .as_ref()
                    .expect("whole-row edit region requires an attached grid");
                CellRange::Rect(CellRect::rows(row, row, link.column_count()))
            }
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Attempt to start an edit at `(row, column)`.
    ///
    /// Runs a preview vote over all listeners; any `Deny` leaves the state
    /// unchanged and returns `false`. On approval the machine transitions
    /// to `Editing` and `edit_started` fans out.
    ///
    /// # Panics
    ///
    /// Panics if already editing, if the behavior is `None`, or if the cell
    /// is out of bounds for the attached grid.
    pub fn start(&mut self, row: usize, column: usize) -> bool {
        assert_eq!(
            self.state,
            EditState::Idle,
            "start is only legal while idle"
        );
        assert_ne!(
            self.behavior.get(),
            EditBehavior::None,
            "start requires editing to be enabled"
        );
        if let Some(link) = &self.link {
            assert!(
                row < link.row_count(),
                "edit row {row} exceeds row count {}",
                link.row_count()
            );
            assert!(
                column < link.column_count(),
                "edit column {column} exceeds column count {}",
                link.column_count()
            );
        }

        let tally: Vote = self
            .listeners
            .snapshot()
            .iter()
            .map(|listener| listener.preview_edit_started(row, column))
            .collect();
        if !tally.is_approved() {
            tracing::debug!(target: targets::EDITOR, row, column, "edit start denied");
            return false;
        }

        self.state = EditState::Editing { row, column };
        tracing::debug!(target: targets::EDITOR, row, column, "edit started");
        for listener in self.listeners.snapshot() {
            listener.edit_started(row, column);
        }
        true
    }

    /// Attempt to save the in-progress edit.
    ///
    /// Runs a preview vote; any `Deny` (a validating listener, say) keeps
    /// the edit open and returns `false` with no partial effects. On
    /// approval the machine returns to `Idle` and `edit_finished` fans out
    /// with [`EditOutcome::Saved`].
    ///
    /// # Panics
    ///
    /// Panics if no edit is in progress.
    pub fn save(&mut self) -> bool {
        let (row, column) = self
            .editing_cell()
            .expect("save is only legal while editing");

        let tally: Vote = self
            .listeners
            .snapshot()
            .iter()
            .map(|listener| listener.preview_edit_finished(row, column))
            .collect();
        if !tally.is_approved() {
            tracing::debug!(target: targets::EDITOR, row, column, "edit save denied");
            return false;
        }

        self.state = EditState::Idle;
        tracing::debug!(target: targets::EDITOR, row, column, "edit saved");
        for listener in self.listeners.snapshot() {
            listener.edit_finished(row, column, EditOutcome::Saved);
        }
        true
    }

    /// Cancel the in-progress edit. Unconditional: no vote is taken and
    /// listeners cannot veto.
    ///
    /// # Panics
    ///
    /// Panics if no edit is in progress.
    pub fn cancel(&mut self) {
        let (row, column) = self
            .editing_cell()
            .expect("cancel is only legal while editing");

        self.state = EditState::Idle;
        tracing::debug!(target: targets::EDITOR, row, column, "edit canceled");
        for listener in self.listeners.snapshot() {
            listener.edit_finished(row, column, EditOutcome::Canceled);
        }
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    pub(crate) fn attach(&mut self, link: Rc<GridLink>) {
        assert!(
            self.link.is_none(),
            "EditorController is already attached to a grid"
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
