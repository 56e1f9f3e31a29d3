//! Render callback contracts.
//!
//! The core never paints. Instead it computes facts - is this row selected,
//! highlighted, disabled, is this cell being edited - and hands them to the
//! presentation layer through these traits. The paint target is an opaque
//! [`PaintSurface`]; the presentation layer downcasts it to whatever canvas
//! or scene builder it actually draws with.

use std::any::Any;

use crate::geometry::Rect;
use crate::model::SortDirection;

/// The per-cell facts the grid computes fresh at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellState {
    /// The cell's row is part of the current selection.
    pub selected: bool,
    /// The cell's row is under the pointer.
    pub highlighted: bool,
    /// The cell is inside the region currently being edited.
    pub editing: bool,
    /// The cell's row is disabled by the row-disabler predicate.
    pub disabled: bool,
}

/// An opaque paint target supplied by the presentation layer.
pub trait PaintSurface: Any {
    /// Downcast access for the presentation layer's concrete surface.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Produces the visual for one data cell.
pub trait CellRenderer {
    /// Paint the cell at `(row, column)` into `bounds` on the surface.
    ///
    /// `state` carries the grid's per-cell facts; everything else (cell
    /// content, theming) is the renderer's own concern.
    fn paint(
        &self,
        surface: &mut dyn PaintSurface,
        row: usize,
        column: usize,
        bounds: Rect,
        state: CellState,
    );
}

/// Produces the visual for one column header.
///
/// The grid resolves the column's current sort direction from the attached
/// sort controller and passes it in; the renderer decides how (and whether)
/// to draw the indicator.
pub trait HeaderRenderer {
    /// Paint the header for `column` into `bounds` on the surface.
    fn paint(
        &self,
        surface: &mut dyn PaintSurface,
        column: usize,
        bounds: Rect,
        sort: Option<SortDirection>,
    );
}
