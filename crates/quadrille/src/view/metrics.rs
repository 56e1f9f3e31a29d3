//! Layout geometry seam.
//!
//! The grid never measures anything itself: hit-testing and dirty-region
//! geometry go through a [`GridMetrics`] supplied by the embedding shell,
//! which knows about row heights, column layout, and scroll offsets. Until
//! a metrics object is supplied, pointer events are ignored.

use crate::geometry::{Point, Rect};

/// Maps between pointer positions, cell coordinates, and paint bounds.
///
/// Coordinates are in the grid's own space (scroll already applied).
/// Implementations return `None` for positions outside the content.
pub trait GridMetrics {
    /// The row under the given vertical offset, if any.
    fn row_at(&self, y: f32) -> Option<usize>;

    /// The cell under the given position, if any.
    fn cell_at(&self, position: Point) -> Option<(usize, usize)>;

    /// The full-width bounds of a row.
    fn row_bounds(&self, row: usize) -> Rect;

    /// The full-height bounds of a column.
    fn column_bounds(&self, column: usize) -> Rect;

    /// The bounds of a single cell.
    fn cell_bounds(&self, row: usize, column: usize) -> Rect;
}
