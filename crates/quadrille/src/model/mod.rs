//! Controller state machines for the grid.
//!
//! Each controller here is constructed independently of any grid, attached
//! to at most one [`GridView`](crate::view::GridView) at a time (attachment
//! is exclusive and asserted), and notifies observers through signals:
//!
//! - [`SelectionController`]: which rows are selected
//! - [`SortController`]: which columns are sorted, and in what priority
//! - [`EditorController`]: the single in-progress edit, gated by votes
//! - [`RowDisablerController`]: which rows are disabled
//!
//! Supporting value types: [`Span`]/[`RangeSet`] for row intervals,
//! [`CellRange`] for affected-cell descriptions, and [`Column`] for the
//! grid's column definitions.

mod cell_range;
mod column;
mod editor;
mod row_filter;
mod selection;
mod sort;
mod span;

pub use cell_range::{CellRange, CellRect};
pub use column::{Column, ColumnWidth};
pub use editor::{EditBehavior, EditListener, EditOutcome, EditState, EditorController};
pub use row_filter::{RowDisablerController, RowPredicate};
pub use selection::{SelectionController, SelectionMode};
pub use sort::{SortController, SortDirection, SortEvent, SortMode};
pub use span::{RangeSet, Span};
