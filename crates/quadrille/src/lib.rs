//! Interaction core for virtualized data-grids.
//!
//! Quadrille is the coordination layer of an interactive data-grid: it
//! decides which rows are selected, which columns are sorted and in what
//! order, which single cell (or row) is being edited and under what
//! cancellation rules, which rows are disabled, and which screen regions
//! must be repainted in response to any of the above. It owns no row data
//! (only a row count and indices), does no layout arithmetic, and paints
//! nothing - rendering, hit-testing metrics, and input streams are external
//! collaborators specified at trait boundaries.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   attach    ┌───────────────────────────┐
//! │ Selection    │────────────>│                           │
//! │ Sort         │────────────>│        GridView           │
//! │ Editor       │────────────>│  (orchestrator: pointer   │
//! │ RowDisabler  │────────────>│   routing, dirty cells)   │
//! └──────────────┘             └───────────────────────────┘
//!        │  change signals            │            ▲
//!        └────────────────────────────┘            │ hit-testing
//!                                           ┌──────┴──────┐
//!                                           │ GridMetrics │
//!                                           └─────────────┘
//! ```
//!
//! Controllers are constructed independently, attached to at most one
//! [`GridView`](view::GridView) at a time, and notify through signals; the
//! grid reacts by marking the affected [`CellRange`](model::CellRange)
//! dirty and requesting a repaint, never by painting directly.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use quadrille::Rect;
//! use quadrille::model::{Column, SelectionController, SelectionMode, Span};
//! use quadrille::view::{CellRenderer, CellState, GridView, PaintSurface};
//!
//! struct TextCell;
//!
//! impl CellRenderer for TextCell {
//!     fn paint(
//!         &self,
//!         _surface: &mut dyn PaintSurface,
//!         _row: usize,
//!         _column: usize,
//!         _bounds: Rect,
//!         _state: CellState,
//!     ) {
//!         // Draw the cell content here.
//!     }
//! }
//!
//! let mut grid = GridView::new();
//! grid.set_row_count(100);
//! grid.set_columns(vec![Column::new("title", Rc::new(TextCell))]);
//! grid.take_dirty_region();
//!
//! let selection = Rc::new(RefCell::new(SelectionController::new(SelectionMode::Multi)));
//! grid.set_selection_controller(Some(selection.clone()));
//!
//! selection.borrow_mut().add_selected_range(Span::new(3, 7));
//! assert!(selection.borrow().is_row_selected(5));
//! assert!(grid.take_dirty_region().is_some());
//! ```

pub mod error;
pub mod geometry;
pub mod model;
pub mod prelude;
pub mod view;

pub use error::{Error, Result};
pub use geometry::{Point, Rect, Size};
