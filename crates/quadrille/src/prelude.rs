//! Prelude module for Quadrille.
//!
//! Re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use quadrille::prelude::*;
//! ```
//!
//! This provides access to:
//! - The grid orchestrator (`GridView`)
//! - Model controllers (`SelectionController`, `SortController`,
//!   `EditorController`, `RowDisablerController`)
//! - Range and cell-region types (`Span`, `RangeSet`, `CellRange`)
//! - View-boundary traits (`GridMetrics`, `CellRenderer`, `HeaderRenderer`)
//! - Geometry types (`Point`, `Size`, `Rect`)

// ============================================================================
// Orchestrator
// ============================================================================

pub use crate::view::{GridView, KeyboardModifiers, PointerEvent};

// ============================================================================
// Model controllers
// ============================================================================

pub use crate::model::{
    EditBehavior, EditListener, EditOutcome, EditState, EditorController, RowDisablerController,
    RowPredicate, SelectionController, SelectionMode, SortController, SortDirection, SortMode,
};

// ============================================================================
// Ranges and columns
// ============================================================================

pub use crate::model::{CellRange, CellRect, Column, ColumnWidth, RangeSet, Span};

// ============================================================================
// View boundary
// ============================================================================

pub use crate::view::{CellRenderer, CellState, GridMetrics, HeaderRenderer, PaintSurface};

// ============================================================================
// Geometry and errors
// ============================================================================

pub use crate::geometry::{Point, Rect, Size};
pub use crate::{Error, Result};

// ============================================================================
// Signal core
// ============================================================================

pub use quadrille_core::{ConnectionId, ListenerId, Signal, Vote};
