//! Column definitions.
//!
//! A [`Column`] pairs a stable string key (the identity used by sorting and
//! resizing) with a width specification and renderer references. Equality
//! and hashing include the renderer identities, so the grid can tell a
//! structural column-set change apart from receiving the same list again.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::view::{CellRenderer, HeaderRenderer};

/// Width specification for a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    /// Flexible width distributed by weight. Not user-resizable.
    Flex(f32),
    /// Constrained width in pixels. User-resizable within `[min, max]`.
    Fixed {
        width: f32,
        min_width: f32,
        max_width: f32,
    },
}

impl ColumnWidth {
    /// Whether the user may resize this column directly.
    pub fn is_resizable(&self) -> bool {
        matches!(self, Self::Fixed { .. })
    }

    fn hash_bits<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Flex(weight) => {
                state.write_u8(0);
                state.write_u32(weight.to_bits());
            }
            Self::Fixed {
                width,
                min_width,
                max_width,
            } => {
                state.write_u8(1);
                state.write_u32(width.to_bits());
                state.write_u32(min_width.to_bits());
                state.write_u32(max_width.to_bits());
            }
        }
    }
}

/// A column definition.
#[derive(Clone)]
pub struct Column {
    key: String,
    width: ColumnWidth,
    cell_renderer: Rc<dyn CellRenderer>,
    header_renderer: Option<Rc<dyn HeaderRenderer>>,
    /// Optional renderer for a prototype cell, used by external layout code
    /// to measure intrinsic width.
    prototype_cell: Option<Rc<dyn CellRenderer>>,
}

impl Column {
    /// Create a column with a flexible weight-1 width.
    pub fn new(key: impl Into<String>, cell_renderer: Rc<dyn CellRenderer>) -> Self {
        Self {
            key: key.into(),
            width: ColumnWidth::Flex(1.0),
            cell_renderer,
            header_renderer: None,
            prototype_cell: None,
        }
    }

    /// Set the width specification.
    pub fn with_width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Set a header renderer.
    pub fn with_header_renderer(mut self, renderer: Rc<dyn HeaderRenderer>) -> Self {
        self.header_renderer = Some(renderer);
        self
    }

    /// Set a prototype cell renderer for width measurement.
    pub fn with_prototype_cell(mut self, renderer: Rc<dyn CellRenderer>) -> Self {
        self.prototype_cell = Some(renderer);
        self
    }

    /// The column's stable identity for sorting and resizing.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current width specification.
    pub fn width(&self) -> ColumnWidth {
        self.width
    }

    /// The cell renderer.
    pub fn cell_renderer(&self) -> &Rc<dyn CellRenderer> {
        &self.cell_renderer
    }

    /// The header renderer, if any.
    pub fn header_renderer(&self) -> Option<&Rc<dyn HeaderRenderer>> {
        self.header_renderer.as_ref()
    }

    /// The prototype cell renderer, if any.
    pub fn prototype_cell(&self) -> Option<&Rc<dyn CellRenderer>> {
        self.prototype_cell.as_ref()
    }

    /// Whether the user may resize this column.
    pub fn is_resizable(&self) -> bool {
        self.width.is_resizable()
    }

    /// Replace the fixed width, clamped to the column's `[min, max]`.
    ///
    /// Callers check [`is_resizable`](Self::is_resizable) first; the grid's
    /// resize entry point reports a recoverable error for flex columns.
    pub(crate) fn set_fixed_width(&mut self, new_width: f32) {
        if let ColumnWidth::Fixed {
            width,
            min_width,
            max_width,
        } = &mut self.width
        {
            *width = new_width.clamp(*min_width, *max_width);
        }
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("width", &self.width)
            .field("has_header_renderer", &self.header_renderer.is_some())
            .field("has_prototype_cell", &self.prototype_cell.is_some())
            .finish()
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        fn opt_ptr_eq<T: ?Sized>(a: Option<&Rc<T>>, b: Option<&Rc<T>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }

        self.key == other.key
            && self.width == other.width
            && Rc::ptr_eq(&self.cell_renderer, &other.cell_renderer)
            && opt_ptr_eq(self.header_renderer.as_ref(), other.header_renderer.as_ref())
            && opt_ptr_eq(self.prototype_cell.as_ref(), other.prototype_cell.as_ref())
    }
}

impl Eq for Column {}

impl Hash for Column {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fn rc_addr<T: ?Sized>(rc: &Rc<T>) -> usize {
            Rc::as_ptr(rc) as *const () as usize
        }

        self.key.hash(state);
        self.width.hash_bits(state);
        state.write_usize(rc_addr(&self.cell_renderer));
        state.write_usize(self.header_renderer.as_ref().map_or(0, rc_addr));
        state.write_usize(self.prototype_cell.as_ref().map_or(0, rc_addr));
    }
}
