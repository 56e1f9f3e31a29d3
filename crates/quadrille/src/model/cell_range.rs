//! Cell-region descriptions.
//!
//! A [`CellRange`] describes "which cells" are affected by a change: a
//! single cell, a rectangular block, or a union of blocks. The grid hands
//! these to its dirty-cell sink so the renderer repaints only what changed.

/// An axis-aligned, inclusive rectangular block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub row_start: usize,
    pub column_start: usize,
    pub row_end: usize,
    pub column_end: usize,
}

impl CellRect {
    /// Create a rect from two arbitrary corner cells, normalizing ordering.
    pub fn from_corners(a: (usize, usize), b: (usize, usize)) -> Self {
        Self {
            row_start: a.0.min(b.0),
            column_start: a.1.min(b.1),
            row_end: a.0.max(b.0),
            column_end: a.1.max(b.1),
        }
    }

    /// A 1x1 rect covering one cell.
    pub fn single(row: usize, column: usize) -> Self {
        Self {
            row_start: row,
            column_start: column,
            row_end: row,
            column_end: column,
        }
    }

    /// A rect covering columns `0..column_count` of one row span.
    pub fn rows(row_start: usize, row_end: usize, column_count: usize) -> Self {
        Self {
            row_start: row_start.min(row_end),
            column_start: 0,
            row_end: row_start.max(row_end),
            column_end: column_count.saturating_sub(1),
        }
    }

    /// Whether the cell lies inside the rect.
    pub fn contains(&self, row: usize, column: usize) -> bool {
        row >= self.row_start
            && row <= self.row_end
            && column >= self.column_start
            && column <= self.column_end
    }
}

/// A polymorphic description of a set of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellRange {
    /// Exactly one cell.
    Cell { row: usize, column: usize },
    /// A rectangular block of cells.
    Rect(CellRect),
    /// A union of rectangular blocks. Blocks may overlap.
    Union(Vec<CellRect>),
}

impl CellRange {
    /// A range covering one cell.
    pub fn single(row: usize, column: usize) -> Self {
        Self::Cell { row, column }
    }

    /// A rectangular range from two arbitrary corners.
    pub fn rect(a: (usize, usize), b: (usize, usize)) -> Self {
        Self::Rect(CellRect::from_corners(a, b))
    }

    /// An empty union, ready for incremental [`add_rect`](Self::add_rect).
    pub fn union() -> Self {
        Self::Union(Vec::new())
    }

    /// Whether the cell is a member of the range.
    pub fn contains(&self, row: usize, column: usize) -> bool {
        match self {
            Self::Cell { row: r, column: c } => *r == row && *c == column,
            Self::Rect(rect) => rect.contains(row, column),
            Self::Union(rects) => rects.iter().any(|rect| rect.contains(row, column)),
        }
    }

    /// Add a block to the range, promoting `Cell`/`Rect` variants to `Union`.
    pub fn add_rect(&mut self, rect: CellRect) {
        match self {
            Self::Union(rects) => rects.push(rect),
            Self::Cell { row, column } => {
                *self = Self::Union(vec![CellRect::single(*row, *column), rect]);
            }
            Self::Rect(existing) => {
                *self = Self::Union(vec![*existing, rect]);
            }
        }
    }

    /// The range's blocks as a rect list (a `Cell` becomes a 1x1 rect).
    pub fn rects(&self) -> Vec<CellRect> {
        match self {
            Self::Cell { row, column } => vec![CellRect::single(*row, *column)],
            Self::Rect(rect) => vec![*rect],
            Self::Union(rects) => rects.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_corners_normalizes() {
        let rect = CellRect::from_corners((5, 7), (2, 3));
        assert_eq!(rect.row_start, 2);
        assert_eq!(rect.column_start, 3);
        assert_eq!(rect.row_end, 5);
        assert_eq!(rect.column_end, 7);
    }

    #[test]
    fn rect_containment_is_inclusive() {
        let rect = CellRect::from_corners((1, 1), (3, 4));
        assert!(rect.contains(1, 1));
        assert!(rect.contains(3, 4));
        assert!(rect.contains(2, 3));
        assert!(!rect.contains(0, 2));
        assert!(!rect.contains(2, 5));
    }

    #[test]
    fn single_cell_containment() {
        let range = CellRange::single(2, 3);
        assert!(range.contains(2, 3));
        assert!(!range.contains(2, 4));
        assert!(!range.contains(3, 3));
    }

    #[test]
    fn union_contains_any_member_block() {
        let mut range = CellRange::union();
        range.add_rect(CellRect::from_corners((0, 0), (1, 1)));
        range.add_rect(CellRect::from_corners((5, 5), (6, 6)));

        assert!(range.contains(0, 1));
        assert!(range.contains(6, 5));
        assert!(!range.contains(3, 3));
    }

    #[test]
    fn add_rect_promotes_cell_to_union() {
        let mut range = CellRange::single(0, 0);
        range.add_rect(CellRect::single(4, 4));

        assert!(range.contains(0, 0));
        assert!(range.contains(4, 4));
        assert_eq!(range.rects().len(), 2);
    }

    #[test]
    fn rows_rect_spans_all_columns() {
        let rect = CellRect::rows(3, 3, 5);
        assert_eq!(rect.column_start, 0);
        assert_eq!(rect.column_end, 4);
        assert!(rect.contains(3, 0));
        assert!(rect.contains(3, 4));
        assert!(!rect.contains(4, 0));
    }
}
