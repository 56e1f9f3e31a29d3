//! Row-interval algebra.
//!
//! [`Span`] is an inclusive interval over row indices; [`RangeSet`] stores
//! an ordered sequence of disjoint, non-adjacent spans and is the backing
//! storage for row selection. The add/remove operations return the exact
//! sub-ranges whose membership changed, which is what lets the grid repaint
//! only the rows that actually flipped.
//!
//! Row counts are UI-scale, so every operation is a linear scan.

/// An inclusive, orderable interval over row indices.
///
/// Two spans are equal iff they have the same bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// First row of the interval.
    pub start: usize,
    /// Last row of the interval, inclusive. Always `>= start`.
    pub end: usize,
}

impl Span {
    /// Create a span from two endpoints, in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A span covering a single row.
    pub fn single(row: usize) -> Self {
        Self { start: row, end: row }
    }

    /// Number of rows covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Spans always cover at least one row.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the row lies within the span.
    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && row <= self.end
    }
}

/// An ordered set of disjoint, non-adjacent [`Span`]s, sorted by start.
///
/// Invariant: no two stored spans overlap or touch; adjacent spans are
/// merged on insertion. This makes the representation canonical, so two
/// range sets are equal iff they cover the same rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeSet {
    spans: Vec<Span>,
}

impl RangeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Create a set covering a single span.
    pub fn from_span(span: Span) -> Self {
        Self { spans: vec![span] }
    }

    /// The stored spans, disjoint and sorted by start.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Whether the set covers no rows.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The lowest covered row, if any.
    pub fn first(&self) -> Option<usize> {
        self.spans.first().map(|span| span.start)
    }

    /// The highest covered row, if any.
    pub fn last(&self) -> Option<usize> {
        self.spans.last().map(|span| span.end)
    }

    /// Total number of covered rows.
    pub fn row_count(&self) -> usize {
        self.spans.iter().map(Span::len).sum()
    }

    /// Whether the row is covered.
    pub fn contains(&self, row: usize) -> bool {
        self.spans.iter().any(|span| span.contains(row))
    }

    /// Remove all rows.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Iterate over every covered row in ascending order.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.spans.iter().flat_map(|span| span.start..=span.end)
    }

    /// Add a span, coalescing with any overlapping or adjacent spans.
    ///
    /// Returns the sub-ranges that were *newly covered* by this call - rows
    /// already in the set are not reported. The returned list is the minimal
    /// delta a caller needs to repaint.
    pub fn add_range(&mut self, span: Span) -> Vec<Span> {
        let mut added = Vec::new();
        let mut rebuilt = Vec::with_capacity(self.spans.len() + 1);
        let mut merged = span;
        // Scans the uncovered remainder of the input; everything below
        // `cursor` has been accounted for (covered or reported).
        let mut cursor = span.start;
        let mut placed = false;

        for &existing in &self.spans {
            if placed {
                rebuilt.push(existing);
            } else if existing.end.saturating_add(1) < merged.start {
                // Strictly left of the input, not even adjacent.
                rebuilt.push(existing);
            } else if merged.end.saturating_add(1) < existing.start {
                // Strictly right: the input's remaining tail is uncovered.
                if cursor <= span.end {
                    added.push(Span::new(cursor, span.end));
                    cursor = span.end + 1;
                }
                rebuilt.push(merged);
                placed = true;
                rebuilt.push(existing);
            } else {
                // Overlap or adjacency: any gap before this span was
                // uncovered input.
                if existing.start > cursor {
                    let gap_end = span.end.min(existing.start - 1);
                    if cursor <= gap_end {
                        added.push(Span::new(cursor, gap_end));
                    }
                }
                cursor = cursor.max(existing.end.saturating_add(1));
                merged = Span {
                    start: merged.start.min(existing.start),
                    end: merged.end.max(existing.end),
                };
            }
        }

        if !placed {
            if cursor <= span.end {
                added.push(Span::new(cursor, span.end));
            }
            rebuilt.push(merged);
        }

        self.spans = rebuilt;
        added
    }

    /// Subtract a span, splitting a partially covered span in two if needed.
    ///
    /// Returns the sub-ranges that were actually removed.
    pub fn remove_range(&mut self, span: Span) -> Vec<Span> {
        let mut removed = Vec::new();
        let mut rebuilt = Vec::with_capacity(self.spans.len() + 1);

        for &existing in &self.spans {
            if existing.end < span.start || existing.start > span.end {
                rebuilt.push(existing);
                continue;
            }

            let cut_start = span.start.max(existing.start);
            let cut_end = span.end.min(existing.end);
            removed.push(Span::new(cut_start, cut_end));

            if existing.start < cut_start {
                rebuilt.push(Span::new(existing.start, cut_start - 1));
            }
            if existing.end > cut_end {
                rebuilt.push(Span::new(cut_end + 1, existing.end));
            }
        }

        self.spans = rebuilt;
        removed
    }

    /// Rows covered by `self` but not by `other`.
    pub fn difference(&self, other: &RangeSet) -> RangeSet {
        let mut result = self.clone();
        for &span in other.spans() {
            result.remove_range(span);
        }
        result
    }

    /// Rows covered by exactly one of the two sets.
    ///
    /// The grid uses this to derive the minimal repaint region from two
    /// coarse selection snapshots.
    pub fn symmetric_difference(&self, other: &RangeSet) -> RangeSet {
        let mut result = self.difference(other);
        for &span in other.difference(self).spans() {
            result.add_range(span);
        }
        result
    }
}

impl FromIterator<Span> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        let mut set = RangeSet::new();
        for span in iter {
            set.add_range(span);
        }
        set
    }
}
