//! Error types for the grid core.
//!
//! The core has only two failure tiers: contract violations (asserted, see
//! the controller docs) and vote rejections (plain `bool` results). The one
//! genuinely recoverable surface is column resizing, which is driven by
//! presentation-layer drag deltas that can race a column-set change.

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at the grid's fallible public boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A column index was out of range for the current column set.
    #[error("column index {index} out of range (column count {count})")]
    ColumnOutOfRange { index: usize, count: usize },

    /// The column's width is flexible and cannot be resized directly.
    #[error("column '{key}' has a flexible width and is not resizable")]
    ColumnNotResizable { key: String },
}

impl Error {
    /// Create a column-out-of-range error.
    pub fn column_out_of_range(index: usize, count: usize) -> Self {
        Self::ColumnOutOfRange { index, count }
    }

    /// Create a not-resizable error.
    pub fn column_not_resizable(key: impl Into<String>) -> Self {
        Self::ColumnNotResizable { key: key.into() }
    }
}
