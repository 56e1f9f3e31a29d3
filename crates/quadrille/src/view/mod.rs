//! The grid orchestrator and its seams to the embedding shell.

pub mod events;
pub mod grid_view;
pub(crate) mod link;
pub mod metrics;
pub mod render;

pub use events::{KeyboardModifiers, PointerEvent};
pub use grid_view::GridView;
pub use metrics::GridMetrics;
pub use render::{CellRenderer, CellState, HeaderRenderer, PaintSurface};
