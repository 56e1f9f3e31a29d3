//! Logging facilities for Quadrille.
//!
//! Quadrille uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Controller mutations log at `debug`, per-event routing decisions at
//! `trace`. Use the constants in [`targets`] with `tracing` filter
//! directives to narrow output to one subsystem, e.g.
//! `RUST_LOG=quadrille::editor=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "quadrille_core::signal";
    /// Selection controller target.
    pub const SELECTION: &str = "quadrille::selection";
    /// Sort controller target.
    pub const SORT: &str = "quadrille::sort";
    /// Editor controller target.
    pub const EDITOR: &str = "quadrille::editor";
    /// Row disabler target.
    pub const DISABLER: &str = "quadrille::disabler";
    /// Grid orchestrator target.
    pub const GRID: &str = "quadrille::grid";
}
