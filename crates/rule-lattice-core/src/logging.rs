//! Logging and tracing facilities.
//!
//! Rule Lattice is instrumented with the `tracing` crate. The library never
//! installs a subscriber itself: the host injects one, either globally or
//! scoped to a call with [`tracing::subscriber::with_default`].
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("rule_lattice=debug")
//!         .init();
//!
//!     // Build and drive the rule list...
//! }
//! ```

/// Span names used for tracing.
pub mod span_names {
    /// A paint pass over the visible rows.
    pub const PAINT: &str = "rule_lattice::paint";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "rule_lattice_core::signal";
    /// Rule model and selection model target.
    pub const MODEL: &str = "rule_lattice::model";
    /// List view, decorator cache and pointer routing target.
    pub const VIEW: &str = "rule_lattice::view";
    /// Repaint scheduling target.
    pub const REPAINT: &str = "rule_lattice::repaint";
    /// Performance spans.
    pub const PERF: &str = "rule_lattice::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a paint pass or a bulk model reset.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
