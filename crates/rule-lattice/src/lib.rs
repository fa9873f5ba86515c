//! Rule Lattice - an interactive rule list with cached per-row decorators.
//!
//! Each row of a [`RuleListView`] is drawn by a stateful
//! [`RowDecorator`](view::RowDecorator) that is built the first time the row
//! is painted and then reused. The view keeps those decorators in step with
//! pointer hover, selection and structural changes, and turns every visual
//! change into a minimal repaint request in container coordinates.
//!
//! The crate is toolkit-free: the host supplies pointer events and viewport
//! geometry, draws the [`RowVisual`](view::RowVisual)s it gets back, and
//! redraws the rectangles emitted through the repaint scheduler.
//!
//! # Example
//!
//! ```
//! use rule_lattice::prelude::*;
//!
//! let mut view = RuleListView::new(DebugLabelFactory);
//! view.set_viewport_size(Size::new(320.0, 200.0));
//! view.set_rules(Some(vec!["name: *.rs".to_string(), "type: fn".to_string()]));
//!
//! let first = view.paint_row(0);
//! assert!(matches!(first, Ok(RowPaint::Decorated(_))));
//! assert_eq!(view.rules().len(), 2);
//! ```
//!
//! # Logging
//!
//! Diagnostics go through `tracing` under the `rule_lattice::*` targets. Install
//! a subscriber in the host, or hand one to a single view with
//! [`RuleListView::with_logger`].

pub mod config;
pub mod model;
pub mod prelude;
pub mod view;

pub use config::RuleListConfig;
pub use model::{RowEntry, RuleModel, SelectionFlags, SelectionMode, SelectionModel, SelectionRange};
pub use view::{RowPaint, RuleListView};

pub use rule_lattice_core::{Color, DecoratorError, LatticeError, Point, Rect, Result, Signal, Size};
