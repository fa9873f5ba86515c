//! Core primitives for Rule Lattice.
//!
//! This crate provides the toolkit-free building blocks the rule list is
//! built from:
//!
//! - **Geometry**: [`Point`], [`Size`], [`Rect`] and [`Color`]
//! - **Signal/Slot System**: synchronous observer notifications via [`Signal`]
//! - **Errors**: [`LatticeError`] and the crate [`Result`] alias
//! - **Logging**: `tracing` targets and [`PerfSpan`]
//!
//! # Signal Example
//!
//! ```
//! use rule_lattice_core::{Rect, Signal};
//!
//! let repaint_requested = Signal::<Rect>::new();
//! repaint_requested.connect(|rect| {
//!     println!("repaint {rect:?}");
//! });
//! repaint_requested.emit(Rect::new(0.0, 24.0, 200.0, 24.0));
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod signal;

pub use error::{DecoratorError, LatticeError, Result, SignalError};
pub use geometry::{Color, Point, Rect, Size};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
