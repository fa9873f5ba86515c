//! Prelude module for Rule Lattice.
//!
//! ```
//! use rule_lattice::prelude::*;
//! ```
//!
//! This provides access to:
//! - The list view and its configuration (`RuleListView`, `RuleListConfig`)
//! - Decorator capability and stock implementations
//! - Pointer event types
//! - Selection types
//! - Geometry, color, signal and error types from the core crate

// ============================================================================
// List View
// ============================================================================

pub use crate::config::RuleListConfig;
pub use crate::view::{RowPaint, RuleListView};

// ============================================================================
// Decorators
// ============================================================================

pub use crate::view::{
    DebugLabelFactory, DefaultRowDecorator, FnDecoratorFactory, RowDecorator,
    RowDecoratorFactory, RowPalette, RowVisual, ToggleRegion,
};

// ============================================================================
// Events
// ============================================================================

pub use crate::view::{
    EnterEvent, KeyboardModifiers, LeaveEvent, MouseButton, MouseClickEvent, MouseMoveEvent,
    MousePressEvent,
};

// ============================================================================
// Selection
// ============================================================================

pub use crate::model::{SelectionFlags, SelectionMode, SelectionRange};

// ============================================================================
// Core Types
// ============================================================================

pub use rule_lattice_core::{Color, DecoratorError, LatticeError, Point, Rect, Signal, Size};
