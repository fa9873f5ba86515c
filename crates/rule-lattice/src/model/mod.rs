//! Model side of the rule list.
//!
//! - [`RuleModel`]: the ordered, append-only rule sequence (row order is
//!   insertion order)
//! - [`SelectionModel`]: which rows are selected, plus current/anchor rows
//!
//! Both are owned by [`RuleListView`](crate::view::RuleListView), which
//! calls into them directly after each mutation. The selection model's
//! signals are for outside observers.

mod rule_model;
pub mod selection;

pub use rule_model::{RowEntry, RuleModel};
pub use selection::{SelectionFlags, SelectionMode, SelectionModel, SelectionRange};
