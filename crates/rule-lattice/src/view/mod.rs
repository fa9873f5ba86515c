//! View side of the rule list.
//!
//! [`RuleListView`] is the public surface. The other types are its parts and
//! are exported for hosts that want to drive or inspect them directly:
//!
//! - [`RowDecorator`] / [`RowDecoratorFactory`]: the per-row visual capability
//! - [`DecoratorCache`]: row-indexed storage of live decorators
//! - [`HoverTracker`]: the single hovered row and its transitions
//! - [`SelectionBridge`]: selection changes onto cached decorators
//! - [`RepaintScheduler`]: container-space repaint requests
//! - [`RowLayout`]: row geometry and hit testing

mod cache;
pub mod decorator;
pub mod events;
mod hover;
mod layout;
mod list_view;
pub mod repaint;
mod selection_bridge;

pub use cache::DecoratorCache;
pub use decorator::{
    DebugLabelFactory, DefaultRowDecorator, FnDecoratorFactory, InitialRowState, RegionVisual,
    RowDecorator, RowDecoratorFactory, RowPalette, RowVisual, ToggleRegion,
};
pub use events::{
    EnterEvent, EventBase, KeyboardModifiers, LeaveEvent, MouseButton, MouseClickEvent,
    MouseMoveEvent, MousePressEvent,
};
pub use hover::{HoverState, HoverTracker, HoverTransition};
pub use layout::RowLayout;
pub use list_view::{RowPaint, RuleListView};
pub use repaint::RepaintScheduler;
pub use selection_bridge::SelectionBridge;
