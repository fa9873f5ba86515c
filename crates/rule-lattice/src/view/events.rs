//! Pointer event types delivered to the rule list and its row decorators.
//!
//! Positions are in the coordinate space of the receiver: events given to
//! [`RuleListView`](super::RuleListView) carry container (viewport)
//! coordinates, and the view rewrites them into row-local coordinates with
//! [`MouseMoveEvent::to_row_local`] and friends before forwarding them to a
//! decorator.

use rule_lattice_core::Point;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

/// Common data for all pointer events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    /// Create a new, unaccepted event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept (consume) the event.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, leaving it to default handling.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Pointer motion.
#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Base event data.
    pub base: EventBase,
    /// Pointer position in receiver coordinates.
    pub local_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseMoveEvent {
    /// Create a new mouse move event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Returns a copy with the given modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Rewrites the position relative to a row whose top-left corner is `row_origin`.
    pub fn to_row_local(&self, row_origin: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos: relative_to(self.local_pos, row_origin),
            modifiers: self.modifiers,
        }
    }
}

/// A mouse button going down.
///
/// A receiver that fully handles the press calls `base.accept()`; the list
/// then treats the rest of the gesture as consumed.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was pressed.
    pub button: MouseButton,
    /// Pointer position in receiver coordinates.
    pub local_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MousePressEvent {
    /// Create a new mouse press event.
    pub fn new(button: MouseButton, local_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            modifiers,
        }
    }

    /// Rewrites the position relative to a row whose top-left corner is `row_origin`.
    pub fn to_row_local(&self, row_origin: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos: relative_to(self.local_pos, row_origin),
            ..*self
        }
    }
}

/// A completed press/release pair on the same spot.
#[derive(Debug, Clone, Copy)]
pub struct MouseClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was clicked.
    pub button: MouseButton,
    /// Pointer position in receiver coordinates.
    pub local_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseClickEvent {
    /// Create a new mouse click event.
    pub fn new(button: MouseButton, local_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            modifiers,
        }
    }
}

/// Sent to a decorator when the pointer starts hovering its row.
#[derive(Debug, Clone, Copy)]
pub struct EnterEvent {
    /// Base event data.
    pub base: EventBase,
    /// The position where the pointer entered, in receiver coordinates.
    pub local_pos: Point,
}

impl EnterEvent {
    /// Create a new enter event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// The pointer left the list area.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveEvent {
    /// Base event data.
    pub base: EventBase,
}

impl LeaveEvent {
    /// Create a new leave event.
    pub fn new() -> Self {
        Self::default()
    }
}

fn relative_to(pos: Point, origin: Point) -> Point {
    Point::new(pos.x - origin.x, pos.y - origin.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accept_and_ignore() {
        let mut event = MousePressEvent::new(MouseButton::Left, Point::ZERO, KeyboardModifiers::NONE);
        assert!(!event.base.is_accepted());

        event.base.accept();
        assert!(event.base.is_accepted());

        event.base.ignore();
        assert!(!event.base.is_accepted());
    }

    #[test]
    fn test_row_local_translation() {
        let row_origin = Point::new(0.0, 48.0);

        let moved = MouseMoveEvent::new(Point::new(12.0, 60.0))
            .with_modifiers(KeyboardModifiers::SHIFT)
            .to_row_local(row_origin);
        assert_eq!(moved.local_pos, Point::new(12.0, 12.0));
        assert!(moved.modifiers.shift);

        let mut press = MousePressEvent::new(MouseButton::Right, Point::new(5.0, 50.0), KeyboardModifiers::CTRL);
        press.base.accept();
        let local = press.to_row_local(row_origin);
        assert_eq!(local.local_pos, Point::new(5.0, 2.0));
        assert_eq!(local.button, MouseButton::Right);
        assert!(!local.base.is_accepted());
    }

    #[test]
    fn test_modifiers() {
        assert!(KeyboardModifiers::NONE.none());
        assert!(KeyboardModifiers::CTRL.any());
        assert!(!KeyboardModifiers::SHIFT.control);
    }
}
