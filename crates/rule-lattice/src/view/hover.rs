//! Which row the pointer is over.
//!
//! [`HoverTracker`] is a two-state machine (`None` / `Row(i)`) that turns
//! raw pointer targets into ordered exit/enter transitions. It holds no
//! decorators; the list view applies each transition to the cache.

/// The current hover binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    /// No row is hovered.
    #[default]
    None,
    /// The pointer is over this row.
    Row(usize),
}

impl HoverState {
    /// The hovered row, if any.
    pub fn row(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Row(row) => Some(row),
        }
    }
}

impl From<Option<usize>> for HoverState {
    fn from(row: Option<usize>) -> Self {
        row.map_or(Self::None, Self::Row)
    }
}

/// The outcome of a pointer move. Apply `exited` before `entered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverTransition {
    /// Row the pointer left.
    pub exited: Option<usize>,
    /// Row the pointer arrived on.
    pub entered: Option<usize>,
}

impl HoverTransition {
    /// `true` when the move did not change the hovered row.
    pub fn is_empty(&self) -> bool {
        self.exited.is_none() && self.entered.is_none()
    }
}

/// Tracks the single hovered row.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverTracker {
    state: HoverState,
}

impl HoverTracker {
    /// Creates a tracker with nothing hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> HoverState {
        self.state
    }

    /// The hovered row, if any.
    pub fn hovered_row(&self) -> Option<usize> {
        self.state.row()
    }

    /// The pointer now targets `target` (`None` for blank space).
    pub fn on_move(&mut self, target: Option<usize>) -> HoverTransition {
        let current = self.state.row();
        if current == target {
            return HoverTransition::default();
        }
        self.state = HoverState::from(target);
        HoverTransition {
            exited: current,
            entered: target,
        }
    }

    /// The pointer left the view. Returns the row that lost hover.
    pub fn on_exit(&mut self) -> Option<usize> {
        std::mem::take(&mut self.state).row()
    }

    /// Forgets the hovered row without reporting an exit.
    ///
    /// Used when the row under the pointer stops existing.
    pub fn reset(&mut self) {
        self.state = HoverState::None;
    }
}
