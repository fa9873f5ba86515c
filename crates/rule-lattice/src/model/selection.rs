//! Row selection state for the rule list.
//!
//! [`SelectionModel`] tracks which rows are selected, the current (focused)
//! row and the anchor for range selection. Every mutation reports the
//! inclusive [`SelectionRange`] of rows whose membership changed; the range
//! may mix newly selected and newly deselected rows, so consumers re-query
//! [`SelectionModel::is_selected`] for each row in it.
//!
//! # Example
//!
//! ```
//! use rule_lattice::model::{SelectionFlags, SelectionMode, SelectionModel};
//!
//! let mut selection = SelectionModel::new();
//! selection.set_selection_mode(SelectionMode::ExtendedSelection);
//!
//! let changed = selection.select(2, SelectionFlags::CLEAR_AND_SELECT);
//! assert_eq!(changed.map(|r| (r.first, r.last)), Some((2, 2)));
//! assert!(selection.is_selected(2));
//! ```

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use rule_lattice_core::Signal;
use rule_lattice_core::logging::targets;

/// Selection behavior mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No rows can be selected.
    NoSelection,
    /// Only one row can be selected at a time (default).
    #[default]
    SingleSelection,
    /// Clicking toggles rows in and out of the selection.
    MultiSelection,
    /// Range selection with Shift+click, extended by Ctrl+click.
    ExtendedSelection,
}

/// Flags controlling selection operations.
///
/// These flags can be combined to perform complex selection operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionFlags {
    /// Clear existing selection before applying operation.
    pub clear: bool,
    /// Select the specified rows.
    pub select: bool,
    /// Deselect the specified rows.
    pub deselect: bool,
    /// Toggle selection state of the specified rows.
    pub toggle: bool,
    /// Set as current row (keyboard focus).
    pub current: bool,
    /// Update anchor point for range selection.
    pub anchor: bool,
}

impl SelectionFlags {
    /// No operation.
    pub const NONE: Self = Self::empty();

    /// Clear existing selection.
    pub const CLEAR: Self = Self {
        clear: true,
        ..Self::empty()
    };

    /// Select the row.
    pub const SELECT: Self = Self {
        select: true,
        ..Self::empty()
    };

    /// Deselect the row.
    pub const DESELECT: Self = Self {
        deselect: true,
        ..Self::empty()
    };

    /// Toggle selection of the row.
    pub const TOGGLE: Self = Self {
        toggle: true,
        ..Self::empty()
    };

    /// Clear existing selection and select the row.
    pub const CLEAR_AND_SELECT: Self = Self {
        clear: true,
        select: true,
        ..Self::empty()
    };

    /// Set as current row.
    pub const CURRENT: Self = Self {
        current: true,
        ..Self::empty()
    };

    /// Clear, select, and set as current.
    pub const CLEAR_SELECT_CURRENT: Self = Self {
        clear: true,
        select: true,
        current: true,
        ..Self::empty()
    };

    const fn empty() -> Self {
        Self {
            clear: false,
            select: false,
            deselect: false,
            toggle: false,
            current: false,
            anchor: false,
        }
    }

    /// Creates flags with current set.
    pub fn with_current(mut self) -> Self {
        self.current = true;
        self
    }

    /// Creates flags with anchor set.
    pub fn with_anchor(mut self) -> Self {
        self.anchor = true;
        self
    }

    fn changes_membership(&self) -> bool {
        self.clear || self.select || self.deselect || self.toggle
    }
}

/// An inclusive interval of rows, `first <= last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    /// First row of the interval.
    pub first: usize,
    /// Last row of the interval (inclusive).
    pub last: usize,
}

impl SelectionRange {
    /// Creates a range spanning `a` and `b` in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            last: a.max(b),
        }
    }

    /// A range covering exactly one row.
    pub fn single(row: usize) -> Self {
        Self {
            first: row,
            last: row,
        }
    }

    /// Returns `true` if `row` lies within the range.
    pub fn contains(&self, row: usize) -> bool {
        (self.first..=self.last).contains(&row)
    }

    /// The rows of the range.
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    /// Smallest range covering both.
    pub fn union(&self, other: &SelectionRange) -> SelectionRange {
        SelectionRange {
            first: self.first.min(other.first),
            last: self.last.max(other.last),
        }
    }
}

/// Manages row selection state for the rule list.
///
/// # Signals
///
/// - `selection_changed`: emitted with the range of rows whose membership changed
/// - `current_changed`: emitted with (new, old) current rows
#[derive(Debug)]
pub struct SelectionModel {
    mode: SelectionMode,
    current: Option<usize>,
    anchor: Option<usize>,
    selected: BTreeSet<usize>,

    /// Emitted when selection changes, with the covering range of changed rows.
    pub selection_changed: Signal<SelectionRange>,

    /// Emitted when the current row changes. Args: (new, old)
    pub current_changed: Signal<(Option<usize>, Option<usize>)>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionModel {
    /// Creates a new selection model with default settings.
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::default(),
            current: None,
            anchor: None,
            selected: BTreeSet::new(),
            selection_changed: Signal::new(),
            current_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Selection Mode
    // =========================================================================

    /// Gets the current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Sets the selection mode.
    ///
    /// Changing mode does not clear existing selection, but subsequent
    /// selections follow the new mode's behavior.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    // =========================================================================
    // Current / Anchor
    // =========================================================================

    /// Gets the current (focused) row.
    pub fn current_row(&self) -> Option<usize> {
        self.current
    }

    /// Sets the current row, emitting `current_changed` if it moved.
    pub fn set_current_row(&mut self, row: Option<usize>) {
        let old = std::mem::replace(&mut self.current, row);
        if old != row {
            self.current_changed.emit((row, old));
        }
    }

    /// Gets the anchor row for range selection.
    pub fn anchor_row(&self) -> Option<usize> {
        self.anchor
    }

    /// Sets the anchor row for range selection.
    pub fn set_anchor_row(&mut self, row: Option<usize>) {
        self.anchor = row;
    }

    // =========================================================================
    // Selection Queries
    // =========================================================================

    /// Checks if a row is selected.
    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    /// Returns true if any rows are selected.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Returns the number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns the selected rows in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Performs a selection operation on one row.
    ///
    /// - `clear`: deselects all rows first
    /// - `select`: adds the row to the selection
    /// - `deselect`: removes the row from the selection
    /// - `toggle`: flips the row's membership
    ///
    /// In [`SelectionMode::SingleSelection`] selecting a row always replaces
    /// the previous selection. Returns the range of rows whose membership
    /// changed, or `None` if nothing changed.
    pub fn select(&mut self, row: usize, flags: SelectionFlags) -> Option<SelectionRange> {
        if flags.current {
            self.set_current_row(Some(row));
        }
        if flags.anchor {
            self.anchor = Some(row);
        }
        if self.mode == SelectionMode::NoSelection || !flags.changes_membership() {
            return None;
        }

        let before = self.selected.clone();
        let was_selected = self.selected.contains(&row);
        let single = self.mode == SelectionMode::SingleSelection;

        if flags.clear {
            self.selected.clear();
        }

        if flags.toggle {
            if was_selected {
                self.selected.remove(&row);
            } else {
                if single {
                    self.selected.clear();
                }
                self.selected.insert(row);
            }
        } else if flags.select {
            if single {
                self.selected.clear();
            }
            self.selected.insert(row);
        } else if flags.deselect {
            self.selected.remove(&row);
        }

        self.finish_change(&before)
    }

    /// Applies a selection operation to every row in `[start_row, end_row]`.
    ///
    /// The bounds may be given in either order. In single selection mode only
    /// `end_row` is selected.
    pub fn select_range(
        &mut self,
        start_row: usize,
        end_row: usize,
        flags: SelectionFlags,
    ) -> Option<SelectionRange> {
        if self.mode == SelectionMode::NoSelection {
            return None;
        }
        if self.mode == SelectionMode::SingleSelection {
            return self.select(end_row, flags);
        }

        let before = self.selected.clone();
        if flags.clear {
            self.selected.clear();
        }

        for row in SelectionRange::new(start_row, end_row).rows() {
            if flags.toggle {
                if !self.selected.remove(&row) {
                    self.selected.insert(row);
                }
            } else if flags.select {
                self.selected.insert(row);
            } else if flags.deselect {
                self.selected.remove(&row);
            }
        }

        if flags.current {
            self.set_current_row(Some(end_row));
        }
        if flags.anchor {
            self.anchor = Some(start_row);
        }

        self.finish_change(&before)
    }

    /// Selects every row in a list of `row_count` rows.
    pub fn select_all(&mut self, row_count: usize) -> Option<SelectionRange> {
        if row_count == 0
            || matches!(
                self.mode,
                SelectionMode::NoSelection | SelectionMode::SingleSelection
            )
        {
            return None;
        }
        self.select_range(0, row_count - 1, SelectionFlags::SELECT)
    }

    /// Clears the selection, keeping current and anchor rows.
    pub fn clear_selection(&mut self) -> Option<SelectionRange> {
        let before = std::mem::take(&mut self.selected);
        self.finish_change(&before)
    }

    /// Clears selection, current and anchor rows (called on model reset).
    pub fn reset(&mut self) -> Option<SelectionRange> {
        let changed = self.clear_selection();
        self.set_current_row(None);
        self.anchor = None;
        changed
    }

    fn finish_change(&self, before: &BTreeSet<usize>) -> Option<SelectionRange> {
        let mut changed = before.symmetric_difference(&self.selected);
        let first = *changed.next()?;
        let last = changed.fold(first, |acc, &row| acc.max(row));
        let range = SelectionRange::new(first, last);

        tracing::trace!(
            target: targets::MODEL,
            first = range.first,
            last = range.last,
            selected = self.selected.len(),
            "selection changed"
        );
        self.selection_changed.emit(range);
        Some(range)
    }
}
