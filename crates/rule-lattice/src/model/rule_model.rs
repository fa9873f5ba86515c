//! Ordered rule storage backing the rule list.
//!
//! `RuleModel<R>` is an append-only sequence: insertion order is row order.
//! Rules are opaque to the model; it only tracks their position.

use rule_lattice_core::logging::targets;

/// One slot in a [`RuleModel`].
///
/// Besides real rules, a list representation may hold placeholder entries
/// (for example a row reserved for an inline editor). Placeholders occupy a
/// row index but are never reported as rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEntry<R> {
    /// A domain rule.
    Rule(R),
    /// A non-rule row.
    Placeholder,
}

impl<R> RowEntry<R> {
    /// Returns the rule held by this entry, if any.
    pub fn as_rule(&self) -> Option<&R> {
        match self {
            Self::Rule(rule) => Some(rule),
            Self::Placeholder => None,
        }
    }

    /// Returns `true` for placeholder entries.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// An ordered, append-only collection of rules.
///
/// Row `i` is valid iff `i < len()`.
#[derive(Debug)]
pub struct RuleModel<R> {
    entries: Vec<RowEntry<R>>,
}

impl<R> Default for RuleModel<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RuleModel<R> {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of rows, placeholders included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the model has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `row` addresses an existing row.
    pub fn is_valid_row(&self, row: usize) -> bool {
        row < self.entries.len()
    }

    /// Removes every row.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        tracing::trace!(target: targets::MODEL, removed, "rule model cleared");
    }

    /// Appends a rule as the new last row and returns its row index.
    pub fn append(&mut self, rule: R) -> usize {
        self.push_entry(RowEntry::Rule(rule))
    }

    /// Appends a placeholder row and returns its row index.
    pub fn append_placeholder(&mut self) -> usize {
        self.push_entry(RowEntry::Placeholder)
    }

    /// Appends every rule yielded by `rules`, in order.
    pub fn extend<I>(&mut self, rules: I)
    where
        I: IntoIterator<Item = R>,
    {
        let first = self.entries.len();
        self.entries.extend(rules.into_iter().map(RowEntry::Rule));
        let len = self.entries.len();
        if len > first {
            tracing::trace!(target: targets::MODEL, first, last = len - 1, "rows appended");
        }
    }

    /// Returns the entry at `row`, or `None` if out of range.
    pub fn get(&self, row: usize) -> Option<&RowEntry<R>> {
        self.entries.get(row)
    }

    /// Returns the rule at `row`, or `None` if out of range or a placeholder.
    pub fn rule(&self, row: usize) -> Option<&R> {
        self.entries.get(row).and_then(RowEntry::as_rule)
    }

    /// Iterates over the rules in row order, skipping placeholders.
    pub fn rules(&self) -> impl Iterator<Item = &R> + '_ {
        self.entries.iter().filter_map(RowEntry::as_rule)
    }

    /// Iterates over every entry in row order.
    pub fn entries(&self) -> impl Iterator<Item = &RowEntry<R>> + '_ {
        self.entries.iter()
    }

    fn push_entry(&mut self, entry: RowEntry<R>) -> usize {
        let row = self.entries.len();
        self.entries.push(entry);
        row
    }
}
