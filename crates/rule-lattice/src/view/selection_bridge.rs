//! Pushes selection changes onto decorators that already exist.

use rule_lattice_core::logging::targets;

use super::cache::DecoratorCache;
use crate::model::SelectionRange;

/// Copies selection membership into cached decorators.
///
/// Rows without a decorator are skipped: they pick up their selection state
/// when the cache builds them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionBridge;

impl SelectionBridge {
    /// Updates every cached decorator in `range` from `is_selected`.
    ///
    /// `changed` is called for each row whose decorator was updated, so the
    /// caller can schedule a repaint. Returns the number of rows updated.
    pub fn apply(
        range: SelectionRange,
        is_selected: impl Fn(usize) -> bool,
        cache: &mut DecoratorCache,
        mut changed: impl FnMut(usize),
    ) -> usize {
        let mut updated = 0;
        if cache.is_empty() {
            return updated;
        }

        let candidates: Vec<usize> = if range.last - range.first < cache.len() {
            range.rows().collect()
        } else {
            cache.rows().into_iter().filter(|&row| range.contains(row)).collect()
        };

        for row in candidates {
            if let Some(decorator) = cache.get_mut(row) {
                decorator.set_selected(is_selected(row));
                changed(row);
                updated += 1;
            }
        }

        tracing::trace!(
            target: targets::VIEW,
            first = range.first,
            last = range.last,
            updated,
            "selection pushed to decorators"
        );
        updated
    }
}
