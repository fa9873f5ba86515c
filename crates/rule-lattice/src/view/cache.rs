//! Sparse row-indexed storage of live row decorators.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use rule_lattice_core::logging::targets;
use rule_lattice_core::{LatticeError, Result};

use super::decorator::{InitialRowState, RowDecorator, RowDecoratorFactory, RowPalette};

/// Maps row indices to the decorators built for them.
///
/// Only rows that have been painted at least once have an entry. The owning
/// view keeps every key below the model's row count by invalidating ranges
/// on structural change and clearing on reset.
#[derive(Default)]
pub struct DecoratorCache {
    entries: HashMap<usize, Box<dyn RowDecorator>>,
}

impl fmt::Debug for DecoratorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorCache")
            .field("rows", &self.rows())
            .finish()
    }
}

impl DecoratorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached decorators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `row` has a decorator.
    pub fn contains(&self, row: usize) -> bool {
        self.entries.contains_key(&row)
    }

    /// Cached rows in ascending order.
    pub fn rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.entries.keys().copied().collect();
        rows.sort_unstable();
        rows
    }

    /// Looks up the decorator for `row` without building one.
    pub fn get(&self, row: usize) -> Option<&dyn RowDecorator> {
        self.entries.get(&row).map(|decorator| decorator.as_ref())
    }

    /// Mutable lookup without building.
    pub fn get_mut(&mut self, row: usize) -> Option<&mut dyn RowDecorator> {
        match self.entries.get_mut(&row) {
            Some(decorator) => Some(decorator.as_mut()),
            None => None,
        }
    }

    /// Returns the decorator for `row`, building it on a miss.
    ///
    /// A new decorator gets `initial` applied (hover flag and matching
    /// background from `palette`, selection flag) before it is stored. If the
    /// factory fails nothing is cached and the error names the row.
    pub fn get_or_create<R, F>(
        &mut self,
        row: usize,
        rule: &R,
        factory: &F,
        initial: InitialRowState,
        palette: &RowPalette,
    ) -> Result<&mut dyn RowDecorator>
    where
        F: RowDecoratorFactory<R> + ?Sized,
    {
        match self.entries.entry(row) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_mut()),
            Entry::Vacant(entry) => {
                let mut decorator = factory
                    .create(rule, row, true)
                    .map_err(|source| LatticeError::DecoratorFactory { row, source })?;

                decorator.set_hovered(initial.hovered);
                decorator.set_background(palette.row_background(initial.hovered));
                decorator.set_selected(initial.selected);

                tracing::debug!(
                    target: targets::VIEW,
                    row,
                    hovered = initial.hovered,
                    selected = initial.selected,
                    "built row decorator"
                );
                Ok(entry.insert(decorator).as_mut())
            }
        }
    }

    /// Drops the decorators of every row in `[first, last]`.
    ///
    /// Empty (`first > last`) and out-of-bounds ranges are fine. Returns the
    /// number of decorators removed.
    pub fn invalidate_range(&mut self, first: usize, last: usize) -> usize {
        if first > last || self.entries.is_empty() {
            return 0;
        }

        let before = self.entries.len();
        let span = last - first;
        if span < self.entries.len() {
            for row in first..=last {
                self.entries.remove(&row);
            }
        } else {
            self.entries.retain(|&row, _| row < first || row > last);
        }

        let removed = before - self.entries.len();
        tracing::debug!(target: targets::VIEW, first, last, removed, "invalidated decorators");
        removed
    }

    /// Drops every decorator, returning how many were cached.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::decorator::{DefaultRowDecorator, FnDecoratorFactory};
    use rule_lattice_core::DecoratorError;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingFactory {
        built: Cell<usize>,
    }

    impl RowDecoratorFactory<u32> for CountingFactory {
        fn create(
            &self,
            rule: &u32,
            _row: usize,
            first_render: bool,
        ) -> std::result::Result<Box<dyn RowDecorator>, DecoratorError> {
            assert!(first_render);
            self.built.set(self.built.get() + 1);
            Ok(Box::new(DefaultRowDecorator::new(format!("rule {rule}"))))
        }
    }

    fn populate(cache: &mut DecoratorCache, rows: impl IntoIterator<Item = usize>) {
        let factory = CountingFactory::default();
        for row in rows {
            let built = cache.get_or_create(row, &0, &factory, InitialRowState::default(), &RowPalette::default());
            assert!(built.is_ok());
        }
    }

    #[test]
    fn test_miss_builds_once() {
        let mut cache = DecoratorCache::new();
        let factory = CountingFactory::default();
        let palette = RowPalette::default();

        assert!(cache.get(1).is_none());
        assert!(cache.get_or_create(1, &7, &factory, InitialRowState::default(), &palette).is_ok());
        assert!(cache.get_or_create(1, &7, &factory, InitialRowState::default(), &palette).is_ok());

        assert_eq!(factory.built.get(), 1);
        assert_eq!(cache.rows(), vec![1]);
        assert!(cache.contains(1));
    }

    #[test]
    fn test_initial_state_applied() {
        let mut cache = DecoratorCache::new();
        let factory = CountingFactory::default();
        let palette = RowPalette::default();

        let initial = InitialRowState {
            hovered: true,
            selected: true,
        };
        assert!(cache.get_or_create(0, &1, &factory, initial, &palette).is_ok());
        assert!(cache.get_or_create(1, &2, &factory, InitialRowState::default(), &palette).is_ok());

        let hovered = cache.get(0).map(|d| (d.is_hovered(), d.is_selected(), d.background()));
        assert_eq!(hovered, Some((true, true, palette.hover_background)));

        let plain = cache.get(1).map(|d| (d.is_hovered(), d.is_selected(), d.background()));
        assert_eq!(plain, Some((false, false, palette.background)));
    }

    #[test]
    fn test_existing_decorator_keeps_state() {
        let mut cache = DecoratorCache::new();
        populate(&mut cache, [3]);
        if let Some(decorator) = cache.get_mut(3) {
            decorator.set_selected(true);
        }

        let factory = CountingFactory::default();
        let decorator = cache.get_or_create(3, &0, &factory, InitialRowState::default(), &RowPalette::default());
        assert!(decorator.is_ok_and(|d| d.is_selected()));
        assert_eq!(factory.built.get(), 0);
    }

    #[test]
    fn test_factory_failure_is_not_cached() {
        let mut cache = DecoratorCache::new();
        let factory = FnDecoratorFactory::new(|_: &u32, _: usize, _: bool| {
            Err::<Box<dyn RowDecorator>, _>(DecoratorError::Unrenderable("broken".into()))
        });

        let err = cache
            .get_or_create(2, &0, &factory, InitialRowState::default(), &RowPalette::default())
            .err();
        assert!(matches!(err, Some(LatticeError::DecoratorFactory { row: 2, .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_range_is_exact() {
        let mut cache = DecoratorCache::new();
        populate(&mut cache, 0..6);

        assert_eq!(cache.invalidate_range(2, 3), 2);
        assert_eq!(cache.rows(), vec![0, 1, 4, 5]);
    }

    #[test]
    fn test_invalidate_wide_range() {
        let mut cache = DecoratorCache::new();
        populate(&mut cache, [1, 50, 999]);

        assert_eq!(cache.invalidate_range(10, 10_000), 2);
        assert_eq!(cache.rows(), vec![1]);
    }

    #[test]
    fn test_invalidate_empty_and_out_of_bounds() {
        let mut cache = DecoratorCache::new();
        assert_eq!(cache.invalidate_range(0, 10), 0);

        populate(&mut cache, [0, 1]);
        assert_eq!(cache.invalidate_range(5, 2), 0);
        assert_eq!(cache.invalidate_range(7, usize::MAX), 0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clear_reports_dropped_count() {
        let mut cache = DecoratorCache::new();
        populate(&mut cache, 0..4);
        assert_eq!(cache.rows(), vec![0, 1, 2, 3]);

        assert_eq!(cache.clear(), 4);
        assert!(cache.is_empty());
    }
}
