//! The interactive rule list.
//!
//! [`RuleListView`] owns the rule model, the per-row decorator cache, the
//! hover tracker, the selection model and the repaint scheduler. Hosts feed
//! it pointer events and geometry, paint the rows it describes, and redraw
//! the regions it requests.
//!
//! # Example
//!
//! ```
//! use rule_lattice::prelude::*;
//!
//! let mut view = RuleListView::new(DebugLabelFactory);
//! view.set_viewport_size(Size::new(300.0, 120.0));
//! view.set_rules(Some(["*.rs", "*.toml", "Cargo.lock"]));
//!
//! let painted = view.paint_visible().unwrap_or_default();
//! assert_eq!(painted.len(), 3);
//!
//! // Hover the second row.
//! view.mouse_move(&MouseMoveEvent::new(Point::new(10.0, 30.0)));
//! assert_eq!(view.hovered_row(), Some(1));
//! ```

use std::fmt;

use rule_lattice_core::logging::{span_names, targets};
use rule_lattice_core::{PerfSpan, Point, Rect, Result, Signal, Size};
use tracing::dispatcher::DefaultGuard;

use super::cache::DecoratorCache;
use super::decorator::{InitialRowState, RowDecoratorFactory, RowVisual};
use super::events::{
    EnterEvent, LeaveEvent, MouseButton, MouseClickEvent, MouseMoveEvent, MousePressEvent,
};
use super::hover::HoverTracker;
use super::layout::RowLayout;
use super::repaint::RepaintScheduler;
use super::selection_bridge::SelectionBridge;
use crate::config::RuleListConfig;
use crate::model::{
    RowEntry, RuleModel, SelectionFlags, SelectionMode, SelectionModel, SelectionRange,
};

/// What a host should draw for one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowPaint {
    /// Nothing to draw: a placeholder entry or a row that does not exist.
    Empty,
    /// The row's decorator output.
    Decorated(RowVisual),
}

impl RowPaint {
    /// The decorator output, if any.
    pub fn visual(&self) -> Option<&RowVisual> {
        match self {
            Self::Empty => None,
            Self::Decorated(visual) => Some(visual),
        }
    }
}

/// A list of rules whose rows are drawn by cached, stateful decorators.
///
/// # Signals
///
/// - `clicked`: a click reached default handling on a row
/// - `row_entered`: the pointer started hovering a row
/// - `row_exited`: the pointer stopped hovering a row (always emitted before
///   the matching `row_entered` of the next row)
///
/// Repaint requests are emitted by [`repaint()`](Self::repaint)'s
/// `repaint_requested` signal.
pub struct RuleListView<R> {
    model: RuleModel<R>,
    factory: Box<dyn RowDecoratorFactory<R>>,
    cache: DecoratorCache,
    hover: HoverTracker,
    selection: SelectionModel,
    layout: RowLayout,
    repaint: RepaintScheduler,
    config: RuleListConfig,
    logger: Option<tracing::Dispatch>,
    suppress_next_click: bool,

    /// Emitted with the row of a click that reached default handling.
    pub clicked: Signal<usize>,
    /// Emitted when the pointer starts hovering a row.
    pub row_entered: Signal<usize>,
    /// Emitted when the pointer stops hovering a row.
    pub row_exited: Signal<usize>,
}

impl<R: fmt::Debug> fmt::Debug for RuleListView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleListView")
            .field("rows", &self.model.len())
            .field("cache", &self.cache)
            .field("hover", &self.hover.state())
            .field("suppress_next_click", &self.suppress_next_click)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R> RuleListView<R>
where
    R: Clone + fmt::Debug,
{
    /// Creates an empty list with the default configuration.
    pub fn new(factory: impl RowDecoratorFactory<R> + 'static) -> Self {
        Self::with_config(factory, RuleListConfig::default())
    }

    /// Creates an empty list with `config`.
    pub fn with_config(factory: impl RowDecoratorFactory<R> + 'static, config: RuleListConfig) -> Self {
        Self {
            model: RuleModel::new(),
            factory: Box::new(factory),
            cache: DecoratorCache::new(),
            hover: HoverTracker::new(),
            selection: SelectionModel::new(),
            layout: RowLayout::new(config.row_height, config.row_spacing),
            repaint: RepaintScheduler::new(),
            config,
            logger: None,
            suppress_next_click: false,
            clicked: Signal::new(),
            row_entered: Signal::new(),
            row_exited: Signal::new(),
        }
    }

    /// Routes this view's diagnostics to `dispatch` instead of the ambient
    /// subscriber.
    pub fn with_logger(mut self, dispatch: tracing::Dispatch) -> Self {
        self.logger = Some(dispatch);
        self
    }

    /// Makes the injected logger, if any, the default dispatcher until the
    /// guard drops. Every mutating entry point holds one, so nested calls
    /// and the components they drive log to the same place.
    fn log_scope(&self) -> Option<DefaultGuard> {
        self.logger.as_ref().map(tracing::dispatcher::set_default)
    }

    /// The active configuration.
    pub fn config(&self) -> &RuleListConfig {
        &self.config
    }

    // =========================================================================
    // Rules
    // =========================================================================

    /// Replaces the whole rule list.
    ///
    /// Cached decorators, the hover binding, the click-suppression latch and
    /// the selection are dropped before the new rules are appended in order.
    /// `None` or an empty iterator leaves an empty list.
    pub fn set_rules<I>(&mut self, rules: Option<I>)
    where
        I: IntoIterator<Item = R>,
    {
        let _log = self.log_scope();
        let dropped = self.cache.clear();
        self.hover.reset();
        self.suppress_next_click = false;
        self.selection.reset();
        self.model.clear();
        if let Some(rules) = rules {
            self.model.extend(rules);
        }

        let row_count = self.model.len();
        self.layout.set_scroll_offset(self.layout.scroll_offset(), row_count);

        tracing::debug!(target: targets::VIEW, rows = row_count, dropped, "rules replaced");
        if self.config.log_rule_modification {
            let rules: Vec<&R> = self.model.rules().collect();
            tracing::info!(target: targets::MODEL, count = rules.len(), rules = ?rules, "rule list updated");
        }

        self.repaint.request(self.layout.viewport_rect());
    }

    /// The rules in row order, placeholder rows excluded.
    pub fn rules(&self) -> Vec<R> {
        self.model.rules().cloned().collect()
    }

    /// Appends one rule, returning its row.
    pub fn append_rule(&mut self, rule: R) -> usize {
        let _log = self.log_scope();
        let row = self.model.append(rule);
        self.request_row_repaint(row);
        row
    }

    /// Appends a non-rule row, returning its row.
    pub fn append_placeholder(&mut self) -> usize {
        let _log = self.log_scope();
        let row = self.model.append_placeholder();
        self.request_row_repaint(row);
        row
    }

    /// Number of rows, placeholders included.
    pub fn row_count(&self) -> usize {
        self.model.len()
    }

    /// The underlying rule model.
    pub fn model(&self) -> &RuleModel<R> {
        &self.model
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Produces what to draw for `row`, building its decorator on first use.
    ///
    /// Placeholder and out-of-range rows paint as [`RowPaint::Empty`]. A
    /// factory failure is logged and returned; nothing is cached for the row.
    pub fn paint_row(&mut self, row: usize) -> Result<RowPaint> {
        let _log = self.log_scope();
        let Some(RowEntry::Rule(rule)) = self.model.get(row) else {
            return Ok(RowPaint::Empty);
        };

        let initial = InitialRowState {
            hovered: self.hover.hovered_row() == Some(row),
            selected: self.selection.is_selected(row),
        };
        let built = self.cache.get_or_create(
            row,
            rule,
            &*self.factory,
            initial,
            &self.config.palette,
        );

        match built {
            Ok(decorator) => {
                decorator.set_row_index(row);
                Ok(RowPaint::Decorated(decorator.render()))
            }
            Err(err) => {
                tracing::error!(target: targets::VIEW, row, error = %err, "row decorator construction failed");
                Err(err)
            }
        }
    }

    /// Paints every row intersecting the viewport, top to bottom.
    pub fn paint_visible(&mut self) -> Result<Vec<(usize, RowPaint)>> {
        let _log = self.log_scope();
        let _span = PerfSpan::new(span_names::PAINT);
        let Some((first, last)) = self.visible_range() else {
            return Ok(Vec::new());
        };
        (first..=last)
            .map(|row| self.paint_row(row).map(|paint| (row, paint)))
            .collect()
    }

    /// Requests a repaint of rows `[first, last]`.
    ///
    /// With `structure_changed`, the decorators of exactly those rows are
    /// dropped first so the next paint rebuilds them. Rows past the end are
    /// ignored.
    pub fn repaint_rows(&mut self, first: usize, last: usize, structure_changed: bool) {
        let _log = self.log_scope();
        let region = self.layout.rows_rect(first, last, self.model.len());

        if structure_changed {
            self.cache.invalidate_range(first, last);
            if self
                .hover
                .hovered_row()
                .is_some_and(|row| !self.model.is_valid_row(row))
            {
                self.hover.reset();
            }
        }

        tracing::trace!(target: targets::VIEW, first, last, structure_changed, "repaint rows");
        if let Some(region) = region {
            self.repaint.request(region);
        }
    }

    /// The repaint scheduler; connect to its `repaint_requested` signal or
    /// drain it after each event.
    pub fn repaint(&self) -> &RepaintScheduler {
        &self.repaint
    }

    /// Removes and returns every pending repaint request.
    pub fn take_repaint_requests(&mut self) -> Vec<Rect> {
        self.repaint.take_pending()
    }

    /// The decorator cache, for inspection.
    pub fn cache(&self) -> &DecoratorCache {
        &self.cache
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// The hovered row, if any.
    pub fn hovered_row(&self) -> Option<usize> {
        self.hover.hovered_row()
    }

    /// `true` while the next click will be discarded.
    pub fn is_click_suppressed(&self) -> bool {
        self.suppress_next_click
    }

    /// Pointer motion inside the view (container coordinates).
    ///
    /// Updates hover first (exit before enter), then lets the decorator under
    /// the pointer react and repaints the region it reports.
    pub fn mouse_move(&mut self, event: &MouseMoveEvent) {
        let _log = self.log_scope();
        let row_count = self.model.len();
        let target = self.layout.index_at(event.local_pos, row_count);

        let transition = self.hover.on_move(target);
        if let Some(row) = transition.exited {
            self.exit_row(row);
        }
        if let Some(row) = transition.entered {
            self.enter_row(row, event.local_pos);
        }

        let Some(row) = target else {
            return;
        };
        let Some(bounds) = self.layout.row_rect(row, row_count) else {
            return;
        };
        if let Some(decorator) = self.cache.get_mut(row) {
            let local = event.to_row_local(bounds.origin);
            if let Some(region) = decorator.on_mouse_move(&local) {
                self.repaint.schedule_local(bounds, region);
            }
        }
    }

    /// The pointer entered the view.
    pub fn mouse_enter(&mut self, event: &EnterEvent) {
        self.mouse_move(&MouseMoveEvent::new(event.local_pos));
    }

    /// The pointer left the view: the hovered row, if any, is exited.
    pub fn mouse_leave(&mut self, _event: &LeaveEvent) {
        let _log = self.log_scope();
        if let Some(row) = self.hover.on_exit() {
            self.exit_row(row);
        }
    }

    /// A button went down.
    ///
    /// The press is offered to the decorator under the pointer. If the
    /// decorator accepts it, `event` is accepted too and the click that
    /// completes this gesture will be dropped.
    pub fn mouse_press(&mut self, event: &mut MousePressEvent) {
        let _log = self.log_scope();
        self.suppress_next_click = false;

        let row_count = self.model.len();
        let Some(row) = self.layout.index_at(event.local_pos, row_count) else {
            return;
        };
        let Some(bounds) = self.layout.row_rect(row, row_count) else {
            return;
        };
        let Some(decorator) = self.cache.get_mut(row) else {
            return;
        };

        let mut local = event.to_row_local(bounds.origin);
        decorator.on_mouse_press(&mut local);
        if local.base.is_accepted() {
            event.base.accept();
            self.suppress_next_click = true;
            tracing::trace!(target: targets::VIEW, row, "press consumed by decorator");
        }
    }

    /// A click completed.
    ///
    /// Dropped if the press of the same gesture was consumed. Otherwise a
    /// left click updates the selection (Ctrl toggles, Shift extends from the
    /// anchor, a plain click selects only this row) and `clicked` is emitted.
    pub fn mouse_click(&mut self, event: &MouseClickEvent) {
        let _log = self.log_scope();
        if std::mem::take(&mut self.suppress_next_click) {
            tracing::trace!(target: targets::VIEW, "click suppressed");
            return;
        }

        let Some(row) = self.layout.index_at(event.local_pos, self.model.len()) else {
            return;
        };

        if event.button == MouseButton::Left {
            let modifiers = event.modifiers;
            match self.selection.anchor_row() {
                Some(anchor) if modifiers.shift => {
                    self.select_range(anchor, row, SelectionFlags::CLEAR_AND_SELECT);
                    self.selection.set_current_row(Some(row));
                }
                _ if modifiers.control => {
                    self.select(row, SelectionFlags::TOGGLE.with_current().with_anchor());
                }
                _ => {
                    self.select(row, SelectionFlags::CLEAR_SELECT_CURRENT.with_anchor());
                }
            }
        }

        self.clicked.emit(row);
    }

    fn exit_row(&mut self, row: usize) {
        if let Some(decorator) = self.cache.get_mut(row) {
            decorator.on_mouse_exited();
            decorator.set_background(self.config.palette.row_background(false));
        }
        self.request_row_repaint(row);
        tracing::trace!(target: targets::VIEW, row, "row exited");
        self.row_exited.emit(row);
    }

    fn enter_row(&mut self, row: usize, pos: Point) {
        let bounds = self.layout.row_rect(row, self.model.len());
        if let Some(decorator) = self.cache.get_mut(row) {
            let origin = bounds.map_or(Point::ZERO, |b| b.origin);
            decorator.on_mouse_entered(&EnterEvent::new(Point::new(pos.x - origin.x, pos.y - origin.y)));
            decorator.set_background(self.config.palette.row_background(true));
        }
        self.request_row_repaint(row);
        tracing::trace!(target: targets::VIEW, row, "row entered");
        self.row_entered.emit(row);
    }

    fn request_row_repaint(&mut self, row: usize) {
        if let Some(bounds) = self.layout.row_rect(row, self.model.len()) {
            self.repaint.request(bounds);
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selection model.
    pub fn selection_model(&self) -> &SelectionModel {
        &self.selection
    }

    /// Sets the selection mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        let _log = self.log_scope();
        self.selection.set_selection_mode(mode);
    }

    /// Applies a selection operation to one row. Out-of-range rows are ignored.
    pub fn select(&mut self, row: usize, flags: SelectionFlags) -> Option<SelectionRange> {
        let _log = self.log_scope();
        if !self.model.is_valid_row(row) {
            return None;
        }
        let changed = self.selection.select(row, flags);
        if let Some(range) = changed {
            self.on_selection_changed(range);
        }
        changed
    }

    /// Applies a selection operation to rows `[first, last]`, clamped to the
    /// existing rows.
    pub fn select_range(
        &mut self,
        first: usize,
        last: usize,
        flags: SelectionFlags,
    ) -> Option<SelectionRange> {
        let _log = self.log_scope();
        let range = SelectionRange::new(first, last);
        let end = range.last.min(self.model.len().checked_sub(1)?);
        if range.first > end {
            return None;
        }
        let (start, end) = if first <= last {
            (range.first, end)
        } else {
            (end, range.first)
        };
        let changed = self.selection.select_range(start, end, flags);
        if let Some(range) = changed {
            self.on_selection_changed(range);
        }
        changed
    }

    /// Selects every row (extended and multi selection modes only).
    pub fn select_all(&mut self) -> Option<SelectionRange> {
        let _log = self.log_scope();
        let changed = self.selection.select_all(self.model.len());
        if let Some(range) = changed {
            self.on_selection_changed(range);
        }
        changed
    }

    /// Deselects every row.
    pub fn clear_selection(&mut self) -> Option<SelectionRange> {
        let _log = self.log_scope();
        let changed = self.selection.clear_selection();
        if let Some(range) = changed {
            self.on_selection_changed(range);
        }
        changed
    }

    /// Pushes the selection state of rows in `range` to their cached
    /// decorators and repaints those rows. Uncached rows are left alone.
    pub fn on_selection_changed(&mut self, range: SelectionRange) {
        let _log = self.log_scope();
        let row_count = self.model.len();
        let selection = &self.selection;
        let layout = &self.layout;
        let repaint = &mut self.repaint;

        SelectionBridge::apply(
            range,
            |row| selection.is_selected(row),
            &mut self.cache,
            |row| {
                if let Some(bounds) = layout.row_rect(row, row_count) {
                    repaint.request(bounds);
                }
            },
        );
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Resizes the visible area.
    pub fn set_viewport_size(&mut self, size: Size) {
        let _log = self.log_scope();
        self.layout.set_viewport_size(size);
        let viewport = self.layout.viewport_rect();
        self.repaint
            .set_viewport(self.config.clip_repaints_to_viewport.then_some(viewport));
        self.layout
            .set_scroll_offset(self.layout.scroll_offset(), self.model.len());
        self.repaint.request(viewport);
    }

    /// Scrolls vertically; the offset is clamped to the content height.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        let _log = self.log_scope();
        let before = self.layout.scroll_offset();
        self.layout.set_scroll_offset(offset, self.model.len());
        if self.layout.scroll_offset() != before {
            self.repaint.request(self.layout.viewport_rect());
        }
    }

    /// Current vertical scroll offset.
    pub fn scroll_offset(&self) -> f32 {
        self.layout.scroll_offset()
    }

    /// The row under `point` (container coordinates).
    pub fn index_at(&self, point: Point) -> Option<usize> {
        self.layout.index_at(point, self.model.len())
    }

    /// Bounds of `row` in container coordinates.
    pub fn row_rect(&self, row: usize) -> Option<Rect> {
        self.layout.row_rect(row, self.model.len())
    }

    /// Bounds covering rows `[first, last]`, clamped to existing rows.
    pub fn rows_rect(&self, first: usize, last: usize) -> Option<Rect> {
        self.layout.rows_rect(first, last, self.model.len())
    }

    /// First and last row intersecting the viewport.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        self.layout.visible_range(self.model.len())
    }
}

static_assertions::assert_impl_all!(RuleListView<String>: fmt::Debug);
static_assertions::assert_not_impl_any!(RuleListView<String>: Send);
