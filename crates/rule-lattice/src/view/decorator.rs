//! Row decorators: the stateful visual wrapper of one list row.
//!
//! A decorator is built lazily by a [`RowDecoratorFactory`] the first time
//! its row is painted, then kept in the [`DecoratorCache`](super::DecoratorCache)
//! so that hover, selection and sub-region state survives between paints.
//!
//! # Writing a decorator
//!
//! Only the state accessors and [`render`](RowDecorator::render) are
//! required; pointer hooks default to doing nothing.
//!
//! ```
//! use rule_lattice::view::{RowDecorator, RowVisual};
//! use rule_lattice_core::Color;
//!
//! #[derive(Default)]
//! struct Plain {
//!     selected: bool,
//!     hovered: bool,
//!     display_index: usize,
//!     background: Color,
//! }
//!
//! impl RowDecorator for Plain {
//!     fn set_selected(&mut self, selected: bool) { self.selected = selected; }
//!     fn is_selected(&self) -> bool { self.selected }
//!     fn set_hovered(&mut self, hovered: bool) { self.hovered = hovered; }
//!     fn is_hovered(&self) -> bool { self.hovered }
//!     fn set_row_index(&mut self, row: usize) { self.display_index = row + 1; }
//!     fn display_index(&self) -> usize { self.display_index }
//!     fn set_background(&mut self, color: Color) { self.background = color; }
//!     fn background(&self) -> Color { self.background }
//!     fn render(&self) -> RowVisual {
//!         RowVisual::new(self.display_index, self.background)
//!             .with_state(self.hovered, self.selected)
//!     }
//! }
//! ```

use std::fmt;

use rule_lattice_core::{Color, DecoratorError, Point, Rect};

use super::events::{EnterEvent, MouseButton, MouseMoveEvent, MousePressEvent};

/// Colors used for row backgrounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowPalette {
    /// Background of a row that is not hovered.
    pub background: Color,
    /// Background of the hovered row.
    pub hover_background: Color,
    /// Fill used by decorators to mark a selected row.
    pub selected_background: Color,
}

impl Default for RowPalette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            hover_background: Color::from_rgb8(0xE8, 0xF0, 0xFE),
            selected_background: Color::from_rgb8(0xC7, 0xDB, 0xFC),
        }
    }
}

impl RowPalette {
    /// The background a row should carry for the given hover state.
    pub fn row_background(&self, hovered: bool) -> Color {
        if hovered {
            self.hover_background
        } else {
            self.background
        }
    }
}

/// State applied to a freshly built decorator before it is cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitialRowState {
    /// The row is the hover target at construction time.
    pub hovered: bool,
    /// The row belongs to the current selection.
    pub selected: bool,
}

/// A rendered sub-region of a row (for example an inline toggle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionVisual {
    /// Bounds in row-local coordinates.
    pub bounds: Rect,
    /// Whether the region is switched on.
    pub enabled: bool,
    /// Whether the pointer is over the region.
    pub highlighted: bool,
}

/// Output of [`RowDecorator::render`], the data a host draws for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowVisual {
    /// 1-based row label.
    pub display_index: usize,
    /// Row background.
    pub background: Color,
    /// Hover flag at render time.
    pub hovered: bool,
    /// Selection flag at render time.
    pub selected: bool,
    /// Row text.
    pub label: String,
    /// Interactive sub-regions.
    pub regions: Vec<RegionVisual>,
}

impl RowVisual {
    /// Creates a visual with an empty label and no regions.
    pub fn new(display_index: usize, background: Color) -> Self {
        Self {
            display_index,
            background,
            hovered: false,
            selected: false,
            label: String::new(),
            regions: Vec::new(),
        }
    }

    /// Sets the hover and selection flags.
    pub fn with_state(mut self, hovered: bool, selected: bool) -> Self {
        self.hovered = hovered;
        self.selected = selected;
        self
    }

    /// Sets the row text.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// The renderable row capability the list view depends on.
///
/// Decorators are owned by the view's cache and only ever touched from the
/// UI thread, so no `Send` bound is required. All positions handed to a
/// decorator are relative to its own row's top-left corner.
pub trait RowDecorator {
    /// Pointer moved within the row.
    ///
    /// Returns the row-local region whose appearance changed, if any. The
    /// view turns it into a repaint request for exactly that region.
    fn on_mouse_move(&mut self, _event: &MouseMoveEvent) -> Option<Rect> {
        None
    }

    /// A button went down within the row.
    ///
    /// Calling `event.base.accept()` marks the press consumed, which
    /// suppresses the click that follows it.
    fn on_mouse_press(&mut self, _event: &mut MousePressEvent) {}

    /// The pointer started hovering this row.
    fn on_mouse_entered(&mut self, _event: &EnterEvent) {
        self.set_hovered(true);
    }

    /// The pointer stopped hovering this row.
    fn on_mouse_exited(&mut self) {
        self.set_hovered(false);
    }

    /// Updates the selection flag.
    fn set_selected(&mut self, selected: bool);

    /// Returns the selection flag.
    fn is_selected(&self) -> bool;

    /// Updates the hover flag without any pointer event.
    fn set_hovered(&mut self, hovered: bool);

    /// Returns the hover flag.
    fn is_hovered(&self) -> bool;

    /// Tells the decorator which 0-based row it currently renders.
    ///
    /// Implementations store `row + 1` as the display index.
    fn set_row_index(&mut self, row: usize);

    /// The 1-based display index.
    fn display_index(&self) -> usize;

    /// Sets the row background color.
    fn set_background(&mut self, color: Color);

    /// Returns the row background color.
    fn background(&self) -> Color;

    /// Produces the row's visual state.
    fn render(&self) -> RowVisual;
}

/// Builds decorators for rules on cache misses.
pub trait RowDecoratorFactory<R> {
    /// Creates a decorator for `rule` at 0-based `row`.
    ///
    /// `first_render` is `true` when the row has no cached decorator, which
    /// is the only case the list view calls this in.
    fn create(
        &self,
        rule: &R,
        row: usize,
        first_render: bool,
    ) -> Result<Box<dyn RowDecorator>, DecoratorError>;
}

impl<R, T> RowDecoratorFactory<R> for Box<T>
where
    T: RowDecoratorFactory<R> + ?Sized,
{
    fn create(
        &self,
        rule: &R,
        row: usize,
        first_render: bool,
    ) -> Result<Box<dyn RowDecorator>, DecoratorError> {
        (**self).create(rule, row, first_render)
    }
}

/// A factory backed by a closure.
///
/// ```
/// use rule_lattice::view::{DefaultRowDecorator, FnDecoratorFactory, RowDecorator};
///
/// use rule_lattice::view::RowDecoratorFactory;
/// use rule_lattice_core::DecoratorError;
///
/// let factory = FnDecoratorFactory::new(|rule: &String, _row: usize, _first: bool| {
///     let decorator: Box<dyn RowDecorator> = Box::new(DefaultRowDecorator::new(rule.clone()));
///     Ok::<_, DecoratorError>(decorator)
/// });
/// let built = factory.create(&"*.rs".to_string(), 0, true);
/// assert!(built.is_ok());
/// ```
pub struct FnDecoratorFactory<F> {
    build: F,
}

impl<F> FnDecoratorFactory<F> {
    /// Wraps `build` as a factory.
    pub fn new(build: F) -> Self {
        Self { build }
    }
}

impl<F> fmt::Debug for FnDecoratorFactory<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDecoratorFactory").finish_non_exhaustive()
    }
}

impl<R, F> RowDecoratorFactory<R> for FnDecoratorFactory<F>
where
    F: Fn(&R, usize, bool) -> Result<Box<dyn RowDecorator>, DecoratorError>,
{
    fn create(
        &self,
        rule: &R,
        row: usize,
        first_render: bool,
    ) -> Result<Box<dyn RowDecorator>, DecoratorError> {
        (self.build)(rule, row, first_render)
    }
}

/// Builds a [`DefaultRowDecorator`] labelled with the rule's `Debug` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLabelFactory;

impl<R: fmt::Debug> RowDecoratorFactory<R> for DebugLabelFactory {
    fn create(
        &self,
        rule: &R,
        _row: usize,
        _first_render: bool,
    ) -> Result<Box<dyn RowDecorator>, DecoratorError> {
        Ok(Box::new(DefaultRowDecorator::new(format!("{rule:?}"))))
    }
}

/// An inline on/off region inside a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleRegion {
    /// Bounds in row-local coordinates.
    pub bounds: Rect,
    /// Current state.
    pub enabled: bool,
}

impl ToggleRegion {
    /// Creates a toggle at `bounds`.
    pub fn new(bounds: Rect, enabled: bool) -> Self {
        Self { bounds, enabled }
    }
}

/// A labelled row with optional inline toggles.
///
/// Hovering a toggle highlights it; pressing it with the left button flips
/// the toggle and consumes the press.
#[derive(Debug, Clone)]
pub struct DefaultRowDecorator {
    label: String,
    toggles: Vec<ToggleRegion>,
    highlighted: Option<usize>,
    selected: bool,
    hovered: bool,
    display_index: usize,
    background: Color,
}

impl DefaultRowDecorator {
    /// Creates a decorator showing `label` with no toggles.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            toggles: Vec::new(),
            highlighted: None,
            selected: false,
            hovered: false,
            display_index: 0,
            background: Color::TRANSPARENT,
        }
    }

    /// Adds a toggle region.
    pub fn with_toggle(mut self, toggle: ToggleRegion) -> Self {
        self.toggles.push(toggle);
        self
    }

    /// The row text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The toggle regions, in insertion order.
    pub fn toggles(&self) -> &[ToggleRegion] {
        &self.toggles
    }

    /// Index of the toggle under the pointer, if any.
    pub fn highlighted_toggle(&self) -> Option<usize> {
        self.highlighted
    }

    fn toggle_at(&self, pos: Point) -> Option<usize> {
        self.toggles
            .iter()
            .position(|toggle| toggle.bounds.contains(pos))
    }

    fn toggle_bounds(&self, index: Option<usize>) -> Option<Rect> {
        index.and_then(|i| self.toggles.get(i)).map(|toggle| toggle.bounds)
    }
}

impl RowDecorator for DefaultRowDecorator {
    fn on_mouse_move(&mut self, event: &MouseMoveEvent) -> Option<Rect> {
        let target = self.toggle_at(event.local_pos);
        if target == self.highlighted {
            return None;
        }

        let old = self.toggle_bounds(self.highlighted);
        let new = self.toggle_bounds(target);
        self.highlighted = target;

        match (old, new) {
            (Some(old), Some(new)) => Some(old.union(&new)),
            (old, new) => old.or(new),
        }
    }

    fn on_mouse_press(&mut self, event: &mut MousePressEvent) {
        if event.button != MouseButton::Left {
            return;
        }
        if let Some(index) = self.toggle_at(event.local_pos) {
            if let Some(toggle) = self.toggles.get_mut(index) {
                toggle.enabled = !toggle.enabled;
                event.base.accept();
            }
        }
    }

    fn on_mouse_exited(&mut self) {
        self.hovered = false;
        self.highlighted = None;
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn set_row_index(&mut self, row: usize) {
        self.display_index = row + 1;
    }

    fn display_index(&self) -> usize {
        self.display_index
    }

    fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    fn background(&self) -> Color {
        self.background
    }

    fn render(&self) -> RowVisual {
        let mut visual = RowVisual::new(self.display_index, self.background)
            .with_state(self.hovered, self.selected)
            .with_label(self.label.clone());
        visual.regions = self
            .toggles
            .iter()
            .enumerate()
            .map(|(i, toggle)| RegionVisual {
                bounds: toggle.bounds,
                enabled: toggle.enabled,
                highlighted: self.highlighted == Some(i),
            })
            .collect();
        visual
    }
}
