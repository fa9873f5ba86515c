//! Repaint scheduling for the rule list.
//!
//! Decorators report changes in their own row-local coordinates; the
//! [`RepaintScheduler`] translates those into container coordinates and
//! records one request per changed region. Requests are kept as a list
//! rather than merged into a bounding box, so two distant rows changing in
//! the same frame do not repaint everything in between.
//!
//! # Example
//!
//! ```
//! use rule_lattice::view::RepaintScheduler;
//! use rule_lattice_core::Rect;
//!
//! let mut scheduler = RepaintScheduler::new();
//! let row_bounds = Rect::new(0.0, 48.0, 300.0, 24.0);
//!
//! // A toggle at (100, 4) inside the row changed.
//! scheduler.schedule_local(row_bounds, Rect::new(100.0, 4.0, 16.0, 16.0));
//!
//! assert_eq!(scheduler.take_pending(), vec![Rect::new(100.0, 52.0, 16.0, 16.0)]);
//! assert!(!scheduler.has_pending());
//! ```

use rule_lattice_core::logging::targets;
use rule_lattice_core::{Rect, Signal};

/// Collects container-space repaint requests.
///
/// # Signals
///
/// - `repaint_requested`: emitted once per accepted request with the
///   (clipped) rectangle
#[derive(Debug, Default)]
pub struct RepaintScheduler {
    pending: Vec<Rect>,
    viewport: Option<Rect>,

    /// Emitted for each accepted repaint request.
    pub repaint_requested: Signal<Rect>,
}

impl RepaintScheduler {
    /// Create a scheduler with no viewport clipping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or removes) the viewport requests are clipped to.
    pub fn set_viewport(&mut self, viewport: Option<Rect>) {
        self.viewport = viewport;
    }

    /// Get the viewport bounds.
    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    /// Translates a row-local rectangle into container coordinates.
    ///
    /// The result keeps `local`'s size exactly.
    #[inline]
    pub fn region_for(row_bounds: Rect, local: Rect) -> Rect {
        local.offset(row_bounds.origin.x, row_bounds.origin.y)
    }

    /// Records a container-space repaint request.
    ///
    /// Empty rectangles and rectangles entirely outside the viewport are
    /// dropped. Returns the rectangle actually recorded.
    pub fn request(&mut self, rect: Rect) -> Option<Rect> {
        if rect.is_empty() {
            return None;
        }

        let rect = match &self.viewport {
            Some(viewport) => rect.intersect(viewport)?,
            None => rect,
        };

        tracing::trace!(
            target: targets::REPAINT,
            x = rect.left(),
            y = rect.top(),
            width = rect.width(),
            height = rect.height(),
            "repaint requested"
        );
        self.pending.push(rect);
        self.repaint_requested.emit(rect);
        Some(rect)
    }

    /// Records a repaint of `local` inside the row at `row_bounds`.
    pub fn schedule_local(&mut self, row_bounds: Rect, local: Rect) -> Option<Rect> {
        self.request(Self::region_for(row_bounds, local))
    }

    /// Requests recorded since the last take/clear, oldest first.
    pub fn pending(&self) -> &[Rect] {
        &self.pending
    }

    /// Check if any request is pending.
    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Removes and returns every pending request.
    pub fn take_pending(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.pending)
    }

    /// Bounding box of the pending requests, for hosts that clip with a
    /// single scissor rectangle.
    pub fn bounding_region(&self) -> Option<Rect> {
        self.pending
            .iter()
            .copied()
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Discards every pending request.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
