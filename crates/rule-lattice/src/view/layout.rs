//! Vertical row geometry for uniform-height rows.
//!
//! Coordinates returned here are container (viewport) coordinates: content
//! position minus the vertical scroll offset.

use rule_lattice_core::{Point, Rect, Size};

/// Uniform row layout with spacing and a vertical scroll offset.
///
/// Row `i` occupies content rows `[i * stride, i * stride + row_height)`
/// where `stride = row_height + row_spacing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    row_height: f32,
    row_spacing: f32,
    viewport: Size,
    scroll_y: f32,
}

impl RowLayout {
    /// Create a layout; negative sizes are treated as zero.
    pub fn new(row_height: f32, row_spacing: f32) -> Self {
        Self {
            row_height: row_height.max(0.0),
            row_spacing: row_spacing.max(0.0),
            viewport: Size::ZERO,
            scroll_y: 0.0,
        }
    }

    /// Height of every row.
    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Gap between consecutive rows.
    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    fn stride(&self) -> f32 {
        self.row_height + self.row_spacing
    }

    /// Size of the visible area.
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Resizes the visible area.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport = size;
    }

    /// The visible area in container coordinates.
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
    }

    /// Current vertical scroll offset.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_y
    }

    /// Sets the vertical scroll offset, clamped to `[0, max_scroll]`.
    pub fn set_scroll_offset(&mut self, offset: f32, row_count: usize) {
        let max = (self.content_height(row_count) - self.viewport.height).max(0.0);
        self.scroll_y = offset.clamp(0.0, max);
    }

    /// Total height of `row_count` rows.
    pub fn content_height(&self, row_count: usize) -> f32 {
        if row_count == 0 {
            return 0.0;
        }
        row_count as f32 * self.stride() - self.row_spacing
    }

    /// Bounds of `row`, or `None` if it is outside `0..row_count`.
    pub fn row_rect(&self, row: usize, row_count: usize) -> Option<Rect> {
        if row >= row_count {
            return None;
        }
        let y = row as f32 * self.stride() - self.scroll_y;
        Some(Rect::new(0.0, y, self.viewport.width, self.row_height))
    }

    /// Smallest rectangle covering rows `[first, last]`.
    ///
    /// `last` is clamped to the final row; returns `None` if nothing of the
    /// range exists.
    pub fn rows_rect(&self, first: usize, last: usize, row_count: usize) -> Option<Rect> {
        let last = last.min(row_count.checked_sub(1)?);
        if first > last {
            return None;
        }
        let top = self.row_rect(first, row_count)?;
        let bottom = self.row_rect(last, row_count)?;
        Some(top.union(&bottom))
    }

    /// The row under `point`, or `None` for spacing, blank space below the
    /// last row, or points outside the viewport.
    ///
    /// Before the viewport has been sized, only the left and top edges bound
    /// the hit test.
    pub fn index_at(&self, point: Point, row_count: usize) -> Option<usize> {
        let outside = if self.viewport.is_empty() {
            point.x < 0.0 || point.y < 0.0
        } else {
            !self.viewport_rect().contains(point)
        };
        if outside || self.stride() <= 0.0 {
            return None;
        }

        let content_y = point.y + self.scroll_y;
        let row = (content_y / self.stride()).floor() as usize;
        if row >= row_count {
            return None;
        }
        let within = content_y - row as f32 * self.stride();
        (within < self.row_height).then_some(row)
    }

    /// First and last row intersecting the viewport.
    pub fn visible_range(&self, row_count: usize) -> Option<(usize, usize)> {
        if row_count == 0 || self.viewport.is_empty() || self.stride() <= 0.0 {
            return None;
        }

        let top = self.scroll_y;
        let bottom = top + self.viewport.height;
        let first = (top / self.stride()).floor() as usize;
        if first >= row_count {
            return None;
        }
        let last = ((bottom / self.stride()).ceil() as usize)
            .saturating_sub(1)
            .min(row_count - 1);
        Some((first, last.max(first)))
    }
}
