// SPDX-License-Identifier: MPL-2.0
//! Zoomable scroll viewport state.
//!
//! Content coordinates are unscaled item points. The viewport shows the
//! content scaled by `zoom_scale`, centered when smaller than the viewport and
//! scrolled by `offset` when larger.

use iced::{Point, Rectangle, Size, Vector};

/// Scroll/zoom state of a page viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollViewport {
    /// Frame of the viewport in container coordinates.
    pub bounds: Rectangle,

    /// Intrinsic size of the hosted content.
    pub content_size: Size,

    /// Current zoom scale.
    pub zoom_scale: f32,

    /// Current scroll offset, in scaled points.
    pub offset: Vector,
}

impl ScrollViewport {
    #[must_use]
    pub fn new(bounds: Rectangle, content_size: Size) -> Self {
        Self {
            bounds,
            content_size,
            zoom_scale: 1.0,
            offset: Vector::new(0.0, 0.0),
        }
    }

    /// Size of the content at the current zoom scale.
    #[must_use]
    pub fn scaled_size(&self) -> Size {
        Size::new(
            self.content_size.width * self.zoom_scale,
            self.content_size.height * self.zoom_scale,
        )
    }

    /// Inset that centers content smaller than the viewport.
    #[must_use]
    pub fn centering_inset(&self) -> Vector {
        let scaled = self.scaled_size();
        Vector::new(
            ((self.bounds.width - scaled.width) / 2.0).max(0.0),
            ((self.bounds.height - scaled.height) / 2.0).max(0.0),
        )
    }

    /// Largest valid scroll offset on each axis.
    #[must_use]
    pub fn max_offset(&self) -> Vector {
        let scaled = self.scaled_size();
        Vector::new(
            (scaled.width - self.bounds.width).max(0.0),
            (scaled.height - self.bounds.height).max(0.0),
        )
    }

    /// Clamps the scroll offset into the valid range.
    pub fn clamp_offset(&mut self) {
        let max = self.max_offset();
        self.offset = Vector::new(
            self.offset.x.clamp(0.0, max.x),
            self.offset.y.clamp(0.0, max.y),
        );
    }

    /// Scrolls to `offset`, clamped.
    pub fn scroll_to(&mut self, offset: Vector) {
        self.offset = offset;
        self.clamp_offset();
    }

    /// Whether the vertical scroll offset sits at the top edge.
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        self.offset.y <= 0.0
    }

    /// Frame of the content relative to the viewport origin.
    #[must_use]
    pub fn content_frame(&self) -> Rectangle {
        let inset = self.centering_inset();
        Rectangle::new(
            Point::new(inset.x - self.offset.x, inset.y - self.offset.y),
            self.scaled_size(),
        )
    }

    /// Frame of the content in container coordinates.
    #[must_use]
    pub fn screen_frame(&self) -> Rectangle {
        let local = self.content_frame();
        Rectangle::new(
            Point::new(self.bounds.x + local.x, self.bounds.y + local.y),
            local.size(),
        )
    }

    /// Converts a point relative to the viewport origin into content coordinates.
    #[must_use]
    pub fn content_point(&self, local: Point) -> Point {
        let frame = self.content_frame();
        let scale = self.zoom_scale.max(f32::EPSILON);
        Point::new((local.x - frame.x) / scale, (local.y - frame.y) / scale)
    }

    /// Zooms so that `rect` (content coordinates) fills the viewport,
    /// with the resulting scale clamped to `[min, max]`.
    pub fn zoom_to_rect(&mut self, rect: Rectangle, min: f32, max: f32) {
        let scale_x = self.bounds.width / rect.width.max(f32::EPSILON);
        let scale_y = self.bounds.height / rect.height.max(f32::EPSILON);
        self.zoom_scale = scale_x.min(scale_y).clamp(min, max);

        let center = rect.center();
        self.offset = Vector::new(
            center.x * self.zoom_scale - self.bounds.width / 2.0,
            center.y * self.zoom_scale - self.bounds.height / 2.0,
        );
        self.clamp_offset();
    }

    /// Sets the zoom scale keeping the content point under `anchor`
    /// (viewport-relative) in place where the scroll range allows it.
    pub fn set_zoom(&mut self, scale: f32, anchor: Point) {
        let pinned = self.content_point(anchor);
        self.zoom_scale = scale;
        let inset = self.centering_inset();
        self.offset = Vector::new(
            pinned.x * scale + inset.x - anchor.x,
            pinned.y * scale + inset.y - anchor.y,
        );
        self.clamp_offset();
    }
}
