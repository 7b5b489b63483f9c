// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! This module handles all page zoom state and logic, including:
//! - Fit and fill scale computation from content and viewport sizes
//! - Double-tap target selection
//! - Tracking whether the user zoomed in on purpose

use crate::config::{Tuning, ZOOM_EPSILON, ZOOM_SPREAD_THRESHOLD};
use iced::Size;

/// Zoom limits derived from content and viewport sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    /// Scale at which the whole content fits the viewport.
    pub min_scale: f32,

    /// Scale at which the content fills the viewport, never below native size.
    pub fill_scale: f32,

    /// Scale reached by a double tap from minimum: the fill scale when it is
    /// meaningfully larger than the fit scale, otherwise a fixed step above fit.
    pub double_tap_scale: f32,

    /// Largest scale the viewport allows.
    pub max_scale: f32,
}

impl ZoomBounds {
    /// Computes zoom limits for `content` shown in `viewport`.
    ///
    /// The fill candidate is floored at 1.0 and the default double-tap scale
    /// is `min_scale * double_tap_scale`, so `min <= double_tap <= max` holds.
    #[must_use]
    pub fn compute(content: Size, viewport: Size, tuning: &Tuning) -> Self {
        if content.width <= 0.0 || content.height <= 0.0 {
            tracing::warn!(
                width = content.width,
                height = content.height,
                "empty content size, zoom disabled"
            );
            return Self {
                min_scale: 1.0,
                fill_scale: 1.0,
                double_tap_scale: tuning.double_tap_scale,
                max_scale: tuning.max_zoom_scale.max(tuning.double_tap_scale),
            };
        }

        let ratio_x = viewport.width / content.width;
        let ratio_y = viewport.height / content.height;

        let min_scale = ratio_x.min(ratio_y);
        let fill_scale = ratio_x.max(ratio_y).max(1.0);

        let double_tap_scale = if content.width > viewport.width
            || fill_scale - min_scale > ZOOM_SPREAD_THRESHOLD
        {
            fill_scale
        } else {
            min_scale * tuning.double_tap_scale
        };

        Self {
            min_scale,
            fill_scale,
            double_tap_scale,
            max_scale: tuning.max_zoom_scale.max(double_tap_scale),
        }
    }

    /// Whether `scale` is above the minimum, beyond rounding noise.
    #[must_use]
    pub fn is_zoomed(&self, scale: f32) -> bool {
        scale > self.min_scale + ZOOM_EPSILON
    }

    /// Clamps `scale` into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Manages zoom state for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    /// Limits for the current content and viewport.
    pub bounds: ZoomBounds,

    /// Set when a pinch leaves the content above minimum; suppresses
    /// automatic re-fit on layout until zoom is back at minimum.
    pub user_zoomed: bool,
}

impl ZoomState {
    #[must_use]
    pub fn new(content: Size, viewport: Size, tuning: &Tuning) -> Self {
        Self {
            bounds: ZoomBounds::compute(content, viewport, tuning),
            user_zoomed: false,
        }
    }

    /// Recomputes bounds after a content or viewport change.
    pub fn recompute(&mut self, content: Size, viewport: Size, tuning: &Tuning) {
        self.bounds = ZoomBounds::compute(content, viewport, tuning);
    }

    /// Records the scale a pinch left the content at.
    pub fn record_pinch(&mut self, scale: f32) {
        self.user_zoomed = self.bounds.is_zoomed(scale);
    }

    /// Records a zoom change that did not come from a pinch.
    pub fn record_scale(&mut self, scale: f32) {
        if !self.bounds.is_zoomed(scale) {
            self.user_zoomed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn bounds(content: (f32, f32), viewport: (f32, f32)) -> ZoomBounds {
        ZoomBounds::compute(
            Size::new(content.0, content.1),
            Size::new(viewport.0, viewport.1),
            &Tuning::default(),
        )
    }

    #[test]
    fn large_content_brackets_native_scale() {
        for (content, viewport) in [
            ((4000.0, 3000.0), (400.0, 800.0)),
            ((300.0, 2000.0), (400.0, 800.0)),
            ((1200.0, 100.0), (400.0, 800.0)),
            ((401.0, 801.0), (400.0, 800.0)),
        ] {
            let b = bounds(content, viewport);
            assert!(b.min_scale <= 1.0, "{content:?}: {b:?}");
            assert!(b.fill_scale >= 1.0, "{content:?}: {b:?}");
            assert!(b.double_tap_scale >= 1.0, "{content:?}: {b:?}");
            assert!(b.max_scale >= b.double_tap_scale);
        }
    }

    #[test]
    fn wide_content_double_taps_to_fill() {
        let b = bounds((800.0, 400.0), (400.0, 800.0));
        assert_abs_diff_eq!(b.min_scale, 0.5);
        assert_abs_diff_eq!(b.fill_scale, 2.0);
        assert_abs_diff_eq!(b.double_tap_scale, 2.0);
        assert_abs_diff_eq!(b.max_scale, 3.0);
    }

    #[test]
    fn matching_aspect_uses_default_target() {
        let b = bounds((200.0, 400.0), (400.0, 800.0));
        assert_abs_diff_eq!(b.min_scale, 2.0);
        assert_abs_diff_eq!(b.fill_scale, 2.0);
        assert_abs_diff_eq!(b.double_tap_scale, 2.8);
        assert_abs_diff_eq!(b.max_scale, 3.0);
    }

    #[test]
    fn ceiling_is_raised_to_double_tap_target() {
        let b = bounds((1000.0, 50.0), (400.0, 800.0));
        assert_abs_diff_eq!(b.double_tap_scale, 16.0);
        assert_abs_diff_eq!(b.max_scale, 16.0);
    }

    #[test]
    fn pinch_above_minimum_marks_user_zoom() {
        let mut state = ZoomState::new(
            Size::new(800.0, 400.0),
            Size::new(400.0, 800.0),
            &Tuning::default(),
        );
        state.record_pinch(1.0);
        assert!(state.user_zoomed);

        state.record_scale(0.5);
        assert!(!state.user_zoomed);
    }
}
