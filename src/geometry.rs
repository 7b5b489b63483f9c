// SPDX-License-Identifier: MPL-2.0
//! Frame math shared by the page and transition layers.
//!
//! All frames are in container (screen) coordinates unless stated otherwise.

use iced::{Padding, Point, Rectangle, Size, Vector};

/// Linear interpolation between two scalars.
#[must_use]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Aspect ratio (width / height) of a size, or 1.0 when the size is degenerate.
#[must_use]
pub fn aspect_ratio(size: Size) -> f32 {
    if size.width > 0.0 && size.height > 0.0 && size.width.is_finite() && size.height.is_finite()
    {
        size.width / size.height
    } else {
        tracing::warn!(
            width = size.width,
            height = size.height,
            "degenerate size, using unit aspect ratio"
        );
        1.0
    }
}

/// Largest rectangle with the aspect ratio of `content` that fits inside
/// `bounds`, centered.
#[must_use]
pub fn aspect_fit(content: Size, bounds: Rectangle) -> Rectangle {
    let ratio = aspect_ratio(content);
    let bounds_ratio = if bounds.height > 0.0 {
        bounds.width / bounds.height
    } else {
        ratio
    };

    let size = if ratio > bounds_ratio {
        Size::new(bounds.width, bounds.width / ratio)
    } else {
        Size::new(bounds.height * ratio, bounds.height)
    };

    centered(size, bounds.center())
}

/// Rectangle of the given size centered on a point.
#[must_use]
pub fn centered(size: Size, center: Point) -> Rectangle {
    Rectangle::new(
        Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
        size,
    )
}

/// Shrinks `bounds` by `padding` on every edge, never below zero size.
#[must_use]
pub fn inset(bounds: Rectangle, padding: Padding) -> Rectangle {
    Rectangle {
        x: bounds.x + padding.left,
        y: bounds.y + padding.top,
        width: (bounds.width - padding.left - padding.right).max(0.0),
        height: (bounds.height - padding.top - padding.bottom).max(0.0),
    }
}

/// Frame of the floating proxy at `fraction` between `initial` and `target`.
///
/// Size and center are linear in `fraction`. `touch_offset` is the grab point
/// relative to the proxy center at scale 1; the correction keeps that point
/// fixed relative to the interpolated center while the proxy scales. Pass a
/// zero offset to land exactly on `initial` or `target`.
#[must_use]
pub fn interpolate_frame(
    initial: Rectangle,
    target: Rectangle,
    fraction: f32,
    touch_offset: Vector,
) -> Rectangle {
    let width = lerp(initial.width, target.width, fraction).max(0.0);
    let height = lerp(initial.height, target.height, fraction).max(0.0);

    let from = initial.center();
    let to = target.center();
    let mut center = Point::new(lerp(from.x, to.x, fraction), lerp(from.y, to.y, fraction));

    if initial.width > 0.0 {
        let shrink = 1.0 - width / initial.width;
        center = center + touch_offset * shrink;
    }

    centered(Size::new(width, height), center)
}

/// Whether two rectangles match within `tolerance` on every edge.
#[must_use]
pub fn approx_eq(a: Rectangle, b: Rectangle, tolerance: f32) -> bool {
    (a.x - b.x).abs() <= tolerance
        && (a.y - b.y).abs() <= tolerance
        && (a.width - b.width).abs() <= tolerance
        && (a.height - b.height).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn aspect_fit_letterboxes_wide_content() {
        let fitted = aspect_fit(Size::new(200.0, 100.0), rect(0.0, 0.0, 400.0, 800.0));
        assert_abs_diff_eq!(fitted.width, 400.0);
        assert_abs_diff_eq!(fitted.height, 200.0);
        assert_abs_diff_eq!(fitted.y, 300.0);
    }

    #[test]
    fn aspect_fit_pillarboxes_tall_content() {
        let fitted = aspect_fit(Size::new(100.0, 400.0), rect(10.0, 20.0, 400.0, 400.0));
        assert_abs_diff_eq!(fitted.width, 100.0);
        assert_abs_diff_eq!(fitted.height, 400.0);
        assert_abs_diff_eq!(fitted.x, 160.0);
        assert_abs_diff_eq!(fitted.y, 20.0);
    }

    #[test]
    fn zero_sized_content_fits_as_square() {
        let fitted = aspect_fit(Size::new(0.0, 0.0), rect(0.0, 0.0, 300.0, 600.0));
        assert!(fitted.width.is_finite() && fitted.height.is_finite());
        assert_abs_diff_eq!(fitted.width, fitted.height);
        assert_abs_diff_eq!(fitted.width, 300.0);
    }

    #[test]
    fn inset_applies_each_edge() {
        let bounds = inset(
            rect(0.0, 0.0, 400.0, 800.0),
            Padding {
                top: 40.0,
                right: 0.0,
                bottom: 60.0,
                left: 10.0,
            },
        );
        assert_eq!(bounds, rect(10.0, 40.0, 390.0, 700.0));
    }

    #[test]
    fn interpolation_hits_both_ends() {
        let initial = rect(10.0, 10.0, 50.0, 50.0);
        let target = rect(0.0, 100.0, 400.0, 300.0);

        let start = interpolate_frame(initial, target, 0.0, Vector::new(0.0, 0.0));
        let end = interpolate_frame(initial, target, 1.0, Vector::new(0.0, 0.0));

        assert!(approx_eq(start, initial, 1e-4));
        assert!(approx_eq(end, target, 1e-4));
    }

    #[test]
    fn interpolation_is_linear_in_center() {
        let initial = rect(0.0, 0.0, 100.0, 100.0);
        let target = rect(100.0, 200.0, 100.0, 100.0);

        let half = interpolate_frame(initial, target, 0.5, Vector::new(0.0, 0.0));
        assert_abs_diff_eq!(half.center().x, 100.0);
        assert_abs_diff_eq!(half.center().y, 150.0);
    }

    #[test]
    fn touch_offset_keeps_grab_point_with_center_while_shrinking() {
        let initial = rect(0.0, 0.0, 200.0, 200.0);
        let target = rect(50.0, 50.0, 100.0, 100.0);
        let offset = Vector::new(40.0, -20.0);

        let frame = interpolate_frame(initial, target, 1.0, offset);
        let scale = frame.width / initial.width;
        let grab_point = frame.center() + offset * scale;
        let plain_center = target.center();

        assert_abs_diff_eq!(grab_point.x, plain_center.x + offset.x, epsilon = 1e-4);
        assert_abs_diff_eq!(grab_point.y, plain_center.y + offset.y, epsilon = 1e-4);
    }
}
