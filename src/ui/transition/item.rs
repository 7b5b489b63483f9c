// SPDX-License-Identifier: MPL-2.0
//! Proxies drawn by a running transition.

use crate::geometry::interpolate_frame;
use crate::media::{SharedItem, Snapshot};
use iced::{Point, Rectangle, Vector};
use std::fmt;

/// What the floating proxy shows.
#[derive(Clone)]
pub enum ProxyContent {
    /// Static image (transition image or animated-item snapshot).
    Image(Snapshot),
    /// The live media item, detached from its page.
    Live(SharedItem),
}

impl fmt::Debug for ProxyContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyContent::Image(snapshot) => f.debug_tuple("Image").field(snapshot).finish(),
            ProxyContent::Live(_) => f.write_str("Live"),
        }
    }
}

/// Which chrome container a proxy stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeKind {
    Header,
    Footer,
}

/// Static stand-in for a live chrome container during a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeProxy {
    pub kind: ChromeKind,
    pub frame: Rectangle,
    pub alpha: f32,
}

/// The view moving between thumbnail and fullscreen.
#[derive(Debug, Clone)]
pub struct FloatingProxy {
    pub frame: Rectangle,
    pub content: ProxyContent,
}

/// Geometry and proxies of one transition.
#[derive(Debug, Clone)]
pub struct TransitionItem {
    initial_frame: Rectangle,
    target_frame: Rectangle,
    floating: FloatingProxy,
    chrome_proxies: Vec<ChromeProxy>,
    touch_offset: Vector,
    /// Share of `touch_offset` applied to the frame.
    touch_weight: f32,
    /// Fractions the proxy was released at and springs towards.
    release: Option<(f32, f32)>,
}

impl TransitionItem {
    #[must_use]
    pub fn new(initial_frame: Rectangle, target_frame: Rectangle, content: ProxyContent) -> Self {
        Self {
            initial_frame,
            target_frame,
            floating: FloatingProxy {
                frame: initial_frame,
                content,
            },
            chrome_proxies: Vec::new(),
            touch_offset: Vector::new(0.0, 0.0),
            touch_weight: 1.0,
            release: None,
        }
    }

    #[must_use]
    pub fn initial_frame(&self) -> Rectangle {
        self.initial_frame
    }

    #[must_use]
    pub fn target_frame(&self) -> Rectangle {
        self.target_frame
    }

    #[must_use]
    pub fn floating(&self) -> &FloatingProxy {
        &self.floating
    }

    #[must_use]
    pub fn chrome_proxies(&self) -> &[ChromeProxy] {
        &self.chrome_proxies
    }

    #[must_use]
    pub fn touch_offset(&self) -> Vector {
        self.touch_offset
    }

    pub fn add_chrome_proxy(&mut self, proxy: ChromeProxy) {
        self.chrome_proxies.push(proxy);
    }

    /// Anchors the finger at `location` to the proxy.
    ///
    /// The offset is stored at the proxy's initial scale.
    pub fn seed_touch(&mut self, location: Point) {
        let frame = self.floating.frame;
        let scale = if self.initial_frame.width > 0.0 {
            frame.width / self.initial_frame.width
        } else {
            1.0
        };
        let offset = location - frame.center();
        self.touch_offset = if scale > f32::EPSILON {
            offset * (1.0 / scale)
        } else {
            offset
        };
    }

    /// Lets go of the proxy at fraction `from`, heading for `to`.
    ///
    /// The touch correction fades out over the run so the proxy settles on
    /// the exact terminal frame.
    pub fn release(&mut self, from: f32, to: f32) {
        self.release = Some((from, to));
    }

    /// Takes hold of a released proxy again without moving it.
    pub fn regrab(&mut self) {
        self.touch_offset = self.touch_offset * self.touch_weight;
        self.touch_weight = 1.0;
        self.release = None;
    }

    /// Moves the floating proxy to `fraction` between its two frames.
    pub fn set_fraction(&mut self, fraction: f32) {
        if let Some((from, to)) = self.release {
            let span = to - from;
            self.touch_weight = if span.abs() > f32::EPSILON {
                ((to - fraction) / span).clamp(0.0, 1.0)
            } else {
                0.0
            };
        }
        self.floating.frame = interpolate_frame(
            self.initial_frame,
            self.target_frame,
            fraction,
            self.touch_offset * self.touch_weight,
        );
    }

    pub fn set_chrome_alpha(&mut self, alpha: f32) {
        for proxy in &mut self.chrome_proxies {
            proxy.alpha = alpha;
        }
    }

    /// Swaps what the floating proxy shows, keeping its frame.
    pub fn replace_content(&mut self, content: ProxyContent) {
        self.floating.content = content;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::approx_eq;
    use crate::test_utils::{assert_abs_diff_eq, FRAME_EPSILON};
    use iced::Size;

    fn item() -> TransitionItem {
        TransitionItem::new(
            Rectangle::new(Point::new(0.0, 200.0), Size::new(400.0, 200.0)),
            Rectangle::new(Point::new(20.0, 20.0), Size::new(80.0, 40.0)),
            ProxyContent::Image(Snapshot::solid(4, 2, [0, 0, 0, 255])),
        )
    }

    #[test]
    fn seeded_touch_is_relative_to_center() {
        let mut item = item();
        item.seed_touch(Point::new(300.0, 300.0));
        assert_eq!(item.touch_offset(), Vector::new(100.0, 0.0));
    }

    #[test]
    fn set_fraction_moves_floating_proxy() {
        let mut item = item();
        item.set_fraction(1.0);
        assert_abs_diff_eq!(item.floating().frame.width, 80.0);
        assert_abs_diff_eq!(item.floating().frame.x, 20.0);

        item.set_fraction(0.0);
        assert_eq!(item.floating().frame, item.initial_frame());
    }

    #[test]
    fn released_proxy_settles_on_exact_frames() {
        let mut item = item();
        item.seed_touch(Point::new(300.0, 300.0));
        item.set_fraction(0.5);
        let held = item.floating().frame;

        item.release(0.5, 1.0);
        item.set_fraction(0.5);
        assert_eq!(item.floating().frame, held);

        item.set_fraction(1.0);
        assert!(approx_eq(
            item.floating().frame,
            item.target_frame(),
            FRAME_EPSILON
        ));

        item.release(1.0, 0.0);
        item.set_fraction(0.0);
        assert!(approx_eq(
            item.floating().frame,
            item.initial_frame(),
            FRAME_EPSILON
        ));
    }

    #[test]
    fn regrab_keeps_proxy_in_place() {
        let mut item = item();
        item.seed_touch(Point::new(300.0, 300.0));
        item.set_fraction(0.4);
        item.release(0.4, 1.0);
        item.set_fraction(0.7);
        let moving = item.floating().frame;

        item.regrab();
        item.set_fraction(0.7);
        assert!(approx_eq(item.floating().frame, moving, FRAME_EPSILON));
    }

    #[test]
    fn chrome_alpha_applies_to_every_proxy() {
        let mut item = item();
        for kind in [ChromeKind::Header, ChromeKind::Footer] {
            item.add_chrome_proxy(ChromeProxy {
                kind,
                frame: Rectangle::new(Point::ORIGIN, Size::new(400.0, 44.0)),
                alpha: 1.0,
            });
        }
        item.set_chrome_alpha(0.25);
        assert!(item.chrome_proxies().iter().all(|p| p.alpha == 0.25));
    }
}
