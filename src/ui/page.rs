// SPDX-License-Identifier: MPL-2.0
//! Page sub-component: one media item inside a zoomable viewport.
//!
//! The page owns the zoom state of its item. Zoom changes are reported upward
//! as [`Effect::ZoomChanged`] so the pager can auto-hide its chrome.

use crate::config::Tuning;
use crate::media::SharedItem;
use crate::ui::state::{ScrollViewport, ZoomBounds, ZoomState};
use iced::{Point, Rectangle, Size, Vector};

/// Page sub-component state.
pub struct State {
    index: usize,
    item: SharedItem,
    viewport: ScrollViewport,
    zoom: ZoomState,
    tuning: Tuning,
    attached: bool,
    visible: bool,
    /// Zoom scale when the running pinch began.
    pinch_origin: Option<f32>,
}

/// Messages for the page sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Place the item view into the viewport. `initial` skips the re-layout pass.
    Attach { initial: bool },
    /// The viewport frame changed.
    Resized(Rectangle),
    /// Double tap at a viewport-relative location.
    DoubleTap(Point),
    /// Pinch in progress; `factor` is relative to the scale when it began.
    Pinch { factor: f32, anchor: Point },
    /// Pinch released.
    PinchEnded,
    /// The viewport was scrolled to an offset.
    Scrolled(Vector),
    /// The page became the visible page.
    Appeared,
    /// The page stopped being visible.
    Disappeared,
}

/// Effects produced by page changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// Zoom scale changed.
    ZoomChanged { scale: f32, min_scale: f32 },
}

impl State {
    #[must_use]
    pub fn new(index: usize, item: SharedItem, bounds: Rectangle, tuning: Tuning) -> Self {
        let content = item.borrow().content_size();
        let viewport = ScrollViewport::new(bounds, content);
        let zoom = ZoomState::new(content, bounds.size(), &tuning);
        Self {
            index,
            item,
            viewport,
            zoom,
            tuning,
            attached: false,
            visible: false,
            pinch_origin: None,
        }
    }

    /// Handle a page message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        let before = self.viewport.zoom_scale;

        match msg {
            Message::Attach { initial } => {
                if self.attached {
                    return Effect::None;
                }
                self.attached = true;
                self.viewport.content_size = self.item.borrow().content_size();
                if initial {
                    self.zoom.recompute(
                        self.viewport.content_size,
                        self.viewport.bounds.size(),
                        &self.tuning,
                    );
                    self.reset_zoom();
                    return Effect::None;
                }
                self.layout();
            }
            Message::Resized(bounds) => {
                self.viewport.bounds = bounds;
                self.layout();
            }
            Message::DoubleTap(location) => {
                if !self.attached {
                    return Effect::None;
                }
                if self.zoom.bounds.is_zoomed(self.viewport.zoom_scale) {
                    self.reset_zoom();
                } else {
                    self.zoom_in_at(location);
                }
                self.zoom.record_scale(self.viewport.zoom_scale);
            }
            Message::Pinch { factor, anchor } => {
                if !self.attached {
                    return Effect::None;
                }
                let origin = *self.pinch_origin.get_or_insert(self.viewport.zoom_scale);
                let scale = self.zoom.bounds.clamp(origin * factor);
                self.viewport.set_zoom(scale, anchor);
            }
            Message::PinchEnded => {
                self.pinch_origin = None;
                self.zoom.record_pinch(self.viewport.zoom_scale);
            }
            Message::Scrolled(offset) => {
                self.viewport.scroll_to(offset);
            }
            Message::Appeared => {
                self.visible = true;
                self.item.borrow_mut().set_paused(false);
            }
            Message::Disappeared => {
                self.visible = false;
                self.reset_zoom();
                self.item.borrow_mut().set_paused(true);
            }
        }

        self.zoom_effect(before)
    }

    /// Removes the item view from the viewport and hands it out.
    ///
    /// Zoom is reset to minimum first so the returned view has its fitted
    /// frame. The page keeps its item handle for pause/resume control.
    pub fn detach(&mut self) -> SharedItem {
        self.reset_zoom();
        self.pinch_origin = None;
        self.attached = false;
        self.item.clone()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn item(&self) -> &SharedItem {
        &self.item
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn zoom_scale(&self) -> f32 {
        self.viewport.zoom_scale
    }

    #[must_use]
    pub fn zoom_bounds(&self) -> ZoomBounds {
        self.zoom.bounds
    }

    #[must_use]
    pub fn is_user_zoomed(&self) -> bool {
        self.zoom.user_zoomed
    }

    #[must_use]
    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    /// Viewport frame in container coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        self.viewport.bounds
    }

    /// Intrinsic size of the hosted item.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.viewport.content_size
    }

    /// Frame of the item view in container coordinates, while attached.
    #[must_use]
    pub fn item_frame(&self) -> Option<Rectangle> {
        self.attached.then(|| self.viewport.screen_frame())
    }

    /// Whether the viewport's vertical scroll offset is at its top edge.
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        self.viewport.is_at_top()
    }

    fn layout(&mut self) {
        self.zoom.recompute(
            self.viewport.content_size,
            self.viewport.bounds.size(),
            &self.tuning,
        );
        if self.zoom.user_zoomed {
            self.viewport.zoom_scale = self.zoom.bounds.clamp(self.viewport.zoom_scale);
            self.viewport.clamp_offset();
        } else {
            self.reset_zoom();
        }
    }

    fn reset_zoom(&mut self) {
        self.viewport.zoom_scale = self.zoom.bounds.min_scale;
        self.viewport.offset = Vector::new(0.0, 0.0);
        self.zoom.user_zoomed = false;
    }

    fn zoom_in_at(&mut self, location: Point) {
        let target = self.zoom.bounds.double_tap_scale;
        let center = self.viewport.content_point(location);
        let size = Size::new(
            self.viewport.bounds.width / target,
            self.viewport.bounds.height / target,
        );
        let rect = Rectangle::new(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        );
        self.viewport
            .zoom_to_rect(rect, self.zoom.bounds.min_scale, self.zoom.bounds.max_scale);
    }

    fn zoom_effect(&self, before: f32) -> Effect {
        let scale = self.viewport.zoom_scale;
        if (scale - before).abs() > f32::EPSILON {
            Effect::ZoomChanged {
                scale,
                min_scale: self.zoom.bounds.min_scale,
            }
        } else {
            Effect::None
        }
    }
}
