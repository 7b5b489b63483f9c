// SPDX-License-Identifier: MPL-2.0
//! Lightbox: the component a host embeds to present media fullscreen.
//!
//! It owns the pager while presented, the transition controller and the
//! presentation bookkeeping. The host feeds it input and clock ticks and
//! receives lifecycle [`Event`]s back.
//!
//! # Example
//!
//! ```ignore
//! let mut lightbox = Lightbox::new(window_bounds, Tuning::default());
//! let events = lightbox.handle(Message::Present { index: 2 }, &album)?;
//! // later, every frame:
//! let events = lightbox.handle(Message::Tick(Instant::now()), &album)?;
//! ```

use crate::config::{Config, Tuning};
use crate::error::{Error, Result};
use crate::source::{Event, PageSource};
use crate::ui::transition::{
    controller, driver, Controller, Direction, Driver, PanPhase, PanSample, Position,
    PresentationController,
};
use crate::ui::{page, pager};
use iced::{Padding, Point, Rectangle, Vector};
use std::time::Instant;

/// Messages for the lightbox.
#[derive(Debug, Clone)]
pub enum Message {
    /// Present the page at `index` from its thumbnail.
    Present { index: usize },
    /// Dismiss back to the current page's thumbnail.
    Dismiss,
    /// Pan gesture sample over the viewer.
    Pan(PanSample),
    /// Single tap in the page area.
    Tap,
    /// Double tap at a viewport-relative location.
    DoubleTap(Point),
    /// Pinch in progress on the current page.
    Pinch { factor: f32, anchor: Point },
    /// Pinch released.
    PinchEnded,
    /// The current page's viewport scrolled to an offset.
    Scrolled(Vector),
    /// A horizontal swipe started.
    SwipeBegan(pager::Direction),
    /// The horizontal swipe settled.
    SwipeEnded { completed: bool },
    /// The container frame changed.
    Resized(Rectangle),
    /// Animation clock tick.
    Tick(Instant),
}

/// Fullscreen media viewer state.
pub struct Lightbox {
    pager: Option<pager::State>,
    transitions: Controller,
    presentation: PresentationController,
    tuning: Tuning,
    bounds: Rectangle,
    /// Latest pan began outside the accepted policy; ignore it until it lifts.
    pan_rejected: bool,
    clock: Instant,
}

impl Lightbox {
    #[must_use]
    pub fn new(bounds: Rectangle, tuning: Tuning) -> Self {
        Self {
            pager: None,
            transitions: Controller::new(),
            presentation: PresentationController::default(),
            tuning,
            bounds,
            pan_rejected: false,
            clock: Instant::now(),
        }
    }

    /// Creates a lightbox tuned from user configuration.
    #[must_use]
    pub fn from_config(bounds: Rectangle, config: &Config) -> Self {
        Self::new(bounds, config.tuning())
    }

    /// Handle a lightbox message.
    ///
    /// Integration errors (bad index, missing origin view, overlapping
    /// transitions) are returned; the lightbox stays in its prior state.
    pub fn handle(&mut self, msg: Message, source: &dyn PageSource) -> Result<Vec<Event>> {
        match msg {
            Message::Present { index } => self.present(index, source),
            Message::Dismiss => {
                self.start(Direction::Dismissal, source)?;
                Ok(Vec::new())
            }
            Message::Pan(sample) => self.pan(sample, source),
            Message::Tap => Ok(self.page_input(pager::Message::Tap, source)),
            Message::DoubleTap(location) => Ok(self.page_input(
                pager::Message::Page(page::Message::DoubleTap(location)),
                source,
            )),
            Message::Pinch { factor, anchor } => Ok(self.page_input(
                pager::Message::Page(page::Message::Pinch { factor, anchor }),
                source,
            )),
            Message::PinchEnded => Ok(self.page_input(
                pager::Message::Page(page::Message::PinchEnded),
                source,
            )),
            Message::Scrolled(offset) => Ok(self.page_input(
                pager::Message::Page(page::Message::Scrolled(offset)),
                source,
            )),
            Message::SwipeBegan(direction) => {
                Ok(self.pager_input(pager::Message::SwipeBegan(direction), source))
            }
            Message::SwipeEnded { completed } => {
                Ok(self.pager_input(pager::Message::SwipeEnded { completed }, source))
            }
            Message::Resized(bounds) => {
                self.bounds = bounds;
                let content = self.presentation.frame_of_presented_view(bounds);
                Ok(self.pager_input(pager::Message::Resized(content), source))
            }
            Message::Tick(now) => {
                self.clock = now;
                let mut events = self.pager_input(pager::Message::Tick(now), source);
                if let Some(pager) = self.pager.as_mut() {
                    let effect = self.transitions.tick(now, pager);
                    events.extend(self.controller_events(effect));
                }
                Ok(events)
            }
        }
    }

    /// Whether the viewer is mounted.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.pager.is_some()
    }

    #[must_use]
    pub fn pager(&self) -> Option<&pager::State> {
        self.pager.as_ref()
    }

    /// Index of the current page while presented.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.pager.as_ref().map(pager::State::current_index)
    }

    /// The running transition, if any.
    #[must_use]
    pub fn transition(&self) -> Option<&Driver> {
        self.transitions.driver()
    }

    #[must_use]
    pub fn presentation(&self) -> &PresentationController {
        &self.presentation
    }

    #[must_use]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Whether taps on the page area are swallowed by a running transition.
    #[must_use]
    pub fn is_intercepting(&self) -> bool {
        self.transitions
            .driver()
            .and_then(Driver::interceptor)
            .is_some()
    }

    fn present(&mut self, index: usize, source: &dyn PageSource) -> Result<Vec<Event>> {
        if self.transitions.is_transitioning() {
            return Err(Error::TransitionInProgress);
        }
        if self.pager.is_some() {
            tracing::debug!(index, "already presented, ignoring present request");
            return Ok(Vec::new());
        }

        self.presentation
            .set_insets(source.content_insets().unwrap_or(Padding::ZERO));
        let content = self.presentation.frame_of_presented_view(self.bounds);
        self.pager = Some(pager::State::new(index, source, content, self.tuning)?);

        if let Err(err) = self.start(Direction::Presentation, source) {
            tracing::warn!(index, %err, "presentation could not start");
            self.pager = None;
            self.presentation.did_end(Direction::Presentation, Position::Start);
            return Err(err);
        }
        Ok(Vec::new())
    }

    fn start(&mut self, direction: Direction, source: &dyn PageSource) -> Result<()> {
        let pager = self.pager.as_mut().ok_or(Error::NoCurrentPage)?;
        let content = self.presentation.frame_of_presented_view(self.bounds);
        self.transitions
            .begin(direction, self.bounds, content, pager, source, self.clock)?;
        self.presentation.will_begin(direction);
        Ok(())
    }

    fn pan(&mut self, sample: PanSample, source: &dyn PageSource) -> Result<Vec<Event>> {
        if sample.phase == PanPhase::Began {
            let at_top = self
                .pager
                .as_ref()
                .and_then(pager::State::current_page)
                .is_some_and(|page| Controller::should_recognize_simultaneously(page.viewport()));
            self.pan_rejected = !(at_top && self.transitions.should_begin(&sample));
        }
        if self.pan_rejected {
            if matches!(sample.phase, PanPhase::Ended | PanPhase::Cancelled) {
                self.pan_rejected = false;
            }
            return Ok(Vec::new());
        }

        let Some(pager) = self.pager.as_mut() else {
            return Ok(Vec::new());
        };
        let effect = self.transitions.pan(sample, pager);
        if let controller::Effect::DismissRequested = effect {
            self.start(Direction::Dismissal, source)?;
            return Ok(Vec::new());
        }
        Ok(self.controller_events(effect))
    }

    /// Forwards input meant for the page area unless a transition swallows it.
    fn page_input(&mut self, msg: pager::Message, source: &dyn PageSource) -> Vec<Event> {
        if self.is_intercepting() {
            tracing::trace!("page input ignored during transition");
            return Vec::new();
        }
        self.pager_input(msg, source)
    }

    fn pager_input(&mut self, msg: pager::Message, source: &dyn PageSource) -> Vec<Event> {
        let Some(pager) = self.pager.as_mut() else {
            return Vec::new();
        };
        match pager.handle(msg, source) {
            pager::Effect::None => Vec::new(),
            pager::Effect::WillTransition(index) => vec![Event::WillTransition(index)],
            pager::Effect::DidTransition {
                to,
                from,
                chrome_visible,
            } => {
                let mut events = vec![Event::DidTransition { to, from }];
                events.extend(chrome_visible.map(Event::ChromeVisibilityChanged));
                events
            }
            pager::Effect::ChromeVisibilityChanged(visible) => {
                vec![Event::ChromeVisibilityChanged(visible)]
            }
        }
    }

    fn controller_events(&mut self, effect: controller::Effect) -> Vec<Event> {
        let controller::Effect::Driver(effects) = effect else {
            return Vec::new();
        };
        effects
            .into_iter()
            .map(|effect| self.driver_event(effect))
            .collect()
    }

    fn driver_event(&mut self, effect: driver::Effect) -> Event {
        match effect {
            driver::Effect::WillDismissToOriginal {
                index,
                item,
                paused,
            } => Event::WillDismissToOriginal {
                index,
                item,
                paused,
            },
            driver::Effect::Completed {
                direction,
                index,
                position,
            } => {
                self.presentation.did_end(direction, position);
                if !self.presentation.is_presented() {
                    self.pager = None;
                }
                let completed = position == Position::End;
                match direction {
                    Direction::Presentation => Event::Presented { index, completed },
                    Direction::Dismissal => Event::Dismissed { index, completed },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{share, MediaItem, SharedItem, Snapshot};
    use crate::source::OriginView;
    use iced::Size;
    use std::time::Duration;

    struct Poster;

    impl MediaItem for Poster {
        fn content_size(&self) -> Size {
            Size::new(300.0, 600.0)
        }
    }

    struct Wall {
        count: usize,
    }

    impl PageSource for Wall {
        fn item_count(&self) -> usize {
            self.count
        }
        fn item(&self, _index: usize) -> SharedItem {
            share(Poster)
        }
        fn origin_view(&self, index: usize) -> Option<OriginView> {
            (index != 3).then(|| OriginView {
                frame: Rectangle::new(Point::new(20.0, 20.0), Size::new(60.0, 60.0)),
                snapshot: Snapshot::solid(6, 6, [0, 0, 0, 255]),
            })
        }
        fn content_insets(&self) -> Option<Padding> {
            Some(Padding {
                top: 20.0,
                right: 0.0,
                bottom: 0.0,
                left: 0.0,
            })
        }
    }

    fn bounds() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(400.0, 820.0))
    }

    fn settle(lightbox: &mut Lightbox, source: &Wall, start: Instant) -> Vec<Event> {
        let mut events = Vec::new();
        for step in 1..=100 {
            events.extend(
                lightbox
                    .handle(Message::Tick(start + Duration::from_millis(step * 10)), source)
                    .expect("tick"),
            );
        }
        events
    }

    #[test]
    fn present_mounts_pager_inside_insets() {
        let wall = Wall { count: 4 };
        let mut lightbox = Lightbox::new(bounds(), Tuning::default());
        let start = Instant::now();
        lightbox.handle(Message::Tick(start), &wall).expect("tick");
        lightbox
            .handle(Message::Present { index: 1 }, &wall)
            .expect("present");

        assert!(lightbox.is_presented());
        assert!(lightbox.is_intercepting());
        assert_eq!(lightbox.current_index(), Some(1));
        assert_eq!(
            lightbox.pager().map(pager::State::bounds),
            Some(Rectangle::new(Point::new(0.0, 20.0), Size::new(400.0, 800.0)))
        );

        let events = settle(&mut lightbox, &wall, start);
        assert!(matches!(
            events.as_slice(),
            [Event::Presented {
                index: 1,
                completed: true
            }]
        ));
        assert!(!lightbox.is_intercepting());
    }

    #[test]
    fn bad_present_leaves_lightbox_dismissed() {
        let wall = Wall { count: 4 };
        let mut lightbox = Lightbox::new(bounds(), Tuning::default());

        let err = lightbox.handle(Message::Present { index: 9 }, &wall);
        assert!(matches!(err, Err(Error::IndexOutOfRange { index: 9, count: 4 })));

        let err = lightbox.handle(Message::Present { index: 3 }, &wall);
        assert!(matches!(err, Err(Error::MissingOriginView(3))));
        assert!(!lightbox.is_presented());
    }

    #[test]
    fn dismiss_without_presentation_fails() {
        let wall = Wall { count: 4 };
        let mut lightbox = Lightbox::new(bounds(), Tuning::default());
        let err = lightbox.handle(Message::Dismiss, &wall);
        assert!(matches!(err, Err(Error::NoCurrentPage)));
    }

    #[test]
    fn taps_are_swallowed_while_transitioning() {
        let wall = Wall { count: 4 };
        let mut lightbox = Lightbox::new(bounds(), Tuning::default());
        lightbox
            .handle(Message::Present { index: 0 }, &wall)
            .expect("present");
        let events = lightbox.handle(Message::Tap, &wall).expect("tap");
        assert!(events.is_empty());
        assert!(lightbox.pager().is_some_and(pager::State::is_chrome_visible));
    }

    #[test]
    fn upward_pan_does_not_dismiss() {
        let wall = Wall { count: 4 };
        let mut lightbox = Lightbox::new(bounds(), Tuning::default());
        let start = Instant::now();
        lightbox.handle(Message::Tick(start), &wall).expect("tick");
        lightbox
            .handle(Message::Present { index: 0 }, &wall)
            .expect("present");
        settle(&mut lightbox, &wall, start);

        let up = PanSample {
            phase: PanPhase::Began,
            location: Point::new(200.0, 400.0),
            translation: Vector::new(0.0, -6.0),
            velocity: Vector::new(0.0, -400.0),
        };
        lightbox.handle(Message::Pan(up), &wall).expect("pan");
        assert!(lightbox.transition().is_none());
    }
}
