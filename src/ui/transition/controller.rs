// SPDX-License-Identifier: MPL-2.0
//! Transition controller: owns the long-lived pan gesture and the active driver.
//!
//! The controller decides whether a pan may start (a downward drag when idle,
//! any drag while an interactive driver runs) and routes gesture phases either
//! to the driver or, when idle, into a dismissal request for the host.

use super::driver::{self, Direction, Driver, TransitionContext};
use super::gesture::{is_downward_drag, PanGesture, PanPhase, PanSample};
use crate::error::{Error, Result};
use crate::source::PageSource;
use crate::ui::pager;
use crate::ui::state::ScrollViewport;
use iced::Rectangle;
use std::time::Instant;

/// Effects produced by the controller.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// A pan started with no transition running; the host should dismiss.
    DismissRequested,
    /// The active driver produced effects.
    Driver(Vec<driver::Effect>),
}

/// Long-lived owner of the transition machinery.
#[derive(Default)]
pub struct Controller {
    gesture: PanGesture,
    driver: Option<Driver>,
    /// The pending transition was requested by the pan gesture.
    gesture_initiated: bool,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pan may run alongside the page's own scrolling.
    #[must_use]
    pub fn should_recognize_simultaneously(viewport: &ScrollViewport) -> bool {
        viewport.is_at_top()
    }

    /// Whether a pan that is about to begin should be accepted.
    #[must_use]
    pub fn should_begin(&self, sample: &PanSample) -> bool {
        match &self.driver {
            None => is_downward_drag(sample),
            Some(driver) => driver.is_interactive(),
        }
    }

    /// Routes one pan sample.
    pub fn pan(&mut self, sample: PanSample, pager: &mut pager::State) -> Effect {
        let delta = self.gesture.update(sample);
        match sample.phase {
            PanPhase::Began => match self.driver.as_mut() {
                None => {
                    self.gesture_initiated = true;
                    tracing::debug!("pan began while idle, requesting dismissal");
                    Effect::DismissRequested
                }
                Some(driver) => Effect::Driver(driver.handle(
                    driver::Message::GestureBegan {
                        location: sample.location,
                    },
                    pager,
                )),
            },
            PanPhase::Changed => self.forward(
                driver::Message::GestureChanged {
                    location: sample.location,
                    delta,
                },
                pager,
            ),
            PanPhase::Ended | PanPhase::Cancelled => {
                self.gesture_initiated = false;
                self.forward(
                    driver::Message::GestureEnded {
                        velocity: sample.velocity,
                    },
                    pager,
                )
            }
        }
    }

    /// Starts a transition on the pager's current page.
    ///
    /// The transition is interactive when the pan gesture requested it and is
    /// still in progress.
    pub fn begin(
        &mut self,
        direction: Direction,
        container: Rectangle,
        content: Rectangle,
        pager: &mut pager::State,
        source: &dyn PageSource,
        now: Instant,
    ) -> Result<()> {
        if self.driver.is_some() {
            return Err(Error::TransitionInProgress);
        }
        let interactive = self.interaction_for(direction).is_some();
        self.gesture.retarget();
        let context = TransitionContext {
            container,
            content,
            interactive,
        };
        let driver = Driver::new(direction, context, &self.gesture, pager, source, now);
        self.gesture_initiated = false;
        self.driver = Some(driver?);
        Ok(())
    }

    /// The gesture that would drive a `direction` transition, if any.
    ///
    /// Only a dismissal requested by a pan that is still down is interactive.
    #[must_use]
    pub fn interaction_for(&self, direction: Direction) -> Option<&PanGesture> {
        (direction == Direction::Dismissal && self.gesture_initiated && self.gesture.is_active())
            .then_some(&self.gesture)
    }

    /// Whether the running (or next) transition is gesture driven.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        match &self.driver {
            Some(driver) => driver.is_interactive(),
            None => self.interaction_for(Direction::Dismissal).is_some(),
        }
    }

    /// Advances the running driver. The driver is dropped once it completes.
    pub fn tick(&mut self, now: Instant, pager: &mut pager::State) -> Effect {
        let effect = self.forward(driver::Message::Tick(now), pager);
        if self.driver.as_ref().is_some_and(Driver::is_complete) {
            self.driver = None;
        }
        effect
    }

    #[must_use]
    pub fn driver(&self) -> Option<&Driver> {
        self.driver.as_ref()
    }

    #[must_use]
    pub fn gesture(&self) -> &PanGesture {
        &self.gesture
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.driver.is_some()
    }

    fn forward(&mut self, msg: driver::Message, pager: &mut pager::State) -> Effect {
        match self.driver.as_mut() {
            Some(driver) => {
                let effects = driver.handle(msg, pager);
                if effects.is_empty() {
                    Effect::None
                } else {
                    Effect::Driver(effects)
                }
            }
            None => Effect::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::media::{share, MediaItem, SharedItem, Snapshot};
    use crate::source::OriginView;
    use crate::ui::transition::animator::Position;
    use iced::{Point, Size, Vector};
    use std::time::Duration;

    struct Still;

    impl MediaItem for Still {
        fn content_size(&self) -> Size {
            Size::new(400.0, 300.0)
        }
    }

    struct Roll;

    impl PageSource for Roll {
        fn item_count(&self) -> usize {
            3
        }
        fn item(&self, _index: usize) -> SharedItem {
            share(Still)
        }
        fn origin_view(&self, _index: usize) -> Option<OriginView> {
            Some(OriginView {
                frame: Rectangle::new(Point::new(10.0, 10.0), Size::new(40.0, 30.0)),
                snapshot: Snapshot::solid(4, 3, [0, 0, 0, 255]),
            })
        }
    }

    fn bounds() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(400.0, 800.0))
    }

    fn pager() -> pager::State {
        pager::State::new(1, &Roll, bounds(), Tuning::default()).expect("valid index")
    }

    fn sample(phase: PanPhase, dy: f32, vy: f32) -> PanSample {
        PanSample {
            phase,
            location: Point::new(200.0, 400.0 + dy),
            translation: Vector::new(0.0, dy),
            velocity: Vector::new(0.0, vy),
        }
    }

    fn finish(
        controller: &mut Controller,
        pager: &mut pager::State,
        start: Instant,
    ) -> Vec<driver::Effect> {
        let mut effects = Vec::new();
        for step in 1..=100 {
            if let Effect::Driver(batch) =
                controller.tick(start + Duration::from_millis(step * 10), pager)
            {
                effects.extend(batch);
            }
        }
        effects
    }

    #[test]
    fn idle_controller_accepts_only_downward_drags() {
        let controller = Controller::new();
        assert!(controller.should_begin(&sample(PanPhase::Began, 5.0, 300.0)));
        assert!(!controller.should_begin(&sample(PanPhase::Began, -5.0, -300.0)));
    }

    #[test]
    fn simultaneous_recognition_requires_top_of_scroll() {
        let mut viewport = ScrollViewport::new(bounds(), Size::new(400.0, 1600.0));
        assert!(Controller::should_recognize_simultaneously(&viewport));
        viewport.scroll_to(Vector::new(0.0, 120.0));
        assert!(!Controller::should_recognize_simultaneously(&viewport));
    }

    #[test]
    fn pan_from_idle_requests_interactive_dismissal() {
        let mut controller = Controller::new();
        let mut pager = pager();
        let start = Instant::now();

        let effect = controller.pan(sample(PanPhase::Began, 4.0, 200.0), &mut pager);
        assert!(matches!(effect, Effect::DismissRequested));
        assert!(controller.is_interactive());
        assert!(controller.interaction_for(Direction::Presentation).is_none());

        controller
            .begin(Direction::Dismissal, bounds(), bounds(), &mut pager, &Roll, start)
            .expect("begin");
        assert!(controller.driver().is_some_and(Driver::is_interactive));

        // Translation already seen before the driver existed is not replayed.
        controller.pan(sample(PanPhase::Changed, 104.0, 200.0), &mut pager);
        let fraction = controller.driver().map_or(0.0, Driver::fraction);
        assert!((fraction - 0.25).abs() < 1e-4, "{fraction}");

        controller.pan(sample(PanPhase::Ended, 104.0, 200.0), &mut pager);
        let effects = finish(&mut controller, &mut pager, start);
        assert!(matches!(
            effects.last(),
            Some(driver::Effect::Completed {
                position: Position::End,
                ..
            })
        ));
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn programmatic_begin_is_not_interactive() {
        let mut controller = Controller::new();
        let mut pager = pager();
        controller
            .begin(
                Direction::Presentation,
                bounds(),
                bounds(),
                &mut pager,
                &Roll,
                Instant::now(),
            )
            .expect("begin");
        assert!(!controller.is_interactive());
        assert!(!controller.should_begin(&sample(PanPhase::Began, 5.0, 300.0)));
    }

    #[test]
    fn second_begin_is_rejected() {
        let mut controller = Controller::new();
        let mut pager = pager();
        let now = Instant::now();
        controller
            .begin(Direction::Presentation, bounds(), bounds(), &mut pager, &Roll, now)
            .expect("begin");
        let second =
            controller.begin(Direction::Dismissal, bounds(), bounds(), &mut pager, &Roll, now);
        assert!(matches!(second, Err(Error::TransitionInProgress)));
    }

    #[test]
    fn released_gesture_before_begin_falls_back_to_programmatic() {
        let mut controller = Controller::new();
        let mut pager = pager();
        controller.pan(sample(PanPhase::Began, 4.0, 200.0), &mut pager);
        controller.pan(sample(PanPhase::Ended, 4.0, 0.0), &mut pager);
        assert!(!controller.is_interactive());
    }
}
