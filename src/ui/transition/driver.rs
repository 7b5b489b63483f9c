// SPDX-License-Identifier: MPL-2.0
//! Transition driver: runs one presentation or dismissal.
//!
//! The driver moves a floating proxy between the page's origin view (the
//! thumbnail) and its fullscreen frame. It has three animation channels:
//!
//! - **root**: backdrop cross-fade; owns the completion report
//! - **chrome**: header/footer snapshot fade, 6× faster, delayed during presentation
//! - **frame**: the floating proxy's frame
//!
//! ```text
//! Tracking ──GestureEnded──▶ Finalizing(pos) ──root settles──▶ Complete(pos)
//!     ▲                           │
//!     └──────GestureBegan─────────┘   (interactive transitions only)
//! ```

use super::animator::{Animator, Position, SpringTiming};
use super::gesture::PanGesture;
use super::item::{ChromeKind, ChromeProxy, ProxyContent, TransitionItem};
use crate::config::{
    Tuning, CHROME_PRESENTATION_DELAY, CHROME_PROGRESS_RATE, COMPLETION_THRESHOLD,
    FLICK_VELOCITY, MAX_FRACTION_COMPLETE, MIN_FRACTION_COMPLETE,
};
use crate::error::{Error, Result};
use crate::geometry::aspect_fit;
use crate::media::SharedItem;
use crate::source::PageSource;
use crate::ui::{page, pager};
use iced::{Point, Rectangle, Vector};
use std::time::{Duration, Instant};

/// Which way the viewer is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Thumbnail to fullscreen.
    Presentation,
    /// Fullscreen to thumbnail.
    Dismissal,
}

impl Direction {
    /// Sign turning a downward drag into progress.
    #[must_use]
    pub fn progress_sign(self) -> f32 {
        match self {
            Direction::Presentation => -1.0,
            Direction::Dismissal => 1.0,
        }
    }
}

/// Environment of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionContext {
    /// Bounds of the container the proxies are drawn in.
    pub container: Rectangle,
    /// Frame of the presented content (container minus host insets).
    pub content: Rectangle,
    /// Whether a gesture drives this transition.
    pub interactive: bool,
}

/// Driver life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Following the gesture.
    Tracking,
    /// Springing to a terminal position.
    Finalizing(Position),
    /// Finished at a terminal position.
    Complete(Position),
}

/// Messages for the driver.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// The gesture grabbed the proxy again while it was animating.
    GestureBegan { location: Point },
    /// The gesture moved by `delta`.
    GestureChanged { location: Point, delta: Vector },
    /// The gesture lifted with `velocity` (points per second).
    GestureEnded { velocity: Vector },
    /// Animation clock tick.
    Tick(Instant),
}

/// Effects produced by the driver.
#[derive(Clone)]
pub enum Effect {
    /// The dismissal will finish; the host can take playback over.
    WillDismissToOriginal {
        index: usize,
        item: SharedItem,
        paused: bool,
    },
    /// The transition finished at `position`. Reported exactly once.
    Completed {
        direction: Direction,
        index: usize,
        position: Position,
    },
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::WillDismissToOriginal { index, paused, .. } => f
                .debug_struct("WillDismissToOriginal")
                .field("index", index)
                .field("paused", paused)
                .finish_non_exhaustive(),
            Effect::Completed {
                direction,
                index,
                position,
            } => f
                .debug_struct("Completed")
                .field("direction", direction)
                .field("index", index)
                .field("position", position)
                .finish(),
        }
    }
}

/// Decides where a released gesture sends the transition.
///
/// A flick (vertical speed of at least [`FLICK_VELOCITY`]) wins; otherwise the
/// fraction is compared against [`COMPLETION_THRESHOLD`].
#[must_use]
pub fn completion_position(direction: Direction, fraction: f32, velocity_y: f32) -> Position {
    let completing = direction.progress_sign() * velocity_y;
    if completing >= FLICK_VELOCITY {
        Position::End
    } else if completing <= -FLICK_VELOCITY {
        Position::Start
    } else if fraction > COMPLETION_THRESHOLD {
        Position::End
    } else {
        Position::Start
    }
}

/// Chrome fade fraction for a root fraction while scrubbing.
#[must_use]
pub fn chrome_fraction(direction: Direction, fraction: f32) -> f32 {
    let shifted = match direction {
        Direction::Presentation => fraction - CHROME_PRESENTATION_DELAY,
        Direction::Dismissal => fraction,
    };
    (shifted * CHROME_PROGRESS_RATE).clamp(0.0, 1.0)
}

/// Runs one transition.
pub struct Driver {
    direction: Direction,
    index: usize,
    context: TransitionContext,
    tuning: Tuning,
    phase: Phase,
    item: Option<TransitionItem>,
    /// Live item taken from the page during a dismissal.
    detached: Option<SharedItem>,
    fraction: f32,
    root: Animator,
    chrome: Animator,
    frame: Animator,
    backdrop_alpha: f32,
    interceptor: Option<Rectangle>,
    touch_seeded: bool,
    completion_reported: bool,
    /// Time of the latest tick; gesture events start springs from here.
    clock: Instant,
}

impl Driver {
    /// Sets up a transition on the pager's current page.
    ///
    /// Every proxy is in place when this returns. A non-interactive
    /// transition (or one whose gesture is not in progress) is already
    /// springing to its end.
    pub fn new(
        direction: Direction,
        context: TransitionContext,
        gesture: &PanGesture,
        pager: &mut pager::State,
        source: &dyn PageSource,
        now: Instant,
    ) -> Result<Self> {
        let tuning = *pager.tuning();
        let page = pager.current_page_mut().ok_or(Error::NoCurrentPage)?;
        let index = page.index();

        let origin = source
            .origin_view(index)
            .ok_or(Error::MissingOriginView(index))?;

        let (item, detached) = match direction {
            Direction::Presentation => {
                let image = source.transition_image(index).unwrap_or_else(|| {
                    tracing::debug!(index, "no transition image, using origin snapshot");
                    origin.snapshot.clone()
                });
                let target = aspect_fit(image.size(), context.content);
                (
                    TransitionItem::new(origin.frame, target, ProxyContent::Image(image)),
                    None,
                )
            }
            Direction::Dismissal => {
                let initial = aspect_fit(page.content_size(), page.bounds());
                let live = page.detach();
                (
                    TransitionItem::new(initial, origin.frame, ProxyContent::Live(live.clone())),
                    Some(live),
                )
            }
        };

        let mut driver = Self {
            direction,
            index,
            context,
            tuning,
            phase: Phase::Tracking,
            item: Some(item),
            detached,
            fraction: 0.0,
            root: Animator::new(0.0, 1.0),
            chrome: Animator::new(0.0, CHROME_PROGRESS_RATE),
            frame: Animator::new(0.0, 1.0),
            backdrop_alpha: 0.0,
            interceptor: Some(context.container),
            touch_seeded: false,
            completion_reported: false,
            clock: now,
        };

        let chrome_frames = [
            (ChromeKind::Header, pager.header().frame),
            (ChromeKind::Footer, pager.footer().frame),
        ];
        if let Some(item) = driver.item.as_mut() {
            for (kind, frame) in chrome_frames {
                item.add_chrome_proxy(ChromeProxy {
                    kind,
                    frame,
                    alpha: 0.0,
                });
            }
        }
        pager.set_live_chrome_hidden(true);
        pager.set_content_alpha(0.0);
        pager.set_locked(true);
        driver.apply(0.0, chrome_fraction(direction, 0.0), 0.0);

        tracing::debug!(?direction, index, interactive = context.interactive, "transition set up");

        if context.interactive && gesture.is_active() {
            driver.seed_touch(gesture.location());
        } else {
            driver.finalize(Position::End, 0.0, now);
        }

        Ok(driver)
    }

    /// Handle a driver message.
    pub fn handle(&mut self, msg: Message, pager: &mut pager::State) -> Vec<Effect> {
        match msg {
            Message::GestureBegan { location } => {
                if !self.context.interactive {
                    return Vec::new();
                }
                if let Phase::Finalizing(_) = self.phase {
                    let now = self.clock;
                    self.fraction = self.frame.pause(now);
                    self.root.pause(now);
                    self.chrome.pause(now);
                    if let Some(item) = self.item.as_mut() {
                        item.regrab();
                    }
                    self.phase = Phase::Tracking;
                    tracing::trace!(fraction = self.fraction, "transition grabbed mid-flight");
                }
                if self.phase == Phase::Tracking && !self.touch_seeded {
                    self.seed_touch(location);
                }
                Vec::new()
            }
            Message::GestureChanged { delta, .. } => {
                if self.phase != Phase::Tracking {
                    return Vec::new();
                }
                let half_height = (self.context.container.height / 2.0).max(1.0);
                let step = self.direction.progress_sign() * delta.y / half_height;
                self.fraction =
                    (self.fraction + step).clamp(MIN_FRACTION_COMPLETE, MAX_FRACTION_COMPLETE);
                self.root.scrub(self.fraction);
                self.chrome
                    .scrub(chrome_fraction(self.direction, self.fraction));
                self.frame.scrub(self.fraction);
                self.apply(
                    self.root.fraction(),
                    self.chrome.fraction(),
                    self.frame.fraction(),
                );
                Vec::new()
            }
            Message::GestureEnded { velocity } => {
                if self.phase != Phase::Tracking {
                    return Vec::new();
                }
                let position = completion_position(self.direction, self.fraction, velocity.y);
                let half_height = (self.context.container.height / 2.0).max(1.0);
                let progress_velocity = self.direction.progress_sign() * velocity.y / half_height;
                let now = self.clock;
                self.finalize(position, progress_velocity, now);
                Vec::new()
            }
            Message::Tick(now) => {
                self.clock = now;
                let Phase::Finalizing(position) = self.phase else {
                    return Vec::new();
                };
                let root_done = self.root.tick(now);
                self.chrome.tick(now);
                self.frame.tick(now);
                self.apply(
                    self.root.fraction(),
                    self.chrome.fraction(),
                    self.frame.fraction(),
                );
                match root_done {
                    Some(reached) => {
                        debug_assert_eq!(reached, position);
                        self.complete(position, pager)
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Index of the page this transition runs on.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.context.interactive
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Complete(_))
    }

    /// Fractional completion of the floating proxy.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.frame.fraction()
    }

    /// Proxies to draw, until completion.
    #[must_use]
    pub fn item(&self) -> Option<&TransitionItem> {
        self.item.as_ref()
    }

    /// Alpha of the fullscreen backdrop.
    #[must_use]
    pub fn backdrop_alpha(&self) -> f32 {
        self.backdrop_alpha
    }

    /// Area swallowing taps while the transition runs.
    #[must_use]
    pub fn interceptor(&self) -> Option<Rectangle> {
        self.interceptor
    }

    fn seed_touch(&mut self, location: Point) {
        if let Some(item) = self.item.as_mut() {
            item.seed_touch(location);
            self.touch_seeded = true;
        }
    }

    fn timing(&self) -> SpringTiming {
        SpringTiming {
            damping_ratio: self.tuning.spring_damping,
            duration: self.tuning.transition_duration,
        }
    }

    fn finalize(&mut self, position: Position, velocity: f32, now: Instant) {
        self.phase = Phase::Finalizing(position);
        tracing::debug!(
            direction = ?self.direction,
            ?position,
            fraction = self.fraction,
            "finalizing transition"
        );

        if self.direction == Direction::Dismissal && position == Position::End {
            self.freeze_animated_item();
        }
        let released_at = self.frame.fraction();
        if let Some(item) = self.item.as_mut() {
            item.release(released_at, position.fraction());
        }

        let timing = self.timing();
        let delay = if self.direction == Direction::Presentation && position == Position::End {
            timing.duration.mul_f32(CHROME_PRESENTATION_DELAY)
        } else {
            Duration::ZERO
        };

        self.root
            .animate_to(position, timing, velocity, Duration::ZERO, now);
        self.frame
            .animate_to(position, timing, velocity, Duration::ZERO, now);
        self.chrome.animate_to(
            position,
            timing,
            velocity * CHROME_PROGRESS_RATE,
            delay,
            now,
        );
    }

    /// Replaces a live animated item with a still frame.
    fn freeze_animated_item(&mut self) {
        let Some(live) = self.detached.as_ref() else {
            return;
        };
        let snapshot = {
            let live = live.borrow();
            if !live.is_animated() {
                return;
            }
            live.animated_snapshot()
        };
        if let (Some(snapshot), Some(item)) = (snapshot, self.item.as_mut()) {
            item.replace_content(ProxyContent::Image(snapshot));
        }
    }

    fn apply(&mut self, root: f32, chrome: f32, frame: f32) {
        let (backdrop, chrome_alpha) = match self.direction {
            Direction::Presentation => (root, chrome),
            Direction::Dismissal => (1.0 - root, 1.0 - chrome),
        };
        self.backdrop_alpha = backdrop.clamp(0.0, 1.0);
        if let Some(item) = self.item.as_mut() {
            item.set_fraction(frame);
            item.set_chrome_alpha(chrome_alpha.clamp(0.0, 1.0));
        }
    }

    fn complete(&mut self, position: Position, pager: &mut pager::State) -> Vec<Effect> {
        if self.completion_reported {
            tracing::debug!("duplicate transition completion ignored");
            return Vec::new();
        }
        self.completion_reported = true;
        debug_assert_eq!(pager.current_index(), self.index);

        let mut effects = Vec::new();
        match (self.direction, position) {
            (Direction::Dismissal, Position::End) => {
                if let Some(item) = self.detached.take() {
                    let paused = item.borrow().is_paused();
                    effects.push(Effect::WillDismissToOriginal {
                        index: self.index,
                        item,
                        paused,
                    });
                }
            }
            (Direction::Dismissal, Position::Start) => {
                self.detached = None;
                if let Some(page) = pager.current_page_mut() {
                    page.handle(page::Message::Attach { initial: false });
                }
            }
            (Direction::Presentation, _) => {}
        }

        self.item = None;
        self.interceptor = None;
        pager.set_content_alpha(1.0);
        pager.set_live_chrome_hidden(false);
        pager.set_locked(false);
        self.phase = Phase::Complete(position);

        tracing::debug!(direction = ?self.direction, index = self.index, ?position, "transition complete");

        effects.push(Effect::Completed {
            direction: self.direction,
            index: self.index,
            position,
        });
        effects
    }
}
