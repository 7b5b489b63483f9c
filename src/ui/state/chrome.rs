// SPDX-License-Identifier: MPL-2.0
//! Chrome (header, footer, controls overlay) visibility state.
//!
//! Chrome is either shown or hidden. Hiding remembers why it happened so that
//! zooming back out only restores chrome that zoom took away; chrome the user
//! hid with a tap stays hidden.

use crate::geometry::lerp;
use std::time::{Duration, Instant};

/// Visible state of the chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden(HideOrigin),
}

/// What hid the chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideOrigin {
    /// Explicit tap on the page area.
    Tap,
    /// Zooming a page above its minimum scale.
    Zoom,
}

/// Running alpha fade.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Fade {
    fn alpha_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        let t = (elapsed / self.duration.as_secs_f32().max(f32::EPSILON)).clamp(0.0, 1.0);
        lerp(self.from, self.to, t)
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// Chrome visibility state machine with its fade animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeState {
    visibility: Visibility,
    alpha: f32,
    fade: Option<Fade>,
    fade_duration: Duration,
}

impl ChromeState {
    #[must_use]
    pub fn new(fade_duration: Duration) -> Self {
        Self {
            visibility: Visibility::Shown,
            alpha: 1.0,
            fade: None,
            fade_duration,
        }
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    /// Current alpha of every view in the chrome fade group.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Whether a fade is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    /// Tap on the page area. Returns the new visibility flag.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_visible() {
            self.hide(HideOrigin::Tap, now);
        } else {
            self.show(now);
        }
        self.is_visible()
    }

    /// Zoom scale of the current page changed.
    ///
    /// Returns `Some(visible)` when the visibility changed.
    pub fn zoom_changed(&mut self, zoomed: bool, now: Instant) -> Option<bool> {
        match (self.visibility, zoomed) {
            (Visibility::Shown, true) => {
                self.hide(HideOrigin::Zoom, now);
                Some(false)
            }
            (Visibility::Hidden(HideOrigin::Zoom), false) => {
                self.show(now);
                Some(true)
            }
            _ => None,
        }
    }

    /// Advances the running fade.
    pub fn tick(&mut self, now: Instant) {
        if let Some(fade) = self.fade {
            self.alpha = fade.alpha_at(now);
            if fade.is_finished(now) {
                self.alpha = fade.to;
                self.fade = None;
            }
        }
    }

    fn show(&mut self, now: Instant) {
        self.visibility = Visibility::Shown;
        // Always fade in from fully transparent.
        self.alpha = 0.0;
        self.fade = Some(Fade {
            from: 0.0,
            to: 1.0,
            started: now,
            duration: self.fade_duration,
        });
    }

    fn hide(&mut self, origin: HideOrigin, now: Instant) {
        self.visibility = Visibility::Hidden(origin);
        self.fade = Some(Fade {
            from: self.alpha,
            to: 0.0,
            started: now,
            duration: self.fade_duration,
        });
    }
}
