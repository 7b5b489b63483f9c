// SPDX-License-Identifier: MPL-2.0
//! Spring-timed, scrubbable animators.
//!
//! An [`Animator`] holds a fractional completion that is either set directly
//! (interactive scrubbing) or driven by a damped spring towards one of its two
//! ends. Time only enters through `tick()`, so a run is fully deterministic.

use std::time::{Duration, Instant};

/// Terminal position of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The pre-transition state.
    Start,
    /// The transition's end state.
    End,
}

impl Position {
    /// Fractional completion of this position.
    #[must_use]
    pub fn fraction(self) -> f32 {
        match self {
            Position::Start => 0.0,
            Position::End => 1.0,
        }
    }
}

/// Damped spring timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringTiming {
    /// Damping ratio in `(0, 1]`.
    pub damping_ratio: f32,
    /// Time for the spring to settle within 0.1% of its target.
    pub duration: Duration,
}

impl SpringTiming {
    /// Normalized displacement (0 → 1) at `t` seconds for an initial velocity
    /// of `velocity` (normalized units per second).
    #[must_use]
    pub fn progress(&self, t: f32, velocity: f32) -> f32 {
        let duration = self.duration.as_secs_f32();
        if t >= duration || duration <= 0.0 {
            return 1.0;
        }
        if t <= 0.0 {
            return 0.0;
        }

        let zeta = self.damping_ratio.clamp(f32::EPSILON, 1.0);
        // Envelope decays to 1/1000 at `duration`.
        let omega = 1000f32.ln() / (zeta * duration);
        let decay = (-zeta * omega * t).exp();

        if zeta >= 1.0 {
            1.0 - decay * (1.0 + (omega - velocity) * t)
        } else {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let sine = (zeta * omega - velocity) / damped;
            1.0 - decay * ((damped * t).cos() + sine * (damped * t).sin())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    from: f32,
    to: Position,
    started: Instant,
    timing: SpringTiming,
    /// Normalized initial velocity.
    velocity: f32,
    delay: Duration,
}

/// One independently timed animation channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    fraction: f32,
    run: Option<Run>,
    /// Time multiplier applied to spring runs.
    speed: f32,
}

impl Animator {
    #[must_use]
    pub fn new(fraction: f32, speed: f32) -> Self {
        Self {
            fraction,
            run: None,
            speed: speed.max(f32::EPSILON),
        }
    }

    /// Current fractional completion.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    #[must_use]
    pub fn target(&self) -> Option<Position> {
        self.run.map(|run| run.to)
    }

    /// Sets the fraction directly, stopping any spring run.
    pub fn scrub(&mut self, fraction: f32) {
        self.run = None;
        self.fraction = fraction;
    }

    /// Freezes the animator at its value for `now` and returns it.
    pub fn pause(&mut self, now: Instant) -> f32 {
        self.tick(now);
        self.run = None;
        self.fraction
    }

    /// Springs from the current fraction to `to`.
    ///
    /// `velocity` is in fraction units per second; `delay` postpones the start.
    pub fn animate_to(
        &mut self,
        to: Position,
        timing: SpringTiming,
        velocity: f32,
        delay: Duration,
        now: Instant,
    ) {
        let distance = to.fraction() - self.fraction;
        let velocity = if distance.abs() > f32::EPSILON {
            velocity / distance
        } else {
            0.0
        };
        self.run = Some(Run {
            from: self.fraction,
            to,
            started: now,
            timing,
            velocity,
            delay,
        });
    }

    /// Advances the run. Returns the reached position once, when it settles.
    pub fn tick(&mut self, now: Instant) -> Option<Position> {
        let run = self.run?;
        let elapsed = now
            .saturating_duration_since(run.started)
            .saturating_sub(run.delay)
            .as_secs_f32()
            * self.speed;

        if elapsed >= run.timing.duration.as_secs_f32() {
            self.fraction = run.to.fraction();
            self.run = None;
            return Some(run.to);
        }

        let progress = run.timing.progress(elapsed, run.velocity);
        self.fraction = run.from + (run.to.fraction() - run.from) * progress;
        None
    }
}
