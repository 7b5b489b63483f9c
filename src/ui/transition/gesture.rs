// SPDX-License-Identifier: MPL-2.0
//! Pan gesture state shared by every transition of a viewer.
//!
//! One recognizer lives as long as the viewer. Each new transition driver
//! re-targets it, which rebases the translation so deltas start at zero.

use iced::{Point, Vector};

/// Phase of a pan gesture sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One pan gesture event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSample {
    pub phase: PanPhase,
    /// Finger location in container coordinates.
    pub location: Point,
    /// Translation since the gesture began.
    pub translation: Vector,
    /// Velocity in points per second.
    pub velocity: Vector,
}

/// Long-lived pan recognizer state.
#[derive(Debug, Clone, PartialEq)]
pub struct PanGesture {
    phase: Option<PanPhase>,
    location: Point,
    translation: Vector,
    /// Translation already handed out as deltas.
    consumed: Vector,
    velocity: Vector,
}

impl Default for PanGesture {
    fn default() -> Self {
        Self {
            phase: None,
            location: Point::ORIGIN,
            translation: Vector::new(0.0, 0.0),
            consumed: Vector::new(0.0, 0.0),
            velocity: Vector::new(0.0, 0.0),
        }
    }
}

impl PanGesture {
    /// Records a sample and returns the translation delta since the last one.
    pub fn update(&mut self, sample: PanSample) -> Vector {
        if sample.phase == PanPhase::Began {
            self.consumed = Vector::new(0.0, 0.0);
        }
        self.phase = Some(sample.phase);
        self.location = sample.location;
        self.translation = sample.translation;
        self.velocity = sample.velocity;

        let delta = self.translation - self.consumed;
        self.consumed = self.translation;
        delta
    }

    /// Rebases the translation for a new driver.
    pub fn retarget(&mut self) {
        self.consumed = self.translation;
    }

    /// Whether a touch sequence is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Some(PanPhase::Began | PanPhase::Changed))
    }

    #[must_use]
    pub fn phase(&self) -> Option<PanPhase> {
        self.phase
    }

    #[must_use]
    pub fn location(&self) -> Point {
        self.location
    }

    #[must_use]
    pub fn translation(&self) -> Vector {
        self.translation
    }

    #[must_use]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }
}

/// Whether a drag is predominantly vertical and heading down.
///
/// Velocity decides when the host reports one; otherwise the translation does.
#[must_use]
pub fn is_downward_drag(sample: &PanSample) -> bool {
    let motion = if sample.velocity.x == 0.0 && sample.velocity.y == 0.0 {
        sample.translation
    } else {
        sample.velocity
    };
    motion.y > 0.0 && motion.y.abs() > motion.x.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(phase: PanPhase, translation: (f32, f32), velocity: (f32, f32)) -> PanSample {
        PanSample {
            phase,
            location: Point::new(200.0, 400.0 + translation.1),
            translation: Vector::new(translation.0, translation.1),
            velocity: Vector::new(velocity.0, velocity.1),
        }
    }

    #[test]
    fn update_returns_incremental_deltas() {
        let mut gesture = PanGesture::default();
        let d = gesture.update(sample(PanPhase::Began, (0.0, 10.0), (0.0, 0.0)));
        assert_eq!(d, Vector::new(0.0, 10.0));
        let d = gesture.update(sample(PanPhase::Changed, (2.0, 25.0), (0.0, 0.0)));
        assert_eq!(d, Vector::new(2.0, 15.0));
        assert!(gesture.is_active());

        gesture.update(sample(PanPhase::Ended, (2.0, 25.0), (0.0, 300.0)));
        assert!(!gesture.is_active());
        assert_eq!(gesture.velocity(), Vector::new(0.0, 300.0));
    }

    #[test]
    fn retarget_rebases_translation() {
        let mut gesture = PanGesture::default();
        gesture.update(sample(PanPhase::Began, (0.0, 40.0), (0.0, 0.0)));
        gesture.retarget();
        let d = gesture.update(sample(PanPhase::Changed, (0.0, 45.0), (0.0, 0.0)));
        assert_eq!(d, Vector::new(0.0, 5.0));
    }

    #[test]
    fn downward_drag_policy() {
        assert!(is_downward_drag(&sample(PanPhase::Began, (0.0, 0.0), (10.0, 200.0))));
        assert!(!is_downward_drag(&sample(PanPhase::Began, (0.0, 0.0), (10.0, -200.0))));
        assert!(!is_downward_drag(&sample(PanPhase::Began, (0.0, 0.0), (300.0, 200.0))));
        assert!(is_downward_drag(&sample(PanPhase::Began, (1.0, 8.0), (0.0, 0.0))));
    }
}
