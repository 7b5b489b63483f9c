// SPDX-License-Identifier: MPL-2.0
//! Presentation bookkeeping: where the viewer sits and which views stay mounted.

use super::animator::Position;
use super::driver::Direction;
use crate::geometry::inset;
use iced::{Padding, Rectangle};

/// Tracks the presented view over the container the host gives it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationController {
    insets: Padding,
    presented: bool,
}

impl PresentationController {
    #[must_use]
    pub fn new(insets: Padding) -> Self {
        Self {
            insets,
            presented: false,
        }
    }

    /// Frame of the presented viewer inside `container`, minus host insets.
    #[must_use]
    pub fn frame_of_presented_view(&self, container: Rectangle) -> Rectangle {
        inset(container, self.insets)
    }

    pub fn set_insets(&mut self, insets: Padding) {
        self.insets = insets;
    }

    #[must_use]
    pub fn insets(&self) -> Padding {
        self.insets
    }

    /// The presenting view stays mounted underneath while the viewer is up.
    #[must_use]
    pub fn removes_presenter_view(&self) -> bool {
        false
    }

    /// Whether the viewer's view is mounted in the container.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.presented
    }

    /// Mounts the viewer before a presentation starts animating.
    pub fn will_begin(&mut self, direction: Direction) {
        if direction == Direction::Presentation {
            self.presented = true;
        }
    }

    /// Updates mounting once a transition has settled.
    ///
    /// The viewer is unmounted when a dismissal finishes or a presentation is
    /// cancelled.
    pub fn did_end(&mut self, direction: Direction, position: Position) {
        self.presented = match (direction, position) {
            (Direction::Presentation, position) => position == Position::End,
            (Direction::Dismissal, position) => position == Position::Start,
        };
    }
}

impl Default for PresentationController {
    fn default() -> Self {
        Self::new(Padding::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{Point, Size};

    fn container() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(400.0, 800.0))
    }

    #[test]
    fn presented_frame_honours_insets() {
        let controller = PresentationController::new(Padding {
            top: 44.0,
            right: 0.0,
            bottom: 34.0,
            left: 0.0,
        });
        let frame = controller.frame_of_presented_view(container());
        assert_eq!(frame, Rectangle::new(Point::new(0.0, 44.0), Size::new(400.0, 722.0)));
        assert!(!controller.removes_presenter_view());
    }

    #[test]
    fn mounting_follows_transition_outcome() {
        let mut controller = PresentationController::default();
        controller.will_begin(Direction::Presentation);
        assert!(controller.is_presented());
        controller.did_end(Direction::Presentation, Position::End);
        assert!(controller.is_presented());

        controller.will_begin(Direction::Dismissal);
        controller.did_end(Direction::Dismissal, Position::Start);
        assert!(controller.is_presented());

        controller.did_end(Direction::Dismissal, Position::End);
        assert!(!controller.is_presented());
    }

    #[test]
    fn cancelled_presentation_unmounts() {
        let mut controller = PresentationController::default();
        controller.will_begin(Direction::Presentation);
        controller.did_end(Direction::Presentation, Position::Start);
        assert!(!controller.is_presented());
    }
}
