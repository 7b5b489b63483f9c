// SPDX-License-Identifier: MPL-2.0
//! Boundary contracts between the viewer and the host application.
//!
//! The host implements [`PageSource`] and passes it by reference into each
//! call that needs content; the viewer never stores it. Lifecycle callbacks
//! travel the other way as [`Event`] values returned from `handle()`.

use crate::media::{SharedItem, Snapshot};
use iced::{Padding, Rectangle};
use std::fmt;

/// Thumbnail-side representation of a page.
#[derive(Debug, Clone)]
pub struct OriginView {
    /// Frame of the thumbnail in container coordinates.
    pub frame: Rectangle,
    /// Live rendering of the thumbnail.
    pub snapshot: Snapshot,
}

/// Content provider for the pager and transitions.
pub trait PageSource {
    /// Total number of pages.
    fn item_count(&self) -> usize;

    /// Fullscreen item for `index`.
    fn item(&self, index: usize) -> SharedItem;

    /// Thumbnail the transition animates from or to.
    fn origin_view(&self, index: usize) -> Option<OriginView>;

    /// Pre-rendered transition image. Falls back to the origin view snapshot.
    fn transition_image(&self, _index: usize) -> Option<Snapshot> {
        None
    }

    /// Edge insets applied to the fullscreen presentation frame.
    fn content_insets(&self) -> Option<Padding> {
        None
    }
}

/// Lifecycle notifications for the host.
#[derive(Clone)]
pub enum Event {
    /// A page is about to become visible.
    WillTransition(usize),
    /// Paging settled on a new page.
    DidTransition { to: usize, from: usize },
    /// A dismissal is finishing; the host can hand playback back to its own view.
    WillDismissToOriginal {
        index: usize,
        item: SharedItem,
        paused: bool,
    },
    /// Presentation finished (`completed`) or was cancelled.
    Presented { index: usize, completed: bool },
    /// Dismissal finished (`completed`) or was cancelled.
    Dismissed { index: usize, completed: bool },
    /// Chrome visibility changed; the status bar follows.
    ChromeVisibilityChanged(bool),
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::WillTransition(index) => f.debug_tuple("WillTransition").field(index).finish(),
            Event::DidTransition { to, from } => f
                .debug_struct("DidTransition")
                .field("to", to)
                .field("from", from)
                .finish(),
            Event::WillDismissToOriginal { index, paused, .. } => f
                .debug_struct("WillDismissToOriginal")
                .field("index", index)
                .field("paused", paused)
                .finish_non_exhaustive(),
            Event::Presented { index, completed } => f
                .debug_struct("Presented")
                .field("index", index)
                .field("completed", completed)
                .finish(),
            Event::Dismissed { index, completed } => f
                .debug_struct("Dismissed")
                .field("index", index)
                .field("completed", completed)
                .finish(),
            Event::ChromeVisibilityChanged(visible) => f
                .debug_tuple("ChromeVisibilityChanged")
                .field(visible)
                .finish(),
        }
    }
}
