// SPDX-License-Identifier: MPL-2.0
//! Viewer components and their state.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! owns a `State`, takes a `Message` and reports an `Effect` to its parent.
//!
//! - [`lightbox`] - Composition root a host embeds
//! - [`pager`] - Swipeable page sequence and chrome
//! - [`page`] - One zoomable media item
//! - [`transition`] - Thumbnail-to-fullscreen transitions
//! - [`state`] - Plain state shared by the components (zoom, viewport, chrome)

pub mod lightbox;
pub mod page;
pub mod pager;
pub mod state;
pub mod transition;

pub use lightbox::{Lightbox, Message};
