// SPDX-License-Identifier: MPL-2.0
//! `iced_lightbox` presents media items fullscreen from their thumbnails.
//!
//! The host embeds a [`Lightbox`], implements [`PageSource`] for its content
//! and forwards input plus clock ticks. The lightbox pages horizontally
//! between items, zooms each one, and runs interactive spring transitions
//! between a thumbnail and its fullscreen frame.

#![doc(html_root_url = "https://docs.rs/iced_lightbox/0.1.0")]

pub mod config;
pub mod error;
pub mod geometry;
pub mod media;
pub mod source;
pub mod ui;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
pub use media::{MediaItem, SharedItem, Snapshot};
pub use source::{Event, OriginView, PageSource};
pub use ui::Lightbox;
