// SPDX-License-Identifier: MPL-2.0
//! Media abstraction consumed by the viewer.

pub mod item;

pub use item::{share, ControlsOverlay, MediaItem, SharedItem, Snapshot};
