// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Plain state shared by the page, pager and transition components, kept
//! apart from their message handling.

pub mod chrome;
pub mod viewport;
pub mod zoom;

// Re-export commonly used types for convenience
pub use chrome::{ChromeState, HideOrigin, Visibility};
pub use viewport::ScrollViewport;
pub use zoom::{ZoomBounds, ZoomState};
