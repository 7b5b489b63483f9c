// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Page zoom bounds and double-tap targets
//! - **Chrome**: Header/footer fade timing
//! - **Transition**: Spring timing, progress bounds and completion rules

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Configured ceiling of the page viewport zoom scale.
pub const DEFAULT_MAX_ZOOM_SCALE: f32 = 3.0;

/// Double-tap target used when the content has no meaningful zoom range.
pub const DEFAULT_DOUBLE_TAP_SCALE: f32 = 1.4;

/// Minimum spread between fit and fill scales that makes "fill" a useful
/// double-tap target.
pub const ZOOM_SPREAD_THRESHOLD: f32 = 0.1;

/// Tolerance when comparing a zoom scale against the minimum.
pub const ZOOM_EPSILON: f32 = 1e-3;

// ==========================================================================
// Chrome Defaults
// ==========================================================================

/// Duration of the tap-to-toggle chrome fade (milliseconds).
pub const DEFAULT_CHROME_FADE_MS: u64 = 200;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Nominal duration of a presentation or dismissal spring (milliseconds).
pub const DEFAULT_TRANSITION_DURATION_MS: u64 = 400;

/// Damping ratio of every transition spring.
pub const DEFAULT_SPRING_DAMPING: f32 = 0.9;

/// Lowest fractional completion reachable while tracking a gesture.
pub const MIN_FRACTION_COMPLETE: f32 = -0.05;

/// Highest fractional completion reachable while tracking a gesture.
pub const MAX_FRACTION_COMPLETE: f32 = 1.05;

/// Fractional completion above which a released gesture finishes.
pub const COMPLETION_THRESHOLD: f32 = 0.12;

/// Vertical gesture speed (points per second) classified as a flick.
pub const FLICK_VELOCITY: f32 = 1000.0;

/// Speed of the chrome fade relative to the root cross-fade.
pub const CHROME_PROGRESS_RATE: f32 = 6.0;

/// Start delay of the chrome fade during presentation, as a share of the
/// transition duration.
pub const CHROME_PRESENTATION_DELAY: f32 = 0.65;
