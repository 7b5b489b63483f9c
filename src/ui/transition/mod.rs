// SPDX-License-Identifier: MPL-2.0
//! Thumbnail-to-fullscreen transitions.
//!
//! - [`driver`] - Runs one presentation or dismissal
//! - [`controller`] - Owns the pan gesture and the active driver
//! - [`presentation`] - Presented frame and view mounting
//! - [`animator`] - Spring-timed animation channels
//! - [`gesture`] - Long-lived pan recognizer state
//! - [`item`] - Proxies drawn while a transition runs

pub mod animator;
pub mod controller;
pub mod driver;
pub mod gesture;
pub mod item;
pub mod presentation;

pub use animator::{Animator, Position, SpringTiming};
pub use controller::Controller;
pub use driver::{Direction, Driver, Phase, TransitionContext};
pub use gesture::{PanGesture, PanPhase, PanSample};
pub use item::{ChromeKind, ChromeProxy, FloatingProxy, ProxyContent, TransitionItem};
pub use presentation::PresentationController;
