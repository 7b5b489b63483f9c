// SPDX-License-Identifier: MPL-2.0
//! Media item capability contract.
//!
//! The viewer never decodes or plays media itself. Whatever the host wants to
//! show fullscreen implements [`MediaItem`]; only `content_size` is required,
//! every other capability defaults to "absent".

use iced::widget::image::Handle;
use iced::Size;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Host-owned media item, borrowed by the viewer while it is visible.
pub type SharedItem = Rc<RefCell<dyn MediaItem>>;

/// Wraps a concrete item into a [`SharedItem`].
pub fn share<T: MediaItem + 'static>(item: T) -> SharedItem {
    Rc::new(RefCell::new(item))
}

/// Capability contract of a fullscreen-displayable item.
pub trait MediaItem {
    /// Intrinsic size of the rendered content, in points.
    fn content_size(&self) -> Size;

    /// Whether playback is currently paused. Static items are never paused.
    fn is_paused(&self) -> bool {
        false
    }

    /// Pauses or resumes playback. No-op for static items.
    fn set_paused(&mut self, _paused: bool) {}

    /// Whether the item renders over time (video, animated image).
    fn is_animated(&self) -> bool {
        false
    }

    /// Still frame of the current playback position, used to replace the
    /// live item once a dismissal is known to finish.
    fn animated_snapshot(&self) -> Option<Snapshot> {
        None
    }

    /// Playback controls drawn above the item, faded together with the chrome.
    fn controls_overlay(&self) -> Option<ControlsOverlay> {
        None
    }
}

/// Identifier of a host-drawn controls overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlsOverlay(pub u64);

/// Static raster image of a view or item.
#[derive(Clone)]
pub struct Snapshot {
    handle: Handle,
    size: Size,
}

impl Snapshot {
    /// Creates a snapshot from an existing image handle of known size.
    #[must_use]
    pub fn new(handle: Handle, size: Size) -> Self {
        Self { handle, size }
    }

    /// Creates a snapshot from decoded RGBA pixels.
    #[must_use]
    pub fn from_rgba(image: image_rs::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        #[allow(clippy::cast_precision_loss)]
        let size = Size::new(width as f32, height as f32);
        Self {
            handle: Handle::from_rgba(width, height, image.into_raw()),
            size,
        }
    }

    /// Creates a single-colour snapshot, handy for placeholders.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_rgba(image_rs::RgbaImage::from_pixel(
            width,
            height,
            image_rs::Rgba(rgba),
        ))
    }

    /// Image handle to render.
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Intrinsic size of the image.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StillImage;

    impl MediaItem for StillImage {
        fn content_size(&self) -> Size {
            Size::new(640.0, 480.0)
        }
    }

    #[test]
    fn capabilities_default_to_absent() {
        let item = share(StillImage);
        let mut item = item.borrow_mut();
        assert!(!item.is_paused());
        assert!(!item.is_animated());
        assert!(item.animated_snapshot().is_none());
        assert!(item.controls_overlay().is_none());

        item.set_paused(true);
        assert!(!item.is_paused());
    }

    #[test]
    fn snapshot_reports_pixel_size() {
        let snapshot = Snapshot::solid(12, 8, [0, 0, 0, 255]);
        assert_eq!(snapshot.size(), Size::new(12.0, 8.0));
    }
}
