// SPDX-License-Identifier: MPL-2.0
//! Pager sub-component: a horizontally swipeable sequence of pages plus the
//! chrome drawn above them.
//!
//! Pages are created on demand when a swipe reveals them and dropped once
//! they are no longer adjacent to the current page.

use crate::config::Tuning;
use crate::error::{Error, Result};
use crate::media::ControlsOverlay;
use crate::source::PageSource;
use crate::ui::page;
use crate::ui::state::ChromeState;
use iced::Rectangle;
use std::collections::BTreeMap;
use std::time::Instant;

/// Swipe direction through the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

/// Status bar appearance requested while the viewer is fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBarStyle {
    Default,
    LightContent,
}

/// Host-filled container for header or footer chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeContainer {
    /// Frame in container coordinates.
    pub frame: Rectangle,
    /// Hidden while a transition draws a snapshot proxy in its place.
    pub hidden: bool,
}

impl ChromeContainer {
    #[must_use]
    pub fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            hidden: false,
        }
    }
}

/// Member of the chrome fade group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeTarget {
    Header,
    Footer,
    Controls(ControlsOverlay),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Swipe {
    from: usize,
    candidate: usize,
}

/// Pager sub-component state.
pub struct State {
    count: usize,
    current: usize,
    pages: BTreeMap<usize, page::State>,
    swipe: Option<Swipe>,
    chrome: ChromeState,
    header: ChromeContainer,
    footer: ChromeContainer,
    bounds: Rectangle,
    tuning: Tuning,
    /// Alpha of the page area; a transition draws the item itself meanwhile.
    content_alpha: f32,
    /// Set while a transition runs; swipes are rejected so the index is stable.
    locked: bool,
    clock: Instant,
}

/// Messages for the pager sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A swipe started revealing the neighbour in `Direction`.
    SwipeBegan(Direction),
    /// The swipe settled; `completed` is false when it snapped back.
    SwipeEnded { completed: bool },
    /// Tap anywhere in the page area.
    Tap,
    /// Input for the current page.
    Page(page::Message),
    /// The container frame changed.
    Resized(Rectangle),
    /// Animation clock tick.
    Tick(Instant),
}

/// Effects produced by pager changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// A page is about to become visible.
    WillTransition(usize),
    /// Paging settled on a new page.
    DidTransition {
        to: usize,
        from: usize,
        chrome_visible: Option<bool>,
    },
    /// Chrome visibility changed.
    ChromeVisibilityChanged(bool),
}

impl State {
    /// Creates a pager showing `initial_index`.
    pub fn new(
        initial_index: usize,
        source: &dyn PageSource,
        bounds: Rectangle,
        tuning: Tuning,
    ) -> Result<Self> {
        let count = source.item_count();
        if initial_index >= count {
            return Err(Error::IndexOutOfRange {
                index: initial_index,
                count,
            });
        }

        let mut pager = Self {
            count,
            current: initial_index,
            pages: BTreeMap::new(),
            swipe: None,
            chrome: ChromeState::new(tuning.chrome_fade),
            header: ChromeContainer::new(Rectangle::new(bounds.position(), iced::Size::ZERO)),
            footer: ChromeContainer::new(Rectangle::new(
                iced::Point::new(bounds.x, bounds.y + bounds.height),
                iced::Size::ZERO,
            )),
            bounds,
            tuning,
            content_alpha: 1.0,
            locked: false,
            clock: Instant::now(),
        };
        pager.ensure_page(initial_index, source);
        if let Some(page) = pager.pages.get_mut(&initial_index) {
            page.handle(page::Message::Appeared);
        }
        Ok(pager)
    }

    /// Handle a pager message.
    pub fn handle(&mut self, msg: Message, source: &dyn PageSource) -> Effect {
        match msg {
            Message::SwipeBegan(direction) => {
                if self.locked || self.swipe.is_some() {
                    return Effect::None;
                }
                let Some(candidate) = self.neighbor(self.current, direction) else {
                    return Effect::None;
                };
                self.ensure_page(candidate, source);
                self.swipe = Some(Swipe {
                    from: self.current,
                    candidate,
                });
                Effect::WillTransition(candidate)
            }
            Message::SwipeEnded { completed } => {
                let Some(swipe) = self.swipe.take() else {
                    return Effect::None;
                };
                if !completed {
                    return Effect::WillTransition(swipe.from);
                }

                if let Some(page) = self.pages.get_mut(&swipe.from) {
                    page.handle(page::Message::Disappeared);
                }
                self.current = swipe.candidate;
                let zoomed = self.pages.get_mut(&swipe.candidate).is_some_and(|page| {
                    page.handle(page::Message::Appeared);
                    page.zoom_bounds().is_zoomed(page.zoom_scale())
                });
                self.prune();
                let chrome_visible = self.chrome.zoom_changed(zoomed, self.clock);
                tracing::debug!(to = swipe.candidate, from = swipe.from, "page changed");

                Effect::DidTransition {
                    to: swipe.candidate,
                    from: swipe.from,
                    chrome_visible,
                }
            }
            Message::Tap => {
                let visible = self.chrome.toggle(self.clock);
                Effect::ChromeVisibilityChanged(visible)
            }
            Message::Page(msg) => {
                let Some(page) = self.pages.get_mut(&self.current) else {
                    return Effect::None;
                };
                match page.handle(msg) {
                    page::Effect::ZoomChanged { scale, .. } => {
                        let zoomed = page.zoom_bounds().is_zoomed(scale);
                        match self.chrome.zoom_changed(zoomed, self.clock) {
                            Some(visible) => Effect::ChromeVisibilityChanged(visible),
                            None => Effect::None,
                        }
                    }
                    page::Effect::None => Effect::None,
                }
            }
            Message::Resized(bounds) => {
                self.bounds = bounds;
                for page in self.pages.values_mut() {
                    page.handle(page::Message::Resized(bounds));
                }
                Effect::None
            }
            Message::Tick(now) => {
                self.clock = now;
                self.chrome.tick(now);
                Effect::None
            }
        }
    }

    /// Index of the hosted current page.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn current_page(&self) -> Option<&page::State> {
        self.pages.get(&self.current)
    }

    pub fn current_page_mut(&mut self) -> Option<&mut page::State> {
        self.pages.get_mut(&self.current)
    }

    #[must_use]
    pub fn page(&self, index: usize) -> Option<&page::State> {
        self.pages.get(&index)
    }

    /// Indices of the live pages, ascending.
    #[must_use]
    pub fn live_pages(&self) -> Vec<usize> {
        self.pages.keys().copied().collect()
    }

    /// Index next to `index` in `direction`, or `None` at the ends.
    #[must_use]
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Forward => (index + 1 < self.count).then_some(index + 1),
            Direction::Backward => index.checked_sub(1),
        }
    }

    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.swipe.is_some()
    }

    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    #[must_use]
    pub fn header(&self) -> &ChromeContainer {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut ChromeContainer {
        &mut self.header
    }

    #[must_use]
    pub fn footer(&self) -> &ChromeContainer {
        &self.footer
    }

    pub fn footer_mut(&mut self) -> &mut ChromeContainer {
        &mut self.footer
    }

    #[must_use]
    pub fn is_chrome_visible(&self) -> bool {
        self.chrome.is_visible()
    }

    #[must_use]
    pub fn chrome(&self) -> &ChromeState {
        &self.chrome
    }

    /// Alpha applied to every member of [`State::chrome_fade_group`].
    #[must_use]
    pub fn chrome_alpha(&self) -> f32 {
        self.chrome.alpha()
    }

    /// Views faded together when chrome visibility changes.
    #[must_use]
    pub fn chrome_fade_group(&self) -> Vec<ChromeTarget> {
        let mut group = vec![ChromeTarget::Header, ChromeTarget::Footer];
        if let Some(overlay) = self
            .current_page()
            .and_then(|page| page.item().borrow().controls_overlay())
        {
            group.push(ChromeTarget::Controls(overlay));
        }
        group
    }

    #[must_use]
    pub fn status_bar_hidden(&self) -> bool {
        !self.chrome.is_visible()
    }

    #[must_use]
    pub fn status_bar_style(&self) -> StatusBarStyle {
        StatusBarStyle::LightContent
    }

    #[must_use]
    pub fn content_alpha(&self) -> f32 {
        self.content_alpha
    }

    /// Page-area alpha, driven by transitions.
    pub fn set_content_alpha(&mut self, alpha: f32) {
        self.content_alpha = alpha;
    }

    /// Hides or reveals the live header and footer.
    pub fn set_live_chrome_hidden(&mut self, hidden: bool) {
        self.header.hidden = hidden;
        self.footer.hidden = hidden;
    }

    /// Blocks paging while a transition is running.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn ensure_page(&mut self, index: usize, source: &dyn PageSource) {
        if self.pages.contains_key(&index) {
            return;
        }
        let mut page = page::State::new(index, source.item(index), self.bounds, self.tuning);
        page.handle(page::Message::Attach { initial: true });
        self.pages.insert(index, page);
    }

    fn prune(&mut self) {
        let current = self.current;
        self.pages
            .retain(|index, _| index.abs_diff(current) <= 1);
    }
}
