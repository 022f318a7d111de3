//! Mobile navigation menu and navbar state.

/// What the page must do with body scrolling after a menu change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollLock {
    /// Pin the body at `offset` (negative `top`, `menu-open` class).
    Lock {
        /// Scroll offset at the moment the menu opened.
        offset: f64,
    },
    /// Release the body and scroll back to `restore`.
    Unlock {
        /// Offset to return to.
        restore: f64,
    },
    /// Nothing to do.
    Unchanged,
}

/// Open/closed state of the hamburger menu.
///
/// Opening remembers where the page was scrolled to so closing can put the
/// visitor back there.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NavMenu {
    saved_offset: Option<f64>,
}

impl NavMenu {
    /// A closed menu.
    #[must_use]
    pub const fn new() -> Self {
        Self { saved_offset: None }
    }

    /// Returns true while the menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.saved_offset.is_some()
    }

    /// Hamburger click: opens a closed menu, closes an open one.
    pub fn toggle(&mut self, scroll_offset: f64) -> ScrollLock {
        if self.is_open() {
            self.close()
        } else {
            self.saved_offset = Some(scroll_offset);
            ScrollLock::Lock {
                offset: scroll_offset,
            }
        }
    }

    /// Overlay or link click.
    pub fn close(&mut self) -> ScrollLock {
        match self.saved_offset.take() {
            Some(restore) => ScrollLock::Unlock { restore },
            None => ScrollLock::Unchanged,
        }
    }
}

/// Whether the navbar should carry the `scrolled` class.
#[must_use]
pub fn navbar_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}
