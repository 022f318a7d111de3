//! State behind the page's load-time effects.
//!
//! Each effect keeps its state here as plain data so it can be tested
//! without a browser; the binding layer applies the results to the DOM.

pub mod counter;
pub mod lightbox;
pub mod nav;
pub mod reveal;

pub use counter::{CounterFormat, StatCounter};
pub use lightbox::Lightbox;
pub use nav::{NavMenu, ScrollLock, navbar_scrolled};
pub use reveal::{RevealTracker, stagger_delay};
