//! Shared page state and listener bookkeeping.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::{Interval, Timeout};
use leadform::effects::{Lightbox, NavMenu, RevealTracker};
use leadform::{FormController, LandingConfig, Language};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, IntersectionObserver};

use crate::dom::{DomError, Result};

type EventClosure = Closure<dyn FnMut(Event)>;
pub(crate) type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: EventClosure,
}

/// Everything the page's handlers share.
///
/// Handlers hold a [`Weak`] reference, so dropping the owning
/// `LandingPage` detaches every listener and cancels every timer.
/// `RefCell` borrows are released before any callback boundary.
pub(crate) struct Page {
    pub(crate) config: LandingConfig,
    pub(crate) language: Language,
    pub(crate) forms: RefCell<FormController>,
    pub(crate) pending_submission: RefCell<Option<Timeout>>,
    pub(crate) nav: RefCell<NavMenu>,
    pub(crate) reveal: RefCell<RevealTracker<u32>>,
    pub(crate) counters: RefCell<Option<Interval>>,
    pub(crate) counters_started: Cell<bool>,
    pub(crate) lightbox: RefCell<Lightbox>,
    listeners: RefCell<Vec<Listener>>,
    observers: RefCell<Vec<(IntersectionObserver, ObserverClosure)>>,
}

impl Page {
    pub(crate) fn new(config: LandingConfig, language: Language, forms: FormController) -> Self {
        let reveal = RevealTracker::new(config.reveal_threshold);
        Self {
            config,
            language,
            forms: RefCell::new(forms),
            pending_submission: RefCell::new(None),
            nav: RefCell::new(NavMenu::new()),
            reveal: RefCell::new(reveal),
            counters: RefCell::new(None),
            counters_started: Cell::new(false),
            lightbox: RefCell::new(Lightbox::new()),
            listeners: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Registers `handler` for `event` on `target`.
    ///
    /// Errors returned by the handler are logged, never thrown into the page.
    pub(crate) fn listen<F>(self: &Rc<Self>, target: &EventTarget, event: &'static str, handler: F) -> Result<()>
    where
        F: Fn(&Rc<Self>, Event) -> Result<()> + 'static,
    {
        let weak: Weak<Self> = Rc::downgrade(self);
        let closure = EventClosure::new(move |e: Event| {
            if let Some(page) = weak.upgrade() {
                if let Err(err) = handler(&page, e) {
                    report(event, &err);
                }
            }
        });
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.borrow_mut().push(Listener {
            target: target.clone(),
            event,
            closure,
        });
        Ok(())
    }

    /// Keeps an intersection observer and its callback alive.
    pub(crate) fn keep_observer(&self, observer: IntersectionObserver, closure: ObserverClosure) {
        self.observers.borrow_mut().push((observer, closure));
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for listener in self.listeners.get_mut().drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
        for (observer, _) in self.observers.get_mut().drain(..) {
            observer.disconnect();
        }
    }
}

/// Logs a handler failure at a level matching its severity.
pub(crate) fn report(context: &str, err: &DomError) {
    if err.is_benign() {
        tracing::debug!(context, %err, "ignored");
    } else {
        tracing::warn!(context, %err, "handler failed");
    }
}
