//! Navigation, scroll reveal, stat counters and the video lightbox.

use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use leadform::effects::{ScrollLock, StatCounter, navbar_scrolled, stagger_delay};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlIFrameElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::dom::{self, Result};
use crate::page::{ObserverClosure, Page};

/// Id of the lightbox overlay.
pub const LIGHTBOX_ID: &str = "video-lightbox";

/// Id of the lightbox's embedded player.
pub const LIGHTBOX_IFRAME_ID: &str = "video-iframe";

const LIGHTBOX_MARKUP: &str = r#"<div class="video-lightbox-content"><span class="video-lightbox-close">&times;</span><div class="video-lightbox-iframe-container"><iframe id="video-iframe" src="" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe></div></div>"#;

/// Elements that fade in once when scrolled into view.
const REVEAL_SELECTORS: &[&str] = &[
    ".section-header h2",
    ".hero-title",
    ".solution-header h2",
    ".hardware-text h2",
    ".features-section .section-header h2",
    ".social-proof .section-header h2",
    ".final-cta h2",
    ".section-header p",
    ".hero-subtitle",
    ".solution-header p",
    ".hardware-description",
    ".features-section .section-header p",
    ".social-proof .section-header p",
    ".cta-button",
    ".feature-card",
    ".bento-card",
    ".final-cta-button",
    ".proof-stat",
    ".insight-card",
];

const REVEAL_ID_ATTR: &str = "data-reveal-id";

impl Page {
    /// Attaches every decorative effect. Missing optional elements are skipped.
    pub(crate) fn wire_effects(self: &Rc<Self>) -> Result<()> {
        self.wire_navigation()?;
        self.wire_anchors()?;
        self.wire_reveal()?;
        self.wire_stats()?;
        self.wire_lightbox()?;

        let document = dom::document()?;
        self.listen(&document, "visibilitychange", |_, _| {
            let hidden = dom::document()?.hidden();
            dom::set_class(dom::body()?.as_ref(), "paused", hidden)
        })?;
        dom::set_class(dom::body()?.as_ref(), "loaded", true)
    }

    fn wire_navigation(self: &Rc<Self>) -> Result<()> {
        let document = dom::document()?;
        let (Some(hamburger), Some(_)) = (
            document.get_element_by_id("hamburger"),
            document.get_element_by_id("nav-menu"),
        ) else {
            tracing::debug!("no navigation menu on this page");
            return self.wire_navbar();
        };

        self.listen(&hamburger, "click", |page, _| page.toggle_menu())?;
        if let Some(overlay) = document.get_element_by_id("nav-menu-overlay") {
            self.listen(&overlay, "click", |page, _| page.close_menu())?;
        }

        for link in dom::query_document(".nav-link")? {
            self.listen(&link, "click", |page, event| {
                if let Some(link) = current_element(&event) {
                    page.tap_feedback(&link)?;
                }
                page.close_menu()
            })?;
            self.listen(&link, "touchstart", |page, event| match current_element(&event) {
                Some(link) => page.tap_feedback(&link),
                None => Ok(()),
            })?;
        }
        self.wire_navbar()
    }

    fn wire_navbar(self: &Rc<Self>) -> Result<()> {
        let window = dom::window()?;
        self.listen(&window, "scroll", |page, _| {
            let Some(navbar) = dom::document()?.get_element_by_id("navbar") else {
                return Ok(());
            };
            let y = dom::window()?.scroll_y()?;
            dom::set_class(
                &navbar,
                "scrolled",
                navbar_scrolled(y, page.config.navbar_scroll_threshold),
            )
        })
    }

    /// Hamburger click.
    pub(crate) fn toggle_menu(&self) -> Result<()> {
        let offset = dom::window()?.scroll_y()?;
        let lock = self.nav.borrow_mut().toggle(offset);
        let open = self.nav.borrow().is_open();
        set_menu_classes(open)?;
        apply_scroll_lock(lock)
    }

    /// Overlay or link click.
    pub(crate) fn close_menu(&self) -> Result<()> {
        let lock = self.nav.borrow_mut().close();
        set_menu_classes(false)?;
        apply_scroll_lock(lock)
    }

    fn tap_feedback(&self, link: &Element) -> Result<()> {
        if link.query_selector(".brand-i")?.is_none() {
            return Ok(());
        }
        dom::set_class(link, "tapped", true)?;
        let link = link.clone();
        Timeout::new(self.config.tap_feedback_ms, move || {
            let _ = link.class_list().remove_1("tapped");
        })
        .forget();
        Ok(())
    }

    fn wire_anchors(self: &Rc<Self>) -> Result<()> {
        let document = dom::document()?;
        self.listen(&document, "click", |_, event| {
            let Some(element) = dom::event_element(&event) else {
                return Ok(());
            };
            let Some(anchor) = element.closest(r##"a[href^="#"]"##)? else {
                return Ok(());
            };
            let href = anchor.get_attribute("href").unwrap_or_default();
            if href.len() < 2 {
                return Ok(());
            }
            event.prevent_default();
            if let Some(target) = dom::document()?.query_selector(&href)? {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
            Ok(())
        })
    }

    fn wire_reveal(self: &Rc<Self>) -> Result<()> {
        let elements = dom::query_document(&REVEAL_SELECTORS.join(", "))?;
        if elements.is_empty() {
            return Ok(());
        }

        let weak = Rc::downgrade(self);
        let closure: ObserverClosure = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let Some(page) = weak.upgrade() else {
                return;
            };
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if let Err(err) = page.reveal_entry(&entry, &observer) {
                    crate::page::report("reveal", &err);
                }
            }
        });
        let observer = observe_with(&closure, self.config.reveal_threshold)?;

        let observed = elements.len();
        for (index, element) in (0u32..).zip(elements) {
            element.set_attribute(REVEAL_ID_ATTR, &index.to_string())?;
            observer.observe(&element);
        }
        tracing::debug!(observed, "scroll reveal armed");
        self.keep_observer(observer, closure);
        Ok(())
    }

    fn reveal_entry(&self, entry: &IntersectionObserverEntry, observer: &IntersectionObserver) -> Result<()> {
        let target = entry.target();
        let Some(id) = target
            .get_attribute(REVEAL_ID_ATTR)
            .and_then(|s| s.parse::<u32>().ok())
        else {
            return Ok(());
        };
        if !self.reveal.borrow_mut().observe(id, entry.intersection_ratio()) {
            return Ok(());
        }
        for (index, word) in dom::query_all(&target, ".heading-word")?.iter().enumerate() {
            dom::set_class(word, "animate-in", true)?;
            dom::set_style(word, "animation-delay", &stagger_delay(index))?;
        }
        dom::set_class(&target, "animate-in", true)?;
        observer.unobserve(&target);
        Ok(())
    }

    fn wire_stats(self: &Rc<Self>) -> Result<()> {
        let Some(stats) = dom::document()?.query_selector(".hero-stats")? else {
            return Ok(());
        };

        let weak = Rc::downgrade(self);
        let closure: ObserverClosure = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let Some(page) = weak.upgrade() else {
                return;
            };
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                observer.unobserve(&entry.target());
                if let Err(err) = page.start_counters() {
                    crate::page::report("stats", &err);
                }
            }
        });
        let observer = observe_with(&closure, self.config.stats_threshold)?;
        observer.observe(&stats);
        self.keep_observer(observer, closure);
        Ok(())
    }

    /// Counts every `.stat-number` up from zero. Runs at most once.
    pub(crate) fn start_counters(self: &Rc<Self>) -> Result<()> {
        if self.counters_started.replace(true) {
            return Ok(());
        }
        let mut counters: Vec<(Element, StatCounter)> = dom::query_document(".stat-number")?
            .into_iter()
            .filter_map(|el| {
                let text = el.text_content().unwrap_or_default();
                let counter = StatCounter::from_text(
                    &text,
                    self.config.counter_duration_ms,
                    self.config.counter_tick_ms,
                )?;
                Some((el, counter))
            })
            .collect();
        if counters.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = counters.len(), "starting stat counters");

        let weak = Rc::downgrade(self);
        let interval = Interval::new(self.config.counter_tick_ms, move || {
            let mut running = false;
            for (element, counter) in &mut counters {
                if let Some(text) = counter.tick() {
                    element.set_text_content(Some(&text));
                }
                running |= !counter.is_done();
            }
            if running {
                return;
            }
            // Dropping the interval inside its own tick would free this closure.
            if let Some(page) = weak.upgrade() {
                if let Some(interval) = page.counters.borrow_mut().take() {
                    Timeout::new(0, move || drop(interval)).forget();
                }
            }
        });
        *self.counters.borrow_mut() = Some(interval);
        Ok(())
    }

    fn wire_lightbox(self: &Rc<Self>) -> Result<()> {
        let document = dom::document()?;
        let lightbox = if let Some(existing) = document.get_element_by_id(LIGHTBOX_ID) {
            existing
        } else {
            let created = document.create_element("div")?;
            created.set_id(LIGHTBOX_ID);
            created.set_class_name("video-lightbox");
            created.set_inner_html(LIGHTBOX_MARKUP);
            dom::body()?.append_child(&created)?;
            created
        };

        if let Some(close) = lightbox.query_selector(".video-lightbox-close")? {
            self.listen(&close, "click", |page, _| page.close_video())?;
        }
        self.listen(&lightbox, "click", |page, event| {
            let on_backdrop = match (event.target(), event.current_target()) {
                (Some(target), Some(current)) => js_sys::Object::is(&target, &current),
                _ => false,
            };
            if on_backdrop { page.close_video() } else { Ok(()) }
        })?;
        self.listen(&document, "keydown", |page, event| {
            let escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape");
            if escape && page.lightbox.borrow().is_open() {
                page.close_video()
            } else {
                Ok(())
            }
        })?;
        self.listen(&document, "click", |page, event| {
            let Some(element) = dom::event_element(&event) else {
                return Ok(());
            };
            if element.closest("[data-open-video]")?.is_none() {
                return Ok(());
            }
            event.prevent_default();
            page.open_video()
        })
    }

    /// Shows the lightbox and starts the configured video.
    pub(crate) fn open_video(&self) -> Result<()> {
        let Some(lightbox) = dom::document()?.get_element_by_id(LIGHTBOX_ID) else {
            return Ok(());
        };
        let source = self
            .lightbox
            .borrow_mut()
            .open(&self.config.video_embed_url)
            .to_owned();
        if let Some(iframe) = lightbox_iframe(&lightbox)? {
            iframe.set_src(&source);
        }
        dom::set_visible(&lightbox, true, "block")?;
        dom::set_style(dom::body()?.as_ref(), "overflow", "hidden")?;
        tracing::debug!(%source, "video lightbox opened");
        Ok(())
    }

    /// Hides the lightbox and stops playback.
    pub(crate) fn close_video(&self) -> Result<()> {
        let Some(lightbox) = dom::document()?.get_element_by_id(LIGHTBOX_ID) else {
            return Ok(());
        };
        self.lightbox.borrow_mut().close();
        if let Some(iframe) = lightbox_iframe(&lightbox)? {
            iframe.set_src("");
        }
        dom::set_visible(&lightbox, false, "block")?;
        dom::set_style(dom::body()?.as_ref(), "overflow", "")
    }
}

fn set_menu_classes(open: bool) -> Result<()> {
    let document = dom::document()?;
    for id in ["hamburger", "nav-menu", "nav-menu-overlay"] {
        if let Some(element) = document.get_element_by_id(id) {
            dom::set_class(&element, "active", open)?;
        }
    }
    Ok(())
}

fn apply_scroll_lock(lock: ScrollLock) -> Result<()> {
    let body = dom::body()?;
    match lock {
        ScrollLock::Lock { offset } => {
            body.style().set_property("top", &format!("-{offset}px"))?;
            dom::set_class(&body, "menu-open", true)?;
        }
        ScrollLock::Unlock { restore } => {
            dom::set_class(&body, "menu-open", false)?;
            body.style().remove_property("top")?;
            dom::window()?.scroll_to_with_x_and_y(0.0, restore);
        }
        ScrollLock::Unchanged => {}
    }
    Ok(())
}

fn observe_with(closure: &ObserverClosure, threshold: f64) -> Result<IntersectionObserver> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    Ok(IntersectionObserver::new_with_options(
        closure.as_ref().unchecked_ref(),
        &options,
    )?)
}

fn current_element(event: &web_sys::Event) -> Option<Element> {
    event
        .current_target()
        .and_then(|target| target.dyn_into::<Element>().ok())
}

fn lightbox_iframe(lightbox: &Element) -> Result<Option<HtmlIFrameElement>> {
    Ok(lightbox
        .query_selector(&format!("#{LIGHTBOX_IFRAME_ID}"))?
        .and_then(|e| e.dyn_into::<HtmlIFrameElement>().ok()))
}
