//! End-to-end browser tests with DOM manipulation.
//!
//! Run with: wasm-pack test --headless --chrome
//!
//! Each test builds the modal markup the landing page ships with, wires a
//! `LandingPage` against it and drives it through DOM events.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use landing_wasm::{CONTAINER_ID, LIGHTBOX_ID, LIGHTBOX_IFRAME_ID, LandingPage, MODAL_ID};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, EventInit, HtmlElement, HtmlIFrameElement, HtmlInputElement,
    HtmlSelectElement, window,
};

wasm_bindgen_test_configure!(run_in_browser);

// === Helper Functions ===

fn get_document() -> Document {
    window()
        .expect("no window")
        .document()
        .expect("no document")
}

fn create_modal() -> Element {
    let doc = get_document();
    let modal = doc.create_element("div").expect("create div failed");
    modal.set_id(MODAL_ID);
    modal.set_inner_html(&format!(
        r#"<div class="modal-content fade-in-up"><div id="{CONTAINER_ID}"></div></div>"#
    ));
    doc.body()
        .expect("no body")
        .append_child(&modal)
        .expect("append failed");
    modal
}

fn cleanup() {
    let doc = get_document();
    for id in [MODAL_ID, LIGHTBOX_ID] {
        if let Some(element) = doc.get_element_by_id(id) {
            element.remove();
        }
    }
    let _ = doc.body().expect("no body").style().remove_property("overflow");
}

fn test_page(delay_ms: u32) -> LandingPage {
    create_modal();
    LandingPage::with_config(&format!(r#"{{"submission_delay_ms": {delay_ms}}}"#))
        .unwrap_or_else(|_| panic!("page failed to wire"))
}

fn query(selector: &str) -> Option<Element> {
    get_document().query_selector(selector).expect("bad selector")
}

fn display_of(selector: &str) -> String {
    let element = query(selector).unwrap_or_else(|| panic!("{selector} missing"));
    element
        .dyn_into::<HtmlElement>()
        .expect("not an HtmlElement")
        .style()
        .get_property_value("display")
        .expect("style read failed")
}

fn dispatch(target: &Element, kind: &str) {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict(kind, &init).expect("event");
    target.dispatch_event(&event).expect("dispatch failed");
}

fn type_into(name: &str, value: &str) {
    let element = query(&format!(r#"[name="{name}"]"#)).unwrap_or_else(|| panic!("{name} missing"));
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
        dispatch(&element, "change");
    } else {
        element
            .dyn_ref::<HtmlInputElement>()
            .expect("not an input")
            .set_value(value);
        dispatch(&element, "input");
    }
}

fn body_overflow() -> String {
    get_document()
        .body()
        .expect("no body")
        .style()
        .get_property_value("overflow")
        .expect("style read failed")
}

fn group_has_class(name: &str, class: &str) -> bool {
    query(&format!(r#".form-group[data-field="{name}"]"#))
        .is_some_and(|group| group.class_list().contains(class))
}

// === Form Modal Tests ===

#[wasm_bindgen_test]
fn test_open_form_shows_modal() {
    let page = test_page(2000);
    page.open_form("early-access").expect("open failed");

    assert_eq!(display_of(&format!("#{MODAL_ID}")), "block");
    assert_eq!(page.active_form().as_deref(), Some("early-access"));
    assert!(query(r#"#dynamic-form [name="email"]"#).is_some());
    let content = query(".modal-content").expect("content missing");
    assert!(!content.class_list().contains("fade-in-up"));
    assert_eq!(body_overflow(), "hidden");

    page.close_form().expect("close failed");
    assert_eq!(display_of(&format!("#{MODAL_ID}")), "none");
    assert_eq!(body_overflow(), "auto");
    assert!(page.active_form().is_none());
    drop(page);
    cleanup();
}

#[wasm_bindgen_test]
fn test_unknown_form_is_ignored() {
    let page = test_page(2000);
    page.open_form("roi").expect("open failed");
    page.open_form("does-not-exist").expect("unknown id should not throw");
    assert_eq!(page.active_form().as_deref(), Some("roi"));
    drop(page);
    cleanup();
}

#[wasm_bindgen_test]
fn test_navigation_without_open_form_is_quiet() {
    let page = test_page(2000);
    assert!(page.next_step().is_ok());
    assert!(page.previous_step().is_ok());
    assert!(page.close_form().is_ok());
    drop(page);
    cleanup();
}

#[wasm_bindgen_test]
fn test_page_marks_body_loaded() {
    let page = test_page(2000);
    let body = get_document().body().expect("no body");
    assert!(body.class_list().contains("loaded"));
    drop(page);
    cleanup();
}

#[wasm_bindgen_test]
fn test_data_attribute_opens_form() {
    let page = test_page(2000);
    let doc = get_document();
    let trigger = doc.create_element("button").expect("create failed");
    trigger.set_attribute("data-open-form", "whitepaper").expect("attr");
    doc.body().expect("no body").append_child(&trigger).expect("append");

    dispatch(&trigger, "click");
    assert_eq!(page.active_form().as_deref(), Some("whitepaper"));

    trigger.remove();
    drop(page);
    cleanup();
}

#[wasm_bindgen_test]
fn test_stepped_navigation() {
    let page = test_page(2000);
    page.open_form("demo").expect("open failed");

    assert_eq!(display_of(r#".form-step[data-step="1"]"#), "block");
    assert_eq!(display_of(r#".form-step[data-step="2"]"#), "none");
    assert_eq!(display_of(".form-nav-back"), "none");

    page.next_step().expect("advance failed");
    assert_eq!(display_of(r#".form-step[data-step="2"]"#), "none");
    assert!(group_has_class("email", "error"));

    type_into("name", "Ada Lovelace");
    type_into("email", "ada@example.com");
    type_into("phone", "+44 20 7946 0000");
    type_into("company", "Analytical Kitchens");
    assert!(group_has_class("email", "success"));

    let next = query(".form-nav-next").expect("next missing");
    dispatch(&next, "click");
    assert_eq!(display_of(r#".form-step[data-step="1"]"#), "none");
    assert_eq!(display_of(r#".form-step[data-step="2"]"#), "block");
    assert_eq!(display_of(".form-nav-back"), "inline-flex");
    assert_eq!(display_of(".form-submit"), "inline-flex");
    assert_eq!(display_of(".form-nav-next"), "none");
    let fill = query("#form-progress-fill")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .expect("progress missing");
    assert_eq!(fill.style().get_property_value("width").expect("width"), "100%");

    page.previous_step().expect("retreat failed");
    assert_eq!(display_of(r#".form-step[data-step="1"]"#), "block");
    assert_eq!(display_of(".form-nav-back"), "none");
    assert_eq!(fill.style().get_property_value("width").expect("width"), "50%");

    drop(page);
    cleanup();
}

#[wasm_bindgen_test]
fn test_enter_on_first_step_advances() {
    let page = test_page(20);
    page.open_form("demo").expect("open failed");
    let form = query("#dynamic-form").expect("form missing");

    type_into("name", "Ada Lovelace");
    dispatch(&form, "submit");
    assert_eq!(display_of(r#".form-step[data-step="1"]"#), "block");
    assert!(group_has_class("email", "error"));
    assert!(!group_has_class("demo_type", "error"));

    type_into("email", "ada@example.com");
    type_into("phone", "+44 20 7946 0000");
    type_into("company", "Analytical Kitchens");
    dispatch(&form, "submit");
    assert_eq!(display_of(r#".form-step[data-step="2"]"#), "block");
    assert_eq!(display_of(".form-submit"), "inline-flex");
    let submit = query(".form-submit").expect("submit missing");
    assert!(!submit.has_attribute("disabled"));

    drop(page);
    cleanup();
}

#[wasm_bindgen_test]
async fn test_submission_shows_confirmation() {
    let page = test_page(20);
    page.open_form("early-access").expect("open failed");

    type_into("name", "Grace Hopper");
    type_into("email", "grace@example.com");
    type_into("company", "Compiler Catering");
    type_into("role", "As a Customer");

    let form = query("#dynamic-form").expect("form missing");
    dispatch(&form, "submit");
    let submit = query(".form-submit").expect("submit missing");
    assert!(submit.has_attribute("disabled"));
    assert!(submit.inner_html().contains("fa-spinner"));

    TimeoutFuture::new(60).await;
    assert!(query(".form-success").is_some());
    assert!(page.active_form().is_none());

    let close = query(r#"[data-action="close-form"]"#).expect("close button missing");
    dispatch(&close, "click");
    assert_eq!(display_of(&format!("#{MODAL_ID}")), "none");

    drop(page);
    cleanup();
}

#[wasm_bindgen_test]
async fn test_close_during_submission_discards_it() {
    let page = test_page(20);
    page.open_form("early-access").expect("open failed");
    type_into("name", "Grace Hopper");
    type_into("email", "grace@example.com");
    type_into("company", "Compiler Catering");
    type_into("role", "As a Supplier");
    dispatch(&query("#dynamic-form").expect("form missing"), "submit");

    page.close_form().expect("close failed");
    TimeoutFuture::new(60).await;
    assert!(query(".form-success").is_none());
    assert_eq!(
        query(&format!("#{CONTAINER_ID}")).expect("container").inner_html(),
        ""
    );

    drop(page);
    cleanup();
}

#[wasm_bindgen_test]
fn test_blocked_submission_marks_fields() {
    let page = test_page(20);
    page.open_form("early-access").expect("open failed");
    type_into("name", "Grace Hopper");
    dispatch(&query("#dynamic-form").expect("form missing"), "submit");

    assert!(group_has_class("email", "error"));
    assert!(group_has_class("name", "success"));
    assert!(!group_has_class("additional_info", "error"));
    assert!(query(".form-success").is_none());

    drop(page);
    cleanup();
}

// === Lightbox Tests ===

#[wasm_bindgen_test]
fn test_lightbox_open_and_close() {
    let page = test_page(2000);
    assert!(query(&format!("#{LIGHTBOX_ID}")).is_some());

    page.open_video_lightbox().expect("open failed");
    let iframe = query(&format!("#{LIGHTBOX_IFRAME_ID}"))
        .and_then(|e| e.dyn_into::<HtmlIFrameElement>().ok())
        .expect("iframe missing");
    assert!(iframe.src().ends_with("?autoplay=1"));
    assert_eq!(display_of(&format!("#{LIGHTBOX_ID}")), "block");

    page.close_video_lightbox().expect("close failed");
    assert_eq!(display_of(&format!("#{LIGHTBOX_ID}")), "none");
    assert!(!iframe.src().contains("autoplay"));

    drop(page);
    cleanup();
}
