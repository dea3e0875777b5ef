//! Runs the behaviors against a real DOM through the `web-sys` binding.
//! Only built for wasm32: `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use authpage::config::RUNTIME_CONFIG_GLOBAL;
use authpage::dom::web::{WebDocument, WebScheduler};
use authpage::dom::{Document, Element, MARGIN_LEFT, OPACITY};
use authpage::{BehaviorConfig, FlashTiming, PageBehaviors, telemetry};
use gloo_timers::future::TimeoutFuture;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use tracing::Level;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r##"
<div class="message success">Account created</div>
<div class="slide-controls">
  <input type="radio" name="slide" id="login" checked>
  <input type="radio" name="slide" id="signup">
  <label class="slide login" for="login">Login</label>
  <label class="slide signup" for="signup">Signup</label>
</div>
<div class="form-inner">
  <div class="field">
    <input type="password" name="password"><span class="toggle-password">👁️</span>
  </div>
  <a id="signup-link" href="#signup-form">Signup now</a>
</div>
"##;

fn raw_document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount() -> WebDocument {
    raw_document().body().unwrap().set_inner_html(PAGE);
    WebDocument::from_window().unwrap()
}

fn set_runtime_config(value: &JsValue) {
    let window = web_sys::window().unwrap();
    js_sys::Reflect::set(&window, &JsValue::from_str(RUNTIME_CONFIG_GLOBAL), value).unwrap();
}

#[wasm_bindgen_test]
fn tabs_and_toggle_work_in_the_browser() {
    let document = mount();
    let wiring = PageBehaviors::init(&document, &WebScheduler, &BehaviorConfig::default());
    assert!(wiring.tabs);
    assert_eq!(wiring.password_toggles, 1);

    document.query_selector("label.signup").unwrap().click();
    assert!(document.query_selector("#signup").unwrap().is_checked());
    assert_eq!(
        document
            .query_selector(".form-inner")
            .unwrap()
            .style_property(MARGIN_LEFT),
        "-100%"
    );

    document.query_selector(".toggle-password").unwrap().click();
    assert_eq!(
        document
            .query_selector("input[name=password]")
            .unwrap()
            .input_type()
            .as_deref(),
        Some("text")
    );
}

#[wasm_bindgen_test]
fn signup_link_cancels_navigation() {
    let document = mount();
    let wiring = PageBehaviors::init(&document, &WebScheduler, &BehaviorConfig::default());
    assert!(wiring.signup_link);

    // Registered after the behavior, so it sees the event once the shortcut ran.
    let prevented = Rc::new(Cell::new(false));
    let observer = {
        let prevented = Rc::clone(&prevented);
        Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            prevented.set(event.default_prevented());
        })
    };
    let link = raw_document().query_selector("#signup-link").unwrap().unwrap();
    link.add_event_listener_with_callback("click", observer.as_ref().unchecked_ref())
        .unwrap();

    link.unchecked_ref::<web_sys::HtmlElement>().click();

    assert!(prevented.get());
    assert!(document.query_selector("#signup").unwrap().is_checked());
    assert_eq!(
        document
            .query_selector(".form-inner")
            .unwrap()
            .style_property(MARGIN_LEFT),
        "-100%"
    );
}

#[wasm_bindgen_test]
async fn flash_message_fades_then_leaves_on_real_timers() {
    let document = mount();
    let config = BehaviorConfig {
        flash: FlashTiming {
            dismiss_after_ms: 20,
            fade_ms: 200,
        },
        ..BehaviorConfig::default()
    };
    let wiring = PageBehaviors::init(&document, &WebScheduler, &config);
    assert!(wiring.flash.is_some());
    let message = document.query_selector(".message").unwrap();

    TimeoutFuture::new(80).await;
    assert_eq!(message.style_property(OPACITY), "0");
    assert!(message.is_connected());

    TimeoutFuture::new(300).await;
    assert!(!message.is_connected());
    assert!(document.query_selector(".message").is_none());
}

#[wasm_bindgen_test]
async fn cancelled_flash_stays_on_the_page() {
    let document = mount();
    let config = BehaviorConfig {
        flash: FlashTiming {
            dismiss_after_ms: 20,
            fade_ms: 20,
        },
        ..BehaviorConfig::default()
    };
    let wiring = PageBehaviors::init(&document, &WebScheduler, &config);
    wiring.flash.unwrap().cancel();

    TimeoutFuture::new(120).await;
    let message = document.query_selector(".message").unwrap();
    assert_eq!(message.style_property(OPACITY), "");
}

#[wasm_bindgen_test]
fn runtime_config_is_read_from_the_window() {
    let overrides =
        js_sys::JSON::parse(r#"{"flash_fade_ms": 42, "log_level": "debug"}"#).unwrap();
    set_runtime_config(&overrides);
    let (config, rejected) = BehaviorConfig::load();
    set_runtime_config(&JsValue::UNDEFINED);

    assert!(rejected.is_none());
    assert_eq!(config.flash.fade_ms, 42);
    assert_eq!(
        config.flash.dismiss_after_ms,
        BehaviorConfig::from_build_env().flash.dismiss_after_ms
    );
    assert_eq!(config.log_level, Level::DEBUG);
}

#[wasm_bindgen_test]
fn malformed_runtime_config_is_reported_and_ignored() {
    let overrides = js_sys::JSON::parse(r#"{"flash_fade_ms": "fast"}"#).unwrap();
    set_runtime_config(&overrides);
    let (config, rejected) = BehaviorConfig::load();
    set_runtime_config(&JsValue::UNDEFINED);

    assert!(matches!(rejected, Some(authpage::Error::Config(_))));
    assert_eq!(config, BehaviorConfig::from_build_env());
}

#[wasm_bindgen_test]
fn parsed_document_runs_ready_callback_immediately() {
    let document = mount();
    assert!(!document.is_loading());

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    document
        .when_ready(move || counter.set(counter.get() + 1))
        .unwrap();
    assert_eq!(calls.get(), 1);
}

#[wasm_bindgen_test]
fn content_loaded_callback_runs_once() {
    let document = mount();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    document
        .on_content_loaded(move || counter.set(counter.get() + 1))
        .unwrap();
    assert_eq!(calls.get(), 0);

    for _ in 0..2 {
        let event = web_sys::Event::new("DOMContentLoaded").unwrap();
        raw_document().dispatch_event(&event).unwrap();
    }
    assert_eq!(calls.get(), 1);
}

#[wasm_bindgen_test]
fn content_loaded_wiring_attaches_behaviors() {
    let document = mount();
    let attached = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&attached);
    let target = document.clone();
    document
        .on_content_loaded(move || {
            let config = BehaviorConfig::default();
            *slot.borrow_mut() = Some(PageBehaviors::init(&target, &WebScheduler, &config));
        })
        .unwrap();

    let event = web_sys::Event::new("DOMContentLoaded").unwrap();
    raw_document().dispatch_event(&event).unwrap();

    let wiring = attached.borrow_mut().take().unwrap();
    assert!(wiring.tabs);
    assert!(wiring.signup_link);
    assert_eq!(wiring.password_toggles, 1);
}

#[wasm_bindgen_test]
fn start_wires_the_page_when_logging_is_already_installed() {
    // Whatever installed the global subscriber first, the next init fails.
    let _ = telemetry::init(Level::WARN);
    assert!(telemetry::init(Level::WARN).is_err());

    let document = mount();
    authpage::entry::start().unwrap();

    document.query_selector("label.signup").unwrap().click();
    assert!(document.query_selector("#signup").unwrap().is_checked());
}

#[wasm_bindgen_test]
fn rejected_style_value_leaves_the_previous_value() {
    let document = mount();
    let container = document.query_selector(".form-inner").unwrap();

    container.set_style_property(MARGIN_LEFT, "-100%");
    container.set_style_property(MARGIN_LEFT, "sideways");

    assert_eq!(container.style_property(MARGIN_LEFT), "-100%");
}
