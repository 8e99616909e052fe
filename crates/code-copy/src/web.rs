//! Browser host: web-sys DOM, `navigator.clipboard`, gloo timers.

use anyhow::{Context, Result, anyhow};
use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlButtonElement, HtmlElement, Window};

use crate::config::{CONFIG_ELEMENT_ID, CopyConfig, MAX_RESET_DELAY_MS};
use crate::control::CopyControl;
use crate::host::{Block, Clipboard, ControlButton, ENHANCED_ATTR, Page, Scheduler};
use crate::initialize::initialize;

thread_local! {
    /// Controls live as long as the page; click handlers only hold them weakly.
    static CONTROLS: RefCell<Vec<Rc<CopyControl<DomBlock>>>> = const { RefCell::new(Vec::new()) };
}

fn js_err(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

// ── DOM ───────────────────────────────────────────────────────────────────────

pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Page for DomPage {
    type Block = DomBlock;

    fn query_blocks(&self, selector: &str) -> Vec<DomBlock> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                web_sys::console::warn_1(&format!("[code-copy] Bad block selector {:?}: {:?}", selector, e).into());
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(|element| DomBlock { element })
            .collect()
    }
}

pub struct DomBlock {
    element: HtmlElement,
}

impl Block for DomBlock {
    type Button = DomButton;

    fn payload_text(&self, selector: &str) -> Option<String> {
        let payload = self.element.query_selector(selector).ok().flatten()?;
        match payload.dyn_into::<HtmlElement>() {
            Ok(el) => Some(el.inner_text()),
            // Non-HTML payload (e.g. inside SVG): fall back to raw text.
            Err(el) => el.text_content(),
        }
    }

    fn is_enhanced(&self) -> bool {
        self.element.has_attribute(ENHANCED_ATTR)
    }

    fn prepare_overlay(&self) -> Result<()> {
        self.element.style().set_property("position", "relative").map_err(js_err)
    }

    fn mark_enhanced(&self) {
        if let Err(e) = self.element.set_attribute(ENHANCED_ATTR, "") {
            web_sys::console::warn_1(&format!("[code-copy] Failed to mark block enhanced: {:?}", e).into());
        }
    }

    fn append_button(&self, config: &CopyConfig) -> Result<DomButton> {
        let document = self.element.owner_document().context("Block is not attached to a document")?;
        let button: HtmlButtonElement = document
            .create_element("button")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| anyhow!("createElement(\"button\") did not return a button"))?;

        button.set_type("button");
        button.set_class_name(&config.button_class);
        let inset = format!("{}px", config.inset_px);
        let style = button.style();
        style.set_property("position", "absolute").map_err(js_err)?;
        style.set_property("right", &inset).map_err(js_err)?;
        style.set_property("top", &inset).map_err(js_err)?;

        self.element.append_child(&button).map_err(js_err)?;
        Ok(DomButton { element: button })
    }
}

pub struct DomButton {
    element: HtmlButtonElement,
}

impl ControlButton for DomButton {
    fn render_label(&self, icon: &str, text: &str) {
        let Some(document) = self.element.owner_document() else {
            return;
        };
        self.element.set_text_content(None);
        if !icon.is_empty()
            && let Ok(i) = document.create_element("i")
        {
            i.set_class_name(icon);
            if let Err(e) = self.element.append_child(&i) {
                web_sys::console::warn_1(&format!("[code-copy] Failed to render icon: {:?}", e).into());
            }
        }
        if let Err(e) = self.element.append_child(&document.create_text_node(&format!(" {}", text))) {
            web_sys::console::warn_1(&format!("[code-copy] Failed to render label: {:?}", e).into());
        }
    }

    fn on_activate(&self, handler: Box<dyn Fn()>) {
        let closure = Closure::<dyn Fn()>::new(move || handler());
        if let Err(e) = self
            .element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            web_sys::console::warn_1(&format!("[code-copy] Failed to bind click handler: {:?}", e).into());
        }
        // Lives as long as the page.
        closure.forget();
    }
}

// ── Clipboard / scheduling ────────────────────────────────────────────────────

pub struct NavigatorClipboard {
    clipboard: Option<web_sys::Clipboard>,
}

impl NavigatorClipboard {
    /// `navigator.clipboard` is undefined outside secure contexts; every write
    /// then fails.
    pub fn from_window(window: &Window) -> Self {
        let navigator = window.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
            .map(|value| value.unchecked_into::<web_sys::Clipboard>());
        Self { clipboard }
    }
}

impl Clipboard for NavigatorClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<()>> {
        let Some(clipboard) = &self.clipboard else {
            return future::ready(Err(anyhow!("navigator.clipboard unavailable"))).boxed_local();
        };
        let promise = clipboard.write_text(text);
        async move {
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| anyhow!("clipboard write rejected: {:?}", e))
        }
        .boxed_local()
    }
}

pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        // setTimeout takes an i32; CopyConfig::validate keeps delays below that.
        let millis = delay.as_millis().min(u128::from(MAX_RESET_DELAY_MS)) as u32;
        gloo_timers::callback::Timeout::new(millis, task).forget();
    }
}

// ── Entry ─────────────────────────────────────────────────────────────────────

/// Config embedded by the server, or defaults when absent or unusable.
fn read_config(document: &Document) -> CopyConfig {
    let Some(json) = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return CopyConfig::default();
    };
    CopyConfig::from_json_str(&json).unwrap_or_else(|e| {
        web_sys::console::warn_1(&format!("[code-copy] Ignoring embedded config: {:#}", e).into());
        CopyConfig::default()
    })
}

fn enhance_document(window: &Window, document: Document) {
    let config = Rc::new(read_config(&document));
    let clipboard: Rc<dyn Clipboard> = Rc::new(NavigatorClipboard::from_window(window));
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);

    let enhancement = initialize(&DomPage::new(document), config, clipboard, scheduler);

    for e in &enhancement.failed {
        web_sys::console::warn_1(&format!("[code-copy] Skipped block: {:#}", e).into());
    }
    web_sys::console::log_1(
        &format!(
            "[code-copy] Attached {} copy controls ({} already present)",
            enhancement.attached(),
            enhancement.already_enhanced
        )
        .into(),
    );
    CONTROLS.with(|controls| controls.borrow_mut().extend(enhancement.controls));
}

/// Enhance the current document once its structure is parsed: right away if
/// it already is, otherwise on `DOMContentLoaded`.
pub fn run_when_ready() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() != "loading" {
        enhance_document(&window, document);
        return;
    }

    let target = document.clone();
    let callback = Closure::once_into_js(move || enhance_document(&window, document));
    if let Err(e) = target.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref()) {
        web_sys::console::error_1(&format!("[code-copy] Failed to wait for DOMContentLoaded: {:?}", e).into());
    }
}
