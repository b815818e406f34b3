//! `web-sys` implementation of [`DocumentView`].
//!
//! DOM faults (bad selector, detached node) are logged at debug level and
//! treated as "nothing there": a missing element disables a feature, it
//! never aborts the event turn.

use behavior::document::DocumentView;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList, ScrollBehavior, ScrollToOptions, Window};

/// The live page. Cheap to clone: both fields are JS handles.
#[derive(Clone, Debug)]
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    /// `None` outside a document context (workers).
    pub fn from_window(window: Window) -> Option<Self> {
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Readable form of a thrown JS value.
pub fn js_reason(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn as_html(node: &Element) -> Option<&HtmlElement> {
    node.dyn_ref::<HtmlElement>()
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn logged<T>(what: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("{what} failed: {}", js_reason(&err));
            None
        }
    }
}

impl DocumentView for WebDocument {
    type Node = Element;

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        logged("querySelectorAll", self.document.query_selector_all(selector))
            .map_or_else(Vec::new, |list| elements(&list))
    }

    fn query(&self, selector: &str) -> Option<Element> {
        logged("querySelector", self.document.query_selector(selector)).flatten()
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Option<Element> {
        logged("querySelector", scope.query_selector(selector)).flatten()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_attribute(&self, node: &Element, name: &str) -> bool {
        node.has_attribute(name)
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn offset_top(&self, node: &Element) -> f64 {
        as_html(node).map_or(0.0, |el| f64::from(el.offset_top()))
    }

    fn offset_height(&self, node: &Element) -> f64 {
        as_html(node).map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn scroll_y(&self) -> f64 {
        logged("scrollY", self.window.scroll_y()).unwrap_or(0.0)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        logged("setAttribute", node.set_attribute(name, value));
    }

    fn remove_attribute(&mut self, node: &Element, name: &str) {
        logged("removeAttribute", node.remove_attribute(name));
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        logged("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        logged("classList.remove", node.class_list().remove_1(class));
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        if let Some(el) = as_html(node) {
            logged("style.setProperty", el.style().set_property(property, value));
        }
    }

    fn focus(&mut self, node: &Element) {
        if let Some(el) = as_html(node) {
            logged("focus", el.focus());
        }
    }

    fn scroll_to(&mut self, top: f64, smooth: bool) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(if smooth { ScrollBehavior::Smooth } else { ScrollBehavior::Auto });
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}
