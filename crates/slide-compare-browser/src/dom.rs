//! `ElementBuilder` over the live DOM.

use std::rc::Rc;

use slide_compare_core::{ElementBuilder, PlatformError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// Host tooltip attachment, e.g. a note app's `setTooltip`.
pub type TooltipHook = Rc<dyn Fn(&HtmlElement, &str)>;

/// Builds comparison blocks with `document.createElement`.
///
/// Cloning is cheap: the document handle and tooltip hook are shared.
#[derive(Clone)]
pub struct DomBuilder {
    document: Document,
    tooltip: Option<TooltipHook>,
}

impl DomBuilder {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            tooltip: None,
        }
    }

    /// Builder for the current window's document, if there is one.
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }

    /// Use the host's tooltip instead of a bare `aria-label`.
    pub fn with_tooltip(mut self, hook: impl Fn(&HtmlElement, &str) + 'static) -> Self {
        self.tooltip = Some(Rc::new(hook));
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn js_error(err: JsValue) -> PlatformError {
    PlatformError(format!("{:?}", err))
}

impl ElementBuilder for DomBuilder {
    type Element = HtmlElement;

    fn create_element(&mut self, tag: &str, class: &str) -> Result<HtmlElement, PlatformError> {
        let element = self
            .document
            .create_element(tag)
            .map_err(js_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PlatformError(format!("<{}> is not an HTML element", tag)))?;
        if !class.is_empty() {
            element.set_class_name(class);
        }
        Ok(element)
    }

    fn append_child(&mut self, parent: &HtmlElement, child: &HtmlElement) {
        if let Err(e) = parent.append_child(child) {
            tracing::warn!("append_child failed: {:?}", e);
        }
    }

    fn append_sibling(&mut self, anchor: &HtmlElement, element: &HtmlElement) -> bool {
        let Some(parent) = anchor.parent_node() else {
            return false;
        };
        match parent.append_child(element) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("append_sibling failed: {:?}", e);
                false
            }
        }
    }

    fn set_attribute(&mut self, element: &HtmlElement, name: &str, value: &str) {
        if let Err(e) = element.set_attribute(name, value) {
            tracing::warn!("set_attribute {} failed: {:?}", name, e);
        }
    }

    fn set_text(&mut self, element: &HtmlElement, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_inner_html(&mut self, element: &HtmlElement, html: &str) {
        element.set_inner_html(html);
    }

    fn set_style_property(&mut self, element: &HtmlElement, name: &str, value: &str) {
        if let Err(e) = element.style().set_property(name, value) {
            tracing::warn!("set_property {} failed: {:?}", name, e);
        }
    }

    fn remove_style_property(&mut self, element: &HtmlElement, name: &str) {
        if let Err(e) = element.style().remove_property(name) {
            tracing::warn!("remove_property {} failed: {:?}", name, e);
        }
    }

    fn set_tooltip(&mut self, element: &HtmlElement, label: &str) {
        match &self.tooltip {
            Some(hook) => hook(element, label),
            None => self.set_attribute(element, "aria-label", label),
        }
    }
}
