//! [`StatusSurface`] over the page document.

use pottydog_app::tracker::StatusSurface;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Looks elements up by id on every call, so it survives re-renders.
#[derive(Debug, Clone)]
pub struct DomStatusSurface {
    document: Document,
}

impl DomStatusSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Surface over the current window's document, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

impl StatusSurface for DomStatusSurface {
    fn has_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn remove_classes(&self, id: &str, classes: &[&str]) {
        let Some(element) = self.element(id) else {
            return;
        };
        let list = element.class_list();
        for class in classes {
            if let Err(err) = list.remove_1(class) {
                leptos::logging::warn!("failed to remove class {class} from #{id}: {err:?}");
            }
        }
    }

    fn add_class(&self, id: &str, class: &str) {
        if let Some(element) = self.element(id)
            && let Err(err) = element.class_list().add_1(class)
        {
            leptos::logging::warn!("failed to add class {class} to #{id}: {err:?}");
        }
    }

    fn set_style(&self, id: &str, property: &str, value: &str) {
        let Some(element) = self
            .element(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        if let Err(err) = element.style().set_property(property, value) {
            leptos::logging::warn!("failed to set {property} on #{id}: {err:?}");
        }
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) {
        if let Some(element) = self.element(id)
            && let Err(err) = element.set_attribute(name, value)
        {
            leptos::logging::warn!("failed to set {name} on #{id}: {err:?}");
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }

    fn remove_element(&self, id: &str) {
        if let Some(element) = self.element(id) {
            element.remove();
        }
    }
}
