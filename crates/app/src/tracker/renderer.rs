//! Status renderer: applies a presentation to the status widget.

use std::rc::Rc;

use pottydog_domain::status::{
    self, BORDER_CLASSES, CARD_ELEMENT_ID, IMAGE_ELEMENT_ID, PLACEHOLDER_ELEMENT_ID,
    StatusPresentation, TEXT_CLASSES, TEXT_ELEMENT_ID,
};

/// Element operations the renderer needs, addressed by element id.
///
/// Operations on a missing element do nothing.
pub trait StatusSurface {
    fn has_element(&self, id: &str) -> bool;
    fn remove_classes(&self, id: &str, classes: &[&str]);
    fn add_class(&self, id: &str, class: &str);
    fn set_style(&self, id: &str, property: &str, value: &str);
    fn set_attribute(&self, id: &str, name: &str, value: &str);
    fn set_text(&self, id: &str, text: &str);
    fn remove_element(&self, id: &str);
}

impl<T: StatusSurface + ?Sized> StatusSurface for Rc<T> {
    fn has_element(&self, id: &str) -> bool {
        (**self).has_element(id)
    }

    fn remove_classes(&self, id: &str, classes: &[&str]) {
        (**self).remove_classes(id, classes);
    }

    fn add_class(&self, id: &str, class: &str) {
        (**self).add_class(id, class);
    }

    fn set_style(&self, id: &str, property: &str, value: &str) {
        (**self).set_style(id, property, value);
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) {
        (**self).set_attribute(id, name, value);
    }

    fn set_text(&self, id: &str, text: &str) {
        (**self).set_text(id, text);
    }

    fn remove_element(&self, id: &str) {
        (**self).remove_element(id);
    }
}

/// Paints the card, image and text of the status widget.
pub struct StatusRenderer<S> {
    surface: S,
}

impl<S: StatusSurface> StatusRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Replace whatever the widget shows with `presentation`.
    ///
    /// Silently does nothing unless the card, image and text elements all
    /// exist. The placeholder is removed the first time and ignored after.
    pub fn render(&self, presentation: &StatusPresentation) {
        let surface = &self.surface;
        if ![CARD_ELEMENT_ID, IMAGE_ELEMENT_ID, TEXT_ELEMENT_ID]
            .iter()
            .all(|id| surface.has_element(id))
        {
            return;
        }

        surface.remove_classes(CARD_ELEMENT_ID, &BORDER_CLASSES);
        surface.remove_classes(TEXT_ELEMENT_ID, &TEXT_CLASSES);
        surface.add_class(CARD_ELEMENT_ID, presentation.style.border_class);
        surface.add_class(TEXT_ELEMENT_ID, presentation.style.text_class);

        surface.set_style(IMAGE_ELEMENT_ID, "filter", presentation.style.image_filter);
        surface.set_attribute(IMAGE_ELEMENT_ID, "src", presentation.display.image_path);

        if surface.has_element(PLACEHOLDER_ELEMENT_ID) {
            surface.remove_element(PLACEHOLDER_ELEMENT_ID);
        }
        surface.set_text(
            TEXT_ELEMENT_ID,
            &format!(" {}", presentation.display.message),
        );
    }

    /// Render the presentation of `tag`. Unknown tags are ignored.
    ///
    /// Returns whether anything was rendered.
    pub fn render_tag(&self, tag: &str) -> bool {
        match status::lookup(tag) {
            Some(presentation) => {
                self.render(presentation);
                true
            }
            None => false,
        }
    }
}
