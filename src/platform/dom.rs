//! DOM access for the engine's lookup traits

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

use crate::engine::{Section, SectionBounds};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

pub fn by_id(id: &str) -> Option<Element> {
    document().and_then(|d| d.get_element_by_id(id))
}

/// Current vertical scroll offset (0 if unavailable)
pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// `prefers-reduced-motion: reduce` media query (false if unsupported)
pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|m| m.matches())
}

/// Viewport size in CSS pixels
pub fn viewport_size() -> Option<(f64, f64)> {
    let w = window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

/// Offset geometry of a section anchor
pub fn section_bounds(section: Section) -> Option<SectionBounds> {
    let el: HtmlElement = by_id(section.id())?.dyn_into().ok()?;
    Some(SectionBounds::new(el.offset_top() as f64, el.offset_height() as f64))
}

/// Smooth-scroll a section's top to the top of the viewport
pub fn scroll_to_section(section: Section) -> bool {
    let Some(el) = by_id(section.id()) else {
        return false;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    el.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

/// Create an element with a class attribute
pub fn element(document: &Document, tag: &str, class: &str) -> Option<Element> {
    let el = document.create_element(tag).ok()?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Some(el)
}

/// Create an element with a class and text content
pub fn text_element(document: &Document, tag: &str, class: &str, text: &str) -> Option<Element> {
    let el = element(document, tag, class)?;
    el.set_text_content(Some(text));
    Some(el)
}
