//! Navigation controller
//!
//! Owns the shared UI state consumed by the navbar: the active section
//! (fed by the scroll spy) and the mobile menu flag.

use super::scroll_spy::{ScrollSpy, SectionLookup};
use super::section::Section;

/// Performs the smooth scroll. Returns false if the anchor is missing.
pub trait SectionScroller {
    fn scroll_to(&self, section: Section) -> bool;
}

impl<F> SectionScroller for F
where
    F: Fn(Section) -> bool,
{
    fn scroll_to(&self, section: Section) -> bool {
        self(section)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    spy: ScrollSpy,
    menu_open: bool,
}

impl NavigationController {
    pub fn new(scroll_offset: f64) -> Self {
        Self {
            spy: ScrollSpy::new(scroll_offset),
            menu_open: false,
        }
    }

    pub fn active_section(&self) -> Section {
        self.spy.active()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Scroll to a section by id and close the mobile menu.
    ///
    /// Unknown ids and missing anchors skip the scroll; the menu closes
    /// regardless. Returns true if a scroll was issued.
    pub fn activate(&mut self, section_id: &str, scroller: &impl SectionScroller) -> bool {
        let scrolled = match Section::from_id(section_id) {
            Ok(section) => {
                let found = scroller.scroll_to(section);
                if !found {
                    log::debug!("Navigation: #{} not in page, scroll skipped", section);
                }
                found
            }
            Err(e) => {
                log::debug!("Navigation: {}", e);
                false
            }
        };
        self.menu_open = false;
        scrolled
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Forward a scroll event to the spy. Returns true if the active section changed.
    pub fn on_scroll(&mut self, scroll_y: f64, lookup: &impl SectionLookup) -> bool {
        self.spy.update(scroll_y, lookup)
    }

    /// CSS classes for a navbar button
    pub fn item_class(&self, section: Section) -> &'static str {
        if section == self.active_section() {
            "nav-item active"
        } else {
            "nav-item"
        }
    }

    /// CSS classes for the menu container
    pub fn menu_class(&self) -> &'static str {
        if self.menu_open {
            "nav-menu active"
        } else {
            "nav-menu"
        }
    }

    /// CSS classes for the hamburger toggle
    pub fn toggle_class(&self) -> &'static str {
        if self.menu_open {
            "nav-toggle active"
        } else {
            "nav-toggle"
        }
    }
}
