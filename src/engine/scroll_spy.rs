//! Active-section tracking
//!
//! Recomputed on every scroll event and once at mount.

use super::section::Section;
use crate::consts::SCROLL_SPY_OFFSET;

/// Vertical extent of a section anchor (document coordinates, px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Half-open containment: `[top, top + height)`
    #[inline]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Source of section geometry. `None` means the anchor is not in the page.
pub trait SectionLookup {
    fn bounds(&self, section: Section) -> Option<SectionBounds>;
}

impl<F> SectionLookup for F
where
    F: Fn(Section) -> Option<SectionBounds>,
{
    fn bounds(&self, section: Section) -> Option<SectionBounds> {
        self(section)
    }
}

/// Tracks which section the reader is in
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    active: Section,
    offset: f64,
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self::new(SCROLL_SPY_OFFSET)
    }
}

impl ScrollSpy {
    pub fn new(offset: f64) -> Self {
        Self {
            active: Section::Home,
            offset,
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// Recompute the active section for a scroll offset.
    ///
    /// Sections are tested in declaration order and the last match wins.
    /// With no match the previous value is kept. Returns true if the active
    /// section changed.
    pub fn update(&mut self, scroll_y: f64, lookup: &impl SectionLookup) -> bool {
        let position = scroll_y + self.offset;
        let mut hit = None;

        for section in Section::ALL {
            match lookup.bounds(section) {
                Some(bounds) if bounds.contains(position) => hit = Some(section),
                Some(_) => {}
                None => log::debug!("Scroll spy: no anchor for #{}", section),
            }
        }

        match hit {
            Some(section) if section != self.active => {
                log::debug!("Active section: {} -> {}", self.active, section);
                self.active = section;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout(heights: [f64; 4]) -> impl Fn(Section) -> Option<SectionBounds> {
        move |section: Section| {
            let idx = Section::ALL.iter().position(|s| *s == section)?;
            let top = heights[..idx].iter().sum();
            Some(SectionBounds::new(top, heights[idx]))
        }
    }

    #[test]
    fn test_scroll_into_about() {
        let lookup = |section: Section| match section {
            Section::Home => Some(SectionBounds::new(0.0, 800.0)),
            Section::About => Some(SectionBounds::new(800.0, 600.0)),
            _ => None,
        };
        let mut spy = ScrollSpy::default();
        assert!(spy.update(750.0, &lookup));
        assert_eq!(spy.active(), Section::About);
    }

    #[test]
    fn test_no_match_keeps_previous() {
        let mut spy = ScrollSpy::default();
        let lookup = layout([800.0, 600.0, 1000.0, 400.0]);
        spy.update(1500.0, &lookup);
        assert_eq!(spy.active(), Section::Projects);

        // Past the end of the page
        assert!(!spy.update(10_000.0, &lookup));
        assert_eq!(spy.active(), Section::Projects);
    }

    #[test]
    fn test_missing_anchor_skips_only_that_section() {
        let lookup = |section: Section| match section {
            Section::About => None,
            Section::Home => Some(SectionBounds::new(0.0, 500.0)),
            Section::Projects => Some(SectionBounds::new(500.0, 500.0)),
            Section::Contact => Some(SectionBounds::new(1000.0, 500.0)),
        };
        let mut spy = ScrollSpy::default();
        spy.update(450.0, &lookup);
        assert_eq!(spy.active(), Section::Projects);
    }

    #[test]
    fn test_overlap_last_match_wins() {
        // Contact overlaps projects entirely
        let lookup = |section: Section| match section {
            Section::Projects => Some(SectionBounds::new(0.0, 1000.0)),
            Section::Contact => Some(SectionBounds::new(0.0, 1000.0)),
            _ => None,
        };
        let mut spy = ScrollSpy::default();
        spy.update(0.0, &lookup);
        assert_eq!(spy.active(), Section::Contact);
    }

    #[test]
    fn test_zero_height_never_matches() {
        let lookup = |section: Section| match section {
            Section::Home => Some(SectionBounds::new(0.0, 400.0)),
            Section::About => Some(SectionBounds::new(400.0, 0.0)),
            _ => None,
        };
        let mut spy = ScrollSpy::default();
        spy.update(300.0, &lookup);
        assert_eq!(spy.active(), Section::Home);
    }

    #[test]
    fn test_boundary_is_half_open() {
        let lookup = layout([800.0, 600.0, 1000.0, 400.0]);
        let mut spy = ScrollSpy::default();
        // 700 + 100 = 800 is the first pixel of about
        spy.update(700.0, &lookup);
        assert_eq!(spy.active(), Section::About);
        spy.update(699.0, &lookup);
        assert_eq!(spy.active(), Section::Home);
    }

    proptest! {
        #[test]
        fn prop_active_contains_position(
            heights in prop::array::uniform4(1.0f64..2000.0),
            scroll in 0.0f64..10_000.0,
        ) {
            let lookup = layout(heights);
            let mut spy = ScrollSpy::default();
            let before = spy.active();
            spy.update(scroll, &lookup);

            let position = scroll + SCROLL_SPY_OFFSET;
            let expected = Section::ALL
                .into_iter()
                .filter(|s| lookup(*s).is_some_and(|b| b.contains(position)))
                .last()
                .unwrap_or(before);
            prop_assert_eq!(spy.active(), expected);
        }
    }
}
