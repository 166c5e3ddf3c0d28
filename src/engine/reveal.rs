//! Reveal-on-scroll bookkeeping
//!
//! The browser's IntersectionObserver delivers entries; this module owns
//! the one-way visible flags. A target flips to visible the first time it
//! intersects the trigger region at or above the threshold and never
//! flips back. Targets taller than the region allows for the threshold
//! flip as soon as they intersect at all.

use crate::consts::{REVEAL_BOTTOM_MARGIN, REVEAL_THRESHOLD};

/// Handle for a registered target (index into the set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub usize);

/// Watcher options shared by every target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Fraction of the target's area that must intersect
    pub threshold: f64,
    /// Trigger region shrink from the viewport bottom (px)
    pub bottom_margin: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            bottom_margin: REVEAL_BOTTOM_MARGIN,
        }
    }
}

impl RevealConfig {
    /// `rootMargin` string for IntersectionObserverInit
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }
}

/// One observation delivered by the watcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: TargetId,
    pub is_intersecting: bool,
    pub ratio: f64,
    /// Largest ratio this target can reach in the trigger region
    pub max_ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: TargetId, is_intersecting: bool, ratio: f64) -> Self {
        Self {
            target,
            is_intersecting,
            ratio,
            max_ratio: 1.0,
        }
    }

    pub fn with_max_ratio(mut self, max_ratio: f64) -> Self {
        self.max_ratio = max_ratio;
        self
    }
}

/// Fraction of a target visible inside the trigger region.
///
/// Coordinates are viewport-relative. The trigger region is
/// `[0, viewport_height - bottom_margin]`. Zero-height targets count as
/// fully visible while their top edge lies inside the region.
pub fn intersection_ratio(top: f64, height: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
    let root_bottom = (viewport_height - bottom_margin).max(0.0);
    if height <= 0.0 {
        return if (0.0..=root_bottom).contains(&top) { 1.0 } else { 0.0 };
    }
    let overlap = (top + height).min(root_bottom) - top.max(0.0);
    (overlap / height).clamp(0.0, 1.0)
}

/// Largest ratio a target of `height` can reach inside the trigger region
pub fn max_intersection_ratio(height: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
    if height <= 0.0 {
        return 1.0;
    }
    let region = (viewport_height - bottom_margin).max(0.0);
    (region / height).min(1.0)
}

/// Visible flags for every registered target
#[derive(Debug, Clone)]
pub struct RevealSet {
    config: RevealConfig,
    visible: Vec<bool>,
    connected: bool,
}

impl Default for RevealSet {
    fn default() -> Self {
        Self::new(RevealConfig::default())
    }
}

impl RevealSet {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            visible: Vec::new(),
            connected: true,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Register a target. New targets start hidden.
    pub fn observe(&mut self) -> TargetId {
        self.visible.push(false);
        TargetId(self.visible.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn is_visible(&self, id: TargetId) -> bool {
        self.visible.get(id.0).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// Whether this entry satisfies the reveal condition
    pub fn triggers(&self, entry: &IntersectionEntry) -> bool {
        let threshold = self.config.threshold;
        entry.is_intersecting && (entry.ratio >= threshold || entry.max_ratio < threshold)
    }

    /// Apply a batch of entries. Returns the targets revealed by this batch,
    /// in delivery order.
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry]) -> Vec<TargetId> {
        if !self.connected {
            return Vec::new();
        }

        let mut revealed = Vec::new();
        for entry in entries {
            if !self.triggers(entry) {
                continue;
            }
            match self.visible.get_mut(entry.target.0) {
                Some(flag) if !*flag => {
                    *flag = true;
                    revealed.push(entry.target);
                }
                Some(_) => {}
                None => log::debug!("Reveal: entry for unregistered target {:?}", entry.target),
            }
        }
        revealed
    }

    /// Stop accepting entries. Idempotent.
    pub fn disconnect(&mut self) {
        if self.connected {
            log::debug!(
                "Reveal watcher disconnected ({}/{} revealed)",
                self.revealed_count(),
                self.len()
            );
        }
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: TargetId, ratio: f64) -> IntersectionEntry {
        IntersectionEntry::new(id, ratio > 0.0, ratio)
    }

    #[test]
    fn test_root_margin_string() {
        assert_eq!(RevealConfig::default().root_margin(), "0px 0px -50px 0px");
    }

    #[test]
    fn test_reveal_once_and_never_revert() {
        let mut set = RevealSet::new(RevealConfig::default());
        let a = set.observe();

        assert!(set.on_intersection(&[entry(a, 0.05)]).is_empty());
        assert!(!set.is_visible(a));

        assert_eq!(set.on_intersection(&[entry(a, 0.1)]), vec![a]);
        assert!(set.is_visible(a));

        // Leaving and re-entering does nothing further
        assert!(set.on_intersection(&[entry(a, 0.0)]).is_empty());
        assert!(set.is_visible(a));
        assert!(set.on_intersection(&[entry(a, 0.8)]).is_empty());
        assert!(set.is_visible(a));
    }

    #[test]
    fn test_batch_reveals_each_target_once() {
        let mut set = RevealSet::new(RevealConfig::default());
        let a = set.observe();
        let b = set.observe();
        let c = set.observe();

        let batch = [entry(b, 0.5), entry(a, 0.0), entry(b, 0.6), entry(c, 1.0)];
        let revealed = set.on_intersection(&batch);
        assert_eq!(revealed, vec![b, c]);
        assert_eq!(set.revealed_count(), 2);
    }

    #[test]
    fn test_disconnect_stops_updates() {
        let mut set = RevealSet::new(RevealConfig::default());
        let a = set.observe();
        set.disconnect();
        set.disconnect();
        assert!(!set.is_connected());
        assert!(set.on_intersection(&[entry(a, 1.0)]).is_empty());
        assert!(!set.is_visible(a));
    }

    #[test]
    fn test_unknown_target_ignored() {
        let mut set = RevealSet::new(RevealConfig::default());
        assert!(set.on_intersection(&[entry(TargetId(3), 1.0)]).is_empty());
    }

    #[test]
    fn test_intersection_ratio_respects_bottom_margin() {
        // 1000px viewport, trigger region ends at 950
        // Target of height 100 starting at 940: only 10px inside
        let r = intersection_ratio(940.0, 100.0, 1000.0, 50.0);
        assert!((r - 0.1).abs() < 1e-9);

        // Starting at 960 it is in the viewport but below the trigger line
        assert_eq!(intersection_ratio(960.0, 100.0, 1000.0, 50.0), 0.0);

        // Fully inside
        assert_eq!(intersection_ratio(100.0, 100.0, 1000.0, 50.0), 1.0);

        // Scrolled above the viewport
        assert_eq!(intersection_ratio(-200.0, 100.0, 1000.0, 50.0), 0.0);
    }

    #[test]
    fn test_simulated_scroll_reveals_at_threshold() {
        let config = RevealConfig::default();
        let mut set = RevealSet::new(config);
        let id = set.observe();

        // Element at document y=2000, height 400, viewport 800
        let (doc_top, height, vh) = (2000.0, 400.0, 800.0);
        let mut first_reveal = None;
        for scroll in (0..3000).step_by(10) {
            let top = doc_top - scroll as f64;
            let ratio = intersection_ratio(top, height, vh, config.bottom_margin);
            let max = max_intersection_ratio(height, vh, config.bottom_margin);
            let e = IntersectionEntry::new(id, ratio > 0.0, ratio).with_max_ratio(max);
            if !set.on_intersection(&[e]).is_empty() {
                assert!(first_reveal.is_none());
                first_reveal = Some(scroll);
            }
        }
        // Needs 40px (10%) above the 750px trigger line: top <= 710
        assert_eq!(first_reveal, Some(1290));
        assert!(set.is_visible(id));
    }

    #[test]
    fn test_max_intersection_ratio() {
        assert_eq!(max_intersection_ratio(400.0, 800.0, 50.0), 1.0);
        assert!((max_intersection_ratio(7500.0, 800.0, 50.0) - 0.1).abs() < 1e-9);
        assert_eq!(max_intersection_ratio(0.0, 800.0, 50.0), 1.0);
    }

    #[test]
    fn test_tall_target_reveals_on_first_intersection() {
        let config = RevealConfig::default();
        let mut set = RevealSet::new(config);
        let id = set.observe();

        // 8000px target can cover at most 750/8000 of itself
        let (doc_top, height, vh) = (1000.0, 8000.0, 800.0);
        let max = max_intersection_ratio(height, vh, config.bottom_margin);
        assert!(max < config.threshold);

        let mut first_reveal = None;
        for scroll in (0..10000).step_by(10) {
            let top = doc_top - scroll as f64;
            let ratio = intersection_ratio(top, height, vh, config.bottom_margin);
            let e = IntersectionEntry::new(id, ratio > 0.0, ratio).with_max_ratio(max);
            if !set.on_intersection(&[e]).is_empty() && first_reveal.is_none() {
                first_reveal = Some(scroll);
            }
        }
        // Top edge crosses the 750px trigger line after 250px of scrolling
        assert_eq!(first_reveal, Some(260));
        assert!(set.is_visible(id));
    }

    #[test]
    fn test_tall_target_not_intersecting_stays_hidden() {
        let mut set = RevealSet::new(RevealConfig::default());
        let id = set.observe();
        let e = IntersectionEntry::new(id, false, 0.0).with_max_ratio(0.05);
        assert!(set.on_intersection(&[e]).is_empty());
        assert!(!set.is_visible(id));
    }
}
