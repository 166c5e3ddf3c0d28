//! Media lightbox state machine
//!
//! Closed until a project with media opens it; next/previous wrap around,
//! goTo rejects indices outside the gallery; close drops the session.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Kind of media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One image or video attached to a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl MediaItem {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
            title: None,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: url.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Drive share links can't play in `<video>` and are embedded instead
    pub fn is_drive_link(&self) -> bool {
        self.url.contains("drive.google.com")
    }

    /// Caption shown under the media: its title, else a numbered default
    pub fn caption(&self, index: usize) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => match self.kind {
                MediaKind::Video => format!("Demo Video {}", index + 1),
                MediaKind::Image => format!("Screenshot {}", index + 1),
            },
        }
    }

    /// How the item is embedded when displayed
    pub fn view(&self, index: usize) -> MediaView {
        let caption = self.caption(index);
        match self.kind {
            MediaKind::Video if self.is_drive_link() => MediaView::Embed {
                src: self.url.replace("/view?usp=sharing", "/preview"),
                caption,
            },
            MediaKind::Video => MediaView::Video {
                src: self.url.clone(),
                caption,
            },
            MediaKind::Image => MediaView::Image {
                src: self.url.clone(),
                caption,
            },
        }
    }
}

/// Display element for the current item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaView {
    /// `<iframe>` player (hosted video)
    Embed { src: String, caption: String },
    /// `<video controls>`
    Video { src: String, caption: String },
    /// `<img>`
    Image { src: String, caption: String },
}

impl MediaView {
    pub fn src(&self) -> &str {
        match self {
            MediaView::Embed { src, .. }
            | MediaView::Video { src, .. }
            | MediaView::Image { src, .. } => src,
        }
    }

    pub fn caption(&self) -> &str {
        match self {
            MediaView::Embed { caption, .. }
            | MediaView::Video { caption, .. }
            | MediaView::Image { caption, .. } => caption,
        }
    }
}

/// Entry in the lightbox thumbnail strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub index: usize,
    /// Image source; videos have none and show a play marker
    pub image: Option<String>,
    pub active: bool,
}

impl Thumbnail {
    /// 1-based position shown under the thumbnail
    pub fn label(&self) -> String {
        (self.index + 1).to_string()
    }
}

/// An open gallery session.
///
/// `items` is never empty and never changes; `current` is always a valid
/// index into it.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    items: Vec<MediaItem>,
    current: usize,
    subject: String,
}

impl CarouselState {
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &MediaItem {
        &self.items[self.current]
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `"2 of 5"`
    pub fn counter(&self) -> String {
        format!("{} of {}", self.current + 1, self.items.len())
    }

    /// One flag per item, true for the displayed one
    pub fn indicators(&self) -> Vec<bool> {
        (0..self.items.len()).map(|i| i == self.current).collect()
    }

    /// Thumbnail strip, one entry per item
    pub fn thumbnails(&self) -> Vec<Thumbnail> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| Thumbnail {
                index,
                image: (item.kind == MediaKind::Image).then(|| item.url.clone()),
                active: index == self.current,
            })
            .collect()
    }

    pub fn view(&self) -> MediaView {
        self.current().view(self.current)
    }
}

/// Lightbox controller
#[derive(Debug, Clone, Default)]
pub struct MediaCarousel {
    session: Option<CarouselState>,
}

impl MediaCarousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> Option<&CarouselState> {
        self.session.as_ref()
    }

    /// Open a fresh session at the first item. Replaces any open session.
    pub fn open_gallery(
        &mut self,
        items: Vec<MediaItem>,
        subject: impl Into<String>,
    ) -> Result<&CarouselState> {
        let subject = subject.into();
        if items.is_empty() {
            return Err(EngineError::EmptyGallery { subject });
        }
        log::info!("Opening gallery for {:?} ({} items)", subject, items.len());
        Ok(&*self.session.insert(CarouselState {
            items,
            current: 0,
            subject,
        }))
    }

    /// Advance with wrap-around. Returns the new index, None when closed.
    pub fn next(&mut self) -> Option<usize> {
        let s = self.session.as_mut()?;
        s.current = (s.current + 1) % s.items.len();
        Some(s.current)
    }

    /// Step back with wrap-around. Returns the new index, None when closed.
    pub fn previous(&mut self) -> Option<usize> {
        let s = self.session.as_mut()?;
        let n = s.items.len();
        s.current = (s.current + n - 1) % n;
        Some(s.current)
    }

    /// Jump to an index. Out-of-range indices are a caller bug and fail
    /// without touching the state. A closed carousel reports a length of 0.
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        let len = self.session.as_ref().map_or(0, |s| s.items.len());
        match self.session.as_mut() {
            Some(s) if index < len => {
                s.current = index;
                Ok(())
            }
            _ => Err(EngineError::OutOfRange { index, len }),
        }
    }

    /// Drop the session. Idempotent.
    pub fn close(&mut self) {
        if let Some(s) = self.session.take() {
            log::info!("Closing gallery for {:?}", s.subject);
        }
    }

    /// Media failed to load. Logged only; the session stays usable.
    pub fn report_load_failure(&self, index: usize, reason: &str) {
        match self.session.as_ref().and_then(|s| s.items.get(index)) {
            Some(item) => log::error!("{:?} load error: {} ({})", item.kind, item.url, reason),
            None => log::error!("Media load error for stale item {}: {}", index, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items(n: usize) -> Vec<MediaItem> {
        (0..n).map(|i| MediaItem::image(format!("/images/shot{i}.png"))).collect()
    }

    #[test]
    fn test_open_starts_at_zero() {
        let mut c = MediaCarousel::new();
        assert!(!c.is_open());
        let state = c.open_gallery(items(3), "Shop").unwrap();
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.subject(), "Shop");
        assert!(c.is_open());
    }

    #[test]
    fn test_open_empty_fails() {
        let mut c = MediaCarousel::new();
        let err = c.open_gallery(Vec::new(), "Thesis").unwrap_err();
        assert!(matches!(err, EngineError::EmptyGallery { .. }));
        assert!(!c.is_open());
    }

    #[test]
    fn test_next_wraps_to_first() {
        let mut c = MediaCarousel::new();
        c.open_gallery(items(3), "p").unwrap();
        assert_eq!(c.next(), Some(1));
        assert_eq!(c.next(), Some(2));
        assert_eq!(c.next(), Some(0));
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut c = MediaCarousel::new();
        c.open_gallery(items(3), "p").unwrap();
        assert_eq!(c.previous(), Some(2));
        assert_eq!(c.previous(), Some(1));
    }

    #[test]
    fn test_single_item_stays_put() {
        let mut c = MediaCarousel::new();
        c.open_gallery(items(1), "p").unwrap();
        assert_eq!(c.next(), Some(0));
        assert_eq!(c.previous(), Some(0));
    }

    #[test]
    fn test_go_to_bounds() {
        let mut c = MediaCarousel::new();
        c.open_gallery(items(2), "p").unwrap();
        let err = c.go_to(5).unwrap_err();
        assert!(matches!(err, EngineError::OutOfRange { index: 5, len: 2 }));
        assert_eq!(c.state().unwrap().current_index(), 0);

        c.go_to(1).unwrap();
        assert_eq!(c.state().unwrap().current_index(), 1);
        assert!(c.go_to(2).is_err());
    }

    #[test]
    fn test_closed_carousel_ignores_navigation() {
        let mut c = MediaCarousel::new();
        assert_eq!(c.next(), None);
        assert_eq!(c.previous(), None);
        assert!(matches!(c.go_to(0), Err(EngineError::OutOfRange { index: 0, len: 0 })));
        c.close();
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut c = MediaCarousel::new();
        c.open_gallery(items(3), "p").unwrap();
        c.go_to(2).unwrap();
        c.close();
        assert!(!c.is_open());
        let state = c.open_gallery(items(3), "p").unwrap();
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_load_failure_keeps_session() {
        let mut c = MediaCarousel::new();
        c.open_gallery(items(2), "p").unwrap();
        c.report_load_failure(0, "404");
        c.report_load_failure(9, "stale");
        assert!(c.is_open());
        assert_eq!(c.next(), Some(1));
    }

    #[test]
    fn test_views() {
        let drive = MediaItem::video("https://drive.google.com/file/d/abc/view?usp=sharing");
        assert_eq!(
            drive.view(0),
            MediaView::Embed {
                src: "https://drive.google.com/file/d/abc/preview".into(),
                caption: "Demo Video 1".into(),
            }
        );

        let clip = MediaItem::video("/media/demo.mp4").with_title("Checkout flow");
        let view = clip.view(3);
        assert!(matches!(view, MediaView::Video { ref caption, .. } if caption == "Checkout flow"));

        let shot = MediaItem::image("/images/cart.png");
        let view = shot.view(1);
        assert_eq!(view.src(), "/images/cart.png");
        assert_eq!(view.caption(), "Screenshot 2");
    }

    #[test]
    fn test_counter_and_indicators() {
        let mut c = MediaCarousel::new();
        c.open_gallery(items(3), "p").unwrap();
        c.next();
        let s = c.state().unwrap();
        assert_eq!(s.counter(), "2 of 3");
        assert_eq!(s.indicators(), vec![false, true, false]);
        assert_eq!(s.view().src(), "/images/shot1.png");
    }

    #[test]
    fn test_thumbnails_follow_current() {
        let mut c = MediaCarousel::new();
        let gallery = vec![
            MediaItem::video("https://drive.google.com/file/d/abc/view?usp=sharing"),
            MediaItem::image("/images/cart.png"),
        ];
        c.open_gallery(gallery, "Shop").unwrap();
        c.go_to(1).unwrap();

        let thumbs = c.state().unwrap().thumbnails();
        assert_eq!(thumbs.len(), 2);
        assert_eq!(thumbs[0].image, None);
        assert!(!thumbs[0].active);
        assert_eq!(thumbs[0].label(), "1");
        assert_eq!(thumbs[1].image.as_deref(), Some("/images/cart.png"));
        assert!(thumbs[1].active);
        assert_eq!(thumbs[1].label(), "2");
    }

    #[test]
    fn test_media_item_json() {
        let json = r#"{"type":"video","url":"https://x/v.mp4"}"#;
        let item: MediaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item, MediaItem::video("https://x/v.mp4"));
    }

    proptest! {
        #[test]
        fn prop_next_n_times_is_identity(n in 1usize..20, start in 0usize..20) {
            let start = start % n;
            let mut c = MediaCarousel::new();
            c.open_gallery(items(n), "p").unwrap();
            c.go_to(start).unwrap();
            for _ in 0..n {
                c.next();
            }
            prop_assert_eq!(c.state().unwrap().current_index(), start);
        }

        #[test]
        fn prop_previous_inverts_next(n in 1usize..20, start in 0usize..20) {
            let start = start % n;
            let mut c = MediaCarousel::new();
            c.open_gallery(items(n), "p").unwrap();

            c.go_to(start).unwrap();
            c.next();
            prop_assert_eq!(c.previous(), Some(start));

            c.previous();
            prop_assert_eq!(c.next(), Some(start));
        }

        #[test]
        fn prop_go_to_accepts_exactly_in_range(n in 1usize..20, index in 0usize..40) {
            let mut c = MediaCarousel::new();
            c.open_gallery(items(n), "p").unwrap();
            let result = c.go_to(index);
            prop_assert_eq!(result.is_ok(), index < n);
            let expected = if index < n { index } else { 0 };
            prop_assert_eq!(c.state().unwrap().current_index(), expected);
        }
    }
}
