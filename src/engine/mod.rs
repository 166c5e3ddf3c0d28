//! Page engine
//!
//! Everything that decides what the page shows lives here. This module is
//! platform-free so it runs (and is tested) on the native target:
//! - DOM reads arrive through small lookup traits
//! - Drawing goes through `renderer::Painter`
//! - Randomness comes from a seeded RNG

pub mod carousel;
pub mod nav;
pub mod particles;
pub mod reveal;
pub mod scroll_spy;
pub mod section;

pub use carousel::{CarouselState, MediaCarousel, MediaItem, MediaKind, MediaView, Thumbnail};
pub use nav::{NavigationController, SectionScroller};
pub use particles::{FieldConfig, FieldPhase, Particle, ParticleField, link_alpha};
pub use reveal::{
    IntersectionEntry, RevealConfig, RevealSet, TargetId, intersection_ratio,
    max_intersection_ratio,
};
pub use scroll_spy::{ScrollSpy, SectionBounds, SectionLookup};
pub use section::Section;
