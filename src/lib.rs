//! Neon Folio - client-side engine for a single-page portfolio
//!
//! Core modules:
//! - `engine`: Platform-free page logic (scroll spy, navigation, reveal, particles, lightbox)
//! - `renderer`: Drawing backends for the particle field
//! - `platform`: Browser bindings and listener lifecycle
//! - `content`: Portfolio catalogue (projects, achievements, tech stack)
//! - `settings`: Animation preferences persisted in LocalStorage

pub mod content;
pub mod engine;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;

pub use content::Catalogue;
pub use error::{EngineError, Result};
pub use settings::{QualityPreset, Settings};

/// Engine configuration constants
pub mod consts {
    /// Offset added to the scroll position before testing section bounds (px)
    pub const SCROLL_SPY_OFFSET: f64 = 100.0;

    /// Particles created when the field starts
    pub const PARTICLE_COUNT: usize = 100;
    /// Velocity components are drawn from [-MAX, MAX) units/tick
    pub const PARTICLE_MAX_SPEED: f32 = 0.25;
    pub const PARTICLE_MIN_RADIUS: f32 = 1.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 3.0;
    /// Fill opacity is re-rolled every frame in [MIN, MAX)
    pub const PARTICLE_MIN_ALPHA: f32 = 0.1;
    pub const PARTICLE_MAX_ALPHA: f32 = 0.4;

    /// Pairs closer than this get a connecting line
    pub const LINK_DISTANCE: f32 = 100.0;
    /// Line opacity for two coincident particles
    pub const LINK_MAX_ALPHA: f32 = 0.1;

    /// Particle and link colour (rgb of `--primary`)
    pub const PARTICLE_RGB: (u8, u8, u8) = (0, 212, 255);

    /// Intersection ratio at which a target is revealed
    pub const REVEAL_THRESHOLD: f64 = 0.1;
    /// Trigger region is shrunk this much from the viewport bottom (px)
    pub const REVEAL_BOTTOM_MARGIN: f64 = 50.0;
    /// CSS class marking reveal targets
    pub const REVEAL_CLASS: &str = "scroll-reveal";
    /// CSS class added once a target is revealed
    pub const REVEALED_CLASS: &str = "revealed";
}

/// CSS `rgba()` colour for the particle palette at the given opacity
#[inline]
pub fn rgba(alpha: f32) -> String {
    let (r, g, b) = consts::PARTICLE_RGB;
    format!("rgba({r}, {g}, {b}, {alpha})")
}

/// Capitalize the first character (`"projects"` -> `"Projects"`)
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
