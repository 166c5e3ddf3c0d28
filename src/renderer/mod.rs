//! Particle field drawing backends
//!
//! The field issues three primitives through [`Painter`]; the browser
//! implementation wraps a 2D canvas context, the recording one backs the
//! headless binary and tests.

pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

pub use recording::{DrawCommand, FrameStats, RecordingPainter};

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dPainter;

use glam::Vec2;

/// Drawing surface for one frame
pub trait Painter {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);
    /// Filled circle in the particle colour
    fn fill_circle(&mut self, center: Vec2, radius: f32, alpha: f32);
    /// One-pixel line in the particle colour
    fn stroke_line(&mut self, from: Vec2, to: Vec2, alpha: f32);
}
