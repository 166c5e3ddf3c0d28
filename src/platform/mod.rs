//! Platform abstraction layer
//!
//! Browser glue for the engine:
//! - Listener and frame-loop lifetimes (`lifecycle`, native-testable)
//! - DOM geometry and scrolling (`dom`)
//! - Event subscriptions, the animation loop and the reveal watcher

pub mod lifecycle;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod frame_loop;
#[cfg(target_arch = "wasm32")]
pub mod reveal;

pub use lifecycle::{CancelToken, Scope};
