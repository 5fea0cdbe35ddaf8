//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//! - Screen scaling on mobile
//! - Storage (sessionStorage on web)

pub mod input;
pub mod scale;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;

pub use input::InputState;
pub use scale::{Viewport, fit_viewport};
pub use time::{FpsCounter, FrameClock};
