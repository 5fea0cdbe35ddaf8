//! Flappy - a single-screen "flappy bird" arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawner, game controller)
//! - `renderer`: WebGPU rendering of the bird and pipes
//! - `platform`: Frame clock, input events, screen scaling, browser storage
//! - `persistence`: Key/value store abstraction
//! - `tuning`: Data-driven game feel
//! - `ui`: HUD labels derived from game state

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one rotation step per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 490.0;

    /// Background color (#71c5cf)
    pub const BACKGROUND_RGB: [f32; 3] = [0.443, 0.773, 0.812];
}
