//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod controller;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod step;
pub mod tween;

pub use collision::Aabb;
pub use controller::{Game, InputEvent};
pub use schedule::Interval;
pub use spawn::{SpawnedRow, spawn_row};
pub use state::{Bird, GameEvent, GameOverCause, GamePhase, GameState, Pipe};
pub use step::{StepOutcome, TickInput, step};
pub use tween::AngleTween;
