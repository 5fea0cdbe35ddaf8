//! Game state and core simulation types
//!
//! Everything the renderer and HUD need to draw a frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::tween::AngleTween;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation frozen, restart button visible
    GameOver,
    /// Restart requested, counting down before a fresh scene
    Countdown,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Bird left the top or bottom of the screen
    OutOfBounds,
    /// Bird touched a pipe
    Collision,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    RowSpawned { gap_index: u32, score: i32 },
    NewHighScore(u32),
    GameOver { cause: GameOverCause, score: i32 },
    CountdownStarted(u8),
    CountdownTick(u8),
    Restarted,
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Anchor position
    pub pos: Vec2,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    /// Rotation in degrees
    pub angle: f32,
    /// Active jump rotation, if any
    pub tween: Option<AngleTween>,
    pub size: Vec2,
    /// Anchor as a fraction of size
    pub anchor: Vec2,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.bird_start,
            vel_y: 0.0,
            angle: 0.0,
            tween: None,
            size: tuning.bird_size,
            anchor: tuning.bird_anchor,
        }
    }

    /// Top-left of the sprite once the anchor is applied
    pub fn top_left(&self) -> Vec2 {
        self.pos - self.anchor * self.size
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.top_left(), self.size)
    }
}

/// A single pipe segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Top-left position
    pub pos: Vec2,
    /// Horizontal velocity
    pub vel_x: f32,
    pub size: Vec2,
    pub alive: bool,
}

impl Pipe {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Complete scene state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub bird: Bird,
    /// Live pipes, in spawn order
    pub pipes: Vec<Pipe>,
    /// Rows spawned minus one, so the first row shows 0
    pub score: i32,
    /// Ticks simulated in this scene
    pub time_ticks: u64,
}

impl GameState {
    /// A fresh scene: bird at the start, no pipes, score -1
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Running,
            bird: Bird::new(tuning),
            pipes: Vec::new(),
            score: -1,
            time_ticks: 0,
        }
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u32 {
        self.score.max(0) as u32
    }
}
