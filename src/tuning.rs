//! Data-driven game feel
//!
//! Every number that shapes how the game plays lives here. The defaults
//! reproduce the classic feel; a JSON override can be loaded for testing or
//! experimentation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bird ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
    /// Angle the jump tween rotates toward (degrees)
    pub jump_tween_angle: f32,
    /// Jump tween duration (seconds)
    pub jump_tween_secs: f32,
    /// Idle tilt ceiling (degrees)
    pub max_angle: f32,
    /// Idle tilt added per tick (degrees)
    pub angle_step: f32,
    /// Anchor position the bird starts at
    pub bird_start: Vec2,
    /// Bird sprite size
    pub bird_size: Vec2,
    /// Sprite anchor as a fraction of size (hit box offset)
    pub bird_anchor: Vec2,

    // === Pipes ===
    /// Horizontal pipe velocity (pixels/s)
    pub pipe_speed: f32,
    /// Pipe sprite size
    pub pipe_size: Vec2,
    /// X position new rows appear at
    pub spawn_x: f32,
    /// Seconds between rows
    pub spawn_period_secs: f32,
    /// Candidate slots per row
    pub row_slots: u32,
    /// Vertical distance between slots
    pub slot_spacing: f32,
    /// Y of the first slot
    pub slot_offset: f32,
    /// Smallest gap index
    pub gap_min: u32,
    /// Largest gap index (inclusive)
    pub gap_max: u32,

    // === Restart ===
    /// Countdown start value
    pub countdown_from: u8,
    /// Seconds per countdown step
    pub countdown_period_secs: f32,

    // === Bounds ===
    /// The bird dies above 0 or below this
    pub world_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1000.0,
            jump_velocity: -350.0,
            jump_tween_angle: -20.0,
            jump_tween_secs: 0.1,
            max_angle: 20.0,
            angle_step: 1.0,
            bird_start: Vec2::new(100.0, 245.0),
            bird_size: Vec2::new(50.0, 50.0),
            bird_anchor: Vec2::new(-0.2, 0.5),

            pipe_speed: -200.0,
            pipe_size: Vec2::new(50.0, 50.0),
            spawn_x: crate::consts::SCREEN_WIDTH,
            spawn_period_secs: 1.5,
            row_slots: 8,
            slot_spacing: 60.0,
            slot_offset: 10.0,
            gap_min: 1,
            gap_max: 5,

            countdown_from: 3,
            countdown_period_secs: 1.0,

            world_height: crate::consts::SCREEN_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse a tuning override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Y position of a row slot
    pub fn slot_y(&self, slot: u32) -> f32 {
        slot as f32 * self.slot_spacing + self.slot_offset
    }

    /// Number of pipes every row contains (all slots minus the two-slot gap)
    pub fn pipes_per_row(&self) -> usize {
        self.row_slots.saturating_sub(2) as usize
    }
}
