//! Pipe row spawner

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Pipe};
use crate::tuning::Tuning;

/// What a single spawn produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedRow {
    /// First of the two empty slots
    pub gap_index: u32,
    /// Pipes appended to the scene
    pub pipes: usize,
    /// Score after the spawn
    pub score: i32,
}

/// Append a row of pipes with one random two-slot gap and bump the score.
///
/// The gap is re-rolled independently on every call.
pub fn spawn_row<R: Rng + ?Sized>(state: &mut GameState, tuning: &Tuning, rng: &mut R) -> SpawnedRow {
    let gap_max = tuning.gap_max.max(tuning.gap_min);
    let gap_index = rng.random_range(tuning.gap_min..=gap_max);

    state.pipes.reserve(tuning.pipes_per_row());
    let mut pipes = 0;
    for slot in 0..tuning.row_slots {
        if slot == gap_index || slot == gap_index + 1 {
            continue;
        }
        state.pipes.push(Pipe {
            pos: Vec2::new(tuning.spawn_x, tuning.slot_y(slot)),
            vel_x: tuning.pipe_speed,
            size: tuning.pipe_size,
            alive: true,
        });
        pipes += 1;
    }

    state.score += 1;

    SpawnedRow {
        gap_index,
        pipes,
        score: state.score,
    }
}
