//! Demo autopilot
//!
//! Flaps toward the middle of the next gap. Used by the headless native run
//! and the in-browser demo toggle; it is not part of normal play.

use std::collections::BTreeSet;

use super::state::GameState;
use crate::tuning::Tuning;

/// How far below the gap center the bird may sink before flapping. A flap
/// lifts the bird about 61 px, so this keeps both the apex and the low
/// point inside the gap.
const FLAP_MARGIN: f32 = 26.0;

/// Anchor-space Y the bird should aim for to pass the next row.
///
/// Falls back to mid-screen when no row is ahead.
pub fn target_y(state: &GameState, tuning: &Tuning) -> f32 {
    let bird_left = state.bird.bounds().min.x;

    // Leading x of the nearest row still ahead of (or under) the bird
    let next_row_x = state
        .pipes
        .iter()
        .filter(|p| p.bounds().max.x > bird_left)
        .map(|p| p.pos.x)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let Some(row_x) = next_row_x else {
        return tuning.world_height / 2.0;
    };

    let occupied: BTreeSet<u32> = state
        .pipes
        .iter()
        .filter(|p| (p.pos.x - row_x).abs() < 1.0)
        .map(|p| ((p.pos.y - tuning.slot_offset) / tuning.slot_spacing).round() as u32)
        .collect();

    let Some(gap) = (0..tuning.row_slots).find(|s| !occupied.contains(s)) else {
        return tuning.world_height / 2.0;
    };

    // Middle of the two free slots, shifted from sprite center to anchor
    let gap_top = tuning.slot_y(gap);
    let gap_bottom = tuning.slot_y(gap + 1) + tuning.pipe_size.y;
    let center = (gap_top + gap_bottom) / 2.0;
    center - (0.5 - state.bird.anchor.y) * state.bird.size.y
}

/// Whether the autopilot would flap this tick
pub fn wants_jump(state: &GameState, tuning: &Tuning) -> bool {
    state.bird.pos.y > target_y(state, tuning) + FLAP_MARGIN
}
