//! Per-tick simulation step
//!
//! Pure function over `GameState`: the controller decides when it runs and
//! what a non-`Continue` outcome means.

use super::state::{GameEvent, GameOverCause, GameState};
use super::tween::AngleTween;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key was pressed since the last tick
    pub jump: bool,
    /// Pointer/touch is currently held down (jumps every tick while held)
    pub pointer_held: bool,
}

impl TickInput {
    pub fn is_jump_active(&self) -> bool {
        self.jump || self.pointer_held
    }
}

/// Result of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    GameOver(GameOverCause),
}

/// Advance the scene by one fixed timestep.
///
/// Order is fixed: integrate, jump, tilt, bounds check, collision check.
/// An out-of-bounds bird skips the collision check.
pub fn step(
    state: &mut GameState,
    jump: bool,
    tuning: &Tuning,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> StepOutcome {
    state.time_ticks += 1;

    // Gravity and integration
    let bird = &mut state.bird;
    bird.vel_y += tuning.gravity * dt;
    bird.pos.y += bird.vel_y * dt;

    for pipe in &mut state.pipes {
        pipe.pos.x += pipe.vel_x * dt;
        if pipe.bounds().is_left_of(0.0) {
            pipe.alive = false;
        }
    }
    state.pipes.retain(|p| p.alive);

    // Jump resets velocity and kicks off the nose-up tween
    if jump {
        bird.vel_y = tuning.jump_velocity;
        bird.tween = Some(AngleTween::new(
            bird.angle,
            tuning.jump_tween_angle,
            tuning.jump_tween_secs,
        ));
        events.push(GameEvent::Jumped);
    }

    // Idle tilt runs even while the jump tween is active; the tween wins
    // until it finishes
    if bird.angle < tuning.max_angle {
        bird.angle = (bird.angle + tuning.angle_step).min(tuning.max_angle);
    }
    if let Some(tween) = bird.tween.as_mut() {
        bird.angle = tween.advance(dt);
    }
    if bird.tween.is_some_and(|t| t.is_finished()) {
        bird.tween = None;
    }

    if bird.pos.y < 0.0 || bird.pos.y > tuning.world_height {
        return StepOutcome::GameOver(GameOverCause::OutOfBounds);
    }

    let bird_box = bird.bounds();
    if state
        .pipes
        .iter()
        .any(|p| p.alive && p.bounds().overlaps(&bird_box))
    {
        return StepOutcome::GameOver(GameOverCause::Collision);
    }

    StepOutcome::Continue
}
