//! Input event queue
//!
//! DOM callbacks push events here as they arrive; the frame loop drains them
//! into the game controller once per frame, so the controller is the only
//! consumer and never runs inside a callback.

use crate::sim::{InputEvent, TickInput};

/// Pending input plus the continuous pointer state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    queue: Vec<InputEvent>,
    pointer_held: bool,
    jump_key_held: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump key went down; auto-repeat while held is dropped
    pub fn key_down(&mut self) {
        if !self.jump_key_held {
            self.jump_key_held = true;
            self.queue.push(InputEvent::JumpPressed);
        }
    }

    pub fn key_up(&mut self) {
        self.jump_key_held = false;
    }

    pub fn pointer_down(&mut self) {
        self.pointer_held = true;
        self.queue.push(InputEvent::PointerDown);
    }

    pub fn pointer_up(&mut self) {
        if self.pointer_held {
            self.pointer_held = false;
            self.queue.push(InputEvent::PointerUp);
        }
    }

    /// Forget held state (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.pointer_up();
        self.jump_key_held = false;
    }

    pub fn pointer_held(&self) -> bool {
        self.pointer_held
    }

    /// Take queued events in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Continuous input for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            jump: false,
            pointer_held: self.pointer_held,
        }
    }
}
