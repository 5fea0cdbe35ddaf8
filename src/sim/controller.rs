//! Game controller
//!
//! Owns the scene, the timers, the RNG and the session high score, and runs
//! the Running → GameOver → Countdown → Running state machine. Input arrives
//! as typed events through `handle_input`; time arrives as fixed ticks
//! through `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::schedule::Interval;
use super::spawn::spawn_row;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use super::step::{StepOutcome, TickInput, step};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::tuning::Tuning;

/// Discrete input events delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Jump key went down (key repeat already filtered)
    JumpPressed,
    /// Pointer or touch went down anywhere
    PointerDown,
    /// Pointer or touch released
    PointerUp,
}

/// An active restart countdown
#[derive(Debug, Clone)]
struct Countdown {
    remaining: u8,
    timer: Interval,
}

/// Top-level game controller
pub struct Game {
    /// Current scene, read by the renderer and HUD
    pub state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    spawn_timer: Interval,
    countdown: Option<Countdown>,
    high_score: HighScore,
    /// High score label, refreshed on scene entry
    high_label: String,
    store: Box<dyn KeyValueStore>,
    /// `NewHighScore` already emitted during this run
    new_best_announced: bool,
    jump_queued: bool,
    events: Vec<GameEvent>,
}

impl Game {
    /// Load the session high score and enter the first scene
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn KeyValueStore>) -> Self {
        let high_score = HighScore::load(store.as_ref());
        log::info!(
            "Starting game (seed {}, high score {:?})",
            seed,
            high_score.value()
        );

        let mut game = Self {
            state: GameState::new(&tuning),
            spawn_timer: Interval::new(tuning.spawn_period_secs),
            rng: Pcg32::seed_from_u64(seed),
            countdown: None,
            high_score,
            high_label: String::new(),
            store,
            new_best_announced: false,
            jump_queued: false,
            events: Vec::new(),
            tuning,
        };
        game.enter_scene();
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_score(&self) -> HighScore {
        self.high_score
    }

    pub fn high_label(&self) -> &str {
        &self.high_label
    }

    /// Count shown on screen while restarting
    pub fn countdown_remaining(&self) -> Option<u8> {
        self.countdown.as_ref().map(|c| c.remaining)
    }

    pub fn restart_visible(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Route one input event through the state machine
    pub fn handle_input(&mut self, event: InputEvent) {
        match (self.state.phase, event) {
            (GamePhase::Running, InputEvent::JumpPressed | InputEvent::PointerDown) => {
                self.jump_queued = true;
            }
            (GamePhase::GameOver, InputEvent::JumpPressed | InputEvent::PointerDown) => {
                self.start_countdown();
            }
            (GamePhase::Countdown, InputEvent::JumpPressed | InputEvent::PointerDown) => {
                log::debug!("Restart already counting down, ignoring {:?}", event);
            }
            (_, InputEvent::PointerUp) => {}
        }
    }

    /// Advance one fixed timestep.
    ///
    /// Order: countdown, spawner, simulation step. Outside `Running` only the
    /// countdown moves.
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if self.countdown.is_some() {
            self.advance_countdown(dt);
            return;
        }

        if self.state.phase != GamePhase::Running {
            return;
        }

        for _ in 0..self.spawn_timer.advance(dt) {
            self.spawn();
        }

        let jump = std::mem::take(&mut self.jump_queued) || input.is_jump_active();
        if let StepOutcome::GameOver(cause) =
            step(&mut self.state, jump, &self.tuning, dt, &mut self.events)
        {
            self.game_over(cause);
        }
    }

    /// Re-enter the scene immediately, cancelling any countdown in flight
    pub fn reset(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.timer.cancel();
            log::info!("Countdown cancelled at {}", countdown.remaining);
        }
        self.enter_scene();
    }

    fn enter_scene(&mut self) {
        self.state = GameState::new(&self.tuning);
        self.spawn_timer = Interval::new(self.tuning.spawn_period_secs);
        self.jump_queued = false;
        self.new_best_announced = false;
        self.high_label = self.high_score.label();
    }

    fn spawn(&mut self) {
        let row = spawn_row(&mut self.state, &self.tuning, &mut self.rng);
        log::debug!(
            "Spawned row: gap {} ({} pipes), score {}",
            row.gap_index,
            row.pipes,
            row.score
        );
        self.events.push(GameEvent::RowSpawned {
            gap_index: row.gap_index,
            score: row.score,
        });

        let score = self.state.display_score();
        if self.high_score.record(score) {
            if let Err(e) = self.high_score.save(self.store.as_mut()) {
                log::warn!("Failed to save high score: {}", e);
            }
            // Once per run, when the best from scene entry is first passed
            if score > 0 && !self.new_best_announced {
                self.new_best_announced = true;
                log::info!("New high score: {}", score);
                self.events.push(GameEvent::NewHighScore(score));
            }
        }
    }

    fn game_over(&mut self, cause: GameOverCause) {
        self.state.phase = GamePhase::GameOver;
        self.jump_queued = false;
        log::info!(
            "Game over ({:?}) with score {}",
            cause,
            self.state.display_score()
        );
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.state.score,
        });
    }

    fn start_countdown(&mut self) {
        let from = self.tuning.countdown_from;
        if from == 0 {
            self.enter_scene();
            self.events.push(GameEvent::Restarted);
            return;
        }

        self.state.phase = GamePhase::Countdown;
        self.countdown = Some(Countdown {
            remaining: from,
            timer: Interval::new(self.tuning.countdown_period_secs),
        });
        log::info!("Restarting in {}", from);
        self.events.push(GameEvent::CountdownStarted(from));
    }

    fn advance_countdown(&mut self, dt: f32) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };

        for _ in 0..countdown.timer.advance(dt) {
            countdown.remaining = countdown.remaining.saturating_sub(1);
            if countdown.remaining == 0 {
                countdown.timer.cancel();
                break;
            }
            self.events.push(GameEvent::CountdownTick(countdown.remaining));
        }

        if countdown.timer.is_cancelled() {
            self.countdown = None;
            self.enter_scene();
            log::info!("Restarted");
            self.events.push(GameEvent::Restarted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::highscores::STORAGE_KEY;
    use crate::persistence::MemoryStore;

    fn new_game() -> Game {
        Game::new(1234, Tuning::default(), Box::new(MemoryStore::new()))
    }

    /// Tick while pinning the bird mid-screen and clearing pipes, so rows
    /// keep spawning without ending the run
    fn hover(game: &mut Game, ticks: u32) {
        for _ in 0..ticks {
            game.state.bird.pos.y = 245.0;
            game.state.bird.vel_y = 0.0;
            game.state.pipes.clear();
            game.tick(&TickInput::default(), SIM_DT);
        }
    }

    /// Let the bird fall out of the screen
    fn crash(game: &mut Game) {
        for _ in 0..120 {
            if game.phase() != GamePhase::Running {
                break;
            }
            game.state.pipes.clear();
            game.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_starts_running_with_fresh_scene() {
        let game = new_game();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.state.score, -1);
        assert_eq!(game.high_score(), HighScore::Unset);
        assert_eq!(game.high_label(), "");
        assert!(!game.restart_visible());
    }

    #[test]
    fn test_falling_bird_ends_the_run() {
        let mut game = new_game();
        crash(&mut game);
        assert!(game.restart_visible());
        let events = game.drain_events();
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver {
                cause: GameOverCause::OutOfBounds,
                ..
            })
        ));
    }

    #[test]
    fn test_collision_ends_the_run_in_the_same_tick() {
        let mut game = new_game();
        game.state.pipes.push(crate::sim::state::Pipe {
            pos: glam::Vec2::new(120.0, 230.0),
            vel_x: -200.0,
            size: glam::Vec2::new(50.0, 50.0),
            alive: true,
        });
        game.tick(&TickInput::default(), SIM_DT);
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut game = new_game();
        crash(&mut game);
        let y = game.state.bird.pos.y;
        let ticks = game.state.time_ticks;
        for _ in 0..200 {
            game.tick(&TickInput { jump: true, pointer_held: true }, SIM_DT);
        }
        assert_eq!(game.state.bird.pos.y, y);
        assert_eq!(game.state.time_ticks, ticks);
        assert!(game.state.pipes.is_empty());
    }

    #[test]
    fn test_spawner_period_and_score() {
        let mut game = new_game();
        hover(&mut game, 89);
        assert_eq!(game.state.score, -1);
        hover(&mut game, 1);
        assert_eq!(game.state.score, 0);
        hover(&mut game, 90 * 3);
        assert_eq!(game.state.score, 3);
        assert_eq!(game.high_score().value(), Some(3));
    }

    #[test]
    fn test_jump_key_queues_a_single_jump() {
        let mut game = new_game();
        game.handle_input(InputEvent::JumpPressed);
        game.tick(&TickInput::default(), SIM_DT);
        assert_eq!(game.state.bird.vel_y, -350.0);
        assert!(game.drain_events().contains(&GameEvent::Jumped));

        game.tick(&TickInput::default(), SIM_DT);
        assert!(game.state.bird.vel_y > -350.0);
    }

    #[test]
    fn test_countdown_sequence_and_reset() {
        let mut game = new_game();
        hover(&mut game, 90 * 2);
        assert_eq!(game.state.score, 1);
        crash(&mut game);
        game.drain_events();

        game.handle_input(InputEvent::PointerDown);
        assert_eq!(game.phase(), GamePhase::Countdown);
        assert_eq!(game.countdown_remaining(), Some(3));
        assert!(!game.restart_visible());

        let mut shown = vec![3];
        for _ in 0..180 {
            game.tick(&TickInput::default(), SIM_DT);
            if let Some(n) = game.countdown_remaining() {
                if shown.last() != Some(&n) {
                    shown.push(n);
                }
            }
        }
        assert_eq!(shown, vec![3, 2, 1]);
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.countdown_remaining(), None);
        assert_eq!(game.state.score, -1);
        assert!(game.state.pipes.is_empty());
        assert_eq!(game.state.bird.pos, glam::Vec2::new(100.0, 245.0));
        assert_eq!(game.state.bird.angle, 0.0);

        let events = game.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::CountdownStarted(3),
                GameEvent::CountdownTick(2),
                GameEvent::CountdownTick(1),
                GameEvent::Restarted,
            ]
        );
    }

    #[test]
    fn test_countdown_step_timing() {
        let mut game = new_game();
        crash(&mut game);
        game.handle_input(InputEvent::JumpPressed);
        for _ in 0..59 {
            game.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(game.countdown_remaining(), Some(3));
        game.tick(&TickInput::default(), SIM_DT);
        assert_eq!(game.countdown_remaining(), Some(2));
    }

    #[test]
    fn test_restart_input_during_countdown_is_ignored() {
        let mut game = new_game();
        crash(&mut game);
        game.handle_input(InputEvent::JumpPressed);
        for _ in 0..70 {
            game.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(game.countdown_remaining(), Some(2));

        game.handle_input(InputEvent::JumpPressed);
        game.handle_input(InputEvent::PointerDown);
        assert_eq!(game.phase(), GamePhase::Countdown);
        assert_eq!(game.countdown_remaining(), Some(2));

        // Only one restart happens
        for _ in 0..400 {
            game.state.bird.pos.y = 245.0;
            game.state.bird.vel_y = 0.0;
            game.state.pipes.clear();
            game.tick(&TickInput::default(), SIM_DT);
        }
        let restarts = game
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::Restarted)
            .count();
        assert_eq!(restarts, 1);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut game = new_game();
        hover(&mut game, 90 * 4);
        assert_eq!(game.state.score, 3);
        crash(&mut game);
        game.handle_input(InputEvent::JumpPressed);
        for _ in 0..180 {
            game.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.high_score().value(), Some(3));
        assert_eq!(game.high_label(), "High: 3");

        // A shorter run does not lower it
        hover(&mut game, 90);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.high_score().value(), Some(3));
        assert_eq!(
            game.store().get(STORAGE_KEY).unwrap().as_deref(),
            Some("3")
        );
    }

    fn new_best_events(game: &mut Game) -> Vec<u32> {
        game.drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::NewHighScore(score) => Some(score),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_high_score_announced_once_per_run() {
        let mut game = new_game();
        hover(&mut game, 90 * 6);
        assert_eq!(game.state.score, 5);
        assert_eq!(game.high_score().value(), Some(5));
        assert_eq!(new_best_events(&mut game), vec![1]);

        // Next run announces only when it passes 5, and only once
        crash(&mut game);
        game.handle_input(InputEvent::JumpPressed);
        for _ in 0..180 {
            game.tick(&TickInput::default(), SIM_DT);
        }
        game.drain_events();
        hover(&mut game, 90 * 6);
        assert!(new_best_events(&mut game).is_empty());
        hover(&mut game, 90 * 3);
        assert_eq!(game.state.score, 8);
        assert_eq!(new_best_events(&mut game), vec![6]);
    }

    #[test]
    fn test_loads_persisted_high_score() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "9").unwrap();
        let game = Game::new(1, Tuning::default(), Box::new(store));
        assert_eq!(game.high_score().value(), Some(9));
        assert_eq!(game.high_label(), "High: 9");
    }

    #[test]
    fn test_reset_cancels_countdown() {
        let mut game = new_game();
        crash(&mut game);
        game.handle_input(InputEvent::PointerDown);
        game.tick(&TickInput::default(), SIM_DT);
        game.reset();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.countdown_remaining(), None);

        // No stray countdown completion later
        game.drain_events();
        hover(&mut game, 200);
        assert!(!game.drain_events().contains(&GameEvent::Restarted));
    }
}
