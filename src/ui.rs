//! HUD text derived from game state
//!
//! The frontend only copies these strings into the DOM; all formatting
//! decisions live here so they can be tested natively.

use crate::sim::Game;

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// "Score: N"
    pub score: String,
    /// "High: N", or empty when there is no positive high score
    pub high: String,
    /// Countdown digit while restarting
    pub countdown: Option<String>,
    /// Restart button visibility
    pub restart_visible: bool,
}

impl Hud {
    pub fn from_game(game: &Game) -> Self {
        Self {
            score: format!("Score: {}", game.state.display_score()),
            high: game.high_label().to_string(),
            countdown: game.countdown_remaining().map(|n| n.to_string()),
            restart_visible: game.restart_visible(),
        }
    }
}

/// "FPS: N" label
pub fn fps_label(fps: u32) -> String {
    format!("FPS: {}", fps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::persistence::MemoryStore;
    use crate::sim::{InputEvent, TickInput};
    use crate::tuning::Tuning;

    #[test]
    fn test_initial_hud() {
        let game = Game::new(5, Tuning::default(), Box::new(MemoryStore::new()));
        let hud = Hud::from_game(&game);
        assert_eq!(hud.score, "Score: 0");
        assert_eq!(hud.high, "");
        assert_eq!(hud.countdown, None);
        assert!(!hud.restart_visible);
    }

    #[test]
    fn test_game_over_then_countdown_hud() {
        let mut game = Game::new(5, Tuning::default(), Box::new(MemoryStore::new()));
        while !game.restart_visible() {
            game.tick(&TickInput::default(), SIM_DT);
        }
        let hud = Hud::from_game(&game);
        assert!(hud.restart_visible);
        assert_eq!(hud.countdown, None);

        game.handle_input(InputEvent::JumpPressed);
        let hud = Hud::from_game(&game);
        assert!(!hud.restart_visible);
        assert_eq!(hud.countdown.as_deref(), Some("3"));
    }

    #[test]
    fn test_fps_label() {
        assert_eq!(fps_label(60), "FPS: 60");
    }
}
