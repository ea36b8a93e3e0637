//! Rendering
//!
//! Everything here reads the game state and never writes it. `shapes` turns
//! a state into colored triangles for the WebGPU `pipeline`; `terminal` draws
//! the same scene with ratatui on native builds.

pub mod pipeline;
pub mod shapes;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::sim::{GamePhase, GameState};

/// Centered text drawn over the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub title: Option<&'static str>,
    pub message: &'static str,
}

/// Overlay for the current phase, if any.
///
/// The start screen only shows before anything has been scored.
pub fn overlay(state: &GameState) -> Option<Overlay> {
    match state.phase {
        GamePhase::Idle if state.score == 0 => Some(Overlay {
            title: Some("BREAKOUT"),
            message: "Press SPACE to begin",
        }),
        GamePhase::GameOver => Some(Overlay {
            title: None,
            message: "GAME OVER",
        }),
        GamePhase::Won => Some(Overlay {
            title: None,
            message: "YOU WIN!",
        }),
        _ => None,
    }
}

/// Left HUD label
pub fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

/// Right HUD label
pub fn high_score_label(best: u32) -> String {
    format!("Max: {}", best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_overlay_per_phase() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let idle = overlay(&state).expect("start screen");
        assert_eq!(idle.title, Some("BREAKOUT"));
        assert_eq!(idle.message, "Press SPACE to begin");

        state.phase = GamePhase::Playing;
        assert_eq!(overlay(&state), None);

        state.phase = GamePhase::GameOver;
        assert_eq!(overlay(&state).map(|o| o.message), Some("GAME OVER"));

        state.phase = GamePhase::Won;
        assert_eq!(overlay(&state).map(|o| o.message), Some("YOU WIN!"));
    }

    #[test]
    fn test_hud_labels() {
        assert_eq!(score_label(7), "Score: 7");
        assert_eq!(high_score_label(50), "Max: 50");
    }
}
