//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame: paddle, ball, walls,
//! paddle bounce, bricks, then the end-of-round checks.

use super::bricks::BrickGrid;
use super::collision::{ball_paddle_collision, paddle_deflect, paddle_hit_offset, reflect_off_walls};
use super::state::{GameEvent, GamePhase, GameState};

/// Direction keys held by the player, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one tick.
///
/// Does nothing unless the phase is `Playing`. Returns the events the tick
/// produced, in the order they happened.
pub fn tick(state: &mut GameState, intent: &Intent) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    let config = &state.config;

    state
        .paddle
        .apply_intent(intent, config.paddle_speed, config.width);

    let prev_y = state.ball.pos.y;
    state.ball.step();

    let walls = reflect_off_walls(
        &mut state.ball.pos,
        &mut state.ball.vel,
        state.ball.size,
        config.width,
    );
    if walls.any() {
        events.push(GameEvent::WallBounce);
    }

    let ball_rect = state.ball.rect();
    let paddle_rect = state.paddle.rect();

    if ball_paddle_collision(&ball_rect, state.ball.vel, &paddle_rect) {
        // A paddle bounce ends collision handling for this tick
        let offset = paddle_hit_offset(&ball_rect, &paddle_rect, config.clamp_paddle_offset);
        state.ball.vel = paddle_deflect(state.ball.vel, offset, config.initial_ball_speed);
        events.push(GameEvent::PaddleHit { offset });
    } else {
        let hits = state.bricks.hit_test(&ball_rect, prev_y, config);
        if !hits.is_empty() {
            state.ball.vel = BrickGrid::reflect(&hits, state.ball.vel);
            for hit in &hits {
                state.score += 1;
                events.push(GameEvent::BrickDestroyed {
                    row: hit.row,
                    col: hit.col,
                    score: state.score,
                });
            }

            if state.score >= state.total_bricks() {
                state.phase = GamePhase::Won;
                events.push(GameEvent::Cleared);
                return events;
            }
        }
    }

    if state.ball.pos.y > state.config.height {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::BallLost);
    }

    events
}
