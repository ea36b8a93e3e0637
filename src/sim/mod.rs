//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One Euler step per tick, no sub-stepping
//! - Seeded RNG only
//! - Stable iteration order (row-major over bricks)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickGrid, BrickHit};
pub use collision::{
    Axis, Rect, WallContacts, ball_brick_collision, ball_paddle_collision, paddle_deflect,
    paddle_hit_offset, reflect_off_walls,
};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{Intent, tick};
