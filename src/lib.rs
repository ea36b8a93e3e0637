//! Breakout - a single-screen brick breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, brick grid)
//! - `game`: Phase state machine, scoring and tick scheduling
//! - `highscores`: Best score persisted through a key-value store
//! - `renderer`: Read-only views of the state (GPU vertices, terminal, HUD)
//! - `platform`: Browser/native adapters for input and storage

pub mod config;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, Key};
pub use highscores::{HighScoreKeeper, KeyValueStore, MemoryStore, StoreError};
pub use scheduler::{FixedRateScheduler, ManualScheduler, TickScheduler};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels, origin top-left, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 850.0;
    pub const PLAYFIELD_HEIGHT: f32 = 700.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_WIDTH: f32 = 72.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 8.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;

    /// Ball is a square of this edge length
    pub const BALL_SIZE: f32 = 8.0;
    /// Per-axis speed at serve (pixels per tick)
    pub const INITIAL_BALL_SPEED: f32 = 3.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    /// Gap between paddle bottom and playfield bottom
    pub const PADDLE_Y_OFFSET: f32 = 30.0;
    /// Pixels per tick while a direction key is held
    pub const PADDLE_SPEED: f32 = 7.0;

    /// Simulation ticks per second
    pub const TICK_RATE: f32 = 60.0;
    /// Maximum ticks run in one scheduler poll to prevent spiral of death
    pub const MAX_CATCH_UP_TICKS: u32 = 8;

    /// Persistence key for the best score
    pub const HIGH_SCORE_KEY: &str = "breakout_highscore";
}
