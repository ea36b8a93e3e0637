//! Game configuration
//!
//! Fixed for the lifetime of a [`crate::Game`]. Defaults come from
//! [`crate::consts`]; a partial JSON document may override any field.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Rect;

/// Error loading a configuration override
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "malformed config: {}", e),
            ConfigError::Invalid(what) => write!(f, "invalid config: {}", what),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Recognized configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Per-axis speed at serve, also the horizontal scale of paddle deflection
    pub initial_ball_speed: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between paddle bottom and playfield bottom
    pub paddle_y_offset: f32,
    pub paddle_speed: f32,
    /// Clamp the paddle hit offset to [-1, 1] (edge grazes otherwise exceed
    /// the configured horizontal speed)
    pub clamp_paddle_offset: bool,

    // === Timing ===
    /// Ticks per second
    pub tick_rate: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,

            ball_size: BALL_SIZE,
            initial_ball_speed: INITIAL_BALL_SPEED,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y_offset: PADDLE_Y_OFFSET,
            paddle_speed: PADDLE_SPEED,
            clamp_paddle_offset: true,

            tick_rate: TICK_RATE,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse an override file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            self.width,
            self.height,
            self.brick_width,
            self.brick_height,
            self.ball_size,
            self.paddle_width,
            self.paddle_height,
        ];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ConfigError::Invalid("sizes must be positive"));
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(ConfigError::Invalid("brick grid must not be empty"));
        }
        if self.paddle_width > self.width {
            return Err(ConfigError::Invalid("paddle wider than playfield"));
        }
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(ConfigError::Invalid("tick rate must be positive"));
        }
        Ok(())
    }

    /// Number of bricks in a full grid (the winning score)
    #[inline]
    pub fn total_bricks(&self) -> usize {
        self.brick_rows * self.brick_cols
    }

    /// Left edge of the brick grid, centering it horizontally
    pub fn brick_offset_left(&self) -> f32 {
        let cols = self.brick_cols as f32;
        let grid_width = cols * self.brick_width + (cols - 1.0) * self.brick_padding;
        (self.width - grid_width) / 2.0
    }

    /// Pixel rectangle of the brick at (row, col)
    pub fn brick_rect(&self, row: usize, col: usize) -> Rect {
        let x = self.brick_offset_left() + col as f32 * (self.brick_width + self.brick_padding);
        let y = self.brick_offset_top + row as f32 * (self.brick_height + self.brick_padding);
        Rect::new(x, y, self.brick_width, self.brick_height)
    }

    /// Y coordinate of the paddle's top edge
    #[inline]
    pub fn paddle_top(&self) -> f32 {
        self.height - self.paddle_y_offset - self.paddle_height
    }

    /// Paddle x that centers it in the playfield
    #[inline]
    pub fn paddle_center_x(&self) -> f32 {
        (self.width - self.paddle_width) / 2.0
    }

    /// Ball position resting centered on top of a paddle at `paddle_x`
    pub fn ball_rest_position(&self, paddle_x: f32) -> Vec2 {
        Vec2::new(
            paddle_x + self.paddle_width / 2.0 - self.ball_size / 2.0,
            self.paddle_top() - self.ball_size,
        )
    }

    /// Seconds per tick
    #[inline]
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = GameConfig::default();
        assert_eq!(config.total_bricks(), 50);
        assert_eq!(config.brick_offset_left(), 29.0);
        assert_eq!(config.paddle_top(), 658.0);
        assert_eq!(config.paddle_center_x(), 375.0);

        let last = config.brick_rect(4, 9);
        assert_eq!(last.x, 29.0 + 9.0 * 80.0);
        assert_eq!(last.y, 60.0 + 4.0 * 28.0);
        assert_eq!(last.right(), 821.0);
    }

    #[test]
    fn test_ball_rest_position() {
        let config = GameConfig::default();
        let pos = config.ball_rest_position(375.0);
        assert_eq!(pos, Vec2::new(421.0, 650.0));
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_json(r#"{ "brick_rows": 2, "clamp_paddle_offset": false }"#)
            .expect("valid override");
        assert_eq!(config.brick_rows, 2);
        assert!(!config.clamp_paddle_offset);
        assert_eq!(config.width, PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "brick_cols": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "ball_size": -1.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
