//! Brick grid
//!
//! A fixed rows x cols arrangement stored row-major. Hit testing walks the
//! cells in that order so multi-brick ticks resolve the same way every run.

use glam::Vec2;

use super::collision::{Axis, Rect, ball_brick_collision};
use crate::config::GameConfig;

/// A single destructible brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub alive: bool,
    /// Color/value tier, equal to the row index
    pub tier: usize,
}

/// A brick destroyed during a hit test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    pub row: usize,
    pub col: usize,
    pub axis: Axis,
}

/// The grid of bricks for one round
#[derive(Debug, Clone)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Brick>,
}

impl BrickGrid {
    /// Create a fully alive grid
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut grid = Self {
            rows,
            cols,
            cells: Vec::with_capacity(rows * cols),
        };
        grid.rebuild();
        grid
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.brick_rows, config.brick_cols)
    }

    /// Reset every cell to alive with tier = row
    pub fn rebuild(&mut self) {
        self.cells.clear();
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.cells.push(Brick {
                    row,
                    col,
                    alive: true,
                    tier: row,
                });
            }
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, alive or not
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|b| b.alive)
    }

    /// Mark a cell dead. Returns true if it was alive.
    pub fn kill(&mut self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        let brick = &mut self.cells[row * self.cols + col];
        let was_alive = brick.alive;
        brick.alive = false;
        was_alive
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|b| b.alive).count()
    }

    /// Iterate all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter()
    }

    /// Iterate alive cells in row-major order
    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter().filter(|b| b.alive)
    }

    /// Destroy every alive brick the ball overlaps.
    ///
    /// Each hit is reported with the axis its velocity should flip on; the
    /// caller decides how to combine several hits from the same tick.
    pub fn hit_test(&mut self, ball: &Rect, prev_y: f32, config: &GameConfig) -> Vec<BrickHit> {
        let mut hits = Vec::new();
        for brick in self.cells.iter_mut().filter(|b| b.alive) {
            let rect = config.brick_rect(brick.row, brick.col);
            if let Some(axis) = ball_brick_collision(ball, prev_y, &rect) {
                brick.alive = false;
                hits.push(BrickHit {
                    row: brick.row,
                    col: brick.col,
                    axis,
                });
            }
        }
        hits
    }

    /// Apply the reflections for a tick's hits to `vel`.
    ///
    /// Each hit negates its axis in turn, so two hits on the same axis in one
    /// tick cancel out.
    pub fn reflect(hits: &[BrickHit], vel: Vec2) -> Vec2 {
        let mut out = vel;
        for hit in hits {
            match hit.axis {
                Axis::Horizontal => out.x = -out.x,
                Axis::Vertical => out.y = -out.y,
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_sets_tiers() {
        let mut grid = BrickGrid::new(5, 10);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid.alive_count(), 50);
        assert!(grid.iter().all(|b| b.tier == b.row));

        grid.kill(2, 3);
        grid.kill(0, 0);
        assert_eq!(grid.alive_count(), 48);

        grid.rebuild();
        assert_eq!(grid.alive_count(), 50);
    }

    #[test]
    fn test_kill_reports_previous_status() {
        let mut grid = BrickGrid::new(2, 2);
        assert!(grid.kill(1, 1));
        assert!(!grid.kill(1, 1));
        assert!(!grid.kill(5, 0));
        assert!(!grid.is_alive(1, 1));
        assert!(grid.is_alive(0, 1));
    }

    #[test]
    fn test_hit_test_single_brick() {
        let config = GameConfig::default();
        let mut grid = BrickGrid::from_config(&config);
        let rect = config.brick_rect(0, 0);

        // Just under brick (0,0), moving up into it
        let ball = Rect::square(Vec2::new(rect.x + 10.0, rect.bottom() - 1.0), config.ball_size);
        let hits = grid.hit_test(&ball, rect.bottom() + 2.0, &config);

        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].row, hits[0].col), (0, 0));
        assert_eq!(hits[0].axis, Axis::Vertical);
        assert!(!grid.is_alive(0, 0));

        // Dead bricks are not hit again
        let hits = grid.hit_test(&ball, rect.bottom() + 2.0, &config);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_hit_test_spans_two_bricks_in_row_major_order() {
        // Gap narrower than the ball so it can straddle two bricks
        let config = GameConfig {
            brick_padding: 4.0,
            ..GameConfig::default()
        };
        let mut grid = BrickGrid::from_config(&config);
        let a = config.brick_rect(1, 2);
        let b = config.brick_rect(1, 3);

        let x = a.right() - 2.0;
        assert!(x + config.ball_size > b.left());
        let ball = Rect::square(Vec2::new(x, a.bottom() - 6.0), config.ball_size);
        let hits = grid.hit_test(&ball, a.bottom() + 1.0, &config);

        let cells: Vec<_> = hits.iter().map(|h| (h.row, h.col)).collect();
        assert_eq!(cells, vec![(1, 2), (1, 3)]);
        assert_eq!(grid.alive_count(), 48);
    }

    #[test]
    fn test_reflect_toggles_per_hit() {
        let vel = Vec2::new(3.0, -3.0);
        let both_vertical = [
            BrickHit { row: 0, col: 0, axis: Axis::Vertical },
            BrickHit { row: 0, col: 1, axis: Axis::Vertical },
        ];
        assert_eq!(BrickGrid::reflect(&both_vertical, vel), vel);

        let three_vertical = [
            BrickHit { row: 0, col: 0, axis: Axis::Vertical },
            BrickHit { row: 0, col: 1, axis: Axis::Vertical },
            BrickHit { row: 1, col: 0, axis: Axis::Vertical },
        ];
        assert_eq!(BrickGrid::reflect(&three_vertical, vel), Vec2::new(3.0, 3.0));

        let mixed = [
            BrickHit { row: 0, col: 0, axis: Axis::Vertical },
            BrickHit { row: 1, col: 0, axis: Axis::Horizontal },
        ];
        assert_eq!(BrickGrid::reflect(&mixed, vel), Vec2::new(-3.0, 3.0));

        assert_eq!(BrickGrid::reflect(&[], vel), vel);
    }
}
