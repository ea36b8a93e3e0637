//! Shape generation for 2D primitives
//!
//! All positions are playfield pixels with y pointing down. The pipeline maps
//! them to clip space.

use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Rect};

/// Stroke width for brick and paddle outlines
const STROKE: f32 = 2.0;

/// Filled rectangle (two triangles)
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    gradient_rect(r, color, color)
}

/// Rectangle with a vertical gradient from `top` to `bottom`
pub fn gradient_rect(r: &Rect, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0, x1, y1) = (r.left(), r.top(), r.right(), r.bottom());
    [
        Vertex::new(x0, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y0, top),
        Vertex::new(x1, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y1, bottom),
    ]
}

/// Outline drawn inside `r` as four filled bands
pub fn stroke_rect(r: &Rect, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = width.min(r.w / 2.0).min(r.h / 2.0);
    let bands = [
        Rect::new(r.x, r.y, r.w, w),
        Rect::new(r.x, r.bottom() - w, r.w, w),
        Rect::new(r.x, r.y + w, w, r.h - 2.0 * w),
        Rect::new(r.right() - w, r.y + w, w, r.h - 2.0 * w),
    ];
    bands.iter().flat_map(|b| rect(b, color)).collect()
}

/// Every live brick: shaded fill plus a darker outline
pub fn bricks(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(state.bricks.alive_count() * 48);
    for brick in state.bricks.alive() {
        let r = state.config.brick_rect(brick.row, brick.col);
        let base = colors::brick_base(brick.tier);

        // Lighter top half, darker bottom half
        let upper = Rect::new(r.x, r.y, r.w, r.h / 2.0);
        let lower = Rect::new(r.x, r.y + r.h / 2.0, r.w, r.h / 2.0);
        vertices.extend(gradient_rect(&upper, colors::shade(base, 30), colors::shade(base, 0)));
        vertices.extend(gradient_rect(&lower, colors::shade(base, 0), colors::shade(base, -30)));
        vertices.extend(stroke_rect(&r, STROKE, colors::shade(base, -45)));
    }
    vertices
}

pub fn paddle(state: &GameState) -> Vec<Vertex> {
    let r = state.paddle.rect();
    let mut vertices = gradient_rect(&r, colors::PADDLE_TOP, colors::PADDLE_BOTTOM).to_vec();
    vertices.extend(stroke_rect(&r, STROKE, colors::PADDLE_STROKE));
    vertices
}

pub fn ball(state: &GameState) -> [Vertex; 6] {
    rect(&state.ball.rect(), colors::BALL)
}

/// Full scene for one frame, back to front
pub fn frame(state: &GameState) -> Vec<Vertex> {
    let mut vertices = bricks(state);
    vertices.extend(paddle(state));
    vertices.extend(ball(state));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_rect_covers_corners() {
        let r = Rect::new(10.0, 20.0, 30.0, 5.0);
        let verts = rect(&r, colors::BALL);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 25.0);
    }

    #[test]
    fn test_gradient_runs_top_to_bottom() {
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        let top = [1.0, 0.0, 0.0, 1.0];
        let bottom = [0.0, 0.0, 1.0, 1.0];
        for v in gradient_rect(&r, top, bottom) {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_stroke_stays_inside() {
        let r = Rect::new(5.0, 5.0, 20.0, 10.0);
        let verts = stroke_rect(&r, 2.0, colors::BALL);
        assert_eq!(verts.len(), 24);
        for v in verts {
            assert!(v.position[0] >= r.left() && v.position[0] <= r.right());
            assert!(v.position[1] >= r.top() && v.position[1] <= r.bottom());
        }
    }

    #[test]
    fn test_dead_bricks_are_not_drawn() {
        let mut state = GameState::new(GameConfig::default(), 3);
        let full = bricks(&state).len();
        assert_eq!(full, state.bricks.len() * 36);

        state.bricks.kill(0, 0);
        state.bricks.kill(4, 9);
        assert_eq!(bricks(&state).len(), full - 72);
    }

    #[test]
    fn test_frame_contains_paddle_and_ball() {
        let mut state = GameState::new(GameConfig::default(), 3);
        for row in 0..state.bricks.rows() {
            for col in 0..state.bricks.cols() {
                state.bricks.kill(row, col);
            }
        }
        // Paddle fill + outline, then the ball
        assert_eq!(frame(&state).len(), 6 + 24 + 6);
    }
}
