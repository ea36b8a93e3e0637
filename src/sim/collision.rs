//! Collision detection and response for axis-aligned rectangles
//!
//! The ball is a small square moved with a single Euler step per tick, so
//! everything here works on bounding boxes. Brick hits pick a reflection axis
//! from the ball's pre-step position instead of doing a swept test.

use glam::Vec2;

/// Axis-aligned rectangle in playfield pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of edge `size` with its top-left corner at `pos`
    #[inline]
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Strict AABB intersection; touching edges do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// Velocity component to invert after a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Invert dx
    Horizontal,
    /// Invert dy
    Vertical,
}

/// Check a ball against a brick.
///
/// `prev_y` is the ball's top edge before this tick's vertical displacement.
/// If the ball was entirely above or below the brick on that row of pixels it
/// came in through a horizontal face, so dy flips; otherwise it came from the
/// side and dx flips.
pub fn ball_brick_collision(ball: &Rect, prev_y: f32, brick: &Rect) -> Option<Axis> {
    if !ball.overlaps(brick) {
        return None;
    }

    if prev_y + ball.h <= brick.top() || prev_y >= brick.bottom() {
        Some(Axis::Vertical)
    } else {
        Some(Axis::Horizontal)
    }
}

/// Walls touched during one reflection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContacts {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallContacts {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Reflect the ball off the left, right and top walls.
///
/// The test looks one step ahead: if `pos + vel` would leave the playfield on
/// an axis, the ball is clamped to that wall and the component negated. The
/// bottom is open; falling through it is the ball-lost condition.
pub fn reflect_off_walls(pos: &mut Vec2, vel: &mut Vec2, size: f32, width: f32) -> WallContacts {
    let mut contacts = WallContacts::default();

    if pos.x + vel.x < 0.0 {
        vel.x = -vel.x;
        pos.x = 0.0;
        contacts.left = true;
    } else if pos.x + size + vel.x > width {
        vel.x = -vel.x;
        pos.x = width - size;
        contacts.right = true;
    }
    // A deflection that changed dx this tick can leave the ball past a wall
    // while already heading back in; only the position needs fixing then.
    pos.x = pos.x.clamp(0.0, (width - size).max(0.0));

    if pos.y + vel.y < 0.0 {
        vel.y = -vel.y;
        pos.y = 0.0;
        contacts.top = true;
    }
    pos.y = pos.y.max(0.0);

    contacts
}

/// True when the ball's next bottom edge reaches the paddle top while the
/// two boxes overlap horizontally
pub fn ball_paddle_collision(ball: &Rect, vel: Vec2, paddle: &Rect) -> bool {
    ball.bottom() + vel.y >= paddle.top()
        && ball.right() > paddle.left()
        && ball.left() < paddle.right()
}

/// Normalized hit position: 0 at paddle center, ±1 at its edges.
///
/// Edge grazes give |offset| slightly above 1 unless `clamp` is set.
pub fn paddle_hit_offset(ball: &Rect, paddle: &Rect, clamp: bool) -> f32 {
    let offset = (ball.center_x() - paddle.center_x()) / (paddle.w / 2.0);
    if clamp { offset.clamp(-1.0, 1.0) } else { offset }
}

/// Velocity after a paddle bounce: dx scales with the hit offset, dy keeps
/// its magnitude and always points up
#[inline]
pub fn paddle_deflect(vel: Vec2, offset: f32, initial_speed: f32) -> Vec2 {
    Vec2::new(offset * initial_speed.abs(), -vel.y.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(9.0, 9.0, 10.0, 10.0)));
        // Shared edge only
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_brick_hit_from_below_is_vertical() {
        let brick = Rect::new(100.0, 60.0, 72.0, 20.0);
        // Ball moved up from y=82 to y=79, overlapping the brick bottom
        let ball = Rect::square(Vec2::new(120.0, 79.0), 8.0);
        assert_eq!(ball_brick_collision(&ball, 82.0, &brick), Some(Axis::Vertical));
    }

    #[test]
    fn test_brick_hit_from_above_is_vertical() {
        let brick = Rect::new(100.0, 60.0, 72.0, 20.0);
        let ball = Rect::square(Vec2::new(120.0, 54.0), 8.0);
        // Previous bottom edge at 52 + 8 = 60 touches brick top exactly
        assert_eq!(ball_brick_collision(&ball, 52.0, &brick), Some(Axis::Vertical));
    }

    #[test]
    fn test_brick_hit_from_side_is_horizontal() {
        let brick = Rect::new(100.0, 60.0, 72.0, 20.0);
        let ball = Rect::square(Vec2::new(94.0, 65.0), 8.0);
        assert_eq!(ball_brick_collision(&ball, 68.0, &brick), Some(Axis::Horizontal));
    }

    #[test]
    fn test_brick_miss() {
        let brick = Rect::new(100.0, 60.0, 72.0, 20.0);
        let ball = Rect::square(Vec2::new(50.0, 65.0), 8.0);
        assert_eq!(ball_brick_collision(&ball, 68.0, &brick), None);
    }

    #[test]
    fn test_right_wall_reflection() {
        let mut pos = Vec2::new(840.0, 300.0);
        let mut vel = Vec2::new(3.0, -3.0);
        let contacts = reflect_off_walls(&mut pos, &mut vel, 8.0, 850.0);
        assert!(contacts.right);
        assert_eq!(vel, Vec2::new(-3.0, -3.0));
        assert_eq!(pos.x, 842.0);
    }

    #[test]
    fn test_left_and_top_in_same_pass() {
        let mut pos = Vec2::new(1.0, 2.0);
        let mut vel = Vec2::new(-3.0, -3.0);
        let contacts = reflect_off_walls(&mut pos, &mut vel, 8.0, 850.0);
        assert!(contacts.left && contacts.top && !contacts.right);
        assert_eq!(pos, Vec2::ZERO);
        assert_eq!(vel, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_bottom_is_open() {
        let mut pos = Vec2::new(400.0, 698.0);
        let mut vel = Vec2::new(0.0, 3.0);
        let contacts = reflect_off_walls(&mut pos, &mut vel, 8.0, 850.0);
        assert!(!contacts.any());
        assert_eq!(vel.y, 3.0);
        assert_eq!(pos.y, 698.0);
    }

    #[test]
    fn test_paddle_contact_requires_horizontal_overlap() {
        let paddle = Rect::new(375.0, 658.0, 100.0, 12.0);
        let vel = Vec2::new(0.0, 3.0);

        let over = Rect::square(Vec2::new(421.0, 651.0), 8.0);
        assert!(ball_paddle_collision(&over, vel, &paddle));

        let beside = Rect::square(Vec2::new(367.0, 651.0), 8.0);
        assert!(!ball_paddle_collision(&beside, vel, &paddle));

        let above = Rect::square(Vec2::new(421.0, 600.0), 8.0);
        assert!(!ball_paddle_collision(&above, vel, &paddle));
    }

    #[test]
    fn test_dead_center_deflection() {
        let paddle = Rect::new(375.0, 658.0, 100.0, 12.0);
        let ball = Rect::square(Vec2::new(421.0, 651.0), 8.0);
        let offset = paddle_hit_offset(&ball, &paddle, true);
        assert!(offset.abs() < 1e-6);

        let vel = paddle_deflect(Vec2::new(2.0, 3.0), offset, 3.0);
        assert!(vel.x.abs() < 1e-6);
        assert_eq!(vel.y, -3.0);
    }

    #[test]
    fn test_edge_graze_offset_clamped_and_unclamped() {
        let paddle = Rect::new(375.0, 658.0, 100.0, 12.0);
        // Ball hanging off the right edge: center at 477
        let ball = Rect::square(Vec2::new(473.0, 651.0), 8.0);

        let raw = paddle_hit_offset(&ball, &paddle, false);
        assert!((raw - 1.04).abs() < 1e-5);
        let vel = paddle_deflect(Vec2::new(3.0, 3.0), raw, 3.0);
        assert!(vel.x > 3.0);

        let clamped = paddle_hit_offset(&ball, &paddle, true);
        assert_eq!(clamped, 1.0);
        let vel = paddle_deflect(Vec2::new(3.0, 3.0), clamped, 3.0);
        assert_eq!(vel, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_deflection_always_points_up() {
        let vel = paddle_deflect(Vec2::new(1.0, -3.0), -0.5, 3.0);
        assert_eq!(vel, Vec2::new(-1.5, -3.0));
    }
}
