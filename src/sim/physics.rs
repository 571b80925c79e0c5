//! Frame-stepped ball physics
//!
//! The ball walks its per-frame travel distance in sub-steps no longer than
//! one pixel, so its rounded position moves at most one pixel per axis at a
//! time. Every new pixel it enters is checked against the floor, the walls,
//! the brick grid and the paddle, in that order.

use std::ops::ControlFlow;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::layout::Layout;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Something the caller may want to react to (sound, effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or a side wall
    WallBounce,
    /// Ball bounced off the paddle
    PaddleBounce { zone: PaddleZone },
    /// A brick was hit and removed
    BrickDestroyed { row: usize, column: usize },
    /// Ball fell past the paddle
    BallLost,
    /// The last brick of the level was removed
    LevelCleared,
}

/// Where on the paddle the ball landed, relative to the edge it is moving away from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleZone {
    Shallow,
    Medium,
    Deep,
    /// Keeps the previous angle and horizontal direction
    Center,
}

impl PaddleZone {
    pub fn from_tail_distance(distance: i32) -> Self {
        if distance <= SHALLOW_ZONE_MAX {
            PaddleZone::Shallow
        } else if distance <= MEDIUM_ZONE_MAX {
            PaddleZone::Medium
        } else if distance < DEEP_ZONE_END {
            PaddleZone::Deep
        } else {
            PaddleZone::Center
        }
    }

    /// Rebound angle from horizontal, or None to keep the current one
    pub fn bounce_angle(&self) -> Option<f32> {
        match self {
            PaddleZone::Shallow => Some(SHALLOW_BOUNCE_ANGLE),
            PaddleZone::Medium => Some(MEDIUM_BOUNCE_ANGLE),
            PaddleZone::Deep => Some(DEEP_BOUNCE_ANGLE),
            PaddleZone::Center => None,
        }
    }
}

/// What happened during one `run_step` call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Sum of the values of bricks destroyed this frame
    pub score_change: u32,
    pub life_lost: bool,
    pub won_level: bool,
    /// Contacts in the order they happened
    pub events: Vec<GameEvent>,
}

impl StepResult {
    pub fn is_empty(&self) -> bool {
        self.score_change == 0 && !self.life_lost && !self.won_level && self.events.is_empty()
    }

    /// Once the ball is gone or the level is won, nothing else in the frame matters
    fn ends_frame(&self) -> bool {
        self.life_lost || self.won_level
    }
}

/// Nearest pixel, halves rounding up so a one-pixel move never jumps two cells
#[inline]
fn pixel_of(pos: Vec2) -> IVec2 {
    (pos + Vec2::splat(0.5)).floor().as_ivec2()
}

/// The simulation engine: ball, paddle and brick grid for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    layout: Layout,
    /// Row-major brick liveness, row 0 at the bottom
    bricks: Vec<bool>,
    bricks_remaining: usize,
    ball_speed: f32,
    ball_position: Vec2,
    ball_velocity: Vec2,
    /// Current angle from horizontal, reused by center paddle hits
    bounce_angle: f32,
    last_checked_pixel: IVec2,
    ball_alive: bool,
    paddle_left_x: i32,
    max_substeps: u32,
}

impl Physics {
    /// Create an engine over `layout`. The ball stays parked until `reset`.
    ///
    /// Panics if the layout is not playable.
    pub fn new(layout: Layout) -> Self {
        if let Err(err) = layout.validate() {
            panic!("invalid arena layout: {err}");
        }

        let max_substeps = layout.diagonal().ceil() as u32 * MAX_ARENA_CROSSINGS_PER_FRAME + 1;
        let ball_position = layout.ball_start;

        Self {
            bricks: vec![true; layout.brick_count()],
            bricks_remaining: layout.brick_count(),
            ball_speed: 0.0,
            ball_position,
            ball_velocity: Vec2::ZERO,
            bounce_angle: 0.0,
            last_checked_pixel: pixel_of(ball_position),
            ball_alive: false,
            paddle_left_x: layout.paddle_travel_range() / 2,
            max_substeps,
            layout,
        }
    }

    /// Start a level: every brick alive, new ball speed, ball back at the serve position
    pub fn reset(&mut self, ball_speed: f32) {
        assert!(
            ball_speed.is_finite() && ball_speed > 0.0,
            "ball speed must be finite and positive, got {ball_speed}"
        );

        self.bricks.fill(true);
        self.bricks_remaining = self.bricks.len();
        self.ball_speed = ball_speed;
        self.reset_ball();

        log::debug!(
            "Level reset: {} bricks, ball speed {}",
            self.bricks_remaining,
            self.ball_speed
        );
    }

    /// Serve a fresh ball, leaving the bricks as they are
    pub fn reset_ball(&mut self) {
        assert!(self.ball_speed > 0.0, "reset_ball called before reset set a ball speed");

        let angle = self.layout.ball_start_angle;
        self.ball_position = self.layout.ball_start;
        self.ball_velocity = polar_to_cartesian(self.ball_speed, angle);
        self.bounce_angle = angle.sin().abs().atan2(angle.cos().abs());
        self.ball_alive = true;
        self.last_checked_pixel = pixel_of(self.ball_position);
    }

    /// Place the paddle's left edge at `ratio` of its travel range
    ///
    /// Panics if `ratio` is outside [0, 1].
    pub fn move_paddle_to(&mut self, ratio: f32) {
        assert!(
            (0.0..=1.0).contains(&ratio),
            "paddle ratio must be within [0, 1], got {ratio}"
        );
        self.paddle_left_x = (ratio * self.layout.paddle_travel_range() as f32).floor() as i32;
    }

    /// Advance the ball by `delta_time` seconds
    pub fn run_step(&mut self, delta_time: f32) -> StepResult {
        assert!(
            delta_time.is_finite() && delta_time >= 0.0,
            "delta_time must be finite and non-negative, got {delta_time}"
        );

        let mut result = StepResult::default();
        if !self.ball_alive {
            return result;
        }

        let distance = delta_time * self.ball_speed;
        self.walk(distance, |physics, pixel| {
            physics.resolve_pixel(pixel, &mut result);
            if result.ends_frame() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        result
    }

    /// Move the ball `distance` pixels along its velocity, calling `on_new_pixel`
    /// each time the rounded position changes
    fn walk<F>(&mut self, distance: f32, mut on_new_pixel: F)
    where
        F: FnMut(&mut Self, IVec2) -> ControlFlow<()>,
    {
        let mut remaining = distance;
        let mut substeps = 0;

        while remaining > 0.0 {
            substeps += 1;
            assert!(
                substeps <= self.max_substeps,
                "ball exceeded {} sub-steps in one frame (distance {distance})",
                self.max_substeps
            );

            // Direction is re-read every sub-step, collisions may have turned the ball
            let step = remaining.min(1.0);
            let direction = self.ball_velocity / self.ball_speed;
            self.ball_position += direction * step;
            remaining -= step;

            assert!(
                self.ball_position.is_finite(),
                "ball position became non-finite: {:?}",
                self.ball_position
            );

            let pixel = pixel_of(self.ball_position);
            if pixel != self.last_checked_pixel {
                self.last_checked_pixel = pixel;
                if on_new_pixel(self, pixel).is_break() {
                    break;
                }
            }
        }
    }

    fn resolve_pixel(&mut self, pixel: IVec2, result: &mut StepResult) {
        let IVec2 { x, y } = pixel;

        if y <= self.layout.paddle_y {
            self.ball_alive = false;
            result.life_lost = true;
            result.events.push(GameEvent::BallLost);
            return;
        }

        if y >= self.layout.top_wall_y() && self.ball_velocity.y > 0.0 {
            self.ball_velocity.y = -self.ball_velocity.y;
            result.events.push(GameEvent::WallBounce);
        }

        let hits_left_wall = x <= 0 && self.ball_velocity.x < 0.0;
        let hits_right_wall = x >= self.layout.right_limit() && self.ball_velocity.x > 0.0;
        if hits_left_wall || hits_right_wall {
            self.ball_velocity.x = -self.ball_velocity.x;
            result.events.push(GameEvent::WallBounce);
        }

        self.check_bricks(pixel, result);
        self.check_paddle(pixel, result);
    }

    fn check_bricks(&mut self, pixel: IVec2, result: &mut StepResult) {
        let Some(row) = self.layout.row_at(pixel.y) else {
            return;
        };
        let Some(column) = self.layout.column_at(pixel.x) else {
            return;
        };
        if !self.is_brick_alive(row, column) {
            return;
        }

        self.deflect_off_brick(pixel.x, row, column);

        let index = row * self.layout.columns + column;
        self.bricks[index] = false;
        self.bricks_remaining -= 1;
        result.score_change += self.layout.rows[row].value;
        result.events.push(GameEvent::BrickDestroyed { row, column });

        if self.bricks_remaining == 0 {
            result.won_level = true;
            result.events.push(GameEvent::LevelCleared);
        }
    }

    /// Side hit only when the struck edge is exposed. A live neighbour or a
    /// wall on that edge means the ball came in through the top or bottom face.
    fn deflect_off_brick(&mut self, x: i32, row: usize, column: usize) {
        let (left_edge, right_edge) = self.layout.column_edges(column);
        let open_left = left_edge > 0 && (column == 0 || !self.is_brick_alive(row, column - 1));
        let open_right = right_edge < self.layout.right_limit()
            && (column + 1 == self.layout.columns || !self.is_brick_alive(row, column + 1));

        let side_hit = (x == left_edge && self.ball_velocity.x > 0.0 && open_left)
            || (x == right_edge && self.ball_velocity.x < 0.0 && open_right);

        if side_hit {
            self.ball_velocity.x = -self.ball_velocity.x;
        } else {
            self.ball_velocity.y = -self.ball_velocity.y;
        }
    }

    fn check_paddle(&mut self, pixel: IVec2, result: &mut StepResult) {
        if pixel.y != self.layout.paddle_contact_y() || self.ball_velocity.y >= 0.0 {
            return;
        }

        let left = self.paddle_left_x;
        let right = left + self.layout.paddle_width;
        if pixel.x < left || pixel.x >= right {
            return;
        }

        let moving_right = self.ball_velocity.x > 0.0;
        let tail_distance = if moving_right {
            pixel.x - left
        } else {
            (right - 1) - pixel.x
        };
        assert!(
            (0..self.layout.paddle_width).contains(&tail_distance),
            "paddle contact distance {tail_distance} outside paddle width {}",
            self.layout.paddle_width
        );

        let zone = PaddleZone::from_tail_distance(tail_distance);
        let heading_right = match zone.bounce_angle() {
            Some(angle) => {
                self.bounce_angle = angle;
                !moving_right
            }
            None => moving_right,
        };

        let rebound = polar_to_cartesian(self.ball_speed, self.bounce_angle);
        let vx = if heading_right {
            rebound.x.abs()
        } else {
            -rebound.x.abs()
        };
        self.ball_velocity = Vec2::new(vx, rebound.y.abs());
        result.events.push(GameEvent::PaddleBounce { zone });
    }

    /// Liveness of one row of bricks, left to right
    ///
    /// Panics if `row` is outside the grid.
    pub fn brick_row(&self, row: usize) -> &[bool] {
        assert!(
            row < self.layout.row_count(),
            "brick row {row} outside grid of {} rows",
            self.layout.row_count()
        );
        let columns = self.layout.columns;
        &self.bricks[row * columns..(row + 1) * columns]
    }

    pub fn is_brick_alive(&self, row: usize, column: usize) -> bool {
        self.brick_row(row)[column]
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks_remaining
    }

    pub fn paddle_left_x(&self) -> i32 {
        self.paddle_left_x
    }

    pub fn paddle_travel_range(&self) -> i32 {
        self.layout.paddle_travel_range()
    }

    pub fn pixel_ball_position(&self) -> IVec2 {
        pixel_of(self.ball_position)
    }

    pub fn ball_position(&self) -> Vec2 {
        self.ball_position
    }

    pub fn ball_velocity(&self) -> Vec2 {
        self.ball_velocity
    }

    pub fn ball_speed(&self) -> f32 {
        self.ball_speed
    }

    pub fn is_ball_alive(&self) -> bool {
        self.ball_alive
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}
