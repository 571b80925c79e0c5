//! Retro Breakout - a pixel-stepped brick breaker simulation core
//!
//! Core modules:
//! - `sim`: Frame-stepped physics (ball, paddle, brick grid, collisions)
//! - `controller`: Paddle input strategies (pointer, autoplay)
//! - `session`: Score/lives/level bookkeeping around the engine
//! - `settings`: Data-driven tuning and arena layout

pub mod controller;
pub mod session;
pub mod settings;
pub mod sim;

pub use controller::{AutoplayController, PaddleController, PointerController};
pub use session::Session;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Brick grid dimensions
    pub const NUM_BRICK_ROWS: usize = 6;
    pub const BRICKS_PER_ROW: usize = 18;
    pub const BRICK_WIDTH: i32 = 5;
    pub const BRICK_HEIGHT: i32 = 2;
    /// Bottom edge of the lowest brick row
    pub const BRICKS_BOTTOM_Y: i32 = 34;

    /// House (the frame around the playfield)
    pub const HOUSE_HEIGHT: i32 = 56;
    pub const HOUSE_WALL_THICKNESS: i32 = 5;

    /// Playfield, measured from the inner faces of the walls
    pub const ARENA_WIDTH: i32 = BRICKS_PER_ROW as i32 * BRICK_WIDTH;
    pub const ARENA_HEIGHT: i32 = HOUSE_HEIGHT - HOUSE_WALL_THICKNESS;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 10;
    pub const PADDLE_HEIGHT: i32 = 1;
    pub const PADDLE_Y: i32 = 1;

    /// Ball defaults
    pub const BALL_START_X: f32 = 45.0;
    pub const BALL_START_Y: f32 = 20.0;
    /// Serve heads down and to the right, 60 degrees below horizontal
    pub const BALL_START_ANGLE: f32 = -std::f32::consts::FRAC_PI_3;

    /// Ball speed in pixels per second
    pub const DEFAULT_BALL_SPEED: f32 = 12.0;
    pub const BALL_SPEED_INCREASE_PER_LEVEL: f32 = 2.0;
    pub const INITIAL_LIVES: u32 = 5;

    /// Paddle rebound angles, measured from horizontal
    pub const SHALLOW_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_6;
    pub const MEDIUM_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    pub const DEEP_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Paddle zones, as distance in pixels from the trailing paddle edge
    pub const SHALLOW_ZONE_MAX: i32 = 1;
    pub const MEDIUM_ZONE_MAX: i32 = 3;
    pub const DEEP_ZONE_END: i32 = 5;

    /// How many times a ball may cross the arena diagonally in one frame
    /// before the step walk is considered runaway
    pub const MAX_ARENA_CROSSINGS_PER_FRAME: u32 = 8;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
