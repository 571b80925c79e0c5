//! Paddle input strategies
//!
//! A controller turns whatever input it has (pointer position, or nothing at
//! all for autoplay) into a paddle position ratio. The engine never knows
//! which one is driving it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::Physics;

/// Anything that can steer the paddle
pub trait PaddleController {
    /// Where the paddle's left edge should go, as a ratio in [0, 1] of its
    /// travel range. 0 is full left, 1 is full right.
    fn paddle_left_ratio(&mut self, physics: &Physics) -> f32;
}

/// Follows a mouse or touch position
#[derive(Debug, Clone)]
pub struct PointerController {
    /// Even with no input this frame the paddle needs a position
    last_ratio: f32,
    /// Only the middle half of the screen steers (landscape touch)
    center_band: bool,
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new(false)
    }
}

impl PointerController {
    pub fn new(center_band: bool) -> Self {
        Self {
            last_ratio: 0.5,
            center_band,
        }
    }

    /// Record a pointer at `x` on a screen `screen_width` wide
    pub fn pointer_moved(&mut self, x: f32, screen_width: f32) {
        if !(screen_width > 0.0 && x.is_finite()) {
            log::warn!("Ignoring pointer at {x} on a {screen_width}-wide screen");
            return;
        }

        let ratio = x / screen_width;
        let ratio = if self.center_band {
            // 0..0.25 -> 0, 0.5 -> 0.5, 0.75.. -> 1
            (ratio - 0.25).max(0.0) * 2.0
        } else {
            ratio
        };
        self.last_ratio = ratio.clamp(0.0, 1.0);
    }
}

impl PaddleController for PointerController {
    fn paddle_left_ratio(&mut self, _physics: &Physics) -> f32 {
        self.last_ratio
    }
}

/// Plays by itself: keeps the paddle under the ball with a random aim offset
/// so rebounds come off different paddle zones
#[derive(Debug, Clone)]
pub struct AutoplayController {
    rng: Pcg32,
    /// Pixels added to the paddle's centered position, re-rolled per descent
    aim_offset: i32,
    was_descending: bool,
}

impl AutoplayController {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aim_offset: 0,
            was_descending: false,
        }
    }

    pub fn aim_offset(&self) -> i32 {
        self.aim_offset
    }
}

impl PaddleController for AutoplayController {
    fn paddle_left_ratio(&mut self, physics: &Physics) -> f32 {
        let layout = physics.layout();

        let descending = physics.ball_velocity().y < 0.0;
        if descending && !self.was_descending {
            // Keep at least two pixels of paddle on either side of the ball
            let reach = (layout.paddle_width / 2 - 2).max(0);
            self.aim_offset = self.rng.random_range(-reach..=reach);
        }
        self.was_descending = descending;

        let travel = physics.paddle_travel_range();
        if travel == 0 {
            return 0.0;
        }

        let target_left =
            physics.ball_position().x - layout.paddle_width as f32 / 2.0 + self.aim_offset as f32;
        (target_left / travel as f32).clamp(0.0, 1.0)
    }
}
