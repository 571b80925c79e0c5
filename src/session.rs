//! Score, lives and level bookkeeping around the physics engine
//!
//! The engine reports what happened in a frame; the session decides what
//! that means for the run (lose a life, move to the next level, start over).

use serde::{Deserialize, Serialize};

use crate::controller::PaddleController;
use crate::settings::Settings;
use crate::sim::{Physics, StepResult};

/// Totals for a run, handy for logging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub frames: u64,
    pub bricks_destroyed: u64,
    pub lives_lost: u64,
    pub levels_cleared: u64,
    pub games_over: u64,
    pub best_score: u64,
}

/// One player's run through the levels
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    physics: Physics,
    score: u64,
    lives: u32,
    /// 1-based
    level: u32,
    stats: SessionStats,
}

impl Session {
    /// Start a run at level 1
    ///
    /// Panics if the settings do not validate.
    pub fn new(settings: Settings) -> Self {
        if let Err(err) = settings.validate() {
            panic!("invalid settings: {err}");
        }

        let physics = Physics::new(settings.layout.clone());
        let mut session = Self {
            lives: settings.initial_lives,
            settings,
            physics,
            score: 0,
            level: 1,
            stats: SessionStats::default(),
        };
        session.reset_level(1);
        session
    }

    /// Restart the bricks and the ball at the given level's speed
    pub fn reset_level(&mut self, level: u32) {
        self.level = level;
        let speed = self.settings.ball_speed_for_level(level);
        self.physics.reset(speed);
        log::info!("Level {level} (ball speed {speed})");
    }

    /// Run one frame: read the controller, move the paddle, step the ball,
    /// then apply the outcome to the run
    pub fn frame(&mut self, delta_time: f32, controller: &mut dyn PaddleController) -> StepResult {
        let ratio = controller.paddle_left_ratio(&self.physics);
        self.physics.move_paddle_to(ratio);

        let result = self.physics.run_step(delta_time);
        self.apply(&result);
        result
    }

    fn apply(&mut self, result: &StepResult) {
        self.stats.frames += 1;
        self.score += u64::from(result.score_change);
        self.stats.best_score = self.stats.best_score.max(self.score);
        self.stats.bricks_destroyed += result
            .events
            .iter()
            .filter(|e| matches!(e, crate::sim::GameEvent::BrickDestroyed { .. }))
            .count() as u64;

        if result.life_lost {
            self.lives -= 1;
            self.stats.lives_lost += 1;
            log::info!("Ball lost, {} lives left", self.lives);

            if self.lives == 0 {
                self.stats.games_over += 1;
                log::info!("Game over on level {} with score {}", self.level, self.score);
                self.lives = self.settings.initial_lives;
                // Best score lives on in the stats
                self.score = 0;
                self.reset_level(1);
            } else {
                self.physics.reset_ball();
            }
        } else if result.won_level {
            self.stats.levels_cleared += 1;
            self.reset_level(self.level + 1);
        }
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
