//! Scroll speed ramp, score-triggered boosts and adaptive player physics.
//!
//! Difficulty only ever goes up within a session.

use super::player::Player;
use crate::config::DifficultyConfig;

/// Result of the boost check for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoostOutcome {
    #[default]
    None,
    /// Full boost applied.
    Boosted,
    /// Boost would pass the cap; speed set to the cap instead.
    Capped,
}

/// What the controller changed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DifficultyUpdate {
    pub boost: BoostOutcome,
    pub adapted: bool,
}

#[derive(Debug, Clone)]
pub struct Difficulty {
    /// Current scroll speed, always within `[initial_speed, max_speed]`.
    pub speed: f64,
    /// Score at which the last boost was granted.
    pub last_boost_score: u64,
    /// Gravity/jump adaptations applied this session.
    pub adaptations: u32,
    config: DifficultyConfig,
}

impl Difficulty {
    pub fn new(config: DifficultyConfig) -> Self {
        Self {
            speed: config.initial_speed,
            last_boost_score: 0,
            adaptations: 0,
            config,
        }
    }

    pub fn reset(&mut self) {
        self.speed = self.config.initial_speed;
        self.last_boost_score = 0;
        self.adaptations = 0;
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    /// Progress from initial toward max speed, in `[0, 1]`.
    pub fn speed_fraction(&self) -> f64 {
        let span = self.config.max_speed - self.config.initial_speed;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.speed - self.config.initial_speed) / span).clamp(0.0, 1.0)
    }

    /// Run the three difficulty rules for one tick of `dt` seconds.
    pub fn update(&mut self, dt: f64, score: u64, player: &mut Player) -> DifficultyUpdate {
        self.ramp(dt);
        let boost = self.check_boost(score);
        let adapted = self.adapt(player);
        DifficultyUpdate { boost, adapted }
    }

    /// Linear speed increase, capped at max.
    pub fn ramp(&mut self, dt: f64) {
        if self.speed < self.config.max_speed {
            self.speed = (self.speed + self.config.ramp_per_second * dt).min(self.config.max_speed);
        }
    }

    /// Grant a one-time boost once the score has moved a full interval past
    /// the last boost.
    pub fn check_boost(&mut self, score: u64) -> BoostOutcome {
        if score <= self.last_boost_score + self.config.boost_interval {
            return BoostOutcome::None;
        }
        self.last_boost_score = score;

        if self.speed + self.config.boost_amount < self.config.max_speed {
            self.speed += self.config.boost_amount;
            BoostOutcome::Boosted
        } else {
            self.speed = self.config.max_speed;
            BoostOutcome::Capped
        }
    }

    /// After enough clearances, raise gravity and strengthen the jump, up to
    /// `max_adaptations` steps above base gravity.
    pub fn adapt(&mut self, player: &mut Player) -> bool {
        if player.successful_jumps < self.config.success_threshold {
            return false;
        }

        let gravity_cap =
            player.base_gravity + self.config.gravity_step * self.config.max_adaptations as f64;
        if player.gravity >= gravity_cap {
            return false;
        }

        player.gravity += self.config.gravity_step;
        player.max_jump_velocity -= self.config.jump_velocity_step;
        player.successful_jumps = 0;
        self.adaptations += 1;
        log::info!(
            "Difficulty adapted: gravity {:.0}, jump velocity {:.0}",
            player.gravity,
            player.max_jump_velocity
        );
        true
    }
}
