//! Gameplay configuration.
//!
//! Every tunable constant of a run lives here. The defaults give a
//! playable game; a `config.json` in the data directory may override any
//! subset of fields.

use crate::constants::CONFIG_FILE;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};

/// Play field geometry, in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
    /// Distance of the ground line from the bottom edge.
    pub ground_margin: f64,
    /// Width of one ground tile (ground tick spacing is half of this).
    pub ground_tile_width: f64,
    /// Parallax factor of the mountain layer relative to scroll speed.
    pub mountain_parallax: f64,
}

impl FieldConfig {
    /// Y coordinate of the ground line.
    pub fn ground_y(&self) -> f64 {
        self.height - self.ground_margin
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 300.0,
            ground_margin: 40.0,
            ground_tile_width: 50.0,
            mountain_parallax: 0.2,
        }
    }
}

/// Player body and physics parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    /// Downward acceleration in units/s^2.
    pub gravity: f64,
    /// Initial jump velocity in units/s (negative = upward).
    pub jump_velocity: f64,
    /// Hitbox inset as (dx, dy, dwidth, dheight) applied to the body rect.
    pub hitbox_inset: (f64, f64, f64, f64),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            x: 50.0,
            width: 30.0,
            height: 50.0,
            gravity: 1800.0,
            jump_velocity: -550.0,
            hitbox_inset: (5.0, 5.0, -10.0, -5.0),
        }
    }
}

/// Scroll speed, boost and adaptive difficulty parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub initial_speed: f64,
    pub max_speed: f64,
    /// Linear speed ramp in units/s per second of play.
    pub ramp_per_second: f64,
    /// Score distance between speed boosts.
    pub boost_interval: u64,
    pub boost_amount: f64,
    /// Clearances needed before gravity and jump adapt.
    pub success_threshold: u32,
    pub gravity_step: f64,
    pub jump_velocity_step: f64,
    pub max_adaptations: u32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            initial_speed: 300.0,
            max_speed: 700.0,
            ramp_per_second: 3.0,
            boost_interval: 500,
            boost_amount: 100.0,
            success_threshold: 5,
            gravity_step: 200.0,
            jump_velocity_step: 50.0,
            max_adaptations: 3,
        }
    }
}

/// Obstacle generation parameters. Times are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub min_gap_ms: f64,
    pub max_gap_ms: f64,
    /// Fraction of the gap range removed at max speed.
    pub gap_speed_weight: f64,
    pub jitter_ms: f64,
    /// Delay before the first obstacle of a run.
    pub initial_delay_ms: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
    /// Heights above this count as tall.
    pub tall_threshold: f64,
    /// Chance of drawing from the short range after a tall obstacle.
    pub relief_chance: f64,
    pub relief_min_height: f64,
    pub relief_max_height: f64,
    /// Spawns closer than this to the previous one wait for a rising player.
    pub rising_window_ms: f64,
    pub defer_ms: f64,
    pub stale_ms: f64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            min_gap_ms: 600.0,
            max_gap_ms: 1400.0,
            gap_speed_weight: 0.7,
            jitter_ms: 300.0,
            initial_delay_ms: 0.0,
            min_width: 20.0,
            max_width: 40.0,
            min_height: 30.0,
            max_height: 60.0,
            tall_threshold: 50.0,
            relief_chance: 0.6,
            relief_min_height: 20.0,
            relief_max_height: 35.0,
            rising_window_ms: 500.0,
            defer_ms: 200.0,
            stale_ms: 1500.0,
        }
    }
}

/// Full configuration for a runner session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub field: FieldConfig,
    pub player: PlayerConfig,
    pub difficulty: DifficultyConfig,
    pub spawner: SpawnerConfig,
    /// Random seed for reproducible runs (None = from entropy).
    pub seed: Option<u64>,
}

impl RunnerConfig {
    /// Load `config.json` from the data directory, falling back to defaults
    /// for a missing file, invalid JSON, or missing fields.
    pub fn load() -> Self {
        let config: Self = load_json_or_default(CONFIG_FILE);
        config.sanitized()
    }

    /// Repair inverted ranges so the random draws stay well-formed.
    pub fn sanitized(mut self) -> Self {
        let d = &mut self.difficulty;
        if d.max_speed < d.initial_speed {
            d.max_speed = d.initial_speed;
        }

        let s = &mut self.spawner;
        if s.max_gap_ms < s.min_gap_ms {
            std::mem::swap(&mut s.min_gap_ms, &mut s.max_gap_ms);
        }
        if s.max_width <= s.min_width {
            s.max_width = s.min_width + 1.0;
        }
        if s.max_height <= s.min_height {
            s.max_height = s.min_height + 1.0;
        }
        if s.relief_max_height <= s.relief_min_height {
            s.relief_max_height = s.relief_min_height + 1.0;
        }
        s.jitter_ms = s.jitter_ms.max(0.0);
        s.relief_chance = s.relief_chance.clamp(0.0, 1.0);
        self
    }
}
