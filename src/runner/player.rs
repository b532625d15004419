//! Player body and jump physics.

use super::collision::Rect;
use crate::config::PlayerConfig;

/// The runner. Y grows downward; `y` is the top edge of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity in units/s (negative = upward).
    pub velocity_y: f64,
    /// Current gravity; raised by difficulty adaptation.
    pub gravity: f64,
    /// Current jump velocity; lowered (stronger) by difficulty adaptation.
    pub max_jump_velocity: f64,
    pub base_gravity: f64,
    pub base_jump_velocity: f64,
    pub is_jumping: bool,
    /// Obstacles cleared since the last difficulty adaptation.
    pub successful_jumps: u32,
    pub ground_y: f64,
    hitbox_inset: (f64, f64, f64, f64),
}

impl Player {
    pub fn new(config: &PlayerConfig, ground_y: f64) -> Self {
        Self {
            x: config.x,
            y: ground_y - config.height,
            width: config.width,
            height: config.height,
            velocity_y: 0.0,
            gravity: config.gravity,
            max_jump_velocity: config.jump_velocity,
            base_gravity: config.gravity,
            base_jump_velocity: config.jump_velocity,
            is_jumping: false,
            successful_jumps: 0,
            ground_y,
            hitbox_inset: config.hitbox_inset,
        }
    }

    /// Restore the start-of-session state, including adapted physics.
    pub fn reset(&mut self) {
        self.y = self.standing_y();
        self.velocity_y = 0.0;
        self.is_jumping = false;
        self.successful_jumps = 0;
        self.gravity = self.base_gravity;
        self.max_jump_velocity = self.base_jump_velocity;
    }

    /// Top edge when standing on the ground.
    pub fn standing_y(&self) -> f64 {
        self.ground_y - self.height
    }

    /// Integrate gravity over `dt` seconds, then clamp to the ground.
    pub fn update(&mut self, dt: f64) {
        self.velocity_y += self.gravity * dt;
        self.y += self.velocity_y * dt;

        if self.y + self.height > self.ground_y {
            self.y = self.standing_y();
            self.velocity_y = 0.0;
            self.is_jumping = false;
        }
    }

    /// Start a jump. Returns false (and changes nothing) when already airborne.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping {
            return false;
        }
        self.is_jumping = true;
        self.velocity_y = self.max_jump_velocity;
        true
    }

    /// Above the standing line.
    pub fn is_airborne(&self) -> bool {
        self.y < self.standing_y()
    }

    /// Moving toward the ground.
    pub fn is_descending(&self) -> bool {
        self.velocity_y > 0.0
    }

    /// Moving away from the ground.
    pub fn is_rising(&self) -> bool {
        self.velocity_y < 0.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Collision rectangle, inset from the body.
    pub fn hitbox(&self) -> Rect {
        let (dx, dy, dw, dh) = self.hitbox_inset;
        Rect::new(self.x + dx, self.y + dy, self.width + dw, self.height + dh)
    }
}
