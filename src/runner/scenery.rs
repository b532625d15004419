//! Background motion: parallax mountains, ground ticks, jump flash.

use super::obstacle::scroll_displacement;
use crate::config::FieldConfig;

/// Frames per half cycle of the two-frame run animation.
const RUN_ANIM_HALF_CYCLE: u64 = 4;

/// Jump flash fades from 1.0 at this rate per second.
const FLASH_DECAY_PER_SECOND: f64 = 2.0;

#[derive(Debug, Clone, Default)]
pub struct Scenery {
    /// Mountain layer offset, in `(-field_width, 0]`.
    pub mountain_x: f64,
    /// Ground tick offset, in `(-tile_width, 0]`.
    pub ground_x: f64,
    /// Remaining jump flash intensity, in `[0, 1]`.
    pub jump_flash: f64,
    /// Running frames since the session started.
    pub frame_count: u64,
}

impl Scenery {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn flash(&mut self) {
        self.jump_flash = 1.0;
    }

    /// Scroll both layers and fade the flash for one tick.
    pub fn advance(&mut self, field: &FieldConfig, speed: f64, dt: f64) {
        let movement = scroll_displacement(speed, dt);

        if field.width > 0.0 {
            self.mountain_x = (self.mountain_x - movement * field.mountain_parallax) % field.width;
        }
        if field.ground_tile_width > 0.0 {
            self.ground_x = (self.ground_x - movement) % field.ground_tile_width;
        }
        self.jump_flash = (self.jump_flash - dt * FLASH_DECAY_PER_SECOND).max(0.0);
        self.frame_count += 1;
    }

    /// Which of the two run animation frames to show.
    pub fn run_frame(&self) -> u8 {
        if self.frame_count % (RUN_ANIM_HALF_CYCLE * 2) < RUN_ANIM_HALF_CYCLE {
            0
        } else {
            1
        }
    }
}
