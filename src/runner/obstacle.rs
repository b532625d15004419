//! Ground obstacles and their scrolling.

use super::collision::Rect;
use crate::constants::REFERENCE_FPS;

/// A block sitting on the ground line.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Whether the player has been credited for clearing this obstacle.
    pub passed: bool,
}

impl Obstacle {
    /// New obstacle at the right edge of the field, resting on the ground.
    pub fn spawn(field_width: f64, ground_y: f64, width: f64, height: f64) -> Self {
        Self {
            x: field_width,
            y: ground_y - height,
            width,
            height,
            passed: false,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Scroll left by `scroll_speed` units per nominal tick share of `dt`.
    pub fn advance(&mut self, scroll_speed: f64, dt: f64) {
        self.x -= scroll_displacement(scroll_speed, dt);
    }

    pub fn is_off_screen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Horizontal displacement for `dt` seconds at `scroll_speed`.
///
/// Speed is per second at the nominal 60 Hz tick: one tick moves
/// `scroll_speed / 60`, and `dt` is counted in ticks.
pub fn scroll_displacement(scroll_speed: f64, dt: f64) -> f64 {
    let per_tick = scroll_speed / REFERENCE_FPS;
    let ticks = dt * REFERENCE_FPS;
    per_tick * ticks
}

/// Drop every obstacle that has fully left the field. Keeps spawn order.
/// Returns how many were removed.
pub fn prune_off_screen(obstacles: &mut Vec<Obstacle>) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_off_screen());
    before - obstacles.len()
}
