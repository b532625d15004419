//! Axis-aligned bounding boxes and the player/obstacle overlap test.

use super::obstacle::Obstacle;

/// Axis-aligned rectangle in world units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if both axes overlap. Shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Index of the first obstacle (in spawn order) that overlaps the hitbox.
pub fn first_collision(hitbox: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|o| hitbox.overlaps(&o.rect()))
}
