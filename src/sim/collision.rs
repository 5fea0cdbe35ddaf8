//! Arcade-style overlap detection
//!
//! Bird and pipes never rotate their hit boxes (the bird's rotation is
//! purely visual), so everything is an axis-aligned rectangle.

use glam::Vec2;

/// Axis-aligned bounding box in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// True once the box is entirely left of `x`
    pub fn is_left_of(&self, x: f32) -> bool {
        self.max.x < x
    }
}
