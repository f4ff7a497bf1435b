//! Flat-world geometry for overlap tests and spawn placement
//!
//! The world is an axis-aligned rectangle with the origin at the top-left
//! corner. Body contact uses rect-vs-rect, projectile strikes use
//! circle-vs-circle, and enemy placement partitions the world into 2×2
//! quadrants.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rect of the given side lengths centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Closed-interval overlap test (touching edges count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Clamp a point into the rect
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Circle-vs-circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let r = radius_a + radius_b;
    a.distance_squared(b) <= r * r
}

/// Quadrant index for a point in a world of the given extent
///
/// The world splits into a 2×2 grid; indices run 0..4 row-major from the
/// top-left (0 = top-left, 1 = top-right, 2 = bottom-left, 3 = bottom-right).
pub fn quadrant_of(point: Vec2, world: Vec2) -> u8 {
    let col = if point.x >= world.x / 2.0 { 1 } else { 0 };
    let row = if point.y >= world.y / 2.0 { 1 } else { 0 };
    row * 2 + col
}

/// Rect covering one quadrant of a world of the given extent
pub fn quadrant_rect(index: u8, world: Vec2) -> Rect {
    let half = world / 2.0;
    let col = (index % 2) as f32;
    let row = (index / 2) as f32;
    let min = Vec2::new(col * half.x, row * half.y);
    Rect::new(min, min + half)
}
