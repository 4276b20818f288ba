//! Axis-aligned collision detection
//!
//! Every entity is a box anchored at its top-left corner (screen space, +y is
//! down). Overlap uses strict inequalities, so boxes that merely touch along
//! an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict AABB overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// Inclusive point containment (edges count as inside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.pos.x
            && p.x <= self.pos.x + self.size.x
            && p.y >= self.pos.y
            && p.y <= self.pos.y + self.size.y
    }
}

/// Anything with a collision box
pub trait Body {
    fn rect(&self) -> Rect;

    fn overlaps<B: Body + ?Sized>(&self, other: &B) -> bool {
        self.rect().overlaps(&other.rect())
    }
}

/// Velocity that pulls `from` toward `to` at `speed`, or `None` when the two
/// points coincide and there is no direction to pull in
pub fn pull_toward(from: Vec2, to: Vec2, speed: f32) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist <= f32::EPSILON {
        return None;
    }
    Some(delta / dist * speed)
}
