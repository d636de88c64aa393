//! Circle overlap test
//!
//! Every entity in the play field is a circle, so this is the only
//! collision primitive the simulation needs.

use glam::Vec2;

/// A circle in canvas space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// True iff the distance between centers is strictly less than the sum of radii.
///
/// Circles that merely touch do not collide.
#[inline]
pub fn is_colliding(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}
