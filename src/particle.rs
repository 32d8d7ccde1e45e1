//! Rider points with Verlet integration and implicit velocity.

use crate::float::Float;
use crate::geometry::Segment;
use crate::vec::Vec2;

/// A Verlet point. Velocity is implied by `pos - prev_pos`.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    /// Current position.
    pub pos: Vec2<F>,
    /// Position one frame earlier.
    pub prev_pos: Vec2<F>,
    /// Scales inertia during integration (scarf points are lighter).
    pub mass: F,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec2<F>, mass: F) -> Self {
        Particle { pos, prev_pos: pos, mass }
    }

    /// A point at `pos` already moving by `velocity` per frame.
    pub fn with_velocity(pos: Vec2<F>, velocity: Vec2<F>, mass: F) -> Self {
        Particle { pos, prev_pos: pos - velocity, mass }
    }

    /// Free motion: inertia scaled by drag and mass, plus gravity.
    pub fn integrate(&mut self, drag: F, gravity: Vec2<F>) {
        let velocity = self.velocity();
        let new_pos = self.pos + velocity.scale(drag * self.mass) + gravity;
        self.prev_pos = self.pos;
        self.pos = new_pos;
    }

    pub fn velocity(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    /// Path travelled this frame, from `prev_pos` to `pos`.
    pub fn trajectory(&self) -> Segment<F> {
        Segment::new(self.prev_pos, self.pos)
    }

    /// Shift both positions, keeping velocity.
    pub fn translate(&mut self, offset: Vec2<F>) {
        self.pos += offset;
        self.prev_pos += offset;
    }
}
