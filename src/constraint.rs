//! Distance constraints between rider points.
//!
//! One constraint type serves four resolution modes. Each call is a single
//! relaxation pass; repeating passes converges the whole rider.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec2;

/// Keeps two points (by index) at `rest_length` from each other.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F) -> Self {
        DistanceConstraint { a, b, rest_length }
    }

    /// Rest length taken from the current distance, scaled by `scale`.
    pub fn from_particles(a: usize, b: usize, particles: &[Particle<F>], scale: F) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos) * scale;
        DistanceConstraint { a, b, rest_length }
    }

    /// Current length of the constraint.
    pub fn length(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].pos.distance(particles[self.b].pos)
    }

    /// Rigid: both points move half the correction.
    pub fn solve(&self, particles: &mut [Particle<F>]) {
        self.relax(particles, false);
    }

    /// Leg: corrects only when compressed below the rest length.
    pub fn solve_min_length(&self, particles: &mut [Particle<F>]) {
        self.relax(particles, true);
    }

    /// Scarf: `a` stays put, `b` takes the whole correction.
    pub fn solve_one_sided(&self, particles: &mut [Particle<F>]) {
        let Some(correction) = self.correction(particles) else { return };
        particles[self.b].pos += correction;
    }

    /// Fractional deviation `|len - rest| / rest`; zero for a zero rest length.
    pub fn strain(&self, particles: &[Particle<F>]) -> F {
        if self.rest_length == F::zero() {
            return F::zero();
        }
        ((self.length(particles) - self.rest_length) / self.rest_length).abs()
    }

    /// Whether the strain is past `endurance`. Moves nothing.
    pub fn exceeds_endurance(&self, particles: &[Particle<F>], endurance: F) -> bool {
        self.strain(particles) > endurance
    }

    fn relax(&self, particles: &mut [Particle<F>], compression_only: bool) {
        let Some(correction) = self.correction(particles) else { return };
        let len = self.length(particles);
        if compression_only && len >= self.rest_length {
            return;
        }
        let half = correction.scale(F::half());
        particles[self.a].pos -= half;
        particles[self.b].pos += half;
    }

    /// `delta * (len - rest) / len` with `delta = a - b`; `None` when the
    /// points coincide and no direction exists.
    fn correction(&self, particles: &[Particle<F>]) -> Option<Vec2<F>> {
        let delta = particles[self.a].pos - particles[self.b].pos;
        let len = delta.length();
        if len == F::zero() {
            return None;
        }
        let factor = (len - self.rest_length) / len;
        Some(delta.scale(factor))
    }
}
