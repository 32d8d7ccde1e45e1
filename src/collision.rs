//! Collision resolution between rider points and track lines.
//!
//! A point collides with a line when its trajectory this frame crosses the
//! line, or when it already sits within the line thickness. Each iteration
//! resolves only the contact whose intersection is nearest to where the point
//! started the frame, then re-queries the grid from the new position.

use alloc::collections::BTreeMap;

use crate::config::WorldConfig;
use crate::float::Float;
use crate::geometry::Segment;
use crate::grid::LineGrid;
use crate::line::{Ink, Line, LineId};
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::rider::{Rider, SENSITIVE_POINT};
use crate::vec::Vec2;

/// A detected collision between a point and a line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact<F: Float> {
    pub line: Line<F>,
    /// Where the point is moved to resolve the collision.
    pub resolved: Vec2<F>,
    /// Where the trajectory meets the line; the point itself when it was
    /// already inside the line.
    pub intersection: Vec2<F>,
}

/// Detects and resolves point/line collisions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionResolver<F: Float> {
    line_thickness: F,
    push_out: F,
    tolerance: F,
    max_iterations: usize,
}

impl<F: Float> CollisionResolver<F> {
    pub fn new(config: &WorldConfig<F>) -> Self {
        CollisionResolver {
            line_thickness: config.line_thickness,
            push_out: config.thickness(),
            tolerance: config.region_tolerance(),
            max_iterations: config.max_collision_iterations,
        }
    }

    /// Collision of `particle` with `line` this frame, if any.
    pub fn contact(&self, particle: &Particle<F>, line: &Line<F>) -> Option<Contact<F>> {
        let trajectory = Segment::new(particle.pos, particle.prev_pos);
        let projected = line.segment.closest_point(particle.pos);
        let incoming = particle.prev_pos - projected;

        if let Some(intersection) = trajectory.intersection(&line.segment, self.tolerance) {
            // Crossed the line: land just on the near side.
            let normal = push_direction(line, projected - particle.pos, incoming);
            let resolved = projected + normal.scale(self.push_out);
            return Some(Contact { line: *line, resolved, intersection });
        }

        if line.segment.distance_to(particle.pos, self.tolerance) < self.line_thickness {
            // Inside the line: push out the way it is already leaning.
            let normal = push_direction(line, particle.pos - projected, incoming);
            let resolved = projected + normal.scale(self.push_out);
            return Some(Contact { line: *line, resolved, intersection: particle.pos });
        }

        None
    }

    /// The contact whose intersection is closest to `prev_pos`.
    ///
    /// On an exact tie the earlier candidate wins.
    pub fn nearest_contact(&self, particle: &Particle<F>, lines: &[Line<F>]) -> Option<Contact<F>> {
        let mut nearest: Option<(F, Contact<F>)> = None;
        for line in lines {
            let Some(contact) = self.contact(particle, line) else { continue };
            let dist = particle.prev_pos.distance_sq(contact.intersection);
            match nearest {
                Some((best, _)) if best <= dist => {}
                _ => nearest = Some((dist, contact)),
            }
        }
        nearest.map(|(_, contact)| contact)
    }

    /// Resolve collisions of one rider point until it is clear of every line
    /// or the iteration cap is reached.
    ///
    /// Returns the acceleration lines struck. A collision on the sensitive
    /// point knocks the rider off the sled.
    pub fn resolve<O: StepObserver<F>>(
        &self,
        rider: &mut Rider<F>,
        point: usize,
        grid: &LineGrid<F>,
        observer: &mut O,
    ) -> BTreeMap<LineId, Line<F>> {
        let mut struck = BTreeMap::new();

        for _ in 0..self.max_iterations {
            let particle = rider.particle(point);
            let candidates = grid.lines_near(particle);
            let Some(contact) = self.nearest_contact(particle, &candidates) else {
                return struck;
            };

            rider.particle_mut(point).pos = contact.resolved;
            if contact.line.ink == Ink::Acceleration {
                struck.insert(contact.line.id, contact.line);
            }
            observer.on_collision(point, contact.resolved);

            if point == SENSITIVE_POINT && rider.detach() {
                observer.on_detach();
            }
        }

        tracing::trace!(point, iterations = self.max_iterations, "collision iterations exhausted");
        struck
    }
}

/// Unit push-out direction: `preferred`, else back toward where the point
/// came from, else the line's left normal when the point sits exactly on
/// the line and never moved.
fn push_direction<F: Float>(line: &Line<F>, preferred: Vec2<F>, incoming: Vec2<F>) -> Vec2<F> {
    let zero = Vec2::zero();
    let dir = preferred.normalize();
    if dir != zero {
        return dir;
    }
    let dir = incoming.normalize();
    if dir != zero {
        return dir;
    }
    let along = line.segment.direction();
    Vec2::new(along.y, -along.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> CollisionResolver<f64> {
        CollisionResolver::new(&WorldConfig::new())
    }

    fn floor_line() -> Line<f64> {
        Line::new(LineId(0), Vec2::new(0.0, 100.0), Vec2::new(200.0, 100.0), Ink::Solid)
    }

    #[test]
    fn crossing_point_lands_on_the_near_side() {
        let p = Particle { pos: Vec2::new(50.0, 105.0), prev_pos: Vec2::new(50.0, 95.0), mass: 1.0 };
        let contact = resolver().contact(&p, &floor_line()).expect("crossed the floor");
        assert!(contact.resolved.y < 100.0);
        assert!((100.0 - contact.resolved.y) >= 0.001);
        assert!((contact.intersection.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn resting_point_inside_thickness_is_pushed_out() {
        let p = Particle::new(Vec2::new(50.0, 99.9995), 1.0);
        let contact = resolver().contact(&p, &floor_line()).expect("inside the line");
        assert!(contact.resolved.y < 100.0 - 0.001);
        assert_eq!(contact.intersection, p.pos);
    }

    #[test]
    fn resting_exactly_on_line_is_pushed_to_its_left() {
        let p = Particle::new(Vec2::new(50.0, 100.0), 1.0);
        let contact = resolver().contact(&p, &floor_line()).expect("on the line");
        assert!(contact.resolved.y < 100.0 - 0.001);
        assert_eq!(contact.resolved.x, 50.0);
    }

    #[test]
    fn point_clear_of_line_has_no_contact() {
        let p = Particle { pos: Vec2::new(50.0, 90.0), prev_pos: Vec2::new(49.0, 85.0), mass: 1.0 };
        assert!(resolver().contact(&p, &floor_line()).is_none());
    }

    #[test]
    fn trajectory_past_the_end_has_no_contact() {
        let p = Particle { pos: Vec2::new(250.0, 105.0), prev_pos: Vec2::new(250.0, 95.0), mass: 1.0 };
        assert!(resolver().contact(&p, &floor_line()).is_none());
    }
}
