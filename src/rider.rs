//! The sled rider: a fixed topology of Verlet points and distance constraints.
//!
//! Point indices are stable for the lifetime of a rider:
//!
//! | index | part |
//! |---|---|
//! | 0..6 | body ("bosh"): butt, shoulder, two hands, two feet |
//! | 6..10 | sled: tail bottom, tail top, nose top, nose tip |
//! | 10..16 | scarf chain, starting at the neck |
//!
//! Body and sled points collide with lines; scarf points never do.

use alloc::collections::BTreeMap;
use alloc::vec::Vec as AllocVec;

use crate::constraint::DistanceConstraint;
use crate::float::Float;
use crate::geometry::Segment;
use crate::line::{Line, LineId};
use crate::particle::Particle;
use crate::vec::Vec2;

/// Number of points that collide with lines (body and sled).
pub const BODY_POINTS: usize = 10;
/// Number of scarf points following the body points.
pub const SCARF_POINTS: usize = 6;
/// Point the camera follows.
pub const ANCHOR_POINT: usize = BUTT;
/// Point whose collision with any line knocks the rider off the sled.
pub const SENSITIVE_POINT: usize = BUTT;

const BUTT: usize = 0;
const SHOULDER: usize = 1;
const HAND_1: usize = 2;
const HAND_2: usize = 3;
const FOOT_1: usize = 4;
const FOOT_2: usize = 5;
const TAIL_BOTTOM: usize = 6;
const TAIL_TOP: usize = 7;
const NOSE_TOP: usize = 8;
const NOSE_TIP: usize = 9;
const SCARF: usize = BODY_POINTS;

/// Body layout relative to the start position.
const BODY_LAYOUT: [(f64, f64); BODY_POINTS] = [
    (10.0, 0.0),
    (10.0, -11.0),
    (23.0, -10.0),
    (23.0, -10.0),
    (20.0, 10.0),
    (20.0, 10.0),
    (0.0, 0.0),
    (0.0, 10.0),
    (30.0, 10.0),
    (35.0, 0.0),
];

const SCARF_LAYOUT: [(f64, f64); SCARF_POINTS] = [
    (7.0, -10.0),
    (3.0, -10.0),
    (0.0, -10.0),
    (-4.0, -10.0),
    (-7.0, -10.0),
    (-11.0, -10.0),
];

const RIGID_PAIRS: [(usize, usize); 11] = [
    // sled frame
    (TAIL_BOTTOM, TAIL_TOP),
    (TAIL_TOP, NOSE_TOP),
    (NOSE_TOP, NOSE_TIP),
    (NOSE_TIP, TAIL_BOTTOM),
    (TAIL_BOTTOM, NOSE_TOP),
    (TAIL_TOP, NOSE_TIP),
    // body
    (BUTT, SHOULDER),
    (SHOULDER, HAND_1),
    (SHOULDER, HAND_2),
    (BUTT, FOOT_1),
    (BUTT, FOOT_2),
];

const ATTACHMENT_PAIRS: [(usize, usize); 8] = [
    (TAIL_BOTTOM, BUTT),
    (TAIL_TOP, BUTT),
    (NOSE_TOP, BUTT),
    (TAIL_BOTTOM, SHOULDER),
    (NOSE_TIP, HAND_1),
    (NOSE_TIP, HAND_2),
    (NOSE_TOP, FOOT_1),
    (NOSE_TOP, FOOT_2),
];

const LEG_PAIRS: [(usize, usize); 2] = [(SHOULDER, FOOT_1), (SHOULDER, FOOT_2)];

/// Legs may stretch freely but resist folding below half their built length.
const LEG_SCALE: f64 = 0.5;

/// Acceleration lines each point struck, applied as impulses on the next step.
pub type AccelerationQueue<F> = BTreeMap<usize, BTreeMap<LineId, Line<F>>>;

/// The rider. `Clone` yields a fully owned snapshot (used for flags).
#[derive(Clone, Debug, PartialEq)]
pub struct Rider<F: Float> {
    particles: AllocVec<Particle<F>>,
    rigid: AllocVec<DistanceConstraint<F>>,
    attachments: AllocVec<DistanceConstraint<F>>,
    legs: AllocVec<DistanceConstraint<F>>,
    scarf: AllocVec<DistanceConstraint<F>>,
    on_sled: bool,
    accel_queue: AccelerationQueue<F>,
}

impl<F: Float> Rider<F> {
    /// Build a rider at `start` with unit body mass and half-mass scarf.
    pub fn new(start: Vec2<F>) -> Self {
        Self::with_masses(start, F::one(), F::half())
    }

    /// Build a rider at `start`, moving one unit per frame to the right.
    ///
    /// Rest lengths come from the built geometry, so the rider starts in
    /// equilibrium.
    pub fn with_masses(start: Vec2<F>, body_mass: F, scarf_mass: F) -> Self {
        let velocity = Vec2::new(F::one(), F::zero());
        let body = BODY_LAYOUT.iter().map(|&(x, y)| (x, y, body_mass));
        let scarf = SCARF_LAYOUT.iter().map(|&(x, y)| (x, y, scarf_mass));
        let particles: AllocVec<Particle<F>> = body
            .chain(scarf)
            .map(|(x, y, mass)| Particle::with_velocity(start + Vec2::from_f64(x, y), velocity, mass))
            .collect();

        let wire = |pairs: &[(usize, usize)], scale: F| -> AllocVec<DistanceConstraint<F>> {
            pairs
                .iter()
                .map(|&(a, b)| DistanceConstraint::from_particles(a, b, &particles, scale))
                .collect()
        };
        let rigid = wire(&RIGID_PAIRS, F::one());
        let attachments = wire(&ATTACHMENT_PAIRS, F::one());
        let legs = wire(&LEG_PAIRS, F::from_f64(LEG_SCALE));

        let mut scarf_pairs = [(0usize, 0usize); SCARF_POINTS];
        scarf_pairs[0] = (SHOULDER, SCARF);
        for i in 1..SCARF_POINTS {
            scarf_pairs[i] = (SCARF + i - 1, SCARF + i);
        }
        let scarf = wire(&scarf_pairs, F::one());

        Rider {
            particles,
            rigid,
            attachments,
            legs,
            scarf,
            on_sled: true,
            accel_queue: BTreeMap::new(),
        }
    }

    /// Replace this rider with a freshly built one at `start`, keeping masses.
    pub fn rebuild(&mut self, start: Vec2<F>) {
        let body_mass = self.particles[BUTT].mass;
        let scarf_mass = self.particles[SCARF].mass;
        *self = Self::with_masses(start, body_mass, scarf_mass);
        tracing::debug!(x = ?start.x, y = ?start.y, "rider rebuilt");
    }

    /// Knock the rider off the sled, dropping the sled attachments for good.
    ///
    /// Returns `false` if the rider had already fallen off.
    pub fn detach(&mut self) -> bool {
        if !self.on_sled {
            return false;
        }
        self.attachments.clear();
        self.on_sled = false;
        tracing::debug!("rider detached from sled");
        true
    }

    pub fn on_sled(&self) -> bool {
        self.on_sled
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle<F>] {
        &mut self.particles
    }

    pub fn particle(&self, index: usize) -> &Particle<F> {
        &self.particles[index]
    }

    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<F> {
        &mut self.particles[index]
    }

    /// Points that collide with lines.
    pub fn body(&self) -> &[Particle<F>] {
        &self.particles[..BODY_POINTS]
    }

    pub fn scarf_points(&self) -> &[Particle<F>] {
        &self.particles[SCARF..]
    }

    /// Anchor point position, followed by the camera.
    pub fn anchor(&self) -> Vec2<F> {
        self.particles[ANCHOR_POINT].pos
    }

    /// Distance the anchor point moves per frame.
    pub fn speed(&self) -> F {
        self.particles[ANCHOR_POINT].velocity().length()
    }

    /// Rigid and (while on the sled) attachment constraints, the set
    /// resolved symmetrically each pass.
    pub fn constraint_count(&self) -> usize {
        self.rigid.len() + self.attachments.len()
    }

    pub fn rigid_constraints(&self) -> &[DistanceConstraint<F>] {
        &self.rigid
    }

    pub fn attachment_constraints(&self) -> &[DistanceConstraint<F>] {
        &self.attachments
    }

    pub fn leg_constraints(&self) -> &[DistanceConstraint<F>] {
        &self.legs
    }

    pub fn scarf_constraints(&self) -> &[DistanceConstraint<F>] {
        &self.scarf
    }

    /// Constraint groups and points split for the solver, which mutates
    /// points while reading constraints.
    pub(crate) fn parts_mut(&mut self) -> RiderParts<'_, F> {
        RiderParts {
            particles: &mut self.particles,
            rigid: &self.rigid,
            attachments: &self.attachments,
            legs: &self.legs,
            scarf: &self.scarf,
        }
    }

    pub fn acceleration_queue(&self) -> &AccelerationQueue<F> {
        &self.accel_queue
    }

    /// Take the queued impulses, leaving an empty queue for this step.
    pub(crate) fn take_acceleration_queue(&mut self) -> AccelerationQueue<F> {
        core::mem::take(&mut self.accel_queue)
    }

    /// Queue acceleration lines struck by `point` for the next step.
    pub(crate) fn queue_acceleration(&mut self, point: usize, lines: BTreeMap<LineId, Line<F>>) {
        if !lines.is_empty() {
            self.accel_queue.entry(point).or_default().extend(lines);
        }
    }

    /// Arms, legs, sled and torso as drawable segments, in drawing order.
    pub fn limbs(&self) -> [Segment<F>; 6] {
        let seg = |a: usize, b: usize| Segment::new(self.particles[a].pos, self.particles[b].pos);
        [
            seg(SHOULDER, HAND_1),
            seg(BUTT, FOOT_1),
            seg(TAIL_BOTTOM, NOSE_TIP),
            seg(BUTT, FOOT_2),
            seg(BUTT, SHOULDER),
            seg(SHOULDER, HAND_2),
        ]
    }

    /// Strings from the hands to the sled nose, while still on the sled.
    pub fn sled_strings(&self) -> Option<[Segment<F>; 2]> {
        if !self.on_sled {
            return None;
        }
        let nose = self.particles[NOSE_TIP].pos;
        Some([
            Segment::new(self.particles[HAND_1].pos, nose),
            Segment::new(self.particles[HAND_2].pos, nose),
        ])
    }
}

/// Disjoint borrows of a rider's points and constraint groups.
pub(crate) struct RiderParts<'a, F: Float> {
    pub particles: &'a mut [Particle<F>],
    pub rigid: &'a [DistanceConstraint<F>],
    pub attachments: &'a [DistanceConstraint<F>],
    pub legs: &'a [DistanceConstraint<F>],
    pub scarf: &'a [DistanceConstraint<F>],
}
