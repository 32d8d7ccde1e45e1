//! Step observer trait for monitoring simulation progress.

use alloc::vec::Vec as AllocVec;

use crate::float::Float;
use crate::vec::Vec2;

/// Trait for observing simulation steps.
///
/// Implement this trait to monitor a step (e.g., for debugging overlays or
/// profiling). All methods have default no-op implementations.
pub trait StepObserver<F: Float> {
    /// Called after every rider point has been integrated and queued
    /// acceleration impulses have been applied.
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// Called each time a rider point is moved out of a line.
    fn on_collision(&mut self, _point: usize, _resolved: Vec2<F>) {}

    /// Called when the rider falls off the sled.
    fn on_detach(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}

/// Records where collisions were resolved during the last step.
#[derive(Clone, Debug, Default)]
pub struct CollisionRecorder<F: Float> {
    pub points: AllocVec<(usize, Vec2<F>)>,
    pub detached: bool,
}

impl<F: Float> CollisionRecorder<F> {
    pub fn new() -> Self {
        CollisionRecorder { points: AllocVec::new(), detached: false }
    }
}

impl<F: Float> StepObserver<F> for CollisionRecorder<F> {
    fn on_integrate(&mut self) {
        self.points.clear();
    }

    fn on_collision(&mut self, point: usize, resolved: Vec2<F>) {
        self.points.push((point, resolved));
    }

    fn on_detach(&mut self) {
        self.detached = true;
    }
}
