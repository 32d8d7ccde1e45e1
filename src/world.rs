//! One simulation session: a track, a rider and the fixed-timestep update.

use crate::collision::CollisionResolver;
use crate::config::WorldConfig;
use crate::error::SimError;
use crate::float::Float;
use crate::line::{Ink, Line, LineId};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::rider::{Rider, BODY_POINTS};
use crate::solver;
use crate::track::Track;
use crate::vec::Vec2;

/// A track with a rider sliding on it.
#[derive(Clone, Debug)]
pub struct World<F: Float> {
    track: Track<F>,
    rider: Rider<F>,
    config: WorldConfig<F>,
    resolver: CollisionResolver<F>,
    flag: Option<Rider<F>>,
    frame: u64,
}

impl<F: Float> World<F> {
    /// Empty track, rider at the origin.
    pub fn new(config: WorldConfig<F>) -> Result<Self, SimError> {
        let track = Track::with_spacing(config.grid_spacing)?;
        Ok(Self::with_track(track, config))
    }

    /// Session on an existing track, rider at its start point.
    ///
    /// The track's grid spacing wins over `config.grid_spacing`, which is
    /// overwritten so `config()` reports the spacing in use.
    pub fn with_track(track: Track<F>, mut config: WorldConfig<F>) -> Self {
        config.grid_spacing = track.grid().spacing();
        let rider = Rider::with_masses(track.start_point(), config.body_mass, config.scarf_mass);
        let resolver = CollisionResolver::new(&config);
        World { track, rider, config, resolver, flag: None, frame: 0 }
    }

    /// Advance one frame without observation.
    pub fn tick(&mut self) {
        self.step(&mut NoOpStepObserver);
    }

    /// Advance one frame.
    ///
    /// Integrate, apply last step's acceleration impulses, run the
    /// relaxation passes (constraints, then collisions of every body
    /// point), then settle the scarf once.
    pub fn step<O: StepObserver<F>>(&mut self, observer: &mut O) {
        let drag = self.config.drag;
        let gravity = self.config.gravity;
        for p in self.rider.particles_mut() {
            p.integrate(drag, gravity);
        }

        let queued = self.rider.take_acceleration_queue();
        for (point, lines) in queued {
            let particle = self.rider.particle_mut(point);
            for line in lines.values() {
                particle.pos += line.segment.direction().scale(self.config.acceleration);
            }
        }
        observer.on_integrate();

        for pass in 0..self.config.iterations {
            if solver::relax(&mut self.rider, self.config.endurance).detached {
                observer.on_detach();
            }
            for point in 0..BODY_POINTS {
                let struck = self.resolver.resolve(&mut self.rider, point, self.track.grid(), observer);
                self.rider.queue_acceleration(point, struck);
            }
            observer.on_relaxation_pass(pass);
        }

        solver::solve_scarf(&mut self.rider);

        self.frame += 1;
        observer.on_step_complete();
    }

    /// Draw a line. The first line on an empty track moves the rider to
    /// the new start point.
    pub fn add_line(&mut self, r1: Vec2<F>, r2: Vec2<F>, ink: Ink) -> Result<LineId, SimError> {
        let was_empty = self.track.is_empty();
        let id = self.track.add_line(r1, r2, ink)?;
        if was_empty {
            self.rider.rebuild(self.track.start_point());
        }
        Ok(id)
    }

    /// Put back a previously removed line.
    pub fn insert_line(&mut self, line: Line<F>) -> Result<(), SimError> {
        let was_empty = self.track.is_empty();
        self.track.insert_line(line)?;
        if was_empty {
            self.rider.rebuild(self.track.start_point());
        }
        Ok(())
    }

    pub fn remove_line(&mut self, id: LineId) -> Result<Line<F>, SimError> {
        self.track.remove_line(id)
    }

    /// Erase every line, drop the flag and rebuild the rider.
    pub fn clear_track(&mut self) {
        self.track.clear();
        self.flag = None;
        self.frame = 0;
        self.rider.rebuild(self.track.start_point());
    }

    /// Put the rider back at the flag, or at the start point if there is no
    /// flag or `from_beginning` is set.
    pub fn reset_rider(&mut self, from_beginning: bool) {
        match (&self.flag, from_beginning) {
            (Some(flagged), false) => self.rider = flagged.clone(),
            _ => self.rider.rebuild(self.track.start_point()),
        }
        self.frame = 0;
    }

    /// Snapshot the rider as it is now.
    pub fn set_flag(&mut self) {
        self.flag = Some(self.rider.clone());
    }

    pub fn clear_flag(&mut self) {
        self.flag = None;
    }

    pub fn flag(&self) -> Option<&Rider<F>> {
        self.flag.as_ref()
    }

    pub fn track(&self) -> &Track<F> {
        &self.track
    }

    pub fn rider(&self) -> &Rider<F> {
        &self.rider
    }

    pub fn rider_mut(&mut self) -> &mut Rider<F> {
        &mut self.rider
    }

    pub fn config(&self) -> &WorldConfig<F> {
        &self.config
    }

    /// Frames stepped since the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
