//! Configuration for the world step.

use crate::float::Float;
use crate::grid::DEFAULT_GRID_SPACING;
use crate::vec::Vec2;

/// Frame time scale the default constants are derived from.
pub const DEFAULT_TIME_SCALE: f64 = 10.0;

/// Larger than any floating point error the collision math accumulates.
pub const DEFAULT_EPSILON: f64 = 1e-11;

/// Configuration for one simulation session.
///
/// # Builder Pattern
/// ```
/// use sledline::config::WorldConfig;
/// use sledline::vec::Vec2;
///
/// let config: WorldConfig<f64> = WorldConfig::new()
///     .with_iterations(8)
///     .with_gravity(Vec2::new(0.0, 0.25))
///     .with_endurance(0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig<F: Float> {
    /// Added to every point's position each frame. Default: (0, 0.3).
    pub gravity: Vec2<F>,
    /// Inertia multiplier per frame. Default: 0.9999999^10.
    pub drag: F,
    /// Impulse length of an acceleration line. Default: 1.0.
    pub acceleration: F,
    /// Tolerance added to the line thickness when pushing points out. Default: 1e-11.
    pub epsilon: F,
    /// Distance from a line that counts as penetrating. Default: 0.001.
    pub line_thickness: F,
    /// Strain at which a sled attachment breaks. Default: 0.4.
    pub endurance: F,
    /// Side length of a grid cell. Default: 50.
    pub grid_spacing: F,
    /// Relaxation passes per step. Default: 10.
    pub iterations: usize,
    /// Cap on collision resolutions per point per pass. Default: 100.
    pub max_collision_iterations: usize,
    /// Mass of body and sled points. Default: 1.
    pub body_mass: F,
    /// Mass of scarf points. Default: 0.5.
    pub scarf_mass: F,
}

impl<F: Float> WorldConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        WorldConfig {
            gravity: Vec2::zero(),
            drag: F::one(),
            acceleration: F::zero(),
            epsilon: F::from_f64(DEFAULT_EPSILON),
            line_thickness: F::from_f64(0.001),
            endurance: F::from_f64(0.4),
            grid_spacing: F::from_f64(DEFAULT_GRID_SPACING),
            iterations: 10,
            max_collision_iterations: 100,
            body_mass: F::one(),
            scarf_mass: F::half(),
        }
        .with_time_scale(F::from_f64(DEFAULT_TIME_SCALE))
    }

    /// Derive gravity, drag and acceleration from a frame time scale.
    pub fn with_time_scale(mut self, scale: F) -> Self {
        self.gravity = Vec2::new(F::zero(), F::from_f64(0.03) * scale);
        self.drag = F::from_f64(0.9999999).powf(scale);
        self.acceleration = F::from_f64(0.1) * scale;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the drag factor.
    pub fn with_drag(mut self, drag: F) -> Self {
        self.drag = drag;
        self
    }

    /// Set the acceleration line impulse.
    pub fn with_acceleration(mut self, acceleration: F) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Set the sled attachment endurance.
    pub fn with_endurance(mut self, endurance: F) -> Self {
        self.endurance = endurance;
        self
    }

    /// Set the line thickness.
    pub fn with_line_thickness(mut self, line_thickness: F) -> Self {
        self.line_thickness = line_thickness;
        self
    }

    /// Set the grid cell size.
    pub fn with_grid_spacing(mut self, grid_spacing: F) -> Self {
        self.grid_spacing = grid_spacing;
        self
    }

    /// Set the number of relaxation passes.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Set the collision iteration cap.
    pub fn with_max_collision_iterations(mut self, max: usize) -> Self {
        self.max_collision_iterations = max.max(1);
        self
    }

    /// Push-out distance from a line: thickness plus epsilon.
    pub fn thickness(&self) -> F {
        self.line_thickness + self.epsilon
    }

    /// Tolerance for points on axis-aligned segments.
    pub fn region_tolerance(&self) -> F {
        self.epsilon / F::from_f64(100.0)
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
