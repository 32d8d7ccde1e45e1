//! Ragdoll sled rider physics on user-drawn line tracks.
//!
//! `sledline` simulates a rider built from Verlet points and distance
//! constraints, sliding over a track of line segments indexed by a uniform
//! spatial grid. Designed to be driven by a fixed-rate frame loop.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Constraint relaxation**: Rigid, minimum-length, one-sided and breakable sled attachments
//! - **Line collisions**: Swept point/segment tests with push-out and acceleration lines
//! - **Spatial grid**: Exact cell rasterization of lines for local collision queries
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//!
//! ```
//! use sledline::{Ink, Vec2, World, WorldConfig};
//!
//! let mut world: World<f64> = World::new(WorldConfig::new()).unwrap();
//! world.add_line(Vec2::new(0.0, 100.0), Vec2::new(400.0, 200.0), Ink::Solid).unwrap();
//! for _ in 0..40 {
//!     world.tick();
//! }
//! assert!(world.rider().anchor().x > 10.0);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod geometry;
pub mod line;
pub mod grid;
pub mod particle;
pub mod constraint;
pub mod rider;
pub mod solver;
pub mod collision;
pub mod track;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use geometry::Segment;
pub use line::{Ink, Line, LineId};
pub use grid::{CellKey, LineGrid};
pub use particle::Particle;
pub use constraint::DistanceConstraint;
pub use rider::Rider;
pub use collision::{CollisionResolver, Contact};
pub use track::Track;
pub use world::World;
pub use config::WorldConfig;
pub use observer::{CollisionRecorder, NoOpStepObserver, StepObserver};
pub use error::SimError;
