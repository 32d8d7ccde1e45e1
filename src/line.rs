//! Track lines: identity, geometry and ink.

use core::fmt;

use crate::float::Float;
use crate::geometry::Segment;
use crate::vec::Vec2;

/// What a line is drawn with. Decides collidability and rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ink {
    /// Collidable.
    Solid,
    /// Collidable, and pushes colliding points along `r1 -> r2` on the next step.
    Acceleration,
    /// Drawn only.
    Scenery,
}

impl Ink {
    pub fn is_collidable(self) -> bool {
        !matches!(self, Ink::Scenery)
    }
}

/// Stable identity of a line on a track.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line#{}", self.0)
    }
}

/// A line segment drawn on the track.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line<F: Float> {
    pub id: LineId,
    pub segment: Segment<F>,
    pub ink: Ink,
}

impl<F: Float> Line<F> {
    pub fn new(id: LineId, r1: Vec2<F>, r2: Vec2<F>, ink: Ink) -> Self {
        Line { id, segment: Segment::new(r1, r2), ink }
    }

    pub fn r1(&self) -> Vec2<F> { self.segment.r1 }
    pub fn r2(&self) -> Vec2<F> { self.segment.r2 }

    pub fn is_collidable(&self) -> bool {
        self.ink.is_collidable()
    }
}
