//! Error types for track and grid operations.
//!
//! Numerical degeneracies inside a step (parallel lines, coincident points,
//! exhausted collision iterations) are not errors and never surface here.

use core::fmt;

use crate::line::LineId;

/// Errors returned by collaborator-facing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Grid spacing must be positive and finite.
    InvalidGridSpacing,
    /// The line is not on the track.
    UnknownLine(LineId),
    /// The line has zero length or a non-finite endpoint.
    DegenerateLine,
    /// A line with this id is already on the track.
    DuplicateLine(LineId),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidGridSpacing => write!(f, "grid spacing must be positive and finite"),
            SimError::UnknownLine(id) => write!(f, "{} is not on the track", id),
            SimError::DegenerateLine => write!(f, "line must have finite endpoints and non-zero length"),
            SimError::DuplicateLine(id) => write!(f, "{} is already on the track", id),
        }
    }
}
