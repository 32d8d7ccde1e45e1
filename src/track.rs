//! The track: every drawn line, in drawing order, plus the grid indexing them.

use alloc::vec::Vec as AllocVec;

use crate::config::DEFAULT_EPSILON;
use crate::error::SimError;
use crate::float::Float;
use crate::grid::LineGrid;
use crate::line::{Ink, Line, LineId};
use crate::vec::Vec2;

/// Height above the first line's start where the rider is placed.
const START_CLEARANCE: f64 = 30.0;

/// Ordered line list kept in step with its grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Track<F: Float> {
    lines: AllocVec<Line<F>>,
    grid: LineGrid<F>,
    start_point: Vec2<F>,
    next_id: u32,
    tolerance: F,
}

impl<F: Float> Track<F> {
    /// Empty track with the default 50-unit grid.
    pub fn new() -> Self {
        Self::with_grid(LineGrid::default())
    }

    /// Empty track with a custom grid spacing.
    pub fn with_spacing(spacing: F) -> Result<Self, SimError> {
        Ok(Self::with_grid(LineGrid::new(spacing)?))
    }

    fn with_grid(grid: LineGrid<F>) -> Self {
        Track {
            lines: AllocVec::new(),
            grid,
            start_point: Vec2::zero(),
            next_id: 0,
            tolerance: F::from_f64(DEFAULT_EPSILON / 100.0),
        }
    }

    /// Rebuild a track from an ordered line list, keeping line ids.
    pub fn from_lines<I>(spacing: F, lines: I) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = Line<F>>,
    {
        let mut track = Self::with_spacing(spacing)?;
        for line in lines {
            track.insert_line(line)?;
        }
        Ok(track)
    }

    /// Draw a new line. The first line on an empty track sets the start point.
    pub fn add_line(&mut self, r1: Vec2<F>, r2: Vec2<F>, ink: Ink) -> Result<LineId, SimError> {
        let id = LineId(self.next_id);
        self.insert_line(Line::new(id, r1, r2, ink))?;
        Ok(id)
    }

    /// Put a line back with its own id (reload, undo of a removal).
    pub fn insert_line(&mut self, line: Line<F>) -> Result<(), SimError> {
        if !line.r1().is_finite() || !line.r2().is_finite() || line.r1() == line.r2() {
            return Err(SimError::DegenerateLine);
        }
        if self.lines.iter().any(|l| l.id == line.id) {
            return Err(SimError::DuplicateLine(line.id));
        }
        if self.lines.is_empty() {
            self.start_point = line.r1() - Vec2::new(F::zero(), F::from_f64(START_CLEARANCE));
        }
        self.next_id = self.next_id.max(line.id.0.saturating_add(1));
        self.grid.add(&line);
        self.lines.push(line);
        tracing::debug!(id = line.id.0, ink = ?line.ink, "line added");
        Ok(())
    }

    /// Erase a line, returning it so it can be re-inserted.
    pub fn remove_line(&mut self, id: LineId) -> Result<Line<F>, SimError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or(SimError::UnknownLine(id))?;
        let line = self.lines.remove(index);
        self.grid.remove(&line);
        tracing::debug!(id = id.0, "line removed");
        Ok(line)
    }

    pub fn line(&self, id: LineId) -> Option<&Line<F>> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// All lines, in drawing order.
    pub fn lines(&self) -> &[Line<F>] {
        &self.lines
    }

    pub fn grid(&self) -> &LineGrid<F> {
        &self.grid
    }

    /// Where a fresh rider is built.
    pub fn start_point(&self) -> Vec2<F> {
        self.start_point
    }

    pub fn set_start_point(&mut self, start: Vec2<F>) {
        self.start_point = start;
    }

    /// Lines within `radius` of `pos`, as picked by the eraser.
    pub fn lines_around(&self, pos: Vec2<F>, radius: F) -> AllocVec<Line<F>> {
        self.grid.lines_around(pos, radius, self.tolerance)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every line. Line ids keep counting up.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.grid.clear();
    }
}

impl<F: Float> Default for Track<F> {
    fn default() -> Self {
        Self::new()
    }
}
