//! Spatial grid indexing track lines by the square cells they pass through.
//!
//! Collidable lines (solid and acceleration ink) and scenery lines live in
//! separate buckets so the collision resolver never sees scenery.

use alloc::collections::BTreeMap;
use alloc::vec::Vec as AllocVec;
use core::cmp::Ordering;

use crate::error::SimError;
use crate::float::Float;
use crate::geometry::Segment;
use crate::line::{Line, LineId};
use crate::particle::Particle;
use crate::vec::Vec2;

/// Side length of a grid cell in track units.
pub const DEFAULT_GRID_SPACING: f64 = 50.0;

/// Integer cell coordinate, `floor(coord / spacing)` per axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    pub const fn new(x: i32, y: i32) -> Self {
        CellKey { x, y }
    }

    fn offset(self, delta: CellKey) -> Self {
        CellKey { x: self.x + delta.x, y: self.y + delta.y }
    }

    fn transpose(self) -> Self {
        CellKey { x: self.y, y: self.x }
    }
}

/// Lines in one cell, keyed by identity.
pub type Cell<F> = BTreeMap<LineId, Line<F>>;

/// Grid of square cells mapping to the lines that cross them.
///
/// Empty cells are never stored: removing the last line of a cell drops the
/// cell, so `add` followed by `remove` restores the grid exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct LineGrid<F: Float> {
    spacing: F,
    solids: BTreeMap<CellKey, Cell<F>>,
    scenery: BTreeMap<CellKey, Cell<F>>,
}

impl<F: Float> LineGrid<F> {
    /// Create an empty grid. `spacing` must be positive and finite.
    pub fn new(spacing: F) -> Result<Self, SimError> {
        if !spacing.is_finite() || spacing <= F::zero() {
            return Err(SimError::InvalidGridSpacing);
        }
        Ok(LineGrid {
            spacing,
            solids: BTreeMap::new(),
            scenery: BTreeMap::new(),
        })
    }

    pub fn spacing(&self) -> F {
        self.spacing
    }

    /// Cell containing `pos`.
    pub fn cell_at(&self, pos: Vec2<F>) -> CellKey {
        CellKey {
            x: (pos.x / self.spacing).floor_to_i32(),
            y: (pos.y / self.spacing).floor_to_i32(),
        }
    }

    /// World position of the top-left corner of `cell`.
    pub fn cell_origin(&self, cell: CellKey) -> Vec2<F> {
        Vec2::new(F::from_i32(cell.x) * self.spacing, F::from_i32(cell.y) * self.spacing)
    }

    /// Cells the segment passes through, in traversal order of increasing x.
    ///
    /// Every vertical and horizontal grid line crossed between the endpoint
    /// cells contributes one step, so the result holds `1 + crossings` cells.
    pub fn cells_of(&self, segment: &Segment<F>) -> AllocVec<CellKey> {
        let mut first = self.cell_at(segment.r1);
        let mut last = self.cell_at(segment.r2);
        if first.x > last.x {
            core::mem::swap(&mut first, &mut last);
        }

        let (mut a, mut b, c) = segment.linear_equation();
        // b == 0 means r1.x == r2.x: solve along y instead of x.
        let transposed = b == F::zero();
        if transposed {
            core::mem::swap(&mut a, &mut b);
            first = first.transpose();
            last = last.transpose();
        }

        let step_x = if last.x < first.x { -1 } else { 1 };
        let step_y = if last.y < first.y { -1 } else { 1 };
        let direction = F::from_i32(step_x);
        let mut crossings: AllocVec<(F, CellKey)> = AllocVec::new();

        let mut i = first.x;
        while i != last.x {
            let boundary = F::from_i32(i.max(i + step_x)) * self.spacing;
            crossings.push((boundary * direction, CellKey::new(step_x, 0)));
            i += step_x;
        }

        // a != 0 whenever this loop runs: a == 0 keeps both endpoints in one row.
        let mut j = first.y;
        while j != last.y {
            let boundary = F::from_i32(j.max(j + step_y)) * self.spacing;
            let along = (c - b * boundary) / a;
            crossings.push((along * direction, CellKey::new(0, step_y)));
            j += step_y;
        }

        crossings.sort_by(|l, r| l.0.partial_cmp(&r.0).unwrap_or(Ordering::Equal));

        let mut cells = AllocVec::with_capacity(crossings.len() + 1);
        let mut cell = first;
        cells.push(cell);
        for (_, delta) in crossings {
            cell = cell.offset(delta);
            cells.push(cell);
        }

        if transposed {
            for cell in cells.iter_mut() {
                *cell = cell.transpose();
            }
        }
        cells
    }

    /// Insert `line` into every cell it crosses.
    pub fn add(&mut self, line: &Line<F>) {
        let cells = self.cells_of(&line.segment);
        let bucket = self.bucket_mut(line);
        for cell in cells {
            bucket.entry(cell).or_default().insert(line.id, *line);
        }
    }

    /// Remove `line` from every cell it crosses, dropping cells left empty.
    ///
    /// The line must have been added with the same geometry and ink.
    pub fn remove(&mut self, line: &Line<F>) {
        let cells = self.cells_of(&line.segment);
        let bucket = self.bucket_mut(line);
        for cell in cells {
            if let Some(lines) = bucket.get_mut(&cell) {
                lines.remove(&line.id);
                if lines.is_empty() {
                    bucket.remove(&cell);
                }
            }
        }
    }

    fn bucket_mut(&mut self, line: &Line<F>) -> &mut BTreeMap<CellKey, Cell<F>> {
        if line.is_collidable() {
            &mut self.solids
        } else {
            &mut self.scenery
        }
    }

    /// The 3x3 block of cells centred on the cell containing `pos`.
    pub fn neighbors(&self, pos: Vec2<F>) -> [CellKey; 9] {
        let CellKey { x, y } = self.cell_at(pos);
        [
            CellKey::new(x, y),
            CellKey::new(x + 1, y),
            CellKey::new(x + 1, y + 1),
            CellKey::new(x, y + 1),
            CellKey::new(x - 1, y + 1),
            CellKey::new(x - 1, y),
            CellKey::new(x - 1, y - 1),
            CellKey::new(x, y - 1),
            CellKey::new(x + 1, y - 1),
        ]
    }

    /// Collidable lines in every cell swept by `segment`, ordered by id.
    pub fn solid_lines_along(&self, segment: &Segment<F>) -> AllocVec<Line<F>> {
        let mut found = BTreeMap::new();
        for cell in self.cells_of(segment) {
            if let Some(lines) = self.solids.get(&cell) {
                found.extend(lines.iter().map(|(id, line)| (*id, *line)));
            }
        }
        found.into_values().collect()
    }

    /// Collision candidates for a point: collidable lines along its
    /// trajectory `[prev_pos, pos]`, so fast points still see lines they
    /// passed over this frame.
    pub fn lines_near(&self, particle: &Particle<F>) -> AllocVec<Line<F>> {
        self.solid_lines_along(&particle.trajectory())
    }

    /// Every cell covering the rectangle between two corners, column by column.
    pub fn visible_cells(&self, top_left: Vec2<F>, bottom_right: Vec2<F>) -> AllocVec<CellKey> {
        let a = self.cell_at(top_left);
        let b = self.cell_at(bottom_right);
        let (x1, x2) = (a.x.min(b.x), a.x.max(b.x));
        let (y1, y2) = (a.y.min(b.y), a.y.max(b.y));
        let mut cells = AllocVec::new();
        for x in x1..=x2 {
            for y in y1..=y2 {
                cells.push(CellKey::new(x, y));
            }
        }
        cells
    }

    /// Lines of both buckets in the cells covering a rectangle, ordered by id.
    pub fn lines_in_region(&self, top_left: Vec2<F>, bottom_right: Vec2<F>) -> AllocVec<Line<F>> {
        let mut found = BTreeMap::new();
        for cell in self.visible_cells(top_left, bottom_right) {
            for bucket in [&self.solids, &self.scenery] {
                if let Some(lines) = bucket.get(&cell) {
                    found.extend(lines.iter().map(|(id, line)| (*id, *line)));
                }
            }
        }
        found.into_values().collect()
    }

    /// Lines of both buckets in the neighbor cells of `pos` lying within
    /// `radius` of it. Used by the eraser.
    pub fn lines_around(&self, pos: Vec2<F>, radius: F, tolerance: F) -> AllocVec<Line<F>> {
        let mut found = BTreeMap::new();
        for cell in self.neighbors(pos) {
            for bucket in [&self.solids, &self.scenery] {
                let Some(lines) = bucket.get(&cell) else { continue };
                for (id, line) in lines {
                    if line.segment.distance_to(pos, tolerance) <= radius {
                        found.insert(*id, *line);
                    }
                }
            }
        }
        found.into_values().collect()
    }

    /// Collidable lines stored in `cell`.
    pub fn solid_cell(&self, cell: CellKey) -> Option<&Cell<F>> {
        self.solids.get(&cell)
    }

    /// Scenery lines stored in `cell`.
    pub fn scenery_cell(&self, cell: CellKey) -> Option<&Cell<F>> {
        self.scenery.get(&cell)
    }

    /// Keys of cells holding at least one collidable line.
    pub fn solid_cells(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.solids.keys().copied()
    }

    pub fn cell_count(&self) -> usize {
        self.solids.len() + self.scenery.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty() && self.scenery.is_empty()
    }

    pub fn clear(&mut self) {
        self.solids.clear();
        self.scenery.clear();
    }
}

impl<F: Float> Default for LineGrid<F> {
    /// Empty grid with the default 50-unit spacing.
    fn default() -> Self {
        LineGrid {
            spacing: F::from_f64(DEFAULT_GRID_SPACING),
            solids: BTreeMap::new(),
            scenery: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Ink;
    use alloc::vec;

    fn grid() -> LineGrid<f64> {
        LineGrid::new(DEFAULT_GRID_SPACING).unwrap()
    }

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment<f64> {
        Segment::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    #[test]
    fn rejects_non_positive_spacing() {
        assert_eq!(LineGrid::<f64>::new(0.0), Err(SimError::InvalidGridSpacing));
        assert_eq!(LineGrid::<f64>::new(f64::NAN), Err(SimError::InvalidGridSpacing));
    }

    #[test]
    fn cell_at_floors_negative_coordinates() {
        assert_eq!(grid().cell_at(Vec2::new(-0.5, 49.9)), CellKey::new(-1, 0));
        assert_eq!(grid().cell_at(Vec2::new(50.0, -50.0)), CellKey::new(1, -1));
    }

    #[test]
    fn line_inside_one_cell() {
        assert_eq!(grid().cells_of(&seg(5.0, 5.0, 45.0, 30.0)), vec![CellKey::new(0, 0)]);
    }

    #[test]
    fn rising_diagonal_steps_in_crossing_order() {
        let expected = vec![
            CellKey::new(0, 0),
            CellKey::new(1, 0),
            CellKey::new(1, 1),
            CellKey::new(2, 1),
        ];
        assert_eq!(grid().cells_of(&seg(10.0, 10.0, 110.0, 60.0)), expected);
        // Reversed endpoints traverse the same way.
        assert_eq!(grid().cells_of(&seg(110.0, 60.0, 10.0, 10.0)), expected);
    }

    #[test]
    fn falling_diagonal_steps_down() {
        assert_eq!(
            grid().cells_of(&seg(10.0, 90.0, 110.0, 10.0)),
            vec![
                CellKey::new(0, 1),
                CellKey::new(1, 1),
                CellKey::new(1, 0),
                CellKey::new(2, 0),
            ]
        );
    }

    #[test]
    fn downward_vertical_line() {
        assert_eq!(
            grid().cells_of(&seg(0.0, 125.0, 0.0, 0.0)),
            vec![CellKey::new(0, 2), CellKey::new(0, 1), CellKey::new(0, 0)]
        );
    }

    #[test]
    fn empty_cells_are_pruned() {
        let mut g = grid();
        let a = Line::new(LineId(0), Vec2::new(0.0, 10.0), Vec2::new(120.0, 10.0), Ink::Solid);
        let b = Line::new(LineId(1), Vec2::new(0.0, 20.0), Vec2::new(40.0, 20.0), Ink::Solid);
        g.add(&a);
        g.add(&b);
        assert_eq!(g.cell_count(), 3);
        g.remove(&a);
        assert_eq!(g.cell_count(), 1);
        assert_eq!(g.solid_cell(CellKey::new(0, 0)).map(|c| c.len()), Some(1));
    }

    #[test]
    fn neighbors_centre_first() {
        let cells = grid().neighbors(Vec2::new(75.0, 75.0));
        assert_eq!(cells[0], CellKey::new(1, 1));
        assert!(cells.contains(&CellKey::new(0, 0)));
        assert!(cells.contains(&CellKey::new(2, 2)));
    }
}
