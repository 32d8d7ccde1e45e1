//! Line segment geometry: linear equations, intersection, projection.
//!
//! Degenerate inputs (parallel lines, zero-length segments) are handled by
//! explicit branches with a defined fallback, never by panicking.

use crate::float::Float;
use crate::vec::Vec2;

/// Determinant of the 2x2 matrix `[[a, b], [c, d]]`.
#[inline]
pub fn det<F: Float>(a: F, b: F, c: F, d: F) -> F {
    a * d - b * c
}

/// A line segment between two position vectors.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<F: Float> {
    pub r1: Vec2<F>,
    pub r2: Vec2<F>,
}

impl<F: Float> Segment<F> {
    pub fn new(r1: Vec2<F>, r2: Vec2<F>) -> Self {
        Segment { r1, r2 }
    }

    pub fn length(&self) -> F {
        self.r1.distance(self.r2)
    }

    /// Unit direction from `r1` to `r2`; zero for a zero-length segment.
    pub fn direction(&self) -> Vec2<F> {
        (self.r2 - self.r1).normalize()
    }

    /// Coefficients `(a, b, c)` of the line through the segment, `a·x + b·y = c`.
    pub fn linear_equation(&self) -> (F, F, F) {
        let a = self.r2.y - self.r1.y;
        let b = self.r1.x - self.r2.x;
        let c = a * self.r1.x + b * self.r1.y;
        (a, b, c)
    }

    /// Whether `r` lies in the bounding rectangle of the segment.
    ///
    /// Axis-aligned segments have a zero-width rectangle; on that axis `r`
    /// only has to be within `tolerance`.
    pub fn bounds_contain(&self, r: Vec2<F>, tolerance: F) -> bool {
        in_region(r, self.r1, self.r2, tolerance)
    }

    /// Intersection point of two segments, if both bounding regions contain it.
    ///
    /// Parallel and coincident lines have a zero determinant and never intersect.
    pub fn intersection(&self, other: &Segment<F>, tolerance: F) -> Option<Vec2<F>> {
        let (a1, b1, c1) = self.linear_equation();
        let (a2, b2, c2) = other.linear_equation();
        let d = det(a1, b1, a2, b2);
        if d == F::zero() {
            return None;
        }
        let point = Vec2::new(det(c1, b1, c2, b2) / d, det(a1, c1, a2, c2) / d);
        if self.bounds_contain(point, tolerance) && other.bounds_contain(point, tolerance) {
            Some(point)
        } else {
            None
        }
    }

    /// Orthogonal projection of `r` onto the infinite line through the segment.
    ///
    /// A zero-length segment has no direction; `r` is returned unchanged.
    pub fn closest_point(&self, r: Vec2<F>) -> Vec2<F> {
        let (a, b, c1) = self.linear_equation();
        let c2 = -b * r.x + a * r.y;
        let d = det(a, b, -b, a);
        if d == F::zero() {
            return r;
        }
        Vec2::new(det(a, b, c2, c1) / d, det(a, -b, c1, c2) / d)
    }

    /// Distance from `r` to the segment (not the infinite line).
    pub fn distance_to(&self, r: Vec2<F>, tolerance: F) -> F {
        let projected = self.closest_point(r);
        if self.bounds_contain(projected, tolerance) {
            r.distance(projected)
        } else {
            r.distance(self.r1).min(r.distance(self.r2))
        }
    }
}

/// Whether `r` lies in the rectangle spanned by `p1` and `p2`.
pub fn in_region<F: Float>(r: Vec2<F>, p1: Vec2<F>, p2: Vec2<F>, tolerance: F) -> bool {
    let (x1, x2) = (p1.x.min(p2.x), p1.x.max(p2.x));
    let (y1, y2) = (p1.y.min(p2.y), p1.y.max(p2.y));

    let in_rect = x1 <= r.x && r.x <= x2 && y1 <= r.y && r.y <= y2;
    let on_vertical = x1 == x2 && (x1 - r.x).abs() < tolerance && y1 <= r.y && r.y <= y2;
    let on_horizontal = y1 == y2 && (y1 - r.y).abs() < tolerance && x1 <= r.x && r.x <= x2;
    in_rect || on_vertical || on_horizontal
}
