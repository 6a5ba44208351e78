//! Polygon edges measured in the X/Z plane.

use crate::primitives::{Point3, Vec2};
use num_traits::Float;

/// One edge of a polygon, from `start` to `end`.
///
/// All measurements ignore the Y coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<F> {
    pub start: Point3<F>,
    pub end: Point3<F>,
}

impl<F: Float> Edge<F> {
    /// Creates a new edge from two points.
    #[inline]
    pub fn new(start: Point3<F>, end: Point3<F>) -> Self {
        Self { start, end }
    }

    /// Planar direction vector from start to end.
    #[inline]
    pub fn direction_xz(self) -> Vec2<F> {
        self.start.delta_xz(self.end)
    }

    /// Planar length of the edge.
    #[inline]
    pub fn length_xz(self) -> F {
        self.start.distance_xz(self.end)
    }

    /// Returns the reversed edge (start and end swapped).
    #[inline]
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Projects `p` onto the edge's supporting line.
    ///
    /// Returns `(along, across)`: the distance from `start` measured along
    /// the edge direction, and the perpendicular distance from the line.
    /// Returns `None` for an edge with no planar length.
    pub fn project_xz(self, p: Point3<F>) -> Option<(F, F)> {
        let dir = self.direction_xz().normalize()?;
        let v = self.start.delta_xz(p);
        Some((v.dot(dir), dir.cross(v).abs()))
    }

    /// Returns `true` if both endpoints match `other`'s endpoints, in either
    /// order, within `eps`.
    pub fn matches_xz(self, other: Self, eps: F) -> bool {
        (self.start.coincides_xz(other.start, eps) && self.end.coincides_xz(other.end, eps))
            || (self.start.coincides_xz(other.end, eps) && self.end.coincides_xz(other.start, eps))
    }
}
