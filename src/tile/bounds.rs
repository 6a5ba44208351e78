//! Tile rectangles and clipping shapes against them.
//!
//! ```text
//!   :''''''''':
//!   : +-----+ :
//!   : |     | :
//!   : |     |<--- tile being built
//!   : +-----+ :
//!   :.........:<-- shapes reaching outside are cut back to the tile
//! ```

use crate::polygon::{ClipPlane, ConvexPolygon};
use crate::primitives::{Point2, Point3, Vec3};
use num_traits::Float;

/// Axis-aligned tile rectangle.
///
/// Only X and Z bound the tile; the Y values give its vertical extent and the
/// height at which the walkable seed cell is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds<F> {
    pub min: Point3<F>,
    pub max: Point3<F>,
}

impl<F: Float> TileBounds<F> {
    /// Creates bounds from the minimum and maximum corners.
    pub fn new(min: Point3<F>, max: Point3<F>) -> Self {
        Self { min, max }
    }

    /// Extent along X.
    pub fn width(&self) -> F {
        self.max.x - self.min.x
    }

    /// Extent along Z.
    pub fn depth(&self) -> F {
        self.max.z - self.min.z
    }

    /// The four boundary half-planes, normals facing out of the tile.
    ///
    /// Fixed order: min-X side, min-Z side, max-X side, max-Z side. The
    /// retained interior is the back side of every plane.
    pub fn clip_planes(&self) -> [ClipPlane<F>; 4] {
        let (min, max) = (self.min, self.max);
        [
            ClipPlane::new(min, -Vec3::unit_x()),
            ClipPlane::new(Point3::new(max.x, min.y, min.z), -Vec3::unit_z()),
            ClipPlane::new(Point3::new(max.x, min.y, max.z), Vec3::unit_x()),
            ClipPlane::new(Point3::new(min.x, min.y, max.z), Vec3::unit_z()),
        ]
    }

    /// Tile rectangle corners in the X/Z plane, counter-clockwise from the
    /// minimum corner.
    pub fn corners_2d(&self) -> [Point2<F>; 4] {
        [
            Point2::new(self.min.x, self.min.z),
            Point2::new(self.max.x, self.min.z),
            Point2::new(self.max.x, self.max.z),
            Point2::new(self.min.x, self.max.z),
        ]
    }

    /// The whole tile as one polygon at the minimum height.
    pub fn to_polygon(&self) -> ConvexPolygon<F> {
        let y = self.min.y;
        ConvexPolygon::from_vertices(
            self.corners_2d()
                .iter()
                .map(|c| Point3::new(c.x, y, c.y))
                .collect(),
        )
    }

    /// Tests whether `p` lies within the rectangle, widened by `eps`.
    pub fn contains_xz(&self, p: Point3<F>, eps: F) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.z >= self.min.z - eps
            && p.z <= self.max.z + eps
    }

    /// Clips `polygon` to the tile. See [`clip_to_bounds`].
    pub fn clip(&self, polygon: &ConvexPolygon<F>, eps: F) -> Option<ConvexPolygon<F>> {
        clip_to_bounds(polygon, self, eps)
    }
}

/// Clips a polygon to a tile rectangle.
///
/// Splits against each of the four [`TileBounds::clip_planes`] in order,
/// keeping the back half every time. Returns `None` as soon as nothing is
/// left inside.
///
/// # Example
///
/// ```
/// use navtile::polygon::ConvexPolygon;
/// use navtile::tile::{clip_to_bounds, TileBounds};
/// use navtile::Point3;
///
/// let bounds = TileBounds::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 1.0, 4.0));
/// let shape = ConvexPolygon::new(vec![
///     Point3::new(3.0, 0.0, 1.0),
///     Point3::new(6.0, 0.0, 1.0),
///     Point3::new(6.0, 0.0, 3.0),
///     Point3::new(3.0, 0.0, 3.0),
/// ])
/// .unwrap();
///
/// let clipped = clip_to_bounds(&shape, &bounds, 1e-5).unwrap();
/// assert!((clipped.area_xz() - 2.0_f64).abs() < 1e-12);
/// ```
pub fn clip_to_bounds<F: Float>(
    polygon: &ConvexPolygon<F>,
    bounds: &TileBounds<F>,
    eps: F,
) -> Option<ConvexPolygon<F>> {
    let mut current = polygon.clone();
    for plane in bounds.clip_planes().iter() {
        current = current.split(plane, eps).back?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounds() -> TileBounds<f64> {
        TileBounds::new(Point3::new(-5.0, -1.0, -5.0), Point3::new(5.0, 1.0, 5.0))
    }

    fn rect(x0: f64, z0: f64, x1: f64, z1: f64) -> ConvexPolygon<f64> {
        ConvexPolygon::new(vec![
            Point3::new(x0, 0.0, z0),
            Point3::new(x1, 0.0, z0),
            Point3::new(x1, 0.0, z1),
            Point3::new(x0, 0.0, z1),
        ])
        .unwrap()
    }

    #[test]
    fn test_clip_planes_face_out() {
        let b = bounds();
        let center = Point3::new(0.0, 0.0, 0.0);
        for plane in b.clip_planes().iter() {
            assert!(plane.signed_distance(center) < 0.0);
        }
    }

    #[test]
    fn test_inside_is_unchanged() {
        let shape = rect(-1.0, -1.0, 1.0, 1.0);
        let clipped = bounds().clip(&shape, 1e-5).unwrap();
        assert_eq!(clipped, shape);
    }

    #[test]
    fn test_outside_is_rejected() {
        assert!(bounds().clip(&rect(6.0, 6.0, 8.0, 8.0), 1e-5).is_none());
        assert!(bounds().clip(&rect(-9.0, -1.0, -6.0, 1.0), 1e-5).is_none());
    }

    #[test]
    fn test_touching_outside_is_rejected() {
        // Shares only the max-X boundary line with the tile.
        assert!(bounds().clip(&rect(5.0, -1.0, 7.0, 1.0), 1e-5).is_none());
    }

    #[test]
    fn test_straddling_corner() {
        let shape = rect(3.0, 3.0, 7.0, 7.0);
        let clipped = bounds().clip(&shape, 1e-5).unwrap();
        assert_relative_eq!(clipped.area_xz(), 4.0, epsilon = 1e-12);
        for v in clipped.vertices() {
            assert!(bounds().contains_xz(*v, 0.0));
        }
        // snapped exactly onto the boundary
        assert!(clipped.vertices().iter().any(|v| v.x == 5.0 && v.z == 5.0));
    }

    #[test]
    fn test_covering_shape_becomes_tile() {
        let clipped = bounds().clip(&rect(-20.0, -20.0, 20.0, 20.0), 1e-5).unwrap();
        assert_relative_eq!(clipped.area_xz(), 100.0, epsilon = 1e-9);
        assert!(clipped.is_convex_xz(1e-9));
    }

    #[test]
    fn test_to_polygon() {
        let b = bounds();
        let poly = b.to_polygon();
        assert_relative_eq!(poly.signed_area_xz(), b.width() * b.depth(), epsilon = 1e-12);
        assert_eq!(poly.vertex(0), Some(Point3::new(-5.0, -1.0, -5.0)));
        assert_eq!(b.corners_2d()[2], Point2::new(5.0, 5.0));
    }
}
