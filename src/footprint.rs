//! Ground footprints of scene shapes.

use crate::polygon::ConvexPolygon;
use crate::primitives::{Point3, Vec3};
use num_traits::Float;

/// Bottom face of a box rotated by `yaw` radians about the up axis.
///
/// Corners come out in local order (+x, +z), (-x, +z), (-x, -z), (+x, -z),
/// which is counter-clockwise in the X/Z plane, at height
/// `center.y - half_extents.y`. Negative half extents are treated as
/// positive.
///
/// # Example
///
/// ```
/// use navtile::{box_footprint, Point3, Vec3};
///
/// let footprint = box_footprint(Point3::new(0.0, 1.0, 0.0), 0.0, Vec3::new(2.0, 1.0, 1.0));
/// assert_eq!(footprint.vertex(0), Some(Point3::new(2.0, 0.0, 1.0)));
/// assert!((footprint.area_xz() - 8.0_f64).abs() < 1e-12);
/// ```
pub fn box_footprint<F: Float>(center: Point3<F>, yaw: F, half_extents: Vec3<F>) -> ConvexPolygon<F> {
    let (hx, hz) = (half_extents.x.abs(), half_extents.z.abs());
    let y = center.y - half_extents.y.abs();
    let (s, c) = yaw.sin_cos();

    let corners = [(hx, hz), (-hx, hz), (-hx, -hz), (hx, -hz)];
    ConvexPolygon::from_vertices(
        corners
            .iter()
            .map(|&(x, z)| Point3::new(center.x + x * c + z * s, y, center.z - x * s + z * c))
            .collect(),
    )
}
