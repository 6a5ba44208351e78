//! Triangulating a finished tile.
//!
//! Constrained triangulation is pluggable through [`Triangulator`]. The
//! bundled [`EarcutTriangulator`] runs ear clipping with hole bridging and
//! optionally bisects triangles down to a maximum area.

use crate::error::{NavTileError, Result};
use crate::primitives::Point2;
use crate::tile::TileOutline;
use num_traits::Float;

/// A triangle in the X/Z plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2<F> {
    pub a: Point2<F>,
    pub b: Point2<F>,
    pub c: Point2<F>,
}

impl<F: Float> Triangle2<F> {
    pub fn new(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Self {
        Self { a, b, c }
    }

    /// Signed area; positive for counter-clockwise corners.
    pub fn signed_area(&self) -> F {
        (self.b - self.a).cross(self.c - self.a) / F::from(2.0).unwrap()
    }

    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    pub fn centroid(&self) -> Point2<F> {
        let three = F::from(3.0).unwrap();
        Point2::new(
            (self.a.x + self.b.x + self.c.x) / three,
            (self.a.y + self.b.y + self.c.y) / three,
        )
    }

    /// Splits at the midpoint of the longest edge.
    fn bisect(&self) -> (Self, Self) {
        let ab = self.a.distance_squared(self.b);
        let bc = self.b.distance_squared(self.c);
        let ca = self.c.distance_squared(self.a);
        let half = F::from(0.5).unwrap();
        let mid = |p: Point2<F>, q: Point2<F>| Point2::new((p.x + q.x) * half, (p.y + q.y) * half);

        if ab >= bc && ab >= ca {
            let m = mid(self.a, self.b);
            (Self::new(self.a, m, self.c), Self::new(m, self.b, self.c))
        } else if bc >= ca {
            let m = mid(self.b, self.c);
            (Self::new(self.b, m, self.a), Self::new(m, self.c, self.a))
        } else {
            let m = mid(self.c, self.a);
            (Self::new(self.c, m, self.b), Self::new(m, self.a, self.b))
        }
    }
}

/// A constrained triangulation backend.
pub trait Triangulator<F: Float> {
    /// Triangulates the region inside `outer` and outside every hole.
    ///
    /// A positive `max_triangle_area` caps the area of output triangles;
    /// zero or negative means no cap.
    fn triangulate(
        &mut self,
        outer: &[Point2<F>],
        max_triangle_area: F,
        holes: &[&[Point2<F>]],
    ) -> Result<()>;

    /// Triangles of the last successful [`Triangulator::triangulate`] call,
    /// with hole interiors left out.
    fn triangles_discarding_holes(&self) -> Vec<Triangle2<F>>;
}

/// Feeds a tile outline to `triangulator`, using the obstacle contours as
/// holes.
pub fn triangulate_outline<F, T>(
    triangulator: &mut T,
    outline: &TileOutline<F>,
    max_triangle_area: F,
) -> Result<Vec<Triangle2<F>>>
where
    F: Float,
    T: Triangulator<F> + ?Sized,
{
    let holes: Vec<&[Point2<F>]> = outline.holes().map(|c| c.points.as_slice()).collect();
    triangulator.triangulate(&outline.outer, max_triangle_area, &holes)?;
    Ok(triangulator.triangles_discarding_holes())
}

/// Ear-clipping triangulator backed by `earcutr`.
#[derive(Debug, Clone, Default)]
pub struct EarcutTriangulator<F> {
    triangles: Vec<Triangle2<F>>,
}

impl<F: Float> EarcutTriangulator<F> {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }
}

fn to_f64<F: Float>(value: F) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| NavTileError::Triangulation("coordinate not representable as f64".into()))
}

impl<F: Float> Triangulator<F> for EarcutTriangulator<F> {
    fn triangulate(
        &mut self,
        outer: &[Point2<F>],
        max_triangle_area: F,
        holes: &[&[Point2<F>]],
    ) -> Result<()> {
        self.triangles.clear();
        if outer.len() < 3 {
            return Err(NavTileError::Triangulation(format!(
                "outer boundary has {} points",
                outer.len()
            )));
        }

        let mut points: Vec<Point2<F>> = outer.to_vec();
        let mut hole_indices = Vec::with_capacity(holes.len());
        for hole in holes.iter().filter(|h| h.len() >= 3) {
            hole_indices.push(points.len());
            points.extend_from_slice(hole);
        }

        let mut flat = Vec::with_capacity(points.len() * 2);
        for p in &points {
            flat.push(to_f64(p.x)?);
            flat.push(to_f64(p.y)?);
        }

        let indices = earcutr::earcut(&flat, &hole_indices, 2)
            .map_err(|e| NavTileError::Triangulation(format!("{:?}", e)))?;

        let mut pending: Vec<Triangle2<F>> = indices
            .chunks_exact(3)
            .map(|t| {
                let tri = Triangle2::new(points[t[0]], points[t[1]], points[t[2]]);
                if tri.signed_area() < F::zero() {
                    Triangle2::new(tri.a, tri.c, tri.b)
                } else {
                    tri
                }
            })
            .collect();

        if max_triangle_area > F::zero() {
            while let Some(tri) = pending.pop() {
                if tri.area() > max_triangle_area {
                    let (left, right) = tri.bisect();
                    pending.push(left);
                    pending.push(right);
                } else {
                    self.triangles.push(tri);
                }
            }
        } else {
            self.triangles = pending;
        }

        log::debug!(
            "triangulated {} points with {} holes into {} triangles",
            points.len(),
            hole_indices.len(),
            self.triangles.len()
        );
        Ok(())
    }

    fn triangles_discarding_holes(&self) -> Vec<Triangle2<F>> {
        self.triangles.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileConfig;
    use crate::footprint::box_footprint;
    use crate::primitives::{Point3, Vec3};
    use crate::tile::{Tile, TileParams};
    use approx::assert_relative_eq;

    fn square(min: f64, max: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(min, min),
            Point2::new(max, min),
            Point2::new(max, max),
            Point2::new(min, max),
        ]
    }

    fn area(triangles: &[Triangle2<f64>]) -> f64 {
        triangles.iter().map(|t| t.area()).sum()
    }

    #[test]
    fn test_square_with_hole() {
        let outer = square(-5.0, 5.0);
        let hole = square(-1.0, 1.0);
        let mut tri = EarcutTriangulator::new();
        tri.triangulate(&outer, 0.0, &[&hole]).unwrap();

        let triangles = tri.triangles_discarding_holes();
        assert_relative_eq!(area(&triangles), 96.0, epsilon = 1e-9);
        for t in &triangles {
            assert!(t.signed_area() >= 0.0);
            let c = t.centroid();
            assert!(!(c.x.abs() < 1.0 && c.y.abs() < 1.0), "triangle inside hole");
        }
    }

    #[test]
    fn test_max_area_refines() {
        let outer = square(0.0, 4.0);
        let mut tri = EarcutTriangulator::new();
        tri.triangulate(&outer, 1.0, &[]).unwrap();

        let triangles = tri.triangles_discarding_holes();
        assert!(triangles.len() >= 16);
        assert!(triangles.iter().all(|t| t.area() <= 1.0 + 1e-12));
        assert_relative_eq!(area(&triangles), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_degenerate_outer() {
        let mut tri = EarcutTriangulator::<f64>::new();
        let err = tri
            .triangulate(&[Point2::origin(), Point2::new(1.0, 0.0)], 0.0, &[])
            .unwrap_err();
        assert!(matches!(err, NavTileError::Triangulation(_)));
    }

    #[test]
    fn test_tile_outline() {
        let params = TileParams::new(
            0,
            0,
            Point3::new(-5.0, -1.0, -5.0),
            Point3::new(5.0, 1.0, 5.0),
        );
        let mut tile = Tile::new(params, TileConfig::default());
        tile.insert(&box_footprint(Point3::origin(), 0.0, Vec3::new(1.0, 0.5, 1.0)));
        tile.insert(&box_footprint(
            Point3::new(3.0, 0.0, 3.0),
            0.0,
            Vec3::new(0.5, 0.5, 0.5),
        ));
        let outline = tile.finalize();
        assert_eq!(outline.holes().count(), 2);

        let mut tri = EarcutTriangulator::new();
        let triangles = triangulate_outline(&mut tri, &outline, 0.0).unwrap();
        assert_relative_eq!(area(&triangles), 100.0 - 4.0 - 1.0, epsilon = 1e-9);
    }
}
