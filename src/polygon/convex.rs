//! Convex polygons in the horizontal plane and the half-space split.

use super::edge::Edge;
use super::plane::{side_of_distance, ClipPlane, Side};
use crate::error::{NavTileError, Result};
use crate::primitives::{Point2, Point3, Vec3};
use num_traits::Float;

/// A convex polygon lying in the horizontal (X/Z) plane.
///
/// Vertices are stored counter-clockwise as seen from above with X to the
/// right and Z up; the polygon is implicitly closed (the last vertex connects
/// to the first). With that winding, `cross(up, edge_direction)` points away
/// from the interior on every edge.
///
/// Vertices can be inserted (edge matching splits edges) but never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon<F> {
    vertices: Vec<Point3<F>>,
}

/// Result of splitting a polygon by a plane.
///
/// `side` is [`Side::Front`] or [`Side::Back`] when the polygon lies wholly on
/// one side (the matching half holds an unmodified clone) and
/// [`Side::Cross`] when both halves are present.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<F> {
    pub side: Side,
    pub front: Option<ConvexPolygon<F>>,
    pub back: Option<ConvexPolygon<F>>,
}

impl<F> Split<F> {
    fn front(polygon: ConvexPolygon<F>) -> Self {
        Self {
            side: Side::Front,
            front: Some(polygon),
            back: None,
        }
    }

    fn back(polygon: ConvexPolygon<F>) -> Self {
        Self {
            side: Side::Back,
            front: None,
            back: Some(polygon),
        }
    }
}

impl<F: Float> ConvexPolygon<F> {
    /// Creates a polygon from counter-clockwise vertices.
    ///
    /// Returns [`NavTileError::DegenerateShape`] for fewer than three points.
    /// Convexity is the caller's responsibility.
    ///
    /// # Example
    ///
    /// ```
    /// use navtile::polygon::ConvexPolygon;
    /// use navtile::Point3;
    ///
    /// let square = ConvexPolygon::new(vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 1.0),
    ///     Point3::new(0.0, 0.0, 1.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(square.len(), 4);
    /// assert!((square.area_xz() - 1.0_f64).abs() < 1e-12);
    /// ```
    pub fn new(vertices: Vec<Point3<F>>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(NavTileError::DegenerateShape {
                points: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    /// Builds a polygon the caller already knows has at least three points.
    #[inline]
    pub(crate) fn from_vertices(vertices: Vec<Point3<F>>) -> Self {
        debug_assert!(vertices.len() >= 3);
        Self { vertices }
    }

    /// Number of vertices, which is also the number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if there are no vertices; a validated polygon is never
    /// empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertices in order.
    #[inline]
    pub fn vertices(&self) -> &[Point3<F>] {
        &self.vertices
    }

    /// Vertex `index`, if it exists.
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<Point3<F>> {
        self.vertices.get(index).copied()
    }

    /// Edge `index`, running from vertex `index` to the next vertex.
    pub fn edge(&self, index: usize) -> Option<Edge<F>> {
        let n = self.vertices.len();
        if index >= n {
            return None;
        }
        Some(Edge::new(self.vertices[index], self.vertices[(index + 1) % n]))
    }

    /// Average of the vertices.
    pub fn center(&self) -> Point3<F> {
        let n = F::from(self.vertices.len()).unwrap();
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::zero(), |acc, v| acc + v.to_vec());
        Point3::from(sum / n)
    }

    /// Plane of the polygon's face, through its center.
    ///
    /// Up-facing for counter-clockwise winding. Returns `None` when the
    /// first two vertices and the center are collinear.
    pub fn face_plane(&self) -> Option<ClipPlane<F>> {
        let center = self.center();
        let v1 = self.vertices[0] - center;
        let v2 = self.vertices[1] - center;
        let normal = v2.cross(v1).normalize()?;
        Some(ClipPlane::new(center, normal))
    }

    /// Outward-facing plane of edge `index`.
    ///
    /// The plane passes through the edge start with normal
    /// `cross(up, edge_direction)`, normalized. Returns `None` for an
    /// out-of-range index or an edge with no planar length.
    pub fn edge_plane(&self, index: usize) -> Option<ClipPlane<F>> {
        let edge = self.edge(index)?;
        let normal = Vec3::up().cross(edge.end - edge.start).normalize()?;
        Some(ClipPlane::new(edge.start, normal))
    }

    /// Inserts `point` right after vertex `index` and returns the new
    /// vertex's index.
    ///
    /// Edge `index` now ends at `point`; every edge after it shifts by one.
    pub fn insert_after(&mut self, index: usize, point: Point3<F>) -> usize {
        self.vertices.insert(index + 1, point);
        index + 1
    }

    /// Splits the polygon by `plane`, leaving `self` untouched.
    ///
    /// Vertices within `eps` of the plane count as on it and go to both
    /// halves. A polygon with no vertex strictly on either side is
    /// coplanar with the cut; it is assigned whole to the side its face
    /// normal agrees with. A polygon entirely on one side comes back as a
    /// clone on that side.
    ///
    /// Crossing edges are cut by interpolating from the front vertex. For an
    /// axis where the plane normal is exactly `+1` or `-1`, the cut
    /// coordinate is set to the plane offset directly so axis-aligned cuts
    /// land exactly on the plane.
    ///
    /// # Example
    ///
    /// ```
    /// use navtile::polygon::{ClipPlane, ConvexPolygon, Side};
    /// use navtile::{Point3, Vec3};
    ///
    /// let square = ConvexPolygon::new(vec![
    ///     Point3::new(-1.0, 0.0, -1.0),
    ///     Point3::new(1.0, 0.0, -1.0),
    ///     Point3::new(1.0, 0.0, 1.0),
    ///     Point3::new(-1.0, 0.0, 1.0),
    /// ])
    /// .unwrap();
    ///
    /// let cut = ClipPlane::new(Point3::new(0.0, 0.0, 0.0), Vec3::unit_x());
    /// let split = square.split(&cut, 1e-5);
    /// assert_eq!(split.side, Side::Cross);
    /// assert!((split.front.unwrap().area_xz() - 2.0_f64).abs() < 1e-12);
    /// assert!((split.back.unwrap().area_xz() - 2.0_f64).abs() < 1e-12);
    /// ```
    pub fn split(&self, plane: &ClipPlane<F>, eps: F) -> Split<F> {
        let n = self.vertices.len();
        let dists: Vec<F> = self
            .vertices
            .iter()
            .map(|&v| plane.signed_distance(v))
            .collect();
        let sides: Vec<Side> = dists.iter().map(|&d| side_of_distance(d, eps)).collect();

        let fronts = sides.iter().filter(|&&s| s == Side::Front).count();
        let backs = sides.iter().filter(|&&s| s == Side::Back).count();

        if fronts == 0 && backs == 0 {
            let facing = self
                .face_plane()
                .map(|face| face.normal.dot(plane.normal))
                .unwrap_or_else(F::zero);
            return if facing > F::zero() {
                Split::front(self.clone())
            } else {
                Split::back(self.clone())
            };
        }
        if fronts == 0 {
            return Split::back(self.clone());
        }
        if backs == 0 {
            return Split::front(self.clone());
        }

        let mut front = Vec::with_capacity(n + 2);
        let mut back = Vec::with_capacity(n + 2);

        for i in 0..n {
            let j = (i + 1) % n;
            let current = self.vertices[i];

            if sides[i] == Side::On {
                front.push(current);
                back.push(current);
                continue;
            }
            if sides[i] == Side::Front {
                front.push(current);
            } else {
                back.push(current);
            }

            if sides[j] == Side::On || sides[j] == sides[i] {
                continue;
            }

            let next = self.vertices[j];
            let mid = if sides[i] == Side::Front {
                cut_point(current, next, dists[i], dists[j], plane)
            } else {
                cut_point(next, current, dists[j], dists[i], plane)
            };
            front.push(mid);
            back.push(mid);
        }

        let limit = n + 4;
        if front.len() > limit || back.len() > limit {
            log::warn!(
                "split of {}-gon produced {}/{} points (limit {})",
                n,
                front.len(),
                back.len(),
                limit
            );
        }

        Split {
            side: Side::Cross,
            front: Some(Self::from_vertices(front)),
            back: Some(Self::from_vertices(back)),
        }
    }

    /// The same polygon wound counter-clockwise.
    ///
    /// Clockwise input comes back with its vertex order reversed; anything
    /// else is returned unchanged.
    pub fn to_counter_clockwise(&self) -> Self {
        if self.signed_area_xz() < F::zero() {
            let mut vertices = self.vertices.clone();
            vertices.reverse();
            Self { vertices }
        } else {
            self.clone()
        }
    }

    /// Signed area in the X/Z plane; positive for counter-clockwise winding.
    pub fn signed_area_xz(&self) -> F {
        let n = self.vertices.len();
        let mut area = F::zero();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            area = area + a.x * b.z - b.x * a.z;
        }
        area / F::from(2.0).unwrap()
    }

    /// Absolute area in the X/Z plane.
    pub fn area_xz(&self) -> F {
        self.signed_area_xz().abs()
    }

    /// Area centroid in the X/Z plane, or `None` for a zero-area polygon.
    pub fn centroid_xz(&self) -> Option<Point2<F>> {
        let area = self.signed_area_xz();
        if area.abs() < F::epsilon() {
            return None;
        }

        let n = self.vertices.len();
        let mut cx = F::zero();
        let mut cz = F::zero();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let cross = a.x * b.z - b.x * a.z;
            cx = cx + (a.x + b.x) * cross;
            cz = cz + (a.z + b.z) * cross;
        }

        let six = F::from(6.0).unwrap();
        Some(Point2::new(cx / (six * area), cz / (six * area)))
    }

    /// Tests whether `p` (an `(x, z)` point) lies strictly inside, more than
    /// `eps` away from every edge.
    ///
    /// Assumes counter-clockwise winding.
    pub fn contains_xz(&self, p: Point2<F>, eps: F) -> bool {
        let n = self.vertices.len();
        (0..n).all(|i| {
            let a = self.vertices[i].xz();
            let b = self.vertices[(i + 1) % n].xz();
            let dir = b - a;
            let len = dir.magnitude();
            if len <= F::epsilon() {
                return true;
            }
            dir.cross(p - a) / len > eps
        })
    }

    /// Tests convexity in the X/Z plane.
    ///
    /// Turns whose cross product is within `eps` of zero (collinear vertices
    /// left by edge splitting) are ignored.
    pub fn is_convex_xz(&self, eps: F) -> bool {
        let n = self.vertices.len();
        let mut sign: Option<bool> = None;

        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            let cross = a.delta_xz(b).cross(b.delta_xz(c));

            if cross.abs() > eps {
                let positive = cross > F::zero();
                match sign {
                    None => sign = Some(positive),
                    Some(s) if s != positive => return false,
                    _ => {}
                }
            }
        }

        true
    }

    /// The vertices dropped onto the X/Z plane.
    pub fn to_points_2d(&self) -> Vec<Point2<F>> {
        self.vertices.iter().map(|v| v.xz()).collect()
    }
}

/// Point where the edge `front -> back` crosses `plane`.
fn cut_point<F: Float>(
    front: Point3<F>,
    back: Point3<F>,
    front_dist: F,
    back_dist: F,
    plane: &ClipPlane<F>,
) -> Point3<F> {
    let t = front_dist / (front_dist - back_dist);
    let offset = plane.offset();
    let snap = |axis: usize, a: F, b: F| {
        let n = plane.normal.axis(axis);
        if n == F::one() {
            offset
        } else if n == -F::one() {
            -offset
        } else {
            a + t * (b - a)
        }
    };
    Point3::new(
        snap(0, front.x, back.x),
        snap(1, front.y, back.y),
        snap(2, front.z, back.z),
    )
}
