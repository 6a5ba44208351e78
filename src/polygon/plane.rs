//! Clip planes and side classification.

use crate::primitives::{Point3, Vec3};
use num_traits::Float;

/// Which side of a clip plane something lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Positive signed distance (the side the normal points to).
    Front,
    /// Negative signed distance.
    Back,
    /// Within tolerance of the plane.
    On,
    /// A polygon with vertices on both sides.
    Cross,
}

/// A half-space boundary given by a point on the plane and its normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane<F> {
    pub point: Point3<F>,
    pub normal: Vec3<F>,
}

impl<F: Float> ClipPlane<F> {
    /// Creates a plane through `point` with the given `normal`.
    ///
    /// The normal is used as given; callers that need metric distances
    /// should pass a unit normal.
    #[inline]
    pub fn new(point: Point3<F>, normal: Vec3<F>) -> Self {
        Self { point, normal }
    }

    /// Distance of the plane from the origin along its normal.
    #[inline]
    pub fn offset(&self) -> F {
        self.point.to_vec().dot(self.normal)
    }

    /// Signed distance of `p` from the plane, in normal units.
    #[inline]
    pub fn signed_distance(&self, p: Point3<F>) -> F {
        p.to_vec().dot(self.normal) - self.offset()
    }

    /// Classifies a single point with tolerance `eps`.
    #[inline]
    pub fn classify(&self, p: Point3<F>, eps: F) -> Side {
        side_of_distance(self.signed_distance(p), eps)
    }

    /// Returns the same plane facing the other way.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            point: self.point,
            normal: -self.normal,
        }
    }
}

#[inline]
pub(crate) fn side_of_distance<F: Float>(d: F, eps: F) -> Side {
    if d > eps {
        Side::Front
    } else if d < -eps {
        Side::Back
    } else {
        Side::On
    }
}
