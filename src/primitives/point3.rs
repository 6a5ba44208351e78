//! 3D point type.
//!
//! Tile geometry lives in the horizontal X/Z plane. The Y coordinate is
//! carried along with every vertex but the planar helpers here ignore it.

use super::{Point2, Vec2, Vec3};
use num_traits::Float;
use std::ops::{Add, Sub};

/// A 3D point with x, y, and z coordinates.
///
/// Generic over floating-point types (`f32` or `f64`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3<F> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Point3<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F, z: F) -> Self {
        Self { x, y, z }
    }

    /// Creates a point at the origin (0, 0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
            z: F::zero(),
        }
    }

    /// Squared distance to another point measured in the X/Z plane.
    #[inline]
    pub fn distance_squared_xz(self, other: Self) -> F {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        dx * dx + dz * dz
    }

    /// Distance to another point measured in the X/Z plane.
    #[inline]
    pub fn distance_xz(self, other: Self) -> F {
        self.distance_squared_xz(other).sqrt()
    }

    /// Returns `true` if the two points coincide in X/Z within `eps`.
    #[inline]
    pub fn coincides_xz(self, other: Self, eps: F) -> bool {
        self.distance_squared_xz(other) <= eps * eps
    }

    /// Linearly interpolates between `self` and `other`.
    ///
    /// When `t = 0`, returns `self`. When `t = 1`, returns `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: F) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Drops the point onto the X/Z plane: `(x, z)`.
    #[inline]
    pub fn xz(self) -> Point2<F> {
        Point2::new(self.x, self.z)
    }

    /// Planar vector from `self` to `other`.
    #[inline]
    pub fn delta_xz(self, other: Self) -> Vec2<F> {
        Vec2::new(other.x - self.x, other.z - self.z)
    }

    /// Converts this point to a vector from the origin.
    #[inline]
    pub fn to_vec(self) -> Vec3<F> {
        Vec3::new(self.x, self.y, self.z)
    }
}

// Point - Point = Vec3
impl<F: Float> Sub for Point3<F> {
    type Output = Vec3<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec3<F> {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

// Point + Vec3 = Point
impl<F: Float> Add<Vec3<F>> for Point3<F> {
    type Output = Self;

    #[inline]
    fn add(self, v: Vec3<F>) -> Self {
        Self {
            x: self.x + v.x,
            y: self.y + v.y,
            z: self.z + v.z,
        }
    }
}

impl<F: Float> Default for Point3<F> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<F: Float> From<Vec3<F>> for Point3<F> {
    fn from(v: Vec3<F>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl<F: Float> From<(F, F, F)> for Point3<F> {
    fn from((x, y, z): (F, F, F)) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_ignores_height() {
        let a: Point3<f64> = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 100.0, 4.0);
        assert_eq!(a.distance_squared_xz(b), 25.0);
        assert_eq!(a.distance_xz(b), 5.0);
        assert!(a.coincides_xz(Point3::new(0.0, -7.0, 0.0), 1e-9));
    }

    #[test]
    fn test_lerp() {
        let a: Point3<f64> = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 20.0, 30.0);

        let mid = a.lerp(b, 0.5);
        assert_eq!(mid.x, 5.0);
        assert_eq!(mid.y, 10.0);
        assert_eq!(mid.z, 15.0);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_xz() {
        let p: Point3<f64> = Point3::new(1.0, 2.0, 3.0);
        let q = p.xz();
        assert_eq!(q.x, 1.0);
        assert_eq!(q.y, 3.0);

        let d = p.delta_xz(Point3::new(4.0, 9.0, -1.0));
        assert_eq!(d.x, 3.0);
        assert_eq!(d.y, -4.0);
    }

    #[test]
    fn test_point_sub_point() {
        let a: Point3<f64> = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 9.0);
        let v: Vec3<f64> = b - a;
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);
        assert_eq!(v.z, 6.0);
        assert_eq!(a + v, b);
    }
}
