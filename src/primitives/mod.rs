//! Floating-point points and vectors.
//!
//! Tile geometry is stored in 3D ([`Point3`]) and measured in the X/Z plane.
//! Contours and triangles are 2D ([`Point2`]) with `y` holding world Z.

mod point2;
mod point3;
mod vec2;
mod vec3;

pub use point2::Point2;
pub use point3::Point3;
pub use vec2::Vec2;
pub use vec3::Vec3;
