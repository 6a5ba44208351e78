//! Convex polygons in the horizontal plane.
//!
//! This module provides:
//! - [`ConvexPolygon`] with edge/plane queries, area and containment
//! - The half-space [`split`](ConvexPolygon::split) every tile stage is built on
//! - [`ClipPlane`] and [`Side`] classification
//!
//! # Example
//!
//! ```
//! use navtile::polygon::{ClipPlane, ConvexPolygon};
//! use navtile::{Point3, Vec3};
//!
//! let triangle = ConvexPolygon::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(0.0, 0.0, 2.0),
//! ])
//! .unwrap();
//!
//! // Keep the part with x <= 1.
//! let plane = ClipPlane::new(Point3::new(1.0, 0.0, 0.0), Vec3::unit_x());
//! let kept = triangle.split(&plane, 1e-5).back.unwrap();
//! assert!((kept.area_xz() - 1.5_f64).abs() < 1e-12);
//! ```

mod convex;
mod edge;
mod plane;

pub use convex::{ConvexPolygon, Split};
pub use edge::Edge;
pub use plane::{ClipPlane, Side};
