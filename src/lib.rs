//! navtile - Tile assembly for navigation meshes
//!
//! Obstacle footprints are clipped to a tile and to each other until the tile
//! is a partition of non-overlapping convex cells. Coincident edges between
//! cells are then matched and the boundary contours walked out, ready for a
//! constrained triangulator.
//!
//! # Example
//!
//! ```
//! use navtile::tile::{Tile, TileParams};
//! use navtile::triangulate::{triangulate_outline, EarcutTriangulator};
//! use navtile::{box_footprint, Point3, TileConfig, Vec3};
//!
//! let params = TileParams::new(0, 0, Point3::new(-5.0, -1.0, -5.0), Point3::new(5.0, 1.0, 5.0));
//! let mut tile = Tile::new(params, TileConfig::default());
//!
//! tile.insert(&box_footprint(Point3::new(-1.0, 0.0, 0.0), 0.0, Vec3::new(1.0, 0.5, 1.0)));
//! tile.insert(&box_footprint(Point3::new(1.0, 0.0, 0.0), 0.0, Vec3::new(1.0, 0.5, 1.0)));
//!
//! let outline = tile.finalize();
//! assert_eq!(tile.shared_edges().len(), 1);
//! assert_eq!(outline.holes().count(), 1);
//! tile.validate_contours().unwrap();
//!
//! let mut triangulator = EarcutTriangulator::new();
//! let triangles = triangulate_outline(&mut triangulator, &outline, 0.0).unwrap();
//! let area: f64 = triangles.iter().map(|t| t.area()).sum();
//! assert!((area - 92.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod footprint;
pub mod grid;
pub mod polygon;
pub mod primitives;
pub mod tile;
pub mod triangulate;

pub use config::TileConfig;
pub use error::{ContourDefect, NavTileError, Result};
pub use footprint::box_footprint;
pub use grid::{BuiltTile, TileGrid};
pub use polygon::{ClipPlane, ConvexPolygon, Side, Split};
pub use primitives::{Point2, Point3, Vec2, Vec3};
pub use tile::{Cell, CellKind, Contour, SharedEdge, Tile, TileBounds, TileOutline, TileParams};
