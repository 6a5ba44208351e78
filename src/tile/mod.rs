//! Per-tile assembly of non-overlapping convex cells.
//!
//! This module provides:
//! - [`TileBounds`] and [`clip_to_bounds`] for cutting shapes to a tile
//! - [`resolve_overlaps`] keeping the cell list a partition
//! - [`find_shared_edges`] matching coincident edges between cells
//! - [`extract_contours`] recovering boundary loops for triangulation
//! - [`Tile`] tying the stages together
//!
//! # Example
//!
//! ```
//! use navtile::tile::{Tile, TileParams};
//! use navtile::{box_footprint, Point3, TileConfig, Vec3};
//!
//! let params = TileParams::new(
//!     0,
//!     0,
//!     Point3::new(-5.0, -1.0, -5.0),
//!     Point3::new(5.0, 1.0, 5.0),
//! );
//! let mut tile = Tile::new(params, TileConfig::default().with_seed_walkable(true));
//!
//! let obstacle = box_footprint(Point3::origin(), 0.0, Vec3::new(1.0, 0.5, 1.0));
//! assert!(tile.insert(&obstacle));
//! assert_eq!(tile.cell_count(), 5);
//!
//! let outline = tile.finalize();
//! assert_eq!(outline.contours.len(), 2);
//! assert_eq!(outline.holes().count(), 1);
//! ```

mod bounds;
mod contour;
mod resolve;
mod shared_edge;

pub use bounds::{clip_to_bounds, TileBounds};
pub use contour::{extract_contours, extract_contours_strict, validate_contour, Contour};
pub use resolve::resolve_overlaps;
pub use shared_edge::{find_shared_edges, SharedEdge};

use crate::config::TileConfig;
use crate::error::{NavTileError, Result};
use crate::polygon::ConvexPolygon;
use crate::primitives::{Point2, Point3};
use num_traits::Float;

/// What a cell covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Free ground.
    Walkable,
    /// Ground covered by an obstacle.
    Obstacle,
}

/// A convex cell of a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<F> {
    pub polygon: ConvexPolygon<F>,
    pub kind: CellKind,
}

impl<F> Cell<F> {
    /// Creates a new cell.
    pub fn new(polygon: ConvexPolygon<F>, kind: CellKind) -> Self {
        Self { polygon, kind }
    }
}

/// Where a tile sits and what it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileParams<F> {
    pub tile_x: i32,
    pub tile_z: i32,
    pub min_bounds: Point3<F>,
    pub max_bounds: Point3<F>,
}

impl<F: Float> TileParams<F> {
    /// Creates tile parameters.
    pub fn new(tile_x: i32, tile_z: i32, min_bounds: Point3<F>, max_bounds: Point3<F>) -> Self {
        Self {
            tile_x,
            tile_z,
            min_bounds,
            max_bounds,
        }
    }

    /// The tile rectangle.
    pub fn bounds(&self) -> TileBounds<F> {
        TileBounds::new(self.min_bounds, self.max_bounds)
    }
}

/// Input for the triangulator: the tile rectangle and every contour.
#[derive(Debug, Clone, PartialEq)]
pub struct TileOutline<F> {
    /// Tile rectangle, counter-clockwise from the minimum corner.
    pub outer: [Point2<F>; 4],
    pub contours: Vec<Contour<F>>,
}

impl<F: Float> TileOutline<F> {
    /// Contours around obstacles.
    pub fn holes(&self) -> impl Iterator<Item = &Contour<F>> {
        self.contours.iter().filter(|c| c.is_hole())
    }
}

/// A tile being assembled.
///
/// Shapes are inserted one at a time and the cell list stays a set of
/// pairwise non-overlapping convex polygons. Insertion order matters: a
/// later shape always wins over cells already there.
///
/// Shared edges and contours are derived by [`Tile::finalize`] and cleared
/// by the next insertion.
#[derive(Debug, Clone)]
pub struct Tile<F> {
    tile_x: i32,
    tile_z: i32,
    bounds: TileBounds<F>,
    config: TileConfig<F>,
    cells: Vec<Cell<F>>,
    shared_edges: Vec<SharedEdge>,
    contours: Vec<Contour<F>>,
}

impl<F: Float> Tile<F> {
    /// Creates an empty tile, or one holding a single walkable cell over the
    /// whole rectangle when [`TileConfig::seed_walkable`] is set.
    ///
    /// `seed_walkable` is off by default, and then only obstacle cells exist.
    /// To get a walkable outline with obstacle holes, build the tile with
    /// `TileConfig::default().with_seed_walkable(true)`.
    pub fn new(params: TileParams<F>, config: TileConfig<F>) -> Self {
        let bounds = params.bounds();
        let cells = if config.seed_walkable {
            vec![Cell::new(bounds.to_polygon(), CellKind::Walkable)]
        } else {
            Vec::new()
        };

        Self {
            tile_x: params.tile_x,
            tile_z: params.tile_z,
            bounds,
            config,
            cells,
            shared_edges: Vec::new(),
            contours: Vec::new(),
        }
    }

    pub fn tile_x(&self) -> i32 {
        self.tile_x
    }

    pub fn tile_z(&self) -> i32 {
        self.tile_z
    }

    pub fn bounds(&self) -> &TileBounds<F> {
        &self.bounds
    }

    pub fn config(&self) -> &TileConfig<F> {
        &self.config
    }

    /// Inserts an obstacle shape.
    ///
    /// The shape is clipped to the tile first. Returns `false`, leaving the
    /// tile untouched, when nothing of it lies inside.
    pub fn insert(&mut self, shape: &ConvexPolygon<F>) -> bool {
        let Some(clipped) = clip_to_bounds(shape, &self.bounds, self.config.split_epsilon) else {
            log::debug!(
                "tile ({}, {}): shape with {} points outside bounds",
                self.tile_x,
                self.tile_z,
                shape.len()
            );
            return false;
        };

        resolve_overlaps(
            &mut self.cells,
            clipped,
            CellKind::Obstacle,
            self.config.split_epsilon,
        );
        self.shared_edges.clear();
        self.contours.clear();
        true
    }

    /// Inserts an obstacle given as raw points. See [`Tile::insert`].
    pub fn insert_points(&mut self, points: &[Point3<F>]) -> Result<bool> {
        let shape = ConvexPolygon::new(points.to_vec())?;
        Ok(self.insert(&shape))
    }

    pub fn cells(&self) -> &[Cell<F>] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell `index`, or [`NavTileError::CellOutOfRange`].
    pub fn cell(&self, index: usize) -> Result<&Cell<F>> {
        self.cells.get(index).ok_or(NavTileError::CellOutOfRange {
            cell: index,
            len: self.cells.len(),
        })
    }

    /// Matches shared edges, walks contours and returns the triangulation
    /// input.
    ///
    /// May insert vertices into cells. The walk limit grows with the tile's
    /// edge count so large tiles are never truncated; see
    /// [`TileConfig::auto_step_limit`]. Contour points closer than
    /// [`TileConfig::edge_tolerance`] are welded, and loops left with fewer
    /// than three points are dropped.
    pub fn finalize(&mut self) -> TileOutline<F> {
        self.shared_edges = find_shared_edges(&mut self.cells, self.config.edge_tolerance);

        let total_edges: usize = self.cells.iter().map(|c| c.polygon.len()).sum();
        let limit = self.config.auto_step_limit(total_edges);

        // Records come straight from the matcher, so indices are in range.
        let mut contours = match extract_contours(&self.cells, &self.shared_edges, limit) {
            Ok(contours) => contours,
            Err(err) => {
                log::error!("tile ({}, {}): {}", self.tile_x, self.tile_z, err);
                Vec::new()
            }
        };
        for contour in &mut contours {
            contour.weld(self.config.edge_tolerance);
        }
        contours.retain(|c| c.len() >= 3);
        self.contours = contours;

        log::debug!(
            "tile ({}, {}): {} cells, {} shared edges, {} contours",
            self.tile_x,
            self.tile_z,
            self.cells.len(),
            self.shared_edges.len(),
            self.contours.len()
        );

        TileOutline {
            outer: self.bounds.corners_2d(),
            contours: self.contours.clone(),
        }
    }

    /// Shared edges from the last [`Tile::finalize`].
    pub fn shared_edges(&self) -> &[SharedEdge] {
        &self.shared_edges
    }

    /// Contours from the last [`Tile::finalize`].
    pub fn contours(&self) -> &[Contour<F>] {
        &self.contours
    }

    /// Validates every contour from the last [`Tile::finalize`] against
    /// [`TileConfig::min_contour_edge`].
    pub fn validate_contours(&self) -> Result<()> {
        self.contours
            .iter()
            .enumerate()
            .try_for_each(|(i, c)| validate_contour(i, &c.points, self.config.min_contour_edge))
    }
}
