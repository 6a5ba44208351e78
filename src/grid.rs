//! Splitting a world rectangle into tiles and building them in parallel.
//!
//! Tiles share nothing, so every tile is assembled on its own rayon task.
//! Within one tile obstacles are inserted in the order given.

use rayon::prelude::*;

use crate::config::TileConfig;
use crate::error::{NavTileError, Result};
use crate::polygon::ConvexPolygon;
use crate::primitives::Point3;
use crate::tile::{Tile, TileOutline, TileParams};
use num_traits::Float;

/// A regular grid of square tiles over a world rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid<F> {
    min: Point3<F>,
    max: Point3<F>,
    tile_size: F,
    size_x: usize,
    size_z: usize,
}

/// One assembled tile and its triangulation input.
#[derive(Debug, Clone)]
pub struct BuiltTile<F> {
    pub tile: Tile<F>,
    pub outline: TileOutline<F>,
}

impl<F: Float> TileGrid<F> {
    /// Lays a grid of `tile_size` tiles over `min..max`.
    ///
    /// The tile count per axis is the extent divided by `tile_size`,
    /// rounded to the nearest integer; the last row and column may reach
    /// past `max`.
    pub fn new(min: Point3<F>, max: Point3<F>, tile_size: F) -> Result<Self> {
        if !(tile_size > F::zero()) || !tile_size.is_finite() {
            return Err(NavTileError::InvalidTileSize(
                tile_size.to_f64().unwrap_or(f64::NAN),
            ));
        }

        let count = |extent: F| {
            let n = (extent / tile_size + F::from(0.5).unwrap()).floor();
            n.to_usize().unwrap_or(0)
        };

        Ok(Self {
            min,
            max,
            tile_size,
            size_x: count(max.x - min.x),
            size_z: count(max.z - min.z),
        })
    }

    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_z(&self) -> usize {
        self.size_z
    }

    pub fn tile_size(&self) -> F {
        self.tile_size
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.size_x * self.size_z
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parameters of tile (`x`, `z`). Tiles span the grid's full height.
    pub fn tile_params(&self, x: usize, z: usize) -> TileParams<F> {
        let fx = F::from(x).unwrap();
        let fz = F::from(z).unwrap();
        let one = F::one();
        let min = Point3::new(
            self.min.x + fx * self.tile_size,
            self.min.y,
            self.min.z + fz * self.tile_size,
        );
        let max = Point3::new(
            self.min.x + (fx + one) * self.tile_size,
            self.max.y,
            self.min.z + (fz + one) * self.tile_size,
        );
        TileParams::new(x as i32, z as i32, min, max)
    }

    /// Parameters of every tile, row by row along X.
    pub fn params(&self) -> impl Iterator<Item = TileParams<F>> + '_ {
        (0..self.size_z).flat_map(move |z| (0..self.size_x).map(move |x| self.tile_params(x, z)))
    }
}

impl<F: Float + Send + Sync> TileGrid<F> {
    /// Builds and finalizes every tile in parallel.
    ///
    /// Each tile receives every obstacle; shapes outside a tile are skipped
    /// by that tile. Output is in [`TileGrid::params`] order.
    ///
    /// # Example
    ///
    /// ```
    /// use navtile::{box_footprint, Point3, TileConfig, TileGrid, Vec3};
    ///
    /// let grid = TileGrid::new(Point3::new(0.0, 0.0, 0.0), Point3::new(20.0, 2.0, 10.0), 10.0).unwrap();
    /// let obstacles = vec![box_footprint(Point3::new(10.0, 0.0, 5.0), 0.0, Vec3::new(1.0, 0.5, 1.0))];
    ///
    /// let tiles = grid.build(&obstacles, &TileConfig::default());
    /// assert_eq!(tiles.len(), 2);
    /// // the box straddles the border and lands in both tiles
    /// assert!(tiles.iter().all(|t| t.tile.cell_count() == 1));
    /// ```
    pub fn build(&self, obstacles: &[ConvexPolygon<F>], config: &TileConfig<F>) -> Vec<BuiltTile<F>> {
        let params: Vec<TileParams<F>> = self.params().collect();

        params
            .into_par_iter()
            .map(|p| {
                let mut tile = Tile::new(p, *config);
                let added = obstacles.iter().filter(|o| tile.insert(o)).count();
                let outline = tile.finalize();
                log::info!(
                    "built tile ({}, {}): {} obstacles, {} cells, {} contours",
                    p.tile_x,
                    p.tile_z,
                    added,
                    tile.cell_count(),
                    outline.contours.len()
                );
                BuiltTile { tile, outline }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::box_footprint;
    use crate::primitives::Vec3;
    use approx::assert_relative_eq;

    fn grid() -> TileGrid<f64> {
        TileGrid::new(Point3::new(-10.0, -1.0, -5.0), Point3::new(10.0, 3.0, 5.0), 5.0).unwrap()
    }

    #[test]
    fn test_grid_size() {
        let g = grid();
        assert_eq!(g.size_x(), 4);
        assert_eq!(g.size_z(), 2);
        assert_eq!(g.len(), 8);

        // 2.4 rounds down, 2.6 rounds up
        let g = TileGrid::new(Point3::origin(), Point3::new(12.0, 0.0, 13.0), 5.0).unwrap();
        assert_eq!((g.size_x(), g.size_z()), (2, 3));
    }

    #[test]
    fn test_invalid_tile_size() {
        assert_eq!(
            TileGrid::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0), 0.0).unwrap_err(),
            NavTileError::InvalidTileSize(0.0)
        );
        assert!(TileGrid::new(Point3::<f64>::origin(), Point3::new(1.0, 1.0, 1.0), f64::NAN).is_err());
    }

    #[test]
    fn test_tile_params() {
        let p = grid().tile_params(2, 1);
        assert_eq!((p.tile_x, p.tile_z), (2, 1));
        assert_eq!(p.min_bounds, Point3::new(0.0, -1.0, 0.0));
        assert_eq!(p.max_bounds, Point3::new(5.0, 3.0, 5.0));

        let order: Vec<(i32, i32)> = grid().params().map(|p| (p.tile_x, p.tile_z)).collect();
        assert_eq!(order[0], (0, 0));
        assert_eq!(order[1], (1, 0));
        assert_eq!(order[4], (0, 1));
    }

    #[test]
    fn test_build_matches_sequential() {
        let g = grid();
        let config = TileConfig::default().with_seed_walkable(true);
        let obstacles = vec![
            box_footprint(Point3::new(0.0, 0.0, 0.0), 0.3, Vec3::new(1.5, 0.5, 1.0)),
            box_footprint(Point3::new(-7.0, 0.0, 2.0), 0.0, Vec3::new(1.0, 0.5, 1.0)),
            box_footprint(Point3::new(40.0, 0.0, 0.0), 0.0, Vec3::new(1.0, 0.5, 1.0)),
        ];

        let built = g.build(&obstacles, &config);
        assert_eq!(built.len(), g.len());

        for (b, p) in built.iter().zip(g.params()) {
            let mut tile = Tile::new(p, config);
            for o in &obstacles {
                tile.insert(o);
            }
            let outline = tile.finalize();
            assert_eq!(b.outline, outline);
            assert_eq!(b.tile.cells(), tile.cells());

            let area: f64 = b.tile.cells().iter().map(|c| c.polygon.area_xz()).sum();
            assert_relative_eq!(area, 25.0, epsilon = 1e-9);
        }
    }
}
