//! Tolerances and limits for tile assembly.
//!
//! Every geometric stage takes its tolerance explicitly. `TileConfig` bundles
//! them so a tile (or a whole grid of tiles) is built with one consistent set.

use num_traits::Float;

/// Default contour walk step limit.
pub const DEFAULT_CONTOUR_STEP_LIMIT: usize = 100;

/// Configuration for assembling a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileConfig<F> {
    /// Signed distance below which a vertex counts as lying on a split plane.
    pub split_epsilon: F,
    /// Tolerance for collinearity, overlap and vertex coincidence when
    /// matching shared edges.
    pub edge_tolerance: F,
    /// Maximum number of steps a single contour walk may take.
    pub contour_step_limit: usize,
    /// Start every tile with one walkable cell covering its rectangle.
    pub seed_walkable: bool,
    /// Minimum edge length accepted by contour validation.
    pub min_contour_edge: F,
}

impl<F: Float> Default for TileConfig<F> {
    fn default() -> Self {
        Self {
            split_epsilon: F::from(1e-5).unwrap(),
            edge_tolerance: F::from(1e-4).unwrap(),
            contour_step_limit: DEFAULT_CONTOUR_STEP_LIMIT,
            seed_walkable: false,
            min_contour_edge: F::from(1e-3).unwrap(),
        }
    }
}

impl<F: Float> TileConfig<F> {
    /// Sets the on-plane tolerance used when splitting.
    pub fn with_split_epsilon(mut self, eps: F) -> Self {
        self.split_epsilon = eps;
        self
    }

    /// Sets the shared-edge matching tolerance.
    pub fn with_edge_tolerance(mut self, tolerance: F) -> Self {
        self.edge_tolerance = tolerance;
        self
    }

    /// Sets the contour walk step limit.
    pub fn with_contour_step_limit(mut self, steps: usize) -> Self {
        self.contour_step_limit = steps;
        self
    }

    /// Enables or disables the walkable seed cell.
    pub fn with_seed_walkable(mut self, seed: bool) -> Self {
        self.seed_walkable = seed;
        self
    }

    /// Sets the minimum contour edge length used by validation.
    pub fn with_min_contour_edge(mut self, length: F) -> Self {
        self.min_contour_edge = length;
        self
    }

    /// Step limit large enough for any walk over cells with `total_edges`
    /// edges in total.
    ///
    /// A walk visits each (cell, edge) pair at most once, so the total edge
    /// count bounds it. The configured limit is kept when it is larger.
    pub fn auto_step_limit(&self, total_edges: usize) -> usize {
        self.contour_step_limit.max(total_edges + 1)
    }
}
