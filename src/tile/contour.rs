//! Boundary contours recovered from the shared-edge graph.
//!
//! Starting from edge 0 of a cell, the walk records every edge that has no
//! mate and hops across every edge that does. Hopping lands on the mate edge
//! in the neighbouring cell; continuing from the edge after it follows the
//! boundary of the union of cells around the shared vertex:
//!
//! ```text
//!   +-------+-------+
//!   |       |       |
//!   |   A   |   B   |      A's right edge is shared with B's left edge,
//!   |       |       |      so the contour goes around both as one shape.
//!   +-------+-------+
//! ```

use std::collections::HashMap;

use super::{Cell, CellKind, SharedEdge};
use crate::error::{ContourDefect, NavTileError, Result};
use crate::primitives::Point2;
use num_traits::Float;

/// One closed boundary loop in the X/Z plane.
///
/// The last point connects back to the first. `kind` is the kind of the
/// cells the walk went through: obstacle contours are holes for the
/// triangulator, walkable contours outline the free area.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour<F> {
    pub points: Vec<Point2<F>>,
    pub kind: CellKind,
}

impl<F: Float> Contour<F> {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the contour has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` for obstacle contours.
    pub fn is_hole(&self) -> bool {
        self.kind == CellKind::Obstacle
    }

    /// Signed enclosed area; positive for counter-clockwise loops.
    pub fn signed_area(&self) -> F {
        let n = self.points.len();
        let mut area = F::zero();
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            area = area + a.x * b.y - b.x * a.y;
        }
        area / F::from(2.0).unwrap()
    }

    /// Total length of the closed loop.
    pub fn perimeter(&self) -> F {
        let n = self.points.len();
        (0..n).fold(F::zero(), |acc, i| {
            acc + self.points[i].distance(self.points[(i + 1) % n])
        })
    }

    /// Merges runs of points closer than `tolerance`, including across the
    /// closing edge.
    ///
    /// Every kept point is more than `tolerance` from its successor. The
    /// first point of each run survives.
    pub fn weld(&mut self, tolerance: F) {
        let mut welded: Vec<Point2<F>> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            match welded.last() {
                Some(last) if last.distance(p) <= tolerance => {}
                _ => welded.push(p),
            }
        }
        while welded.len() > 1 && welded[welded.len() - 1].distance(welded[0]) <= tolerance {
            welded.pop();
        }
        self.points = welded;
    }
}

/// Maps each shared (cell, edge) to its mate on the other side.
type EdgeLookup = HashMap<(usize, usize), (usize, usize)>;

fn build_lookup<F: Float>(cells: &[Cell<F>], shared: &[SharedEdge]) -> Result<EdgeLookup> {
    let check = |cell: usize, edge: usize| -> Result<()> {
        let target = cells.get(cell).ok_or(NavTileError::CellOutOfRange {
            cell,
            len: cells.len(),
        })?;
        let len = target.polygon.len();
        if edge >= len {
            return Err(NavTileError::EdgeOutOfRange { cell, edge, len });
        }
        Ok(())
    };

    let mut lookup = HashMap::with_capacity(shared.len() * 2);
    for s in shared {
        check(s.cell_a, s.edge_a)?;
        check(s.cell_b, s.edge_b)?;
        lookup.insert((s.cell_a, s.edge_a), (s.cell_b, s.edge_b));
        lookup.insert((s.cell_b, s.edge_b), (s.cell_a, s.edge_a));
    }
    Ok(lookup)
}

/// Walks one contour from edge 0 of `start`.
///
/// Returns `None` if the walk did not come back within `step_limit` steps.
fn walk<F: Float>(
    cells: &[Cell<F>],
    lookup: &EdgeLookup,
    visited: &mut [bool],
    start: usize,
    step_limit: usize,
) -> Option<Vec<Point2<F>>> {
    let mut points = Vec::new();
    let (mut cell, mut edge) = (start, 0usize);

    for _ in 0..step_limit {
        match lookup.get(&(cell, edge)) {
            Some(&(mate_cell, mate_edge)) => {
                cell = mate_cell;
                edge = mate_edge;
                visited[cell] = true;
            }
            None => {
                let vertex = cells[cell].polygon.vertex(edge)?;
                points.push(vertex.xz());
            }
        }

        edge = (edge + 1) % cells[cell].polygon.len();
        if (cell, edge) == (start, 0) {
            return Some(points);
        }
    }

    None
}

fn walk_all<F: Float>(
    cells: &[Cell<F>],
    shared: &[SharedEdge],
    step_limit: usize,
    strict: bool,
) -> Result<Vec<Contour<F>>> {
    let lookup = build_lookup(cells, shared)?;
    let mut visited = vec![false; cells.len()];
    let mut contours = Vec::new();

    for start in 0..cells.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;

        match walk(cells, &lookup, &mut visited, start, step_limit) {
            Some(points) if !points.is_empty() => contours.push(Contour {
                points,
                kind: cells[start].kind,
            }),
            Some(_) => {}
            None if strict => {
                return Err(NavTileError::ContourStepLimit {
                    cell: start,
                    steps: step_limit,
                })
            }
            None => {
                log::error!(
                    "contour walk from cell {} exceeded {} steps, contour dropped",
                    start,
                    step_limit
                );
            }
        }
    }

    log::debug!("extracted {} contours from {} cells", contours.len(), cells.len());
    Ok(contours)
}

/// Extracts the boundary contours of `cells`.
///
/// Every cell not yet reached by an earlier walk starts a new walk at its
/// edge 0. A walk that exceeds `step_limit` is logged as an error and its
/// contour dropped; the remaining cells are still walked.
///
/// Fails only when `shared` refers to a cell or edge that does not exist.
///
/// # Example
///
/// ```
/// use navtile::polygon::ConvexPolygon;
/// use navtile::tile::{extract_contours, find_shared_edges, Cell, CellKind};
/// use navtile::Point3;
///
/// let square = |x0: f64, x1: f64| {
///     ConvexPolygon::new(vec![
///         Point3::new(x0, 0.0, 0.0),
///         Point3::new(x1, 0.0, 0.0),
///         Point3::new(x1, 0.0, 1.0),
///         Point3::new(x0, 0.0, 1.0),
///     ])
///     .unwrap()
/// };
/// let mut cells = vec![
///     Cell::new(square(0.0, 1.0), CellKind::Obstacle),
///     Cell::new(square(1.0, 2.0), CellKind::Obstacle),
/// ];
/// let shared = find_shared_edges(&mut cells, 1e-4);
/// let contours = extract_contours(&cells, &shared, 100).unwrap();
///
/// // one outline around both squares; the shared face is interior
/// assert_eq!(contours.len(), 1);
/// assert_eq!(contours[0].len(), 6);
/// ```
pub fn extract_contours<F: Float>(
    cells: &[Cell<F>],
    shared: &[SharedEdge],
    step_limit: usize,
) -> Result<Vec<Contour<F>>> {
    walk_all(cells, shared, step_limit, false)
}

/// Like [`extract_contours`] but fails with
/// [`NavTileError::ContourStepLimit`] on the first walk that exceeds
/// `step_limit`.
pub fn extract_contours_strict<F: Float>(
    cells: &[Cell<F>],
    shared: &[SharedEdge],
    step_limit: usize,
) -> Result<Vec<Contour<F>>> {
    walk_all(cells, shared, step_limit, true)
}

/// Checks a contour before it is handed to a triangulator.
///
/// Rejects contours with fewer than three points, consecutive points closer
/// than `min_edge`, and points within `min_edge` of the point two steps
/// ahead (the contour runs out and straight back). `index` only labels the
/// error.
pub fn validate_contour<F: Float>(index: usize, points: &[Point2<F>], min_edge: F) -> Result<()> {
    let defect = |at: usize, reason: ContourDefect| NavTileError::InvalidContour {
        contour: index,
        index: at,
        reason,
    };

    let n = points.len();
    if n < 3 {
        return Err(defect(0, ContourDefect::TooFewPoints));
    }

    for i in 0..n {
        let p = points[i];
        if p.distance(points[(i + 1) % n]) < min_edge {
            return Err(defect(i, ContourDefect::ZeroLengthEdge));
        }
        if p.distance(points[(i + 2) % n]) < min_edge {
            return Err(defect(i, ContourDefect::Spike));
        }
    }
    Ok(())
}
