//! Shared-edge detection between adjacent cells.
//!
//! Two cells of a non-overlapping partition touch along at most one
//! collinear segment. For every pair of cells of the same kind this finds
//! that segment, splits both polygons' edges so the segment is exactly one
//! edge in each, and records the adjacency by index.

use super::Cell;
use crate::polygon::ConvexPolygon;
use num_traits::Float;

/// Edge `edge_a` of cell `cell_a` coincides with edge `edge_b` of cell
/// `cell_b` (same endpoints, opposite direction).
///
/// Indices refer to the cell list the record was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SharedEdge {
    pub cell_a: usize,
    pub edge_a: usize,
    pub cell_b: usize,
    pub edge_b: usize,
}

impl SharedEdge {
    /// The (cell, edge) on the other side when standing on `cell`.
    #[inline]
    pub fn opposite(&self, cell: usize) -> (usize, usize) {
        if cell == self.cell_a {
            (self.cell_b, self.edge_b)
        } else {
            (self.cell_a, self.edge_a)
        }
    }

    /// Bumps edge indices on `cell` that lie after `after`, following a
    /// vertex insertion there.
    fn shift_after(&mut self, cell: usize, after: usize) {
        if self.cell_a == cell && self.edge_a > after {
            self.edge_a += 1;
        }
        if self.cell_b == cell && self.edge_b > after {
            self.edge_b += 1;
        }
    }
}

/// Outcome of matching one pair of polygons.
#[derive(Debug, Default)]
struct PairMatch {
    edge_a: usize,
    edge_b: usize,
    inserted_a: Vec<usize>,
    inserted_b: Vec<usize>,
}

/// Finds and records every shared edge between cells of the same kind.
///
/// Inserts vertices into the cells as needed so each recorded pair of edges
/// has identical endpoints. Records made earlier in the scan are updated
/// whenever a later insertion shifts their edge indices. `tolerance` is the
/// collinearity, overlap and coincidence tolerance.
///
/// # Example
///
/// ```
/// use navtile::polygon::ConvexPolygon;
/// use navtile::tile::{find_shared_edges, Cell, CellKind};
/// use navtile::Point3;
///
/// let left = ConvexPolygon::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 2.0),
///     Point3::new(0.0, 0.0, 2.0),
/// ])
/// .unwrap();
/// let right = ConvexPolygon::new(vec![
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 1.0),
/// ])
/// .unwrap();
///
/// let mut cells = vec![
///     Cell::new(left, CellKind::Obstacle),
///     Cell::new(right, CellKind::Obstacle),
/// ];
/// let shared = find_shared_edges(&mut cells, 1e-4);
/// assert_eq!(shared.len(), 1);
/// // the long edge of `left` was split at (1, 1)
/// assert_eq!(cells[0].polygon.len(), 5);
/// ```
pub fn find_shared_edges<F: Float>(cells: &mut [Cell<F>], tolerance: F) -> Vec<SharedEdge> {
    let mut shared: Vec<SharedEdge> = Vec::new();

    for a in 0..cells.len() {
        for b in (a + 1)..cells.len() {
            if cells[a].kind != cells[b].kind {
                continue;
            }

            let claimed_a = claimed_edges(&shared, a);
            let claimed_b = claimed_edges(&shared, b);

            let (head, tail) = cells.split_at_mut(b);
            let poly_a = &mut head[a].polygon;
            let poly_b = &mut tail[0].polygon;

            let Some(found) = match_pair(poly_a, poly_b, &claimed_a, &claimed_b, tolerance) else {
                continue;
            };

            for &after in &found.inserted_a {
                shared.iter_mut().for_each(|s| s.shift_after(a, after));
            }
            for &after in &found.inserted_b {
                shared.iter_mut().for_each(|s| s.shift_after(b, after));
            }

            let edge = SharedEdge {
                cell_a: a,
                edge_a: found.edge_a,
                cell_b: b,
                edge_b: found.edge_b,
            };
            log::trace!("shared edge {:?}", edge);
            shared.push(edge);
        }
    }

    shared
}

/// Edges of `cell` that already have a mate.
fn claimed_edges(shared: &[SharedEdge], cell: usize) -> Vec<usize> {
    shared
        .iter()
        .flat_map(|s| [(s.cell_a, s.edge_a), (s.cell_b, s.edge_b)])
        .filter(|&(c, _)| c == cell)
        .map(|(_, e)| e)
        .collect()
}

/// Finds the one collinear overlap between `a` and `b` and splits edges so
/// it becomes a single edge in both.
///
/// Edges listed in `claimed_a` / `claimed_b` are skipped. Only B edges
/// running against A qualify; for two counter-clockwise cells on either
/// side of a segment that is always the case.
fn match_pair<F: Float>(
    a: &mut ConvexPolygon<F>,
    b: &mut ConvexPolygon<F>,
    claimed_a: &[usize],
    claimed_b: &[usize],
    tol: F,
) -> Option<PairMatch> {
    for ia in 0..a.len() {
        if claimed_a.contains(&ia) {
            continue;
        }
        let edge_a = a.edge(ia)?;
        let len_a = edge_a.length_xz();
        if len_a <= tol {
            continue;
        }

        for ib in 0..b.len() {
            if claimed_b.contains(&ib) {
                continue;
            }
            let edge_b = b.edge(ib)?;
            let Some((proj0, off0)) = edge_a.project_xz(edge_b.start) else {
                continue;
            };
            let Some((proj1, off1)) = edge_a.project_xz(edge_b.end) else {
                continue;
            };

            if off0 > tol || off1 > tol {
                continue;
            }
            // B must run from A's end towards A's start
            if proj0 <= proj1 {
                continue;
            }
            // entirely before A's start or after A's end
            if proj0 < tol {
                continue;
            }
            if proj1 > len_a - tol {
                continue;
            }

            let (lo, lo_t) = if proj1 <= tol {
                (edge_a.start, F::zero())
            } else {
                (edge_b.end, proj1)
            };
            let (hi, hi_t) = if proj0 >= len_a - tol {
                (edge_a.end, len_a)
            } else {
                (edge_b.start, proj0)
            };
            if hi_t - lo_t <= tol {
                continue;
            }

            let mut found = PairMatch {
                edge_a: ia,
                edge_b: ib,
                ..PairMatch::default()
            };

            if !lo.coincides_xz(edge_a.start, tol) {
                found.edge_a = a.insert_after(ia, lo);
                found.inserted_a.push(ia);
            }
            if !hi.coincides_xz(edge_a.end, tol) {
                a.insert_after(found.edge_a, hi);
                found.inserted_a.push(found.edge_a);
            }

            if !hi.coincides_xz(edge_b.start, tol) {
                found.edge_b = b.insert_after(ib, hi);
                found.inserted_b.push(ib);
            }
            if !lo.coincides_xz(edge_b.end, tol) {
                b.insert_after(found.edge_b, lo);
                found.inserted_b.push(found.edge_b);
            }

            return Some(found);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point3;
    use crate::tile::CellKind;

    fn rect(x0: f64, z0: f64, x1: f64, z1: f64) -> ConvexPolygon<f64> {
        ConvexPolygon::new(vec![
            Point3::new(x0, 0.0, z0),
            Point3::new(x1, 0.0, z0),
            Point3::new(x1, 0.0, z1),
            Point3::new(x0, 0.0, z1),
        ])
        .unwrap()
    }

    fn obstacles(polys: Vec<ConvexPolygon<f64>>) -> Vec<Cell<f64>> {
        polys
            .into_iter()
            .map(|p| Cell::new(p, CellKind::Obstacle))
            .collect()
    }

    fn assert_symmetric(cells: &[Cell<f64>], shared: &[SharedEdge]) {
        for s in shared {
            let ea = cells[s.cell_a].polygon.edge(s.edge_a).unwrap();
            let eb = cells[s.cell_b].polygon.edge(s.edge_b).unwrap();
            assert!(ea.matches_xz(eb, 1e-9), "{s:?}: {ea:?} vs {eb:?}");
            assert!(ea.start.coincides_xz(eb.end, 1e-9), "{s:?} not opposite");
        }
    }

    #[test]
    fn test_exact_neighbours_need_no_insertion() {
        let mut cells = obstacles(vec![rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 0.0, 2.0, 1.0)]);
        let shared = find_shared_edges(&mut cells, 1e-4);

        assert_eq!(shared.len(), 1);
        assert_eq!(cells[0].polygon.len(), 4);
        assert_eq!(cells[1].polygon.len(), 4);
        assert_eq!(
            shared[0],
            SharedEdge {
                cell_a: 0,
                edge_a: 1,
                cell_b: 1,
                edge_b: 3
            }
        );
        assert_symmetric(&cells, &shared);
    }

    #[test]
    fn test_b_inside_a_span() {
        let mut cells = obstacles(vec![rect(0.0, 0.0, 1.0, 3.0), rect(1.0, 1.0, 2.0, 2.0)]);
        let shared = find_shared_edges(&mut cells, 1e-4);

        assert_eq!(shared.len(), 1);
        assert_eq!(cells[0].polygon.len(), 6);
        assert_eq!(cells[1].polygon.len(), 4);
        assert_symmetric(&cells, &shared);
        assert!(cells[0].polygon.is_convex_xz(1e-9));
    }

    #[test]
    fn test_a_inside_b_span() {
        let mut cells = obstacles(vec![rect(1.0, 1.0, 2.0, 2.0), rect(0.0, 0.0, 1.0, 3.0)]);
        let shared = find_shared_edges(&mut cells, 1e-4);

        assert_eq!(shared.len(), 1);
        assert_eq!(cells[0].polygon.len(), 4);
        assert_eq!(cells[1].polygon.len(), 6);
        assert_symmetric(&cells, &shared);
    }

    #[test]
    fn test_partial_overlaps() {
        // Overlap hanging off A's end, then off A's start.
        let mut cells = obstacles(vec![rect(0.0, 0.0, 1.0, 2.0), rect(1.0, 1.0, 2.0, 3.0)]);
        let shared = find_shared_edges(&mut cells, 1e-4);
        assert_eq!(shared.len(), 1);
        assert_eq!(cells[0].polygon.len(), 5);
        assert_eq!(cells[1].polygon.len(), 5);
        assert_symmetric(&cells, &shared);

        let mut cells = obstacles(vec![rect(0.0, 1.0, 1.0, 3.0), rect(1.0, 0.0, 2.0, 2.0)]);
        let shared = find_shared_edges(&mut cells, 1e-4);
        assert_eq!(shared.len(), 1);
        assert_eq!(cells[0].polygon.len(), 5);
        assert_eq!(cells[1].polygon.len(), 5);
        assert_symmetric(&cells, &shared);
    }

    #[test]
    fn test_corner_contact_is_not_shared() {
        let mut cells = obstacles(vec![rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 1.0, 2.0, 2.0)]);
        assert!(find_shared_edges(&mut cells, 1e-4).is_empty());
        assert_eq!(cells[0].polygon.len(), 4);
    }

    #[test]
    fn test_collinear_but_disjoint() {
        let mut cells = obstacles(vec![rect(0.0, 0.0, 1.0, 1.0), rect(2.0, 0.0, 3.0, 1.0)]);
        assert!(find_shared_edges(&mut cells, 1e-4).is_empty());
    }

    #[test]
    fn test_kinds_are_not_matched() {
        let mut cells = vec![
            Cell::new(rect(0.0, 0.0, 1.0, 1.0), CellKind::Walkable),
            Cell::new(rect(1.0, 0.0, 2.0, 1.0), CellKind::Obstacle),
        ];
        assert!(find_shared_edges(&mut cells, 1e-4).is_empty());
    }

    #[test]
    fn test_later_insertion_shifts_earlier_records() {
        // Cell 0 touches cell 1 on its top edge and cell 2 on part of its
        // right edge. Matching 0/2 inserts a vertex before the edge already
        // recorded for 0/1.
        let mut cells = obstacles(vec![
            rect(0.0, 0.0, 2.0, 2.0),
            rect(0.0, 2.0, 2.0, 3.0),
            rect(2.0, 0.0, 3.0, 1.0),
        ]);
        let shared = find_shared_edges(&mut cells, 1e-4);

        assert_eq!(shared.len(), 2);
        assert_eq!(cells[0].polygon.len(), 5);
        assert_symmetric(&cells, &shared);
        assert_eq!(shared[0].edge_a, 3);
    }

    #[test]
    fn test_rerun_is_stable() {
        let mut cells = obstacles(vec![rect(0.0, 0.0, 1.0, 3.0), rect(1.0, 1.0, 2.0, 2.0)]);
        let first = find_shared_edges(&mut cells, 1e-4);
        let snapshot = cells.clone();
        let second = find_shared_edges(&mut cells, 1e-4);
        assert_eq!(first, second);
        assert_eq!(cells, snapshot);
    }

    #[test]
    fn test_same_direction_edge_is_not_shared() {
        // B's left edge runs upward, the same way as A's right edge.
        let b = ConvexPolygon::new(vec![
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ])
        .unwrap();
        let mut cells = obstacles(vec![rect(0.0, 0.0, 1.0, 1.0), b]);
        assert!(find_shared_edges(&mut cells, 1e-4).is_empty());
        assert_eq!(cells[0].polygon.len(), 4);
        assert_eq!(cells[1].polygon.len(), 4);
    }

    #[test]
    fn test_each_edge_is_claimed_once() {
        // C overlaps B by less than twice the tolerance; B's right edge and
        // C's right edge run the same way and must not pair up.
        let mut cells = obstacles(vec![
            rect(0.0, 0.0, 1.0, 2.0),
            rect(1.0, 0.0, 2.0, 1.0),
            rect(1.0, 0.9998, 2.0, 2.0),
        ]);
        let shared = find_shared_edges(&mut cells, 1e-4);

        assert_eq!(
            shared,
            vec![
                SharedEdge {
                    cell_a: 0,
                    edge_a: 1,
                    cell_b: 1,
                    edge_b: 3
                },
                SharedEdge {
                    cell_a: 0,
                    edge_a: 2,
                    cell_b: 2,
                    edge_b: 3
                },
            ]
        );
        assert_symmetric(&cells, &shared);

        let mut keys: Vec<(usize, usize)> = shared
            .iter()
            .flat_map(|s| [(s.cell_a, s.edge_a), (s.cell_b, s.edge_b)])
            .collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }
}
