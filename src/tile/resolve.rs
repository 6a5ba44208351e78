//! Keeping a tile's cells pairwise non-overlapping.
//!
//! A new shape is kept exact. Every existing cell is cut against the new
//! shape's edge planes; the pieces outside survive and the piece inside is
//! dropped.

use super::{Cell, CellKind};
use crate::polygon::{ClipPlane, ConvexPolygon};
use num_traits::Float;

/// Re-cuts `cells` around `shape` and appends `shape` as a cell of `kind`.
///
/// `shape` must already lie inside the tile. A clockwise `shape` is stored
/// reversed. Fragments keep the kind of the cell they were cut from and
/// stay in the original cell order. Edges of `shape` with no planar length
/// contribute no cut.
pub fn resolve_overlaps<F: Float>(
    cells: &mut Vec<Cell<F>>,
    shape: ConvexPolygon<F>,
    kind: CellKind,
    eps: F,
) {
    let shape = shape.to_counter_clockwise();
    let planes: Vec<ClipPlane<F>> = (0..shape.len())
        .filter_map(|i| shape.edge_plane(i))
        .collect();

    let previous = std::mem::take(cells);
    let mut removed = 0usize;

    for cell in previous {
        let before = cells.len();
        carve(&cell.polygon, &planes, eps, |fragment| {
            cells.push(Cell::new(fragment, cell.kind));
        });
        if cells.len() == before {
            removed += 1;
        }
    }

    if removed > 0 {
        log::trace!("{} cells fully covered by new shape", removed);
    }

    cells.push(Cell::new(shape, kind));
}

/// Splits `polygon` against every plane, emitting the parts in front of any
/// of them. Whatever is behind all planes is discarded.
fn carve<F, E>(polygon: &ConvexPolygon<F>, planes: &[ClipPlane<F>], eps: F, mut emit: E)
where
    F: Float,
    E: FnMut(ConvexPolygon<F>),
{
    let mut remaining = polygon.clone();
    for plane in planes {
        let split = remaining.split(plane, eps);
        if let Some(front) = split.front {
            emit(front);
        }
        match split.back {
            Some(back) => remaining = back,
            None => return,
        }
    }
}
