//! Error types for tile assembly.

use thiserror::Error;

/// Errors that can occur while assembling a tile.
///
/// Expected degenerate geometry (coplanar splits, shapes outside the tile)
/// is not an error; these variants cover malformed input and data-integrity
/// failures only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavTileError {
    /// A shape needs at least three vertices.
    #[error("degenerate shape: {points} points, need at least 3")]
    DegenerateShape {
        /// Number of points supplied.
        points: usize,
    },

    /// A cell index does not refer to a cell of the tile.
    #[error("cell index {cell} out of range (tile has {len} cells)")]
    CellOutOfRange {
        /// Offending cell index.
        cell: usize,
        /// Number of cells.
        len: usize,
    },

    /// An edge index does not refer to an edge of the cell.
    #[error("edge {edge} out of range for cell {cell} ({len} edges)")]
    EdgeOutOfRange {
        /// Cell the edge was looked up on.
        cell: usize,
        /// Offending edge index.
        edge: usize,
        /// Number of edges of the cell.
        len: usize,
    },

    /// A contour walk did not return to its start within the step limit.
    #[error("contour walk from cell {cell} exceeded {steps} steps")]
    ContourStepLimit {
        /// Cell the walk started from.
        cell: usize,
        /// Step limit that was hit.
        steps: usize,
    },

    /// A contour failed validation before triangulation.
    #[error("contour {contour} invalid at point {index}: {reason}")]
    InvalidContour {
        /// Contour index.
        contour: usize,
        /// Point index inside the contour.
        index: usize,
        /// What was wrong.
        reason: ContourDefect,
    },

    /// Tile size must be positive and finite.
    #[error("invalid tile size: {0}")]
    InvalidTileSize(f64),

    /// The triangulation backend rejected its input.
    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Defects detected by contour validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourDefect {
    /// Fewer than three points.
    TooFewPoints,
    /// Two consecutive points coincide.
    ZeroLengthEdge,
    /// The contour doubles back onto the point two steps earlier.
    Spike,
}

impl std::fmt::Display for ContourDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContourDefect::TooFewPoints => write!(f, "fewer than 3 points"),
            ContourDefect::ZeroLengthEdge => write!(f, "zero-length edge"),
            ContourDefect::Spike => write!(f, "zero-width spike"),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NavTileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = NavTileError::ContourStepLimit { cell: 3, steps: 100 };
        assert_eq!(
            err.to_string(),
            "contour walk from cell 3 exceeded 100 steps"
        );

        let err = NavTileError::InvalidContour {
            contour: 1,
            index: 4,
            reason: ContourDefect::ZeroLengthEdge,
        };
        assert_eq!(err.to_string(), "contour 1 invalid at point 4: zero-length edge");
    }
}
