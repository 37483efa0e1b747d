//! Error types for mesh construction.

use plume_core::FluidError;
use std::fmt;

use crate::IntVect;

/// Errors arising from geometry, layout or tiling construction.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A box has `hi < lo` along some axis.
    EmptyBox {
        /// Lower corner.
        lo: IntVect,
        /// Upper corner.
        hi: IntVect,
    },
    /// Physical extent is non-finite or not strictly increasing.
    InvalidExtent {
        /// Axis index.
        axis: usize,
        /// Lower physical bound.
        lo: f64,
        /// Upper physical bound.
        hi: f64,
    },
    /// Layout boxes must be cell-centered.
    NotCellCentered,
    /// Two layout boxes share cells.
    OverlappingBoxes {
        /// Index of the first box.
        first: usize,
        /// Index of the second box.
        second: usize,
    },
    /// A layout has no boxes.
    EmptyLayout,
    /// Tile or grid sizes must be positive on every axis.
    InvalidSize {
        /// What the size was for.
        what: &'static str,
        /// The offending size.
        size: IntVect,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBox { lo, hi } => write!(f, "empty box: lo {lo:?}, hi {hi:?}"),
            Self::InvalidExtent { axis, lo, hi } => {
                write!(f, "invalid extent on axis {axis}: [{lo}, {hi}]")
            }
            Self::NotCellCentered => write!(f, "layout boxes must be cell-centered"),
            Self::OverlappingBoxes { first, second } => {
                write!(f, "layout boxes {first} and {second} overlap")
            }
            Self::EmptyLayout => write!(f, "layout must have at least one box"),
            Self::InvalidSize { what, size } => {
                write!(f, "{what} must be positive on every axis, got {size:?}")
            }
        }
    }
}

impl std::error::Error for MeshError {}

impl From<MeshError> for FluidError {
    fn from(e: MeshError) -> Self {
        FluidError::Mesh {
            reason: e.to_string(),
        }
    }
}
