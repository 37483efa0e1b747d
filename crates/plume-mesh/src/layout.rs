//! Decomposition of a level into disjoint cell-centered boxes.

use crate::{IndexBox, IndexType, IntVect, MeshError};

/// An ordered set of disjoint cell-centered boxes covering (part of) a
/// level. Fields allocated on the same layout have one block per box, in
/// the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxLayout {
    boxes: Vec<IndexBox>,
}

impl BoxLayout {
    /// Build from explicit boxes, checking they are non-empty,
    /// cell-centered and pairwise disjoint.
    pub fn new(boxes: Vec<IndexBox>) -> Result<Self, MeshError> {
        if boxes.is_empty() {
            return Err(MeshError::EmptyLayout);
        }
        for b in &boxes {
            if !b.index_type().cell_centered() {
                return Err(MeshError::NotCellCentered);
            }
            if b.is_empty() {
                return Err(MeshError::EmptyBox {
                    lo: b.lo(),
                    hi: b.hi(),
                });
            }
        }
        for (first, a) in boxes.iter().enumerate() {
            for (second, b) in boxes.iter().enumerate().skip(first + 1) {
                if a.intersect(b).is_some() {
                    return Err(MeshError::OverlappingBoxes { first, second });
                }
            }
        }
        Ok(Self { boxes })
    }

    /// A single box covering `domain`.
    pub fn single(domain: IndexBox) -> Result<Self, MeshError> {
        Self::new(vec![domain])
    }

    /// Chop `domain` into boxes of at most `max_grid_size` cells per axis.
    pub fn chop(domain: IndexBox, max_grid_size: IntVect) -> Result<Self, MeshError> {
        if max_grid_size.iter().any(|&n| n <= 0) {
            return Err(MeshError::InvalidSize {
                what: "max grid size",
                size: max_grid_size,
            });
        }
        Self::new(domain.chop(max_grid_size))
    }

    /// Number of boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the layout has no boxes (never true for a constructed layout).
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The cell-centered boxes.
    pub fn boxes(&self) -> &[IndexBox] {
        &self.boxes
    }

    /// Box `i` converted to staggering `ty`.
    pub fn typed_box(&self, i: usize, ty: IndexType) -> IndexBox {
        self.boxes[i].convert(ty)
    }
}
