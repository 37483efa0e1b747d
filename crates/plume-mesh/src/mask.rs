//! Ownership masks for accumulating into shared points.
//!
//! Nodal (and partially nodal) points on a box boundary belong to the valid
//! region of every box that touches them, and on a periodic axis the upper
//! domain node duplicates the lower one. Accumulation gated by an
//! [`OwnerMask`] adds each physical point exactly once: a valid point is
//! owned iff it is the canonical periodic representative and no
//! lower-numbered box also holds it as valid.

use rayon::prelude::*;

use crate::{BoxLayout, Geometry, IndexBox, IndexType, IntVect, MultiField};

#[derive(Clone, Debug)]
struct MaskBlock {
    valid: IndexBox,
    owned: Vec<bool>,
}

/// Per-block, per-valid-point ownership flags for one staggering.
#[derive(Clone, Debug)]
pub struct OwnerMask {
    ty: IndexType,
    blocks: Vec<MaskBlock>,
}

impl OwnerMask {
    /// Compute ownership for fields of staggering `ty` on `layout`.
    pub fn new(layout: &BoxLayout, ty: IndexType, geom: &Geometry) -> Self {
        let valid: Vec<IndexBox> = (0..layout.len()).map(|i| layout.typed_box(i, ty)).collect();
        let blocks = (0..valid.len())
            .into_par_iter()
            .map(|b| {
                let owned = valid[b]
                    .iter()
                    .map(|p| {
                        geom.is_canonical(p, ty) && !valid[..b].iter().any(|v| v.contains(p))
                    })
                    .collect();
                MaskBlock {
                    valid: valid[b],
                    owned,
                }
            })
            .collect();
        Self { ty, blocks }
    }

    /// Mask matching the layout and staggering of `field`.
    pub fn for_field(field: &MultiField, geom: &Geometry) -> Self {
        Self::new(field.layout(), field.index_type(), geom)
    }

    /// Staggering the mask was built for.
    pub fn index_type(&self) -> IndexType {
        self.ty
    }

    /// Whether block `block` owns point `p`. Points outside the block's
    /// valid region are never owned.
    #[inline]
    pub fn is_owned(&self, block: usize, p: IntVect) -> bool {
        let m = &self.blocks[block];
        m.valid.contains(p) && m.owned[m.valid.offset(p)]
    }

    /// Total number of owned points across all blocks.
    pub fn owned_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|m| m.owned.iter().filter(|&&o| o).count())
            .sum()
    }

    /// Sum of component `comp` of `field` over owned points.
    ///
    /// # Panics
    ///
    /// If `field` has a different staggering or number of blocks.
    pub fn sum(&self, field: &MultiField, comp: usize) -> f64 {
        assert_eq!(field.index_type(), self.ty, "mask/field staggering mismatch");
        assert_eq!(field.num_blocks(), self.blocks.len(), "mask/field layout mismatch");
        field
            .blocks()
            .iter()
            .zip(&self.blocks)
            .map(|(b, m)| {
                m.valid
                    .iter()
                    .zip(&m.owned)
                    .filter(|&(_, &o)| o)
                    .map(|(p, _)| b.get(p, comp))
                    .sum::<f64>()
            })
            .sum()
    }
}
