//! Containment-checked, debug-tracked writes into a scratch block.
//!
//! [`WriteOnceGuard`] wraps a mutable [`FieldBlock`] together with a target
//! region. Writes outside the region are dropped; in debug builds every
//! accepted write is counted so that gaps and repeated writes can be
//! detected. On drop it logs a warning if the region was not covered
//! exactly once. Release builds pay no tracking overhead.

use crate::{FieldBlock, IndexBox, IntVect};

/// Guard enforcing exactly-once coverage of `region` in a block.
pub struct WriteOnceGuard<'a> {
    block: &'a mut FieldBlock,
    region: IndexBox,
    #[cfg(debug_assertions)]
    counts: Vec<u8>,
    #[cfg(debug_assertions)]
    label: String,
}

impl<'a> WriteOnceGuard<'a> {
    /// Guard writes into `block` restricted to `region`.
    ///
    /// `label` names the scratch field in diagnostics.
    ///
    /// # Panics
    ///
    /// If `region` is not inside the block's grown box.
    pub fn new(
        block: &'a mut FieldBlock,
        region: IndexBox,
        #[cfg_attr(not(debug_assertions), allow(unused_variables))] label: &str,
    ) -> Self {
        assert!(
            block.grown_box().contains_box(&region),
            "guard region {region:?} exceeds block {:?}",
            block.grown_box()
        );
        Self {
            #[cfg(debug_assertions)]
            counts: vec![0; region.num_points()],
            #[cfg(debug_assertions)]
            label: label.to_string(),
            block,
            region,
        }
    }

    /// The region writes are restricted to.
    pub fn region(&self) -> IndexBox {
        self.region
    }

    /// Write all components at `p` if `p` lies in the region. Returns
    /// whether the write happened.
    pub fn try_write(&mut self, p: IntVect, values: &[f64]) -> bool {
        if !self.region.contains(p) {
            return false;
        }
        debug_assert_eq!(values.len(), self.block.ncomp());
        for (c, &v) in values.iter().enumerate() {
            self.block.set(p, c, v);
        }
        #[cfg(debug_assertions)]
        {
            let o = self.region.offset(p);
            self.counts[o] = self.counts[o].saturating_add(1);
        }
        true
    }

    /// Points of the region not yet written (always 0 in release builds).
    pub fn unwritten(&self) -> usize {
        #[cfg(debug_assertions)]
        {
            self.counts.iter().filter(|&&n| n == 0).count()
        }
        #[cfg(not(debug_assertions))]
        {
            0
        }
    }

    /// Points of the region written more than once (always 0 in release
    /// builds).
    pub fn overwritten(&self) -> usize {
        #[cfg(debug_assertions)]
        {
            self.counts.iter().filter(|&&n| n > 1).count()
        }
        #[cfg(not(debug_assertions))]
        {
            0
        }
    }

    /// Whether every point of the region was written exactly once.
    pub fn is_exact(&self) -> bool {
        self.unwritten() == 0 && self.overwritten() == 0
    }
}

#[cfg(debug_assertions)]
impl Drop for WriteOnceGuard<'_> {
    fn drop(&mut self) {
        let (gaps, repeats) = (self.unwritten(), self.overwritten());
        if gaps > 0 || repeats > 0 {
            tracing::warn!(
                field = %self.label,
                region = ?self.region,
                gaps,
                repeats,
                "scratch field not written exactly once"
            );
        }
    }
}
