//! Halo (ghost-point) exchange.
//!
//! Ghost points of every block are overwritten from the valid region of
//! whichever block (or periodic image of a block) covers them. Valid
//! points are never touched, so nodes shared by neighbouring blocks keep
//! their own values. Ghosts outside the domain on non-periodic axes are
//! left as they are.

use rayon::prelude::*;

use crate::index::sub;
use crate::{Geometry, IntVect, MultiField};

/// Arithmetic precision of exchanged values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommPrecision {
    /// Exchange full `f64` values.
    #[default]
    Double,
    /// Round exchanged values through `f32`.
    Single,
}

impl CommPrecision {
    #[inline]
    fn apply(self, v: f64) -> f64 {
        match self {
            CommPrecision::Double => v,
            CommPrecision::Single => f64::from(v as f32),
        }
    }
}

impl MultiField {
    /// Refresh all ghost points from valid data, honouring the periodicity
    /// of `geom`.
    pub fn fill_boundary(&mut self, geom: &Geometry, precision: CommPrecision) {
        let _span = tracing::trace_span!("fill_boundary", field = self.name()).entered();
        let shifts = geom.periodic_shifts();
        let plans: Vec<Vec<(usize, f64)>> = (0..self.num_blocks())
            .into_par_iter()
            .map(|dst| self.ghost_plan(dst, &shifts, precision))
            .collect();
        self.blocks_mut()
            .par_iter_mut()
            .zip(plans)
            .for_each(|(block, plan)| {
                let data = block.as_mut_slice();
                for (offset, value) in plan {
                    data[offset] = value;
                }
            });
    }

    /// Offsets and values for every ghost point of block `dst` covered by
    /// some other block's valid region.
    fn ghost_plan(
        &self,
        dst: usize,
        shifts: &[IntVect],
        precision: CommPrecision,
    ) -> Vec<(usize, f64)> {
        let target = self.block(dst);
        let valid = target.valid_box();
        let mut plan = Vec::new();
        for (src_index, src) in self.blocks().iter().enumerate() {
            for &shift in shifts {
                if src_index == dst && shift == [0, 0, 0] {
                    continue;
                }
                let image = src.valid_box().shift(shift);
                let Some(overlap) = target.grown_box().intersect(&image) else {
                    continue;
                };
                for p in overlap.iter() {
                    if valid.contains(p) {
                        continue;
                    }
                    let q = sub(p, shift);
                    for c in 0..self.ncomp() {
                        plan.push((target.offset(p, c), precision.apply(src.get(q, c))));
                    }
                }
            }
        }
        plan
    }
}
