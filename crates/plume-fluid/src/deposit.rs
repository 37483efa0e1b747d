//! Charge and current deposition onto the field solver's mesh.
//!
//! Both deposits add into caller-owned accumulators and are gated by an
//! [`OwnerMask`](plume_mesh::OwnerMask) for the destination's staggering, so that a point shared
//! by several blocks (or duplicated across a periodic boundary) receives
//! its contribution exactly once. No halo exchange is performed; summing
//! shared points is the field solver's business.

use plume_core::constants::SPEED_OF_LIGHT;
use plume_mesh::{interp, Axis, IndexType, MultiField, TileSize};
use rayon::prelude::*;

use crate::kinematics::momentum_and_gamma;
use crate::state::LevelState;
use crate::tiles::{accumulate_owned, group_by_block, map_tiles};

/// Projects a species' charge and current onto field-solver accumulators.
#[derive(Clone, Copy, Debug)]
pub struct ChargeCurrentDepositor {
    charge: f64,
    tile_size: TileSize,
}

impl ChargeCurrentDepositor {
    /// Depositor for particles of charge `charge` (C).
    pub fn new(charge: f64, tile_size: TileSize) -> Self {
        Self { charge, tile_size }
    }

    /// Add `q·N` into `rho` at every owned node.
    ///
    /// # Panics
    ///
    /// If `rho` is not node-centred or does not share the fluid's layout.
    pub fn deposit_charge(&self, state: &LevelState, rho: &mut MultiField) {
        assert!(
            rho.index_type().node_centered(),
            "charge density '{}' must be node-centered, got {:?}",
            rho.name(),
            rho.index_type()
        );
        assert!(
            rho.same_layout(state.density()),
            "charge density '{}' is not on the fluid's box layout",
            rho.name()
        );
        let _span = tracing::debug_span!("deposit_charge").entered();
        let mask = state.owner_mask(rho.index_type());
        let tiles = state.layout().tiles(IndexType::NODE, 0, self.tile_size);
        let q = self.charge;
        let outputs = map_tiles(&tiles, |tile| {
            let n = state.density().block(tile.block);
            tile.tile_box.iter().map(|p| q * n.get(p, 0)).collect()
        });
        accumulate_owned(rho, 0, mask, &tiles, outputs);
    }

    /// Add the current density `q·N·v` into `j`, interpolated from the
    /// fluid nodes onto each component's own staggering.
    ///
    /// # Panics
    ///
    /// If a component of `j` does not share the fluid's layout.
    pub fn deposit_current(&self, state: &LevelState, j: &mut [MultiField; 3]) {
        for f in j.iter() {
            assert!(
                f.same_layout(state.density()),
                "current density '{}' is not on the fluid's box layout",
                f.name()
            );
        }
        let _span = tracing::debug_span!("deposit_current").entered();
        let nodal = self.nodal_current(state);

        for axis in Axis::ALL {
            let dst = &mut j[axis.index()];
            let ty = dst.index_type();
            let mask = state.owner_mask(ty);
            let tiles = dst.layout().tiles(ty, 0, self.tile_size);
            let outputs = map_tiles(&tiles, |tile| {
                let src = nodal.block(tile.block);
                tile.tile_box
                    .iter()
                    .map(|p| interp::sample(src, axis.index(), ty, p))
                    .collect()
            });
            accumulate_owned(dst, 0, mask, &tiles, outputs);
        }
    }

    /// `q·NU/γ` on the valid nodes of every block (vacuum carries none).
    fn nodal_current(&self, state: &LevelState) -> MultiField {
        let q = self.charge;
        let tiles = state.layout().tiles(IndexType::NODE, 0, self.tile_size);
        let outputs = map_tiles(&tiles, |tile| {
            let view = state.block_view(tile.block);
            tile.tile_box
                .iter()
                .map(|p| {
                    let qn = view.conserved(p);
                    let (u, gamma) = momentum_and_gamma(&qn, SPEED_OF_LIGHT);
                    u.map(|ua| q * qn[0] * ua / gamma)
                })
                .collect()
        });

        let mut nodal = MultiField::new("j_node", state.layout(), IndexType::NODE, 3, 0);
        let grouped = group_by_block(&tiles, outputs, nodal.num_blocks());
        nodal
            .blocks_mut()
            .par_iter_mut()
            .zip(grouped)
            .for_each(|(block, entries)| {
                for (bx, values) in entries {
                    for (p, jn) in bx.iter().zip(values) {
                        for (c, v) in jn.into_iter().enumerate() {
                            block.set(p, c, v);
                        }
                    }
                }
            });
        nodal
    }
}
