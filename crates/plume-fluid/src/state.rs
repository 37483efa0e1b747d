//! Per-level field storage of a fluid species.
//!
//! [`GridStateStore`] owns, for every refinement level that has been
//! allocated, a [`LevelState`]: the density `N` and the three momentum
//! density components `NU` on the nodes of the level's box layout, with
//! [`GHOST_WIDTH`] ghost nodes.

use std::sync::OnceLock;

use plume_core::constants::SPEED_OF_LIGHT;
use plume_core::{FluidError, FluidInjector, Level};
use plume_mesh::{
    Axis, BoxLayout, CommPrecision, FieldBlock, Geometry, IndexType, IntVect, MultiField,
    OwnerMask, Tile, TileSize,
};
use rayon::prelude::*;

use crate::kinematics::Conserved;
use crate::tiles::{group_by_block, map_tiles};

/// Ghost nodes around every block: one for the reconstruction ring plus
/// one for its slope stencil.
pub const GHOST_WIDTH: i32 = 2;

/// Density and momentum density of one species on one level.
///
/// Owner masks for deposition are built on first use per staggering and
/// live as long as the layout does.
#[derive(Clone, Debug)]
pub struct LevelState {
    geom: Geometry,
    density: MultiField,
    momentum: [MultiField; 3],
    masks: [OnceLock<OwnerMask>; 8],
}

impl LevelState {
    /// Zero-filled nodal fields on `layout`.
    pub fn new(layout: &BoxLayout, geom: Geometry) -> Self {
        let nodal = |name: &str| MultiField::new(name, layout, IndexType::NODE, 1, GHOST_WIDTH);
        Self {
            geom,
            density: nodal("N"),
            momentum: [nodal("NUx"), nodal("NUy"), nodal("NUz")],
            masks: std::array::from_fn(|_| OnceLock::new()),
        }
    }

    /// Geometry of the level.
    pub fn geometry(&self) -> &Geometry {
        &self.geom
    }

    /// Box layout shared by all four fields.
    pub fn layout(&self) -> &BoxLayout {
        self.density.layout()
    }

    /// Ownership of points of staggering `ty` on this level's layout.
    pub fn owner_mask(&self, ty: IndexType) -> &OwnerMask {
        let slot = ty
            .nodal_flags()
            .iter()
            .enumerate()
            .fold(0, |acc, (a, &n)| acc | (usize::from(n) << a));
        self.masks[slot].get_or_init(|| OwnerMask::new(self.layout(), ty, &self.geom))
    }

    /// Number density `N`.
    pub fn density(&self) -> &MultiField {
        &self.density
    }

    /// Number density, mutably.
    pub fn density_mut(&mut self) -> &mut MultiField {
        &mut self.density
    }

    /// Momentum density component `NU_axis`.
    pub fn momentum(&self, axis: Axis) -> &MultiField {
        &self.momentum[axis.index()]
    }

    /// Momentum density component, mutably.
    pub fn momentum_mut(&mut self, axis: Axis) -> &mut MultiField {
        &mut self.momentum[axis.index()]
    }

    /// Conserved state at node `p` of block `block` (ghosts included).
    pub fn conserved(&self, block: usize, p: IntVect) -> Conserved {
        self.block_view(block).conserved(p)
    }

    /// Overwrite the conserved state at node `p` of block `block`.
    pub fn set_conserved(&mut self, block: usize, p: IntVect, q: Conserved) {
        self.density.block_mut(block).set(p, 0, q[0]);
        for (a, m) in self.momentum.iter_mut().enumerate() {
            m.block_mut(block).set(p, 0, q[a + 1]);
        }
    }

    /// Number of valid nodes summed over blocks (shared nodes counted once
    /// per block).
    pub fn num_valid_nodes(&self) -> usize {
        self.density
            .blocks()
            .iter()
            .map(|b| b.valid_box().num_points())
            .sum()
    }

    /// Halo exchange of `N` and all `NU`.
    pub fn fill_boundary(&mut self, precision: CommPrecision) {
        self.density.fill_boundary(&self.geom, precision);
        self.fill_momentum_boundary(precision);
    }

    /// Halo exchange of the momentum density only.
    pub fn fill_momentum_boundary(&mut self, precision: CommPrecision) {
        for m in &mut self.momentum {
            m.fill_boundary(&self.geom, precision);
        }
    }

    /// First non-finite valid value as `(field name, node)`.
    pub fn first_non_finite(&self) -> Option<(&'static str, IntVect)> {
        const NAMES: [&str; 4] = ["N", "NUx", "NUy", "NUz"];
        std::iter::once(&self.density)
            .chain(self.momentum.iter())
            .zip(NAMES)
            .find_map(|(f, name)| f.first_non_finite(0).map(|(_, p)| (name, p)))
    }

    pub(crate) fn block_view(&self, block: usize) -> StateBlock<'_> {
        StateBlock {
            density: self.density.block(block),
            momentum: [
                self.momentum[0].block(block),
                self.momentum[1].block(block),
                self.momentum[2].block(block),
            ],
        }
    }

    fn block_views_mut(&mut self) -> Vec<StateBlockMut<'_>> {
        let [mx, my, mz] = &mut self.momentum;
        self.density
            .blocks_mut()
            .iter_mut()
            .zip(mx.blocks_mut().iter_mut())
            .zip(my.blocks_mut().iter_mut())
            .zip(mz.blocks_mut().iter_mut())
            .map(|(((n, x), y), z)| StateBlockMut {
                density: n,
                momentum: [x, y, z],
            })
            .collect()
    }

    /// Write per-node tile results into the valid region, one task per
    /// block.
    pub(crate) fn scatter_conserved(&mut self, tiles: &[Tile], outputs: Vec<Vec<Conserved>>) {
        let grouped = group_by_block(tiles, outputs, self.layout().len());
        self.block_views_mut()
            .into_par_iter()
            .zip(grouped)
            .for_each(|(mut view, entries)| {
                for (bx, values) in entries {
                    for (p, q) in bx.iter().zip(values) {
                        view.set(p, &q);
                    }
                }
            });
    }

    /// Write per-node momentum density results, one task per block.
    pub(crate) fn scatter_momentum(&mut self, tiles: &[Tile], outputs: Vec<Vec<[f64; 3]>>) {
        let grouped = group_by_block(tiles, outputs, self.layout().len());
        self.block_views_mut()
            .into_par_iter()
            .zip(grouped)
            .for_each(|(view, entries)| {
                let [x, y, z] = view.momentum;
                for (bx, values) in entries {
                    for (p, nu) in bx.iter().zip(values) {
                        x.set(p, 0, nu[0]);
                        y.set(p, 0, nu[1]);
                        z.set(p, 0, nu[2]);
                    }
                }
            });
    }
}

/// Read-only view of one block of a [`LevelState`].
#[derive(Clone, Copy)]
pub(crate) struct StateBlock<'a> {
    pub(crate) density: &'a FieldBlock,
    pub(crate) momentum: [&'a FieldBlock; 3],
}

impl StateBlock<'_> {
    #[inline]
    pub(crate) fn conserved(&self, p: IntVect) -> Conserved {
        [
            self.density.get(p, 0),
            self.momentum[0].get(p, 0),
            self.momentum[1].get(p, 0),
            self.momentum[2].get(p, 0),
        ]
    }
}

struct StateBlockMut<'a> {
    density: &'a mut FieldBlock,
    momentum: [&'a mut FieldBlock; 3],
}

impl StateBlockMut<'_> {
    fn set(&mut self, p: IntVect, q: &Conserved) {
        self.density.set(p, 0, q[0]);
        for (m, &v) in self.momentum.iter_mut().zip(&q[1..]) {
            m.set(p, 0, v);
        }
    }
}

/// Field storage of one species across refinement levels.
#[derive(Debug)]
pub struct GridStateStore {
    species: String,
    levels: Vec<Option<LevelState>>,
}

impl GridStateStore {
    /// Empty store for up to `max_levels` levels.
    pub fn new(species: impl Into<String>, max_levels: usize) -> Self {
        Self {
            species: species.into(),
            levels: (0..max_levels).map(|_| None).collect(),
        }
    }

    /// Maximum number of levels.
    pub fn max_levels(&self) -> usize {
        self.levels.len()
    }

    /// Allocate zero-filled fields for `level`, replacing any existing ones.
    pub fn allocate(
        &mut self,
        level: Level,
        layout: &BoxLayout,
        geom: Geometry,
    ) -> Result<(), FluidError> {
        let slot = self
            .levels
            .get_mut(level.index())
            .ok_or_else(|| FluidError::LevelNotAllocated {
                species: self.species.clone(),
                level,
            })?;
        *slot = Some(LevelState::new(layout, geom));
        tracing::debug!(species = %self.species, %level, boxes = layout.len(), "allocated fluid level");
        Ok(())
    }

    /// Drop the fields of `level`.
    pub fn release(&mut self, level: Level) {
        if let Some(slot) = self.levels.get_mut(level.index()) {
            *slot = None;
        }
    }

    /// Fields of `level`.
    pub fn level(&self, level: Level) -> Result<&LevelState, FluidError> {
        self.levels
            .get(level.index())
            .and_then(Option::as_ref)
            .ok_or_else(|| self.not_allocated(level))
    }

    /// Fields of `level`, mutably.
    pub fn level_mut(&mut self, level: Level) -> Result<&mut LevelState, FluidError> {
        match self.levels.get_mut(level.index()).and_then(Option::as_mut) {
            Some(state) => Ok(state),
            None => Err(FluidError::LevelNotAllocated {
                species: self.species.clone(),
                level,
            }),
        }
    }

    fn not_allocated(&self, level: Level) -> FluidError {
        FluidError::LevelNotAllocated {
            species: self.species.clone(),
            level,
        }
    }

    /// Sample the injector at every valid node of `level`:
    /// `N = n(x)`, `NU = n(x)·u(x)·c`, then refresh ghosts.
    pub fn initialize(
        &mut self,
        level: Level,
        injector: &FluidInjector,
        tile_size: TileSize,
        precision: CommPrecision,
    ) -> Result<(), FluidError> {
        let species = self.species.clone();
        let state = self.level_mut(level)?;
        let _span = tracing::debug_span!("fluid_init", species = %species, %level).entered();

        let tiles = state.layout().tiles(IndexType::NODE, 0, tile_size);
        let geom = state.geometry().clone();
        let outputs = map_tiles(&tiles, |tile| {
            tile.tile_box
                .iter()
                .map(|p| {
                    let [x, y, z] = geom.node_position(p);
                    let n = injector.density().density(x, y, z);
                    let u = injector.momentum().bulk_momentum(x, y, z);
                    [
                        n,
                        n * u[0] * SPEED_OF_LIGHT,
                        n * u[1] * SPEED_OF_LIGHT,
                        n * u[2] * SPEED_OF_LIGHT,
                    ]
                })
                .collect()
        });
        state.scatter_conserved(&tiles, outputs);
        state.fill_boundary(precision);
        tracing::debug!(tiles = tiles.len(), "fluid level initialised");
        Ok(())
    }
}
