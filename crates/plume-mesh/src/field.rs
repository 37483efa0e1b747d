//! Ghosted multi-block field storage.

use crate::{BoxLayout, IndexBox, IndexType, IntVect};

/// One box's worth of a field: the valid region plus a ghost layer,
/// `ncomp` components stored component-major, first axis fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldBlock {
    valid: IndexBox,
    grown: IndexBox,
    ncomp: usize,
    data: Vec<f64>,
}

impl FieldBlock {
    /// A zero-filled block over `valid` with `ghost` extra points per side.
    pub fn new(valid: IndexBox, ncomp: usize, ghost: i32) -> Self {
        let grown = valid.grow(ghost);
        Self {
            valid,
            grown,
            ncomp,
            data: vec![0.0; grown.num_points() * ncomp],
        }
    }

    /// Region this block is authoritative for.
    pub fn valid_box(&self) -> IndexBox {
        self.valid
    }

    /// Valid region plus ghosts: every addressable point.
    pub fn grown_box(&self) -> IndexBox {
        self.grown
    }

    /// Staggering of the block.
    pub fn index_type(&self) -> IndexType {
        self.valid.index_type()
    }

    /// Number of components.
    pub fn ncomp(&self) -> usize {
        self.ncomp
    }

    pub(crate) fn offset(&self, p: IntVect, comp: usize) -> usize {
        assert!(comp < self.ncomp, "component {comp} of {}", self.ncomp);
        comp * self.grown.num_points() + self.grown.offset(p)
    }

    /// Value of component `comp` at `p`.
    ///
    /// # Panics
    ///
    /// If `p` lies outside the grown box.
    #[inline]
    pub fn get(&self, p: IntVect, comp: usize) -> f64 {
        self.data[self.offset(p, comp)]
    }

    /// Overwrite component `comp` at `p`.
    ///
    /// # Panics
    ///
    /// If `p` lies outside the grown box.
    #[inline]
    pub fn set(&mut self, p: IntVect, comp: usize, value: f64) {
        let o = self.offset(p, comp);
        self.data[o] = value;
    }

    /// Accumulate into component `comp` at `p`.
    ///
    /// # Panics
    ///
    /// If `p` lies outside the grown box.
    #[inline]
    pub fn add(&mut self, p: IntVect, comp: usize, value: f64) {
        let o = self.offset(p, comp);
        self.data[o] += value;
    }

    /// Set every point, ghosts included, to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Raw storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// A named field over a [`BoxLayout`]: one [`FieldBlock`] per box, all with
/// the same staggering, component count and ghost width.
#[derive(Clone, Debug)]
pub struct MultiField {
    name: String,
    layout: BoxLayout,
    ty: IndexType,
    ncomp: usize,
    ghost: i32,
    blocks: Vec<FieldBlock>,
}

impl MultiField {
    /// Allocate a zero-filled field.
    pub fn new(
        name: impl Into<String>,
        layout: &BoxLayout,
        ty: IndexType,
        ncomp: usize,
        ghost: i32,
    ) -> Self {
        let blocks = (0..layout.len())
            .map(|i| FieldBlock::new(layout.typed_box(i, ty), ncomp, ghost))
            .collect();
        Self {
            name: name.into(),
            layout: layout.clone(),
            ty,
            ncomp,
            ghost,
            blocks,
        }
    }

    /// Field name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The layout the field is allocated on.
    pub fn layout(&self) -> &BoxLayout {
        &self.layout
    }

    /// Staggering.
    pub fn index_type(&self) -> IndexType {
        self.ty
    }

    /// Number of components.
    pub fn ncomp(&self) -> usize {
        self.ncomp
    }

    /// Ghost width.
    pub fn ghost(&self) -> i32 {
        self.ghost
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// All blocks, in layout order.
    pub fn blocks(&self) -> &[FieldBlock] {
        &self.blocks
    }

    /// All blocks, mutably.
    pub fn blocks_mut(&mut self) -> &mut [FieldBlock] {
        &mut self.blocks
    }

    /// Block `i`.
    pub fn block(&self, i: usize) -> &FieldBlock {
        &self.blocks[i]
    }

    /// Block `i`, mutably.
    pub fn block_mut(&mut self, i: usize) -> &mut FieldBlock {
        &mut self.blocks[i]
    }

    /// Set every point of every block to `value`.
    pub fn fill(&mut self, value: f64) {
        for b in &mut self.blocks {
            b.fill(value);
        }
    }

    /// Whether `other` lives on the same boxes (staggering may differ).
    pub fn same_layout(&self, other: &MultiField) -> bool {
        self.layout == other.layout
    }

    /// First valid point holding a non-finite value, as `(block, point)`.
    pub fn first_non_finite(&self, comp: usize) -> Option<(usize, IntVect)> {
        self.blocks.iter().enumerate().find_map(|(bi, b)| {
            b.valid
                .iter()
                .find(|&p| !b.get(p, comp).is_finite())
                .map(|p| (bi, p))
        })
    }
}
