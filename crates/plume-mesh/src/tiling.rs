//! Tiled iteration over a layout.
//!
//! Tiles split each box into disjoint pieces that can be processed in
//! parallel. A ghost-grown tiling first grows each box and then chops it,
//! so tiles on the box edge extend into the ghost ring and every grown
//! point belongs to exactly one tile.

use crate::{BoxLayout, IndexBox, IndexType, IntVect, MeshError};

/// Maximum tile extent per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSize(pub IntVect);

impl TileSize {
    /// One tile per box.
    pub const UNTILED: TileSize = TileSize([i32::MAX; 3]);

    /// Check every extent is positive.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.0.iter().any(|&n| n <= 0) {
            return Err(MeshError::InvalidSize {
                what: "tile size",
                size: self.0,
            });
        }
        Ok(())
    }
}

impl Default for TileSize {
    /// Long pencils along the first axis.
    fn default() -> Self {
        TileSize([1024, 8, 8])
    }
}

/// A sub-box of one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Block (box index in the layout) the tile belongs to.
    pub block: usize,
    /// Points of the tile, in the requested staggering.
    pub tile_box: IndexBox,
}

impl BoxLayout {
    /// Tiles of every box converted to `ty` and grown by `grow`.
    pub fn tiles(&self, ty: IndexType, grow: i32, size: TileSize) -> Vec<Tile> {
        (0..self.len())
            .flat_map(|block| {
                self.typed_box(block, ty)
                    .grow(grow)
                    .chop(size.0)
                    .into_iter()
                    .map(move |tile_box| Tile { block, tile_box })
            })
            .collect()
    }
}
