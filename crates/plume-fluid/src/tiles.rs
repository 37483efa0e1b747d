//! Tile-parallel map followed by a per-block scatter.
//!
//! Kernels run on tiles in parallel and only read shared state; each
//! returns one value per tile point in box order. Results are then regrouped
//! by block so each block can be written by a single task.

use plume_mesh::{IndexBox, MultiField, OwnerMask, Tile};
use rayon::prelude::*;

/// Run `kernel` on every tile in parallel.
pub(crate) fn map_tiles<T, F>(tiles: &[Tile], kernel: F) -> Vec<Vec<T>>
where
    T: Send,
    F: Fn(&Tile) -> Vec<T> + Sync + Send,
{
    tiles.par_iter().map(kernel).collect()
}

/// Pair each tile's box with its output, grouped by block index.
pub(crate) fn group_by_block<T>(
    tiles: &[Tile],
    outputs: Vec<Vec<T>>,
    num_blocks: usize,
) -> Vec<Vec<(IndexBox, Vec<T>)>> {
    let mut grouped: Vec<Vec<(IndexBox, Vec<T>)>> = (0..num_blocks).map(|_| Vec::new()).collect();
    for (tile, out) in tiles.iter().zip(outputs) {
        debug_assert_eq!(tile.tile_box.num_points(), out.len());
        grouped[tile.block].push((tile.tile_box, out));
    }
    grouped
}

/// Add per-point tile results into component `comp` of `field` wherever
/// `mask` marks the point as owned.
pub(crate) fn accumulate_owned(
    field: &mut MultiField,
    comp: usize,
    mask: &OwnerMask,
    tiles: &[Tile],
    outputs: Vec<Vec<f64>>,
) {
    let grouped = group_by_block(tiles, outputs, field.num_blocks());
    field
        .blocks_mut()
        .par_iter_mut()
        .zip(grouped)
        .enumerate()
        .for_each(|(b, (block, entries))| {
            for (bx, values) in entries {
                for (p, v) in bx.iter().zip(values) {
                    if mask.is_owned(b, p) {
                        block.add(p, comp, v);
                    }
                }
            }
        });
}
