//! Same-resolution interpolation between staggerings.
//!
//! Along each axis where source and destination staggering agree the
//! sample is taken in place; where they differ it is the mean of the two
//! bracketing source points. A node reads cells `i-1` and `i`; a cell reads
//! nodes `i` and `i+1`. The result is the tensor-product average of up to
//! eight source points.

use crate::{FieldBlock, IndexType, IntVect};

/// Component `comp` of `src` evaluated at point `p` of staggering `dst`.
///
/// The bracketing source points must lie in the grown box of `src`.
pub fn sample(src: &FieldBlock, comp: usize, dst: IndexType, p: IntVect) -> f64 {
    let from = src.index_type();
    let mut offsets = [[0i32; 2]; 3];
    let mut counts = [1usize; 3];
    for a in 0..3 {
        match (from.is_nodal(a), dst.is_nodal(a)) {
            (true, false) => {
                offsets[a] = [0, 1];
                counts[a] = 2;
            }
            (false, true) => {
                offsets[a] = [-1, 0];
                counts[a] = 2;
            }
            _ => {}
        }
    }
    let mut sum = 0.0;
    for &dk in &offsets[2][..counts[2]] {
        for &dj in &offsets[1][..counts[1]] {
            for &di in &offsets[0][..counts[0]] {
                sum += src.get([p[0] + di, p[1] + dj, p[2] + dk], comp);
            }
        }
    }
    sum / (counts[0] * counts[1] * counts[2]) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, BoxLayout, IndexBox, MultiField};

    /// Block of staggering `ty` holding the linear function `f` at each
    /// point's physical position (unit spacing).
    fn linear_block(ty: IndexType, f: impl Fn([f64; 3]) -> f64) -> FieldBlock {
        let layout = BoxLayout::single(IndexBox::cells([0; 3], [5; 3])).unwrap();
        let mut field = MultiField::new("lin", &layout, ty, 1, 2);
        let block = field.block_mut(0);
        let grown = block.grown_box();
        for p in grown.iter() {
            let x = std::array::from_fn(|a| {
                f64::from(p[a]) + if ty.is_nodal(a) { 0.0 } else { 0.5 }
            });
            block.set(p, 0, f(x));
        }
        block.clone()
    }

    fn lin(x: [f64; 3]) -> f64 {
        1.0 + 2.0 * x[0] - 3.0 * x[1] + 0.5 * x[2]
    }

    #[test]
    fn same_staggering_is_identity() {
        let b = linear_block(IndexType::NODE, lin);
        assert_eq!(sample(&b, 0, IndexType::NODE, [2, 3, 1]), b.get([2, 3, 1], 0));
    }

    #[test]
    fn linear_functions_are_reproduced() {
        let types = [
            IndexType::NODE,
            IndexType::CELL,
            IndexType::cell_along(Axis::X),
            IndexType::cell_along(Axis::Z),
            IndexType::node_along(Axis::Y),
        ];
        for from in types {
            let b = linear_block(from, lin);
            for to in types {
                for p in IndexBox::new([1; 3], [4; 3], to).iter() {
                    let x: [f64; 3] = std::array::from_fn(|a| {
                        f64::from(p[a]) + if to.is_nodal(a) { 0.0 } else { 0.5 }
                    });
                    let got = sample(&b, 0, to, p);
                    assert!(
                        (got - lin(x)).abs() < 1e-12,
                        "{from:?} -> {to:?} at {p:?}: got {got}, expected {}",
                        lin(x)
                    );
                }
            }
        }
    }

    #[test]
    fn node_to_cell_averages_eight_nodes() {
        let layout = BoxLayout::single(IndexBox::cells([0; 3], [1; 3])).unwrap();
        let mut f = MultiField::new("n", &layout, IndexType::NODE, 1, 0);
        f.block_mut(0).set([1, 1, 1], 0, 8.0);
        assert_eq!(sample(f.block(0), 0, IndexType::CELL, [0, 0, 0]), 1.0);
        assert_eq!(sample(f.block(0), 0, IndexType::CELL, [1, 1, 1]), 1.0);
        assert_eq!(sample(f.block(0), 0, IndexType::cell_along(Axis::X), [0, 1, 1]), 4.0);
    }
}
