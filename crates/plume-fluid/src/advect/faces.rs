//! Predictor step and face-centred scratch storage.
//!
//! Face `f` along axis `a` sits between nodes `f` and `f + e_a`, so face
//! boxes are the nodal box converted to cell-centred along `a`. Each node
//! contributes the left ("minus") state of its own face and the right
//! ("plus") state of the face behind it.

use plume_mesh::{Axis, FieldBlock, IndexBox, IndexType, IntVect, WriteOnceGuard};

use super::jacobian::{apply, flux_jacobian};
use super::SlopeLimiter;
use crate::kinematics::{momentum_and_gamma, Conserved};
use crate::state::StateBlock;

/// Per-node result of the predictor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Reconstruction {
    pub(crate) velocity: [f64; 3],
    pub(crate) predicted: Conserved,
    pub(crate) slopes: [Conserved; 3],
}

impl Reconstruction {
    /// Left state of the face ahead of the node along `axis`.
    #[inline]
    pub(crate) fn minus_state(&self, axis: Axis) -> Conserved {
        let s = &self.slopes[axis.index()];
        std::array::from_fn(|i| self.predicted[i] + 0.5 * s[i])
    }

    /// Right state of the face behind the node along `axis`.
    #[inline]
    pub(crate) fn plus_state(&self, axis: Axis) -> Conserved {
        let s = &self.slopes[axis.index()];
        std::array::from_fn(|i| self.predicted[i] - 0.5 * s[i])
    }
}

/// Limited slopes and the half-step prediction
/// `Q̃ = Q - Σ_a (dt/2dx_a) A_a dQ_a` at node `p`.
///
/// Reads `p ± e_a` for every axis.
pub(crate) fn reconstruct(
    view: &StateBlock<'_>,
    p: IntVect,
    half_courant: [f64; 3],
    limiter: SlopeLimiter,
    c: f64,
) -> Reconstruction {
    let q = view.conserved(p);
    let (u, gamma) = momentum_and_gamma(&q, c);
    let velocity = u.map(|x| x / gamma);

    let mut slopes = [[0.0; 4]; 3];
    let mut predicted = q;
    for axis in Axis::ALL {
        let back = view.conserved(axis.step(p, -1));
        let fwd = view.conserved(axis.step(p, 1));
        let slope: Conserved =
            std::array::from_fn(|i| limiter.ave(q[i] - back[i], fwd[i] - q[i]));
        let change = apply(&flux_jacobian(axis, u, gamma, c), &slope);
        let h = half_courant[axis.index()];
        for i in 0..4 {
            predicted[i] -= h * change[i];
        }
        slopes[axis.index()] = slope;
    }
    Reconstruction {
        velocity,
        predicted,
        slopes,
    }
}

/// Left and right face states along one axis.
#[derive(Clone, Debug)]
pub(crate) struct FaceStates {
    pub(crate) minus: FieldBlock,
    pub(crate) plus: FieldBlock,
}

/// Pass-one output for one block: node velocities on the valid box grown
/// by one, and face states on every face that box touches.
#[derive(Clone, Debug)]
pub(crate) struct BlockScratch {
    pub(crate) velocity: FieldBlock,
    pub(crate) faces: [FaceStates; 3],
}

impl BlockScratch {
    /// Fill scratch for the block whose valid nodes are `valid` from the
    /// reconstructions of every node of `valid.grow(1)`.
    pub(crate) fn assemble(valid: IndexBox, entries: &[(IndexBox, Vec<Reconstruction>)]) -> Self {
        let face = |axis: Axis| FieldBlock::new(valid.convert(IndexType::cell_along(axis)), 4, 1);
        let mut scratch = Self {
            velocity: FieldBlock::new(valid, 3, 1),
            faces: Axis::ALL.map(|a| FaceStates {
                minus: face(a),
                plus: face(a),
            }),
        };

        let region = scratch.velocity.grown_box();
        let mut velocity = WriteOnceGuard::new(&mut scratch.velocity, region, "velocity");
        for (bx, recs) in entries {
            for (p, r) in bx.iter().zip(recs) {
                velocity.try_write(p, &r.velocity);
            }
        }
        debug_assert!(velocity.is_exact(), "velocity scratch not covered exactly once");
        drop(velocity);

        for axis in Axis::ALL {
            let FaceStates { minus, plus } = &mut scratch.faces[axis.index()];
            let region = minus.grown_box();
            let mut minus = WriteOnceGuard::new(minus, region, &format!("minus face {axis}"));
            let mut plus = WriteOnceGuard::new(plus, region, &format!("plus face {axis}"));
            for (bx, recs) in entries {
                for (p, r) in bx.iter().zip(recs) {
                    minus.try_write(p, &r.minus_state(axis));
                    plus.try_write(axis.step(p, -1), &r.plus_state(axis));
                }
            }
            debug_assert!(
                minus.is_exact() && plus.is_exact(),
                "face states along {axis} not covered exactly once"
            );
        }
        scratch
    }

    #[inline]
    pub(crate) fn velocity(&self, p: IntVect, axis: Axis) -> f64 {
        self.velocity.get(p, axis.index())
    }

    #[inline]
    pub(crate) fn face(&self, axis: Axis, f: IntVect) -> (Conserved, Conserved) {
        let states = &self.faces[axis.index()];
        let read = |b: &FieldBlock| std::array::from_fn(|i| b.get(f, i));
        (read(&states.minus), read(&states.plus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_mesh::{BoxLayout, MultiField};

    fn fields(f: impl Fn(IntVect) -> Conserved) -> [MultiField; 4] {
        let layout = BoxLayout::single(IndexBox::cells([0; 3], [3; 3])).unwrap();
        let mut out: [MultiField; 4] =
            std::array::from_fn(|i| MultiField::new(format!("q{i}"), &layout, IndexType::NODE, 1, 2));
        for (i, field) in out.iter_mut().enumerate() {
            let block = field.block_mut(0);
            let grown = block.grown_box();
            for p in grown.iter() {
                block.set(p, 0, f(p)[i]);
            }
        }
        out
    }

    fn view(f: &[MultiField; 4]) -> StateBlock<'_> {
        StateBlock {
            density: f[0].block(0),
            momentum: [f[1].block(0), f[2].block(0), f[3].block(0)],
        }
    }

    #[test]
    fn uniform_state_has_no_slopes_and_no_prediction() {
        let q = [1.0, 0.2, -0.1, 0.3];
        let f = fields(|_| q);
        let r = reconstruct(&view(&f), [1, 1, 1], [0.2; 3], SlopeLimiter::Minmod, 1.0);
        assert_eq!(r.slopes, [[0.0; 4]; 3]);
        assert_eq!(r.predicted, q);
        assert_eq!(r.minus_state(Axis::X), q);
        assert_eq!(r.plus_state(Axis::Z), q);
    }

    #[test]
    fn linear_density_at_rest_has_exact_slope() {
        let f = fields(|p| [1.0 + 0.5 * f64::from(p[0]), 0.0, 0.0, 0.0]);
        let r = reconstruct(&view(&f), [1, 1, 1], [0.25; 3], SlopeLimiter::VanLeer, 1.0);
        assert_eq!(r.slopes[0][0], 0.5);
        assert_eq!(r.slopes[1][0], 0.0);
        // at rest the density flux only depends on NU, which is flat
        assert_eq!(r.predicted[0], 1.5);
        assert_eq!(r.minus_state(Axis::X)[0], 1.75);
        assert_eq!(r.plus_state(Axis::X)[0], 1.25);
        assert_eq!(r.velocity, [0.0; 3]);
    }

    #[test]
    fn momentum_gradient_predicts_density_change() {
        // at rest dN/dt = -d(NU_x)/dx, so Q̃_0 = N - (dt/2dx) dNU_x
        let f = fields(|p| [1.0, 0.1 * f64::from(p[0]), 0.0, 0.0]);
        let r = reconstruct(&view(&f), [0, 0, 0], [0.5; 3], SlopeLimiter::Minmod, 1.0);
        assert!(r.slopes[0][1] > 0.0);
        assert!(r.predicted[0] < 1.0);
    }

    #[test]
    fn scratch_covers_every_face_once() {
        let valid = IndexBox::new([0; 3], [2, 3, 1], IndexType::NODE);
        let grown = valid.grow(1);
        let recs: Vec<Reconstruction> = grown
            .iter()
            .map(|p| Reconstruction {
                velocity: [f64::from(p[0]), 0.0, 0.0],
                predicted: [f64::from(p[0] + 10 * p[1] + 100 * p[2]); 4],
                slopes: [[2.0; 4]; 3],
            })
            .collect();
        let scratch = BlockScratch::assemble(valid, &[(grown, recs)]);

        assert_eq!(scratch.velocity([-1, 0, 0], Axis::X), -1.0);
        assert_eq!(scratch.velocity([3, 4, 2], Axis::X), 3.0);
        // face (1,2,0) along x: minus from node (1,2,0), plus from node (2,2,0)
        let (m, p) = scratch.face(Axis::X, [1, 2, 0]);
        assert_eq!(m[0], 21.0 + 1.0);
        assert_eq!(p[0], 22.0 - 1.0);
        // outermost face behind the grown ring along z
        let (m, p) = scratch.face(Axis::Z, [0, 0, -1]);
        assert_eq!(m[0], -100.0 + 1.0);
        assert_eq!(p[0], 0.0 - 1.0);
    }
}
