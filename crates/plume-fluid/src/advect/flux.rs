//! Numerical face flux.

use crate::kinematics::Conserved;

/// Flux through a face with left state `qm` moving at `vm` and right state
/// `qp` moving at `vp` (velocity components normal to the face).
///
/// Pure upwinding when both sides move the same way; the local
/// Lax–Friedrichs (Rusanov) flux when they converge or diverge.
#[inline]
pub fn upwind_flux(qm: &Conserved, qp: &Conserved, vm: f64, vp: f64) -> Conserved {
    if vm >= 0.0 && vp >= 0.0 {
        qm.map(|x| x * vm)
    } else if vm <= 0.0 && vp <= 0.0 {
        qp.map(|x| x * vp)
    } else {
        let smax = vm.abs().max(vp.abs());
        std::array::from_fn(|i| 0.5 * (vm * qm[i] + vp * qp[i]) - 0.5 * smax * (qp[i] - qm[i]))
    }
}
