//! Analytic Jacobian of the relativistic cold-fluid flux.
//!
//! For `F_a(Q) = Q·v_a` with `Q = (N, NU)`, `v = u/γ` and
//! `γ = sqrt(1 + |u|²/c²)`, the derivative `∂F_a/∂Q` depends only on `u`.
//! Writing `a = c²γ³` and `e_k = c² + Σ_{j≠k} u_j²` (so that
//! `c²γ² - u_k² = e_k`), the entries are
//!
//! ```text
//! A[0][0]       =  u_a |u|² / a
//! A[0][1+b]     =  (δ_ab e_a - (1-δ_ab) u_a u_b) / a
//! A[1+m][0]     = -u_m u_a / γ³
//! A[1+m][1+b]   =  u_a (2 e_a + u_a²) / a     m = b = a
//!                  u_a e_m / a                m = b ≠ a
//!                  u_m e_a / a                b = a ≠ m
//!                 -u_m u_a u_b / a            otherwise
//! ```
//!
//! The `e_k` form keeps the diagonal free of `c²γ² - u²` cancellation.

use plume_mesh::Axis;

/// `∂F_axis/∂Q` at momentum-per-mass `u` with Lorentz factor `gamma`.
pub fn flux_jacobian(axis: Axis, u: [f64; 3], gamma: f64, c: f64) -> [[f64; 4]; 4] {
    let a = axis.index();
    let c2 = c * c;
    let sq = [u[0] * u[0], u[1] * u[1], u[2] * u[2]];
    let norm2 = sq[0] + sq[1] + sq[2];
    let excl = |k: usize| c2 + norm2 - sq[k];
    let g3 = gamma * gamma * gamma;
    let inv = 1.0 / (c2 * g3);
    let ua = u[a];

    let mut jac = [[0.0; 4]; 4];
    jac[0][0] = ua * norm2 * inv;
    for b in 0..3 {
        jac[0][1 + b] = if b == a { excl(a) } else { -ua * u[b] } * inv;
    }
    for m in 0..3 {
        jac[1 + m][0] = -u[m] * ua / g3;
        for b in 0..3 {
            let num = match (m == a, b == a, m == b) {
                (true, true, _) => ua * (2.0 * excl(a) + sq[a]),
                (false, false, true) => ua * excl(m),
                (false, true, _) => u[m] * excl(a),
                _ => -u[m] * ua * u[b],
            };
            jac[1 + m][1 + b] = num * inv;
        }
    }
    jac
}

/// `A·dq` for a 4×4 matrix.
#[inline]
pub(crate) fn apply(jac: &[[f64; 4]; 4], dq: &[f64; 4]) -> [f64; 4] {
    std::array::from_fn(|i| {
        jac[i][0] * dq[0] + jac[i][1] * dq[1] + jac[i][2] * dq[2] + jac[i][3] * dq[3]
    })
}
