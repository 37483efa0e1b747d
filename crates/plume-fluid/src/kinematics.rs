//! Relativistic kinematics of the conserved state.
//!
//! Nodes with `N <= 0` are vacuum: they have no defined velocity and are
//! treated as at rest (`u = 0`, `γ = 1`) rather than producing `0/0`.

/// Conserved fluid state at a node: `(N, NUx, NUy, NUz)`.
pub type Conserved = [f64; 4];

/// Lorentz factor of momentum-per-mass `u`: `sqrt(1 + |u|²/c²)`.
#[inline]
pub fn lorentz_factor(u: [f64; 3], c: f64) -> f64 {
    (1.0 + (u[0] * u[0] + u[1] * u[1] + u[2] * u[2]) / (c * c)).sqrt()
}

/// Momentum per unit mass `u = NU/N` and its Lorentz factor.
#[inline]
pub fn momentum_and_gamma(q: &Conserved, c: f64) -> ([f64; 3], f64) {
    if q[0] > 0.0 {
        let u = [q[1] / q[0], q[2] / q[0], q[3] / q[0]];
        (u, lorentz_factor(u, c))
    } else {
        ([0.0; 3], 1.0)
    }
}

/// Fluid velocity `v = u/γ`.
#[inline]
pub fn velocity(q: &Conserved, c: f64) -> [f64; 3] {
    let (u, gamma) = momentum_and_gamma(q, c);
    [u[0] / gamma, u[1] / gamma, u[2] / gamma]
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::constants::SPEED_OF_LIGHT as C;
    use proptest::prelude::*;

    #[test]
    fn rest_state_has_unit_gamma() {
        let (u, g) = momentum_and_gamma(&[1e20, 0.0, 0.0, 0.0], C);
        assert_eq!(u, [0.0; 3]);
        assert_eq!(g, 1.0);
    }

    #[test]
    fn vacuum_is_at_rest() {
        assert_eq!(velocity(&[0.0, 5.0, 0.0, 0.0], C), [0.0; 3]);
        assert_eq!(velocity(&[-1.0, 5.0, 0.0, 0.0], C), [0.0; 3]);
    }

    proptest! {
        #[test]
        fn velocity_is_subluminal(
            n in 1e10f64..1e26,
            u in prop::array::uniform3(-100.0f64..100.0),
        ) {
            let q = [n, n * u[0] * C, n * u[1] * C, n * u[2] * C];
            let v = velocity(&q, C);
            let speed = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            prop_assert!(speed < C, "speed {speed} >= c");
        }
    }
}
