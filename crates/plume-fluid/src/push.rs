//! Lorentz-force momentum update.
//!
//! Fields are gathered from their staggered layout onto the fluid nodes
//! and `u = NU/N` is advanced with the Higuera–Cary scheme: a half electric
//! kick, a volume-preserving magnetic rotation evaluated with a
//! Lorentz-invariant γ, then a second half kick.

use plume_core::constants::SPEED_OF_LIGHT;
use plume_mesh::{interp, Axis, CommPrecision, IndexType, TileSize};

use crate::fields::ElectromagneticFields;
use crate::state::LevelState;
use crate::tiles::map_tiles;

/// Advance momentum-per-mass `u` (m/s, `u = γv`) by `dt` under fields `e`
/// and `b` for a particle of charge `q` and mass `m`.
pub fn higuera_cary(
    u: [f64; 3],
    e: [f64; 3],
    b: [f64; 3],
    q: f64,
    m: f64,
    dt: f64,
    c: f64,
) -> [f64; 3] {
    let qmt = 0.5 * q * dt / m;
    let inv_c = 1.0 / c;

    // half electric kick
    let um = [u[0] + qmt * e[0], u[1] + qmt * e[1], u[2] + qmt * e[2]];
    let gamma_m_sq = 1.0 + dot(um, um) * inv_c * inv_c;

    let tau = [qmt * b[0], qmt * b[1], qmt * b[2]];
    let tau_sq = dot(tau, tau);
    let u_star = dot(um, tau) * inv_c;

    // Lorentz-invariant gamma of the rotation
    let sigma = gamma_m_sq - tau_sq;
    let gamma_new =
        (0.5 * (sigma + (sigma * sigma + 4.0 * (tau_sq + u_star * u_star)).sqrt())).sqrt();

    let t = [tau[0] / gamma_new, tau[1] / gamma_new, tau[2] / gamma_new];
    let s = 1.0 / (1.0 + dot(t, t));
    let um_dot_t = dot(um, t);
    let um_cross_t = cross(um, t);
    let up = [
        s * (um[0] + um_dot_t * t[0] + um_cross_t[0]),
        s * (um[1] + um_dot_t * t[1] + um_cross_t[1]),
        s * (um[2] + um_dot_t * t[2] + um_cross_t[2]),
    ];
    let up_cross_t = cross(up, t);

    [
        up[0] + qmt * e[0] + up_cross_t[0],
        up[1] + qmt * e[1] + up_cross_t[1],
        up[2] + qmt * e[2] + up_cross_t[2],
    ]
}

#[inline]
fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Gathers E and B to the fluid nodes and applies the Lorentz force.
#[derive(Clone, Copy, Debug)]
pub struct MomentumPusher {
    charge: f64,
    mass: f64,
    tile_size: TileSize,
}

impl MomentumPusher {
    /// Pusher for particles of charge `charge` (C) and mass `mass` (kg).
    pub fn new(charge: f64, mass: f64, tile_size: TileSize) -> Self {
        Self {
            charge,
            mass,
            tile_size,
        }
    }

    /// Update `NU` at every valid node by one Higuera–Cary step, then
    /// refresh the momentum ghosts. Vacuum nodes (`N <= 0`) are left alone.
    ///
    /// # Panics
    ///
    /// If a field component does not share the fluid's box layout, or a
    /// component that is cell-centred along some axis has no ghost layer
    /// to interpolate from.
    pub fn gather_and_push(
        &self,
        state: &mut LevelState,
        em: &ElectromagneticFields<'_>,
        dt: f64,
        precision: CommPrecision,
    ) {
        for f in em.components() {
            assert!(
                f.same_layout(state.density()),
                "field '{}' is not on the fluid's box layout",
                f.name()
            );
            assert!(
                f.index_type() == IndexType::NODE || f.ghost() >= 1,
                "field '{}' needs at least one ghost cell to be gathered to nodes, has {}",
                f.name(),
                f.ghost()
            );
        }
        let tiles = state.layout().tiles(IndexType::NODE, 0, self.tile_size);
        let (q, m) = (self.charge, self.mass);
        let snapshot: &LevelState = state;
        let outputs = map_tiles(&tiles, |tile| {
            let view = snapshot.block_view(tile.block);
            let e = Axis::ALL.map(|a| em.e(a).block(tile.block));
            let b = Axis::ALL.map(|a| em.b(a).block(tile.block));
            tile.tile_box
                .iter()
                .map(|p| {
                    let qn = view.conserved(p);
                    let n = qn[0];
                    if n <= 0.0 {
                        return [qn[1], qn[2], qn[3]];
                    }
                    let e_node = e.map(|f| interp::sample(f, 0, IndexType::NODE, p));
                    let b_node = b.map(|f| interp::sample(f, 0, IndexType::NODE, p));
                    let u = [qn[1] / n, qn[2] / n, qn[3] / n];
                    let u = higuera_cary(u, e_node, b_node, q, m, dt, SPEED_OF_LIGHT);
                    [n * u[0], n * u[1], n * u[2]]
                })
                .collect()
        });
        state.scatter_momentum(&tiles, outputs);
        state.fill_momentum_boundary(precision);
        tracing::trace!(tiles = tiles.len(), "momentum push done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::lorentz_factor;
    use plume_core::constants::{ELECTRON_MASS, ELEMENTARY_CHARGE};
    use plume_core::{ConstantDensity, ConstantMomentum, FluidInjector, Level};
    use plume_mesh::{BoxLayout, Geometry, MultiField};
    use proptest::prelude::*;

    use crate::state::GridStateStore;

    const C: f64 = SPEED_OF_LIGHT;
    const Q: f64 = -ELEMENTARY_CHARGE;
    const M: f64 = ELECTRON_MASS;

    fn norm(v: [f64; 3]) -> f64 {
        dot(v, v).sqrt()
    }

    #[test]
    fn no_fields_no_change() {
        let u = [1.0e7, -2.0e8, 3.0e5];
        assert_eq!(higuera_cary(u, [0.0; 3], [0.0; 3], Q, M, 1e-12, C), u);
    }

    #[test]
    fn electric_field_accelerates_linearly() {
        // non-relativistic: du = (q/m) E dt
        let e = [1.0e3, 0.0, 0.0];
        let dt = 1e-12;
        let u = higuera_cary([0.0; 3], e, [0.0; 3], Q, M, dt, C);
        let expected = Q / M * e[0] * dt;
        assert!((u[0] - expected).abs() < 1e-12 * expected.abs(), "got {u:?}");
        assert_eq!(u[1], 0.0);
    }

    #[test]
    fn cyclotron_rotation_matches_frequency() {
        let b = [0.0, 0.0, 0.01];
        let u0 = 1.0e5;
        let dt = 1e-12;
        let steps = 1000;
        let mut u = [u0, 0.0, 0.0];
        for _ in 0..steps {
            u = higuera_cary(u, [0.0; 3], b, Q, M, dt, C);
        }
        let gamma = lorentz_factor([u0, 0.0, 0.0], C);
        // du/dt = (q/mγ) u × B rotates counter-clockwise for q < 0
        let theta = -Q * b[2] / (M * gamma) * dt * steps as f64;
        let expected = [u0 * theta.cos(), u0 * theta.sin(), 0.0];
        for a in 0..3 {
            assert!(
                (u[a] - expected[a]).abs() < 1e-5 * u0,
                "component {a}: got {}, expected {}",
                u[a],
                expected[a]
            );
        }
        assert!((norm(u) - u0).abs() < 1e-9 * u0);
    }

    fn uniform_fluid(layout: &BoxLayout, geom: &Geometry) -> GridStateStore {
        let mut store = GridStateStore::new("electrons", 1);
        store.allocate(Level(0), layout, geom.clone()).unwrap();
        let injector = FluidInjector::new(ConstantDensity(1e20), ConstantMomentum([0.0; 3]));
        store
            .initialize(Level(0), &injector, TileSize::default(), CommPrecision::Double)
            .unwrap();
        store
    }

    fn yee(layout: &BoxLayout, ghost: i32) -> ([MultiField; 3], [MultiField; 3]) {
        let e = Axis::ALL.map(|a| {
            MultiField::new(format!("E{a}"), layout, IndexType::cell_along(a), 1, ghost)
        });
        let b = Axis::ALL.map(|a| {
            MultiField::new(format!("B{a}"), layout, IndexType::node_along(a), 1, ghost)
        });
        (e, b)
    }

    #[test]
    fn push_gathers_uniform_field() {
        let geom = Geometry::new([4; 3], [0.0; 3], [4.0; 3], [true; 3]).unwrap();
        let layout = BoxLayout::single(geom.domain()).unwrap();
        let mut store = uniform_fluid(&layout, &geom);
        let (mut e, b) = yee(&layout, 1);
        e[2].fill(1e3);
        let pusher = MomentumPusher::new(Q, M, TileSize::default());
        let dt = 1e-12;
        let state = store.level_mut(Level(0)).unwrap();
        let em = ElectromagneticFields::new(&e, &b);
        pusher.gather_and_push(state, &em, dt, CommPrecision::Double);
        let q = state.conserved(0, [4, 0, 2]);
        let expected = 1e20 * Q / M * 1e3 * dt;
        assert!(((q[3] - expected) / expected).abs() < 1e-12, "got {q:?}");
    }

    #[test]
    #[should_panic(expected = "needs at least one ghost cell")]
    fn ghostless_staggered_field_is_rejected() {
        let geom = Geometry::new([4; 3], [0.0; 3], [4.0; 3], [true; 3]).unwrap();
        let layout = BoxLayout::single(geom.domain()).unwrap();
        let mut store = uniform_fluid(&layout, &geom);
        let (e, b) = yee(&layout, 0);
        let pusher = MomentumPusher::new(Q, M, TileSize::default());
        let state = store.level_mut(Level(0)).unwrap();
        let em = ElectromagneticFields::new(&e, &b);
        pusher.gather_and_push(state, &em, 1e-12, CommPrecision::Double);
    }

    proptest! {
        #[test]
        fn magnetic_rotation_preserves_speed(
            u in prop::array::uniform3(-1.0e9f64..1.0e9),
            b in prop::array::uniform3(-10.0f64..10.0),
            dt in 1e-15f64..1e-11,
        ) {
            let before = norm(u);
            let after = norm(higuera_cary(u, [0.0; 3], b, Q, M, dt, C));
            prop_assert!((after - before).abs() <= 1e-12 * before.max(1.0),
                "|u| changed from {before} to {after}");
        }

        #[test]
        fn push_is_finite_and_subluminal(
            u in prop::array::uniform3(-1.0e10f64..1.0e10),
            e in prop::array::uniform3(-1.0e12f64..1.0e12),
            b in prop::array::uniform3(-100.0f64..100.0),
        ) {
            let new = higuera_cary(u, e, b, Q, M, 1e-14, C);
            prop_assert!(new.iter().all(|x| x.is_finite()));
            let gamma = lorentz_factor(new, C);
            let v = norm(new) / gamma;
            prop_assert!(v < C);
            // gamma is consistent with u by construction
            prop_assert!((gamma * gamma - (1.0 + dot(new, new) / (C * C))).abs() < 1e-9 * gamma * gamma);
        }
    }
}
