//! Seeded random fixtures.
//!
//! - [`RandomModes`]: a smooth periodic field built from a few Fourier
//!   modes with ChaCha-drawn amplitudes and phases, usable directly as a
//!   density or momentum profile.
//! - [`random_state`]: an arbitrary conserved state for kernel tests.
//!
//! The same seed always produces the same fixture.

use std::f64::consts::TAU;

use plume_core::constants::SPEED_OF_LIGHT;
use plume_core::{DensityProfile, MomentumProfile};
use plume_mesh::Geometry;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Copy, Debug)]
struct Mode {
    k: [f64; 3],
    amplitude: f64,
    phase: f64,
}

/// A sum of random low-order Fourier modes, periodic on a geometry's
/// domain.
#[derive(Clone, Debug)]
pub struct RandomModes {
    mean: f64,
    modes: Vec<Mode>,
}

impl RandomModes {
    /// `mean + Σ a_i sin(k_i·x + φ_i)` with `count` modes of wavenumber at
    /// most `max_k` periods per domain length, and `Σ |a_i| <= amplitude`.
    pub fn new(seed: u64, geom: &Geometry, mean: f64, amplitude: f64, count: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let lo = geom.prob_lo();
        let hi = geom.prob_hi();
        let max_k = 2;
        let share = if count == 0 { 0.0 } else { amplitude / count as f64 };
        let modes = (0..count)
            .map(|_| Mode {
                k: std::array::from_fn(|a| {
                    let n = rng.random_range(0..=max_k);
                    TAU * f64::from(n) / (hi[a] - lo[a])
                }),
                amplitude: share * rng.random_range(-1.0..=1.0),
                phase: rng.random_range(0.0..TAU),
            })
            .collect();
        Self { mean, modes }
    }

    /// Value at a position.
    pub fn value(&self, x: [f64; 3]) -> f64 {
        self.mean
            + self
                .modes
                .iter()
                .map(|m| {
                    let arg = m.k[0] * x[0] + m.k[1] * x[1] + m.k[2] * x[2] + m.phase;
                    m.amplitude * arg.sin()
                })
                .sum::<f64>()
    }
}

impl DensityProfile for RandomModes {
    fn density(&self, x: f64, y: f64, z: f64) -> f64 {
        self.value([x, y, z])
    }
}

/// Independent [`RandomModes`] per momentum component.
#[derive(Clone, Debug)]
pub struct RandomMomentum(pub [RandomModes; 3]);

impl MomentumProfile for RandomMomentum {
    fn bulk_momentum(&self, x: f64, y: f64, z: f64) -> [f64; 3] {
        self.0.each_ref().map(|m| m.value([x, y, z]))
    }
}

/// Smooth positive density around `n0` with relative fluctuation at most
/// `contrast` (< 1).
pub fn random_density(seed: u64, geom: &Geometry, n0: f64, contrast: f64) -> RandomModes {
    RandomModes::new(seed, geom, n0, n0 * contrast, 4)
}

/// Smooth dimensionless bulk momentum (`u/c`) per axis, each bounded by
/// `max`.
pub fn random_momentum(seed: u64, geom: &Geometry, max: f64) -> RandomMomentum {
    RandomMomentum(std::array::from_fn(|a| {
        RandomModes::new(seed.wrapping_add(1 + a as u64), geom, 0.0, max, 3)
    }))
}

/// Conserved `(N, N·u)` with `N` in `[n_min, n_max)` and each `u_a` of
/// magnitude below `u_max·c`.
pub fn random_state(rng: &mut ChaCha8Rng, n_min: f64, n_max: f64, u_max: f64) -> [f64; 4] {
    let n = rng.random_range(n_min..n_max);
    let u: [f64; 3] =
        std::array::from_fn(|_| rng.random_range(-u_max..u_max) * SPEED_OF_LIGHT);
    [n, n * u[0], n * u[1], n * u[2]]
}

/// Deterministic generator for a test case.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
