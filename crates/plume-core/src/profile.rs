//! Initial-condition profiles for fluid species.
//!
//! A [`FluidInjector`] pairs a number-density profile with a bulk-momentum
//! profile. Both are sampled at node positions when a level is initialised.
//! Closures implement the traits directly:
//!
//! ```
//! use plume_core::{DensityProfile, FluidInjector, ConstantMomentum};
//!
//! let injector = FluidInjector::new(
//!     |x: f64, _y: f64, _z: f64| 1e24 * (1.0 + 0.1 * x.sin()),
//!     ConstantMomentum([0.0, 0.0, 0.01]),
//! );
//! assert!(injector.density().density(0.0, 0.0, 0.0) > 0.0);
//! ```

use std::fmt;
use std::sync::Arc;

/// Number density `n(x, y, z)` in m⁻³.
pub trait DensityProfile: Send + Sync {
    /// Density at the physical point `(x, y, z)`.
    fn density(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Dimensionless bulk momentum `u(x, y, z) = γβ`, i.e. momentum per unit
/// mass in units of c.
pub trait MomentumProfile: Send + Sync {
    /// Momentum at the physical point `(x, y, z)`.
    fn bulk_momentum(&self, x: f64, y: f64, z: f64) -> [f64; 3];
}

impl<F> DensityProfile for F
where
    F: Fn(f64, f64, f64) -> f64 + Send + Sync,
{
    fn density(&self, x: f64, y: f64, z: f64) -> f64 {
        self(x, y, z)
    }
}

impl<F> MomentumProfile for F
where
    F: Fn(f64, f64, f64) -> [f64; 3] + Send + Sync,
{
    fn bulk_momentum(&self, x: f64, y: f64, z: f64) -> [f64; 3] {
        self(x, y, z)
    }
}

/// Spatially uniform density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantDensity(pub f64);

impl DensityProfile for ConstantDensity {
    fn density(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0
    }
}

/// Spatially uniform bulk momentum (units of c).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantMomentum(pub [f64; 3]);

impl MomentumProfile for ConstantMomentum {
    fn bulk_momentum(&self, _x: f64, _y: f64, _z: f64) -> [f64; 3] {
        self.0
    }
}

/// Density and momentum profiles of one species.
///
/// Cheap to clone; the profiles are shared.
#[derive(Clone)]
pub struct FluidInjector {
    density: Arc<dyn DensityProfile>,
    momentum: Arc<dyn MomentumProfile>,
}

impl FluidInjector {
    /// Pair a density profile with a momentum profile.
    pub fn new(
        density: impl DensityProfile + 'static,
        momentum: impl MomentumProfile + 'static,
    ) -> Self {
        Self {
            density: Arc::new(density),
            momentum: Arc::new(momentum),
        }
    }

    /// A cold, uniform fluid at rest.
    pub fn uniform_at_rest(density: f64) -> Self {
        Self::new(ConstantDensity(density), ConstantMomentum([0.0; 3]))
    }

    /// The density profile.
    pub fn density(&self) -> &dyn DensityProfile {
        self.density.as_ref()
    }

    /// The momentum profile.
    pub fn momentum(&self) -> &dyn MomentumProfile {
        self.momentum.as_ref()
    }
}

impl Default for FluidInjector {
    fn default() -> Self {
        Self::uniform_at_rest(0.0)
    }
}

impl fmt::Debug for FluidInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluidInjector").finish_non_exhaustive()
    }
}
