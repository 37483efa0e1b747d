//! Species configuration, builder and validation.
//!
//! A [`FluidSpeciesConfig`] is assembled once, validated, and handed to
//! [`FluidSpecies::new`](crate::FluidSpecies::new). Nothing reads
//! parameters after construction.

use std::error::Error;
use std::fmt;

use plume_core::{FluidInjector, PhysicalSpecies, SpeciesFlags};
use plume_mesh::{CommPrecision, MeshError, TileSize};

use crate::advect::SlopeLimiter;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building a [`FluidSpeciesConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The species name is empty.
    EmptyName,
    /// Neither a charge nor a physical species was given.
    MissingCharge,
    /// Neither a mass nor a physical species was given.
    MissingMass,
    /// Charge is NaN or infinite.
    InvalidCharge {
        /// The invalid value.
        value: f64,
    },
    /// Mass is NaN, infinite, zero or negative.
    InvalidMass {
        /// The invalid value.
        value: f64,
    },
    /// A mesh parameter (tile size) is invalid.
    Mesh(MeshError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "species name must not be empty"),
            Self::MissingCharge => write!(f, "species charge not specified"),
            Self::MissingMass => write!(f, "species mass not specified"),
            Self::InvalidCharge { value } => write!(f, "charge must be finite, got {value}"),
            Self::InvalidMass { value } => {
                write!(f, "mass must be finite and > 0, got {value}")
            }
            Self::Mesh(e) => write!(f, "mesh: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Mesh(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MeshError> for ConfigError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

// ── FluidSpeciesConfig ─────────────────────────────────────────────

/// Everything a fluid species needs to know about itself.
#[derive(Clone, Debug)]
pub struct FluidSpeciesConfig {
    /// Species name, unique within a container.
    pub name: String,
    /// Particle charge, C.
    pub charge: f64,
    /// Particle rest mass, kg.
    pub mass: f64,
    /// Stages this species skips.
    pub flags: SpeciesFlags,
    /// Slope limiter used by the advector. Default: minmod.
    pub limiter: SlopeLimiter,
    /// Tile extent for parallel loops.
    pub tile_size: TileSize,
    /// Precision of halo exchanges. Default: double.
    pub comm_precision: CommPrecision,
    /// Scan the state for NaN/inf after every stage. Default: false.
    pub check_finite: bool,
    /// Initial density and momentum profiles.
    pub injector: FluidInjector,
}

impl FluidSpeciesConfig {
    /// Start building a configuration for species `name`.
    pub fn builder(name: impl Into<String>) -> FluidSpeciesConfigBuilder {
        FluidSpeciesConfigBuilder {
            name: name.into(),
            charge: None,
            mass: None,
            flags: SpeciesFlags::default(),
            limiter: SlopeLimiter::default(),
            tile_size: TileSize::default(),
            comm_precision: CommPrecision::default(),
            check_finite: false,
            injector: FluidInjector::default(),
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if !self.charge.is_finite() {
            return Err(ConfigError::InvalidCharge { value: self.charge });
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ConfigError::InvalidMass { value: self.mass });
        }
        self.tile_size.validate()?;
        Ok(())
    }
}

/// Builder for [`FluidSpeciesConfig`].
///
/// Charge and mass are required, either explicitly or through
/// [`species`](Self::species). Everything else has a default.
///
/// ```
/// use plume_core::{FluidInjector, PhysicalSpecies};
/// use plume_fluid::FluidSpeciesConfig;
///
/// let config = FluidSpeciesConfig::builder("electrons")
///     .species(PhysicalSpecies::Electron)
///     .injector(FluidInjector::uniform_at_rest(1e24))
///     .build()
///     .unwrap();
/// assert!(config.charge < 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct FluidSpeciesConfigBuilder {
    name: String,
    charge: Option<f64>,
    mass: Option<f64>,
    flags: SpeciesFlags,
    limiter: SlopeLimiter,
    tile_size: TileSize,
    comm_precision: CommPrecision,
    check_finite: bool,
    injector: FluidInjector,
}

impl FluidSpeciesConfigBuilder {
    /// Take charge and mass from a physical species. Explicit
    /// [`charge`](Self::charge) or [`mass`](Self::mass) calls made later
    /// override it.
    pub fn species(mut self, species: PhysicalSpecies) -> Self {
        self.charge = Some(species.charge());
        self.mass = Some(species.mass());
        self
    }

    /// Particle charge, C.
    pub fn charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }

    /// Particle rest mass, kg.
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Initial-condition profiles.
    pub fn injector(mut self, injector: FluidInjector) -> Self {
        self.injector = injector;
        self
    }

    /// Skip charge and current deposition.
    pub fn do_not_deposit(mut self, yes: bool) -> Self {
        self.flags.do_not_deposit = yes;
        self
    }

    /// Skip field gathering and the Lorentz push.
    pub fn do_not_gather(mut self, yes: bool) -> Self {
        self.flags.do_not_gather = yes;
        self
    }

    /// Skip advection.
    pub fn do_not_push(mut self, yes: bool) -> Self {
        self.flags.do_not_push = yes;
        self
    }

    /// Slope limiter for the advector.
    pub fn limiter(mut self, limiter: SlopeLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// Tile extent for parallel loops.
    pub fn tile_size(mut self, tile_size: TileSize) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Precision of halo exchanges.
    pub fn comm_precision(mut self, precision: CommPrecision) -> Self {
        self.comm_precision = precision;
        self
    }

    /// Scan for non-finite state after every stage.
    pub fn check_finite(mut self, yes: bool) -> Self {
        self.check_finite = yes;
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<FluidSpeciesConfig, ConfigError> {
        let config = FluidSpeciesConfig {
            name: self.name,
            charge: self.charge.ok_or(ConfigError::MissingCharge)?,
            mass: self.mass.ok_or(ConfigError::MissingMass)?,
            flags: self.flags,
            limiter: self.limiter,
            tile_size: self.tile_size,
            comm_precision: self.comm_precision,
            check_finite: self.check_finite,
            injector: self.injector,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_species_supplies_charge_and_mass() {
        let c = FluidSpeciesConfig::builder("p")
            .species(PhysicalSpecies::Proton)
            .build()
            .unwrap();
        assert_eq!(c.charge, PhysicalSpecies::Proton.charge());
        assert_eq!(c.mass, PhysicalSpecies::Proton.mass());
        assert_eq!(c.limiter, SlopeLimiter::Minmod);
        assert_eq!(c.flags, SpeciesFlags::default());
    }

    #[test]
    fn explicit_values_override_species() {
        let c = FluidSpeciesConfig::builder("heavy")
            .species(PhysicalSpecies::Electron)
            .mass(2.0)
            .build()
            .unwrap();
        assert_eq!(c.mass, 2.0);
        assert!(c.charge < 0.0);
    }

    #[test]
    fn missing_charge_rejected() {
        match FluidSpeciesConfig::builder("x").mass(1.0).build() {
            Err(ConfigError::MissingCharge) => {}
            other => panic!("expected MissingCharge, got {other:?}"),
        }
    }

    #[test]
    fn missing_mass_rejected() {
        match FluidSpeciesConfig::builder("x").charge(1.0).build() {
            Err(ConfigError::MissingMass) => {}
            other => panic!("expected MissingMass, got {other:?}"),
        }
    }

    #[test]
    fn invalid_mass_rejected() {
        for m in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            match FluidSpeciesConfig::builder("x").charge(1.0).mass(m).build() {
                Err(ConfigError::InvalidMass { .. }) => {}
                other => panic!("mass {m}: expected InvalidMass, got {other:?}"),
            }
        }
    }

    #[test]
    fn nan_charge_rejected() {
        match FluidSpeciesConfig::builder("x").charge(f64::NAN).mass(1.0).build() {
            Err(ConfigError::InvalidCharge { .. }) => {}
            other => panic!("expected InvalidCharge, got {other:?}"),
        }
    }

    #[test]
    fn empty_name_rejected() {
        match FluidSpeciesConfig::builder("").charge(1.0).mass(1.0).build() {
            Err(ConfigError::EmptyName) => {}
            other => panic!("expected EmptyName, got {other:?}"),
        }
    }

    #[test]
    fn bad_tile_size_wraps_mesh_error() {
        let err = FluidSpeciesConfig::builder("x")
            .charge(1.0)
            .mass(1.0)
            .tile_size(TileSize([0, 8, 8]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Mesh(MeshError::InvalidSize { .. })));
        assert!(err.source().is_some());
    }

    #[test]
    fn flags_are_recorded() {
        let c = FluidSpeciesConfig::builder("x")
            .charge(1.0)
            .mass(1.0)
            .do_not_deposit(true)
            .do_not_push(true)
            .build()
            .unwrap();
        assert!(c.flags.do_not_deposit);
        assert!(c.flags.do_not_push);
        assert!(!c.flags.do_not_gather);
    }
}
