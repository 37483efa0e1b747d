//! Species presets and per-species stage flags.

use std::fmt;

use crate::constants::{ELECTRON_MASS, ELEMENTARY_CHARGE, PROTON_MASS};

/// Named physical species with known charge and mass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhysicalSpecies {
    /// Electron (charge −e).
    Electron,
    /// Positron (charge +e).
    Positron,
    /// Proton (charge +e).
    Proton,
}

impl PhysicalSpecies {
    /// Charge in coulombs.
    pub fn charge(self) -> f64 {
        match self {
            Self::Electron => -ELEMENTARY_CHARGE,
            Self::Positron | Self::Proton => ELEMENTARY_CHARGE,
        }
    }

    /// Rest mass in kilograms.
    pub fn mass(self) -> f64 {
        match self {
            Self::Electron | Self::Positron => ELECTRON_MASS,
            Self::Proton => PROTON_MASS,
        }
    }

    /// Parse a lower-case species name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "electron" => Some(Self::Electron),
            "positron" => Some(Self::Positron),
            "proton" => Some(Self::Proton),
            _ => None,
        }
    }
}

impl fmt::Display for PhysicalSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Electron => "electron",
            Self::Positron => "positron",
            Self::Proton => "proton",
        };
        f.write_str(s)
    }
}

/// Stages a species opts out of during a step.
///
/// All `false` by default: the species is pushed, advected and deposited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpeciesFlags {
    /// Skip charge and current deposition.
    pub do_not_deposit: bool,
    /// Skip field gathering and the Lorentz-force push.
    pub do_not_gather: bool,
    /// Skip advection.
    pub do_not_push: bool,
}
