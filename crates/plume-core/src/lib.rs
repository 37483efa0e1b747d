//! Core types, errors and physical constants for the Plume fluid engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the mesh and fluid crates: level and species
//! identifiers, the runtime error type, SI constants, initial-condition
//! profiles and species presets.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod dims;
pub mod error;
pub mod id;
pub mod profile;
pub mod species;

pub use dims::Dimensionality;
pub use error::FluidError;
pub use id::{Level, SpeciesId};
pub use profile::{
    ConstantDensity, ConstantMomentum, DensityProfile, FluidInjector, MomentumProfile,
};
pub use species::{PhysicalSpecies, SpeciesFlags};
