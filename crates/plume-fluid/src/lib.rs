//! Relativistic cold-fluid species for electromagnetic plasma simulation.
//!
//! A fluid species carries a number density `N` and momentum density
//! `NU = N·u` (u = γv) on the nodes of a ghosted, block-decomposed mesh.
//! Each step it
//!
//! 1. gathers E and B from the field solver's staggered layout and applies
//!    the Higuera–Cary Lorentz push ([`MomentumPusher`]),
//! 2. advects `(N, NU)` with an unsplit MUSCL-Hancock scheme built on
//!    analytic relativistic flux Jacobians ([`MusclHancockAdvector`]),
//! 3. deposits its current onto the staggered current density
//!    ([`ChargeCurrentDepositor`]).
//!
//! [`FluidSpecies`] sequences these stages for one species and
//! [`MultiFluidContainer`] fans them out over several.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod advect;
pub mod config;
pub mod container;
pub mod deposit;
pub mod fields;
pub mod kinematics;
pub mod metrics;
pub mod push;
pub mod species;
pub mod state;
mod tiles;

pub use advect::{flux_jacobian, upwind_flux, MusclHancockAdvector, SlopeLimiter};
pub use config::{ConfigError, FluidSpeciesConfig, FluidSpeciesConfigBuilder};
pub use container::MultiFluidContainer;
pub use deposit::ChargeCurrentDepositor;
pub use fields::ElectromagneticFields;
pub use kinematics::Conserved;
pub use metrics::EvolveMetrics;
pub use push::{higuera_cary, MomentumPusher};
pub use species::FluidSpecies;
pub use state::{GridStateStore, LevelState};
