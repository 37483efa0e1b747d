//! Error types for the fluid engine.
//!
//! Contract violations (wrong staggering, mismatched layouts) are panics;
//! everything a caller can reasonably recover from is a [`FluidError`].

use std::error::Error;
use std::fmt;

use crate::{Dimensionality, Level};

/// Errors returned by fluid-species operations.
#[derive(Clone, Debug, PartialEq)]
pub enum FluidError {
    /// The species has no field storage at the requested level.
    LevelNotAllocated {
        /// Species name.
        species: String,
        /// The missing level.
        level: Level,
    },
    /// The operation has no implementation for this dimensionality.
    UnsupportedDimensionality {
        /// The configured dimensionality.
        dims: Dimensionality,
    },
    /// A non-finite value was found in the conserved state
    /// (finite-state checking).
    NonFiniteState {
        /// Species name.
        species: String,
        /// Field containing the value.
        field: &'static str,
        /// Level of the offending field.
        level: Level,
        /// Node index of the first non-finite value.
        node: [i32; 3],
        /// Stage that produced it.
        stage: &'static str,
    },
    /// A species with this name is already registered.
    DuplicateSpecies {
        /// The repeated name.
        name: String,
    },
    /// A species configuration failed validation.
    InvalidConfig {
        /// Species name.
        species: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A mesh-layer operation failed.
    Mesh {
        /// Description from the mesh layer.
        reason: String,
    },
}

impl fmt::Display for FluidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelNotAllocated { species, level } => {
                write!(f, "species '{species}' has no fields at level {level}")
            }
            Self::UnsupportedDimensionality { dims } => {
                write!(f, "operation not supported in {dims} geometry")
            }
            Self::NonFiniteState {
                species,
                field,
                level,
                node,
                stage,
            } => write!(
                f,
                "non-finite {field} of species '{species}' at level {level}, node {node:?} after {stage}"
            ),
            Self::DuplicateSpecies { name } => write!(f, "species '{name}' already exists"),
            Self::InvalidConfig { species, reason } => {
                write!(f, "invalid configuration for species '{species}': {reason}")
            }
            Self::Mesh { reason } => write!(f, "mesh error: {reason}"),
        }
    }
}

impl Error for FluidError {}
