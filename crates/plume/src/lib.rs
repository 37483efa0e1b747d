//! Plume: relativistic cold-fluid plasma species for electromagnetic
//! simulations on block-structured meshes.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Plume sub-crates. For most users, adding `plume` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use plume::prelude::*;
//!
//! // A periodic 8×8×8 box of 1 µm cells, split into two blocks.
//! let geom = Geometry::new([8; 3], [0.0; 3], [8e-6; 3], [true; 3]).unwrap();
//! let layout = BoxLayout::chop(geom.domain(), [4, 8, 8]).unwrap();
//!
//! let mut fluids = MultiFluidContainer::new(1);
//! fluids
//!     .add(
//!         FluidSpeciesConfig::builder("electrons")
//!             .species(PhysicalSpecies::Electron)
//!             .injector(FluidInjector::new(
//!                 ConstantDensity(1e24),
//!                 ConstantMomentum([0.1, 0.0, 0.0]),
//!             ))
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//! fluids.allocate_level(Level(0), &layout, &geom).unwrap();
//! fluids.init_data(Level(0)).unwrap();
//!
//! // Yee-staggered fields owned by the field solver.
//! let e = Axis::ALL.map(|a| MultiField::new(format!("E{a}"), &layout, IndexType::cell_along(a), 1, 2));
//! let b = Axis::ALL.map(|a| MultiField::new(format!("B{a}"), &layout, IndexType::node_along(a), 1, 2));
//! let mut j = Axis::ALL.map(|a| MultiField::new(format!("j{a}"), &layout, IndexType::cell_along(a), 1, 0));
//!
//! let em = ElectromagneticFields::new(&e, &b);
//! let metrics = fluids.evolve(Level(0), 1e-15, &em, &mut j, false).unwrap();
//! assert_eq!(metrics.len(), 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `plume-core` | IDs, errors, constants, profiles, species presets |
//! | [`mesh`] | `plume-mesh` | Boxes, layouts, ghosted fields, halo exchange, ownership |
//! | [`fluid`] | `plume-fluid` | Fluid state, push, advection, deposition, species |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, errors and constants (`plume-core`).
///
/// Contains level and species identifiers, [`types::FluidError`], SI
/// constants and the initial-condition profile traits.
pub use plume_core as types;

/// Block-structured mesh substrate (`plume-mesh`).
///
/// Provides [`mesh::BoxLayout`], [`mesh::MultiField`] with halo exchange,
/// and [`mesh::OwnerMask`] for counting shared points once.
pub use plume_mesh as mesh;

/// Relativistic cold-fluid species (`plume-fluid`).
///
/// [`fluid::FluidSpecies`] sequences one species' step and
/// [`fluid::MultiFluidContainer`] fans it out over several.
pub use plume_fluid as fluid;

/// Common imports for typical Plume usage.
///
/// ```rust
/// use plume::prelude::*;
/// ```
///
/// This imports the most frequently used types: identifiers, profiles,
/// mesh containers and the fluid species API.
pub mod prelude {
    // Core types
    pub use plume_core::{
        ConstantDensity, ConstantMomentum, DensityProfile, FluidInjector, Level,
        MomentumProfile, PhysicalSpecies, SpeciesFlags, SpeciesId,
    };

    // Errors
    pub use plume_core::FluidError;
    pub use plume_fluid::ConfigError;
    pub use plume_mesh::MeshError;

    // Mesh
    pub use plume_mesh::{
        Axis, BoxLayout, CommPrecision, Geometry, IndexType, MultiField, OwnerMask, TileSize,
    };

    // Fluid
    pub use plume_fluid::{
        ElectromagneticFields, EvolveMetrics, FluidSpecies, FluidSpeciesConfig,
        MultiFluidContainer, SlopeLimiter,
    };
}
