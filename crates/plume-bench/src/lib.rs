//! Benchmark profiles for the Plume fluid engine.
//!
//! - [`reference_profile`]: 32³-cell grid in 16³ boxes, one
//!   electron and one proton fluid under uniform fields
//! - [`stress_profile`]: the same at 64³
//!
//! Both draw their density and momentum from seeded Fourier modes so a
//! given seed always benchmarks the same state.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use plume_core::constants::SPEED_OF_LIGHT;
use plume_core::{FluidError, FluidInjector, Level, PhysicalSpecies};
use plume_fluid::{
    ElectromagneticFields, EvolveMetrics, FluidSpeciesConfig, MultiFluidContainer, SlopeLimiter,
};
use plume_mesh::{BoxLayout, Geometry, IntVect, TileSize};
use plume_test_utils::fixtures::{random_density, random_momentum};
use plume_test_utils::{TestGridBuilder, YeeFields};

/// Background density of the benchmark plasma, m⁻³.
pub const DENSITY: f64 = 1e24;

/// A ready-to-step level: grid, species and field-solver arrays.
#[derive(Debug)]
pub struct BenchLevel {
    /// Domain geometry.
    pub geom: Geometry,
    /// Box decomposition.
    pub layout: BoxLayout,
    /// Electron and proton fluids.
    pub fluids: MultiFluidContainer,
    /// E, B, J and rho on the Yee mesh.
    pub fields: YeeFields,
    /// Time step, 40% of the light-crossing time of one cell.
    pub dt: f64,
}

impl BenchLevel {
    /// One full step of every species, including current deposition.
    pub fn step(&mut self) -> Result<Vec<EvolveMetrics>, FluidError> {
        self.fields.clear_sources();
        let em = ElectromagneticFields::new(&self.fields.e, &self.fields.b);
        self.fluids
            .evolve(Level(0), self.dt, &em, &mut self.fields.j, false)
    }
}

/// Build a reference benchmark level: 32³ cells in eight boxes.
pub fn reference_profile(seed: u64) -> Result<BenchLevel, FluidError> {
    build_level(seed, [32; 3], [16; 3])
}

/// Build a stress benchmark level: 64³ cells in 64 boxes.
pub fn stress_profile(seed: u64) -> Result<BenchLevel, FluidError> {
    build_level(seed, [64; 3], [16; 3])
}

fn build_level(seed: u64, cells: IntVect, max_box: IntVect) -> Result<BenchLevel, FluidError> {
    // one micron cells
    let hi = cells.map(|n| 1e-6 * f64::from(n));
    let (geom, layout) = TestGridBuilder::new()
        .cells(cells)
        .extent([0.0; 3], hi)
        .max_box(max_box)
        .build()?;

    let mut fluids = MultiFluidContainer::new(1);
    let species = [
        ("electrons", PhysicalSpecies::Electron, SlopeLimiter::Minmod),
        ("protons", PhysicalSpecies::Proton, SlopeLimiter::MonotonizedCentral),
    ];
    for (k, (name, species, limiter)) in species.into_iter().enumerate() {
        let s = seed.wrapping_add(k as u64 * 16);
        let config = FluidSpeciesConfig::builder(name)
            .species(species)
            .limiter(limiter)
            .tile_size(TileSize([16, 8, 8]))
            .injector(FluidInjector::new(
                random_density(s, &geom, DENSITY, 0.2),
                random_momentum(s, &geom, 0.05),
            ))
            .build()
            .map_err(|e| FluidError::InvalidConfig {
                species: name.to_owned(),
                reason: e.to_string(),
            })?;
        fluids.add(config)?;
    }
    fluids.allocate_level(Level(0), &layout, &geom)?;
    fluids.init_data(Level(0))?;

    let fields = YeeFields::uniform(&layout, [1e9, 0.0, 0.0], [0.0, 0.0, 10.0]);
    let dt = 0.4 * geom.cell_size()[0] / SPEED_OF_LIGHT;
    Ok(BenchLevel {
        geom,
        layout,
        fluids,
        fields,
        dt,
    })
}
