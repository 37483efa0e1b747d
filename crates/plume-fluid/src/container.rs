//! Ordered collection of fluid species.

use indexmap::IndexMap;
use plume_core::{FluidError, Level, SpeciesId};
use plume_mesh::{BoxLayout, Geometry, MultiField};

use crate::config::FluidSpeciesConfig;
use crate::fields::ElectromagneticFields;
use crate::metrics::EvolveMetrics;
use crate::species::FluidSpecies;

/// All fluid species of a simulation, keyed by name in insertion order.
///
/// Every fan-out method visits species in the order they were added and
/// stops at the first error.
#[derive(Debug)]
pub struct MultiFluidContainer {
    species: IndexMap<String, FluidSpecies>,
    max_levels: usize,
}

impl MultiFluidContainer {
    /// Empty container whose species hold up to `max_levels` levels.
    pub fn new(max_levels: usize) -> Self {
        Self {
            species: IndexMap::new(),
            max_levels,
        }
    }

    /// Add a species built from `config`. Its id is its insertion index.
    pub fn add(&mut self, config: FluidSpeciesConfig) -> Result<SpeciesId, FluidError> {
        if self.species.contains_key(&config.name) {
            return Err(FluidError::DuplicateSpecies { name: config.name });
        }
        let id = SpeciesId(self.species.len() as u32);
        let name = config.name.clone();
        let species = FluidSpecies::new(id, config, self.max_levels).map_err(|e| {
            FluidError::InvalidConfig {
                species: name.clone(),
                reason: e.to_string(),
            }
        })?;
        tracing::debug!(species = %name, id = id.0, "fluid species added");
        self.species.insert(name, species);
        Ok(id)
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether the container holds no species.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Species by name.
    pub fn get(&self, name: &str) -> Option<&FluidSpecies> {
        self.species.get(name)
    }

    /// Species by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FluidSpecies> {
        self.species.get_mut(name)
    }

    /// Species in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FluidSpecies> {
        self.species.values()
    }

    /// Species names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }

    /// Allocate `level` for every species.
    pub fn allocate_level(
        &mut self,
        level: Level,
        layout: &BoxLayout,
        geom: &Geometry,
    ) -> Result<(), FluidError> {
        for s in self.species.values_mut() {
            s.allocate_level(level, layout, geom.clone())?;
        }
        Ok(())
    }

    /// Initialise `level` of every species from its injector.
    pub fn init_data(&mut self, level: Level) -> Result<(), FluidError> {
        self.species.values_mut().try_for_each(|s| s.init_data(level))
    }

    /// Evolve every species by `dt`, returning per-species metrics in
    /// insertion order.
    pub fn evolve(
        &mut self,
        level: Level,
        dt: f64,
        em: &ElectromagneticFields<'_>,
        j: &mut [MultiField; 3],
        skip_deposition: bool,
    ) -> Result<Vec<EvolveMetrics>, FluidError> {
        self.species
            .values_mut()
            .map(|s| s.evolve(level, dt, em, j, skip_deposition))
            .collect()
    }

    /// Deposit the charge of every depositing species into `rho`.
    pub fn deposit_charge(&self, level: Level, rho: &mut MultiField) -> Result<(), FluidError> {
        for s in self.species.values() {
            if s.flags().do_not_deposit {
                continue;
            }
            s.deposit_charge(level, rho)?;
        }
        Ok(())
    }

    /// Deposit the current of every depositing species into `j`.
    pub fn deposit_current(
        &self,
        level: Level,
        j: &mut [MultiField; 3],
    ) -> Result<(), FluidError> {
        for s in self.species.values().filter(|s| !s.flags().do_not_deposit) {
            s.deposit_current(level, j)?;
        }
        Ok(())
    }
}
