//! One fluid species: its fields and the per-step stage sequence.

use std::time::Instant;

use plume_core::{FluidError, Level, SpeciesFlags, SpeciesId};
use plume_mesh::{BoxLayout, Geometry, MultiField};

use crate::advect::MusclHancockAdvector;
use crate::config::{ConfigError, FluidSpeciesConfig};
use crate::deposit::ChargeCurrentDepositor;
use crate::fields::ElectromagneticFields;
use crate::metrics::{elapsed_us, EvolveMetrics};
use crate::push::MomentumPusher;
use crate::state::{GridStateStore, LevelState};

/// A relativistic cold-fluid species.
///
/// Owns the species' density and momentum density on every allocated
/// level and sequences one time step as push, advect, then (optionally)
/// current deposition.
#[derive(Debug)]
pub struct FluidSpecies {
    id: SpeciesId,
    config: FluidSpeciesConfig,
    store: GridStateStore,
    pusher: MomentumPusher,
    advector: MusclHancockAdvector,
    depositor: ChargeCurrentDepositor,
}

impl FluidSpecies {
    /// Create a species with room for `max_levels` refinement levels.
    ///
    /// The configuration is validated again here, since its fields are
    /// public and may have been edited after [`build`](crate::FluidSpeciesConfigBuilder::build).
    pub fn new(
        id: SpeciesId,
        config: FluidSpeciesConfig,
        max_levels: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let ts = config.tile_size;
        Ok(Self {
            id,
            store: GridStateStore::new(config.name.clone(), max_levels),
            pusher: MomentumPusher::new(config.charge, config.mass, ts),
            advector: MusclHancockAdvector::new(config.limiter, ts),
            depositor: ChargeCurrentDepositor::new(config.charge, ts),
            config,
        })
    }

    /// Species identifier.
    pub fn id(&self) -> SpeciesId {
        self.id
    }

    /// Species name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Configuration the species was built from.
    pub fn config(&self) -> &FluidSpeciesConfig {
        &self.config
    }

    /// Stage flags.
    pub fn flags(&self) -> SpeciesFlags {
        self.config.flags
    }

    /// Allocate zero-filled fields for `level` on `layout`.
    pub fn allocate_level(
        &mut self,
        level: Level,
        layout: &BoxLayout,
        geom: Geometry,
    ) -> Result<(), FluidError> {
        self.store.allocate(level, layout, geom)
    }

    /// Drop the fields of `level`.
    pub fn release_level(&mut self, level: Level) {
        self.store.release(level);
    }

    /// Fields of `level`.
    pub fn state(&self, level: Level) -> Result<&LevelState, FluidError> {
        self.store.level(level)
    }

    /// Fields of `level`, mutably.
    pub fn state_mut(&mut self, level: Level) -> Result<&mut LevelState, FluidError> {
        self.store.level_mut(level)
    }

    /// Fill `level` from the configured injector profiles.
    pub fn init_data(&mut self, level: Level) -> Result<(), FluidError> {
        let c = &self.config;
        self.store
            .initialize(level, &c.injector, c.tile_size, c.comm_precision)?;
        self.check_finite(level, "init")
    }

    /// Advance `level` by `dt`: Lorentz push under `em`, self-advection,
    /// then current deposition into `j` unless `skip_deposition` is set or
    /// the species does not deposit.
    ///
    /// Stages disabled by the species flags are skipped and report zero
    /// time in the returned metrics.
    ///
    /// # Panics
    ///
    /// If a field in `em` or `j` is not on the species' box layout.
    pub fn evolve(
        &mut self,
        level: Level,
        dt: f64,
        em: &ElectromagneticFields<'_>,
        j: &mut [MultiField; 3],
        skip_deposition: bool,
    ) -> Result<EvolveMetrics, FluidError> {
        let start = Instant::now();
        let _span =
            tracing::debug_span!("fluid_evolve", species = %self.config.name, %level, dt).entered();
        let flags = self.config.flags;
        let precision = self.config.comm_precision;
        let mut metrics = EvolveMetrics::default();

        if !flags.do_not_gather {
            let t = Instant::now();
            let state = self.store.level_mut(level)?;
            self.pusher.gather_and_push(state, em, dt, precision);
            metrics.push_us = elapsed_us(t);
            self.check_finite(level, "push")?;
        }

        if !flags.do_not_push {
            let t = Instant::now();
            let state = self.store.level_mut(level)?;
            self.advector.advect(state, dt, precision)?;
            metrics.advect_us = elapsed_us(t);
            self.check_finite(level, "advect")?;
        }

        if !(flags.do_not_deposit || skip_deposition) {
            let t = Instant::now();
            self.deposit_current(level, j)?;
            metrics.deposit_us = elapsed_us(t);
        }

        metrics.nodes = self.store.level(level)?.num_valid_nodes();
        metrics.total_us = elapsed_us(start);
        tracing::debug!(
            push_us = metrics.push_us,
            advect_us = metrics.advect_us,
            deposit_us = metrics.deposit_us,
            "fluid step done"
        );
        Ok(metrics)
    }

    /// Add this species' charge density into the node-centred `rho`.
    ///
    /// # Panics
    ///
    /// If `rho` is not node-centred or not on the species' box layout.
    pub fn deposit_charge(&self, level: Level, rho: &mut MultiField) -> Result<(), FluidError> {
        let state = self.store.level(level)?;
        self.depositor.deposit_charge(state, rho);
        Ok(())
    }

    /// Add this species' current density into the staggered `j`.
    ///
    /// # Panics
    ///
    /// If a component of `j` is not on the species' box layout.
    pub fn deposit_current(
        &self,
        level: Level,
        j: &mut [MultiField; 3],
    ) -> Result<(), FluidError> {
        let state = self.store.level(level)?;
        self.depositor.deposit_current(state, j);
        Ok(())
    }

    fn check_finite(&self, level: Level, stage: &'static str) -> Result<(), FluidError> {
        if !self.config.check_finite {
            return Ok(());
        }
        match self.store.level(level)?.first_non_finite() {
            None => Ok(()),
            Some((field, node)) => {
                tracing::warn!(species = %self.config.name, %level, field, ?node, stage, "non-finite fluid state");
                Err(FluidError::NonFiniteState {
                    species: self.config.name.clone(),
                    field,
                    level,
                    node,
                    stage,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::constants::SPEED_OF_LIGHT;
    use plume_core::{ConstantDensity, ConstantMomentum, FluidInjector, PhysicalSpecies};
    use plume_mesh::{Axis, IndexType, OwnerMask};

    fn geometry() -> Geometry {
        Geometry::new([8, 4, 4], [0.0; 3], [8.0, 4.0, 4.0], [true; 3]).unwrap()
    }

    fn config() -> crate::FluidSpeciesConfigBuilder {
        FluidSpeciesConfig::builder("electrons")
            .species(PhysicalSpecies::Electron)
            .injector(FluidInjector::new(
                ConstantDensity(1e20),
                ConstantMomentum([0.1, 0.0, 0.0]),
            ))
            .check_finite(true)
    }

    fn species(config: FluidSpeciesConfig, layout: &BoxLayout) -> FluidSpecies {
        let mut s = FluidSpecies::new(SpeciesId(0), config, 1).unwrap();
        s.allocate_level(Level(0), layout, geometry()).unwrap();
        s.init_data(Level(0)).unwrap();
        s
    }

    fn em_fields(layout: &BoxLayout, e0: [f64; 3]) -> ([MultiField; 3], [MultiField; 3]) {
        let e = Axis::ALL.map(|a| {
            let mut f = MultiField::new(format!("E{a}"), layout, IndexType::cell_along(a), 1, 2);
            f.fill(e0[a.index()]);
            f
        });
        let b = Axis::ALL
            .map(|a| MultiField::new(format!("B{a}"), layout, IndexType::node_along(a), 1, 2));
        (e, b)
    }

    fn current(layout: &BoxLayout) -> [MultiField; 3] {
        Axis::ALL.map(|a| MultiField::new(format!("j{a}"), layout, IndexType::cell_along(a), 1, 1))
    }

    #[test]
    fn evolve_requires_allocated_level() {
        let layout = BoxLayout::single(geometry().domain()).unwrap();
        let mut s = FluidSpecies::new(SpeciesId(0), config().build().unwrap(), 2).unwrap();
        let (e, b) = em_fields(&layout, [0.0; 3]);
        let mut j = current(&layout);
        match s.evolve(Level(1), 1e-12, &ElectromagneticFields::new(&e, &b), &mut j, false) {
            Err(FluidError::LevelNotAllocated { level: Level(1), .. }) => {}
            other => panic!("expected LevelNotAllocated, got {other:?}"),
        }
    }

    #[test]
    fn edited_config_is_revalidated() {
        let mut c = config().build().unwrap();
        c.mass = -1.0;
        match FluidSpecies::new(SpeciesId(3), c, 1) {
            Err(ConfigError::InvalidMass { .. }) => {}
            other => panic!("expected InvalidMass, got {other:?}"),
        }
    }

    #[test]
    fn uniform_drift_deposits_uniform_current() {
        let layout = BoxLayout::chop(geometry().domain(), [4, 4, 4]).unwrap();
        let mut s = species(config().build().unwrap(), &layout);
        let (e, b) = em_fields(&layout, [0.0; 3]);
        let mut j = current(&layout);
        let metrics = s
            .evolve(Level(0), 1e-10, &ElectromagneticFields::new(&e, &b), &mut j, false)
            .unwrap();
        assert_eq!(metrics.nodes, 2 * 5 * 5 * 5);

        let u = 0.1 * SPEED_OF_LIGHT;
        let v = u / (1.0f64 + 0.01).sqrt();
        let expected = PhysicalSpecies::Electron.charge() * 1e20 * v;
        let mask = OwnerMask::for_field(&j[0], &geometry());
        let total = mask.sum(&j[0], 0);
        let count = mask.owned_count() as f64;
        assert!(((total / count - expected) / expected).abs() < 1e-12);
        assert_eq!(mask.sum(&j[1], 0), 0.0);
    }

    #[test]
    fn skip_deposition_leaves_current_untouched() {
        let layout = BoxLayout::single(geometry().domain()).unwrap();
        let mut s = species(config().build().unwrap(), &layout);
        let (e, b) = em_fields(&layout, [0.0; 3]);
        let mut j = current(&layout);
        let m = s
            .evolve(Level(0), 1e-10, &ElectromagneticFields::new(&e, &b), &mut j, true)
            .unwrap();
        assert_eq!(m.deposit_us, 0);
        assert!(j.iter().all(|f| f.blocks()[0].as_slice().iter().all(|&x| x == 0.0)));
    }

    #[test]
    fn non_depositing_species_leaves_current_untouched() {
        let layout = BoxLayout::chop(geometry().domain(), [4, 4, 4]).unwrap();
        let mut s = species(config().do_not_deposit(true).build().unwrap(), &layout);
        let (e, b) = em_fields(&layout, [0.0; 3]);
        let mut j = current(&layout);
        let m = s
            .evolve(Level(0), 1e-10, &ElectromagneticFields::new(&e, &b), &mut j, false)
            .unwrap();
        assert_eq!(m.deposit_us, 0);
        assert_eq!(m.nodes, 2 * 5 * 5 * 5);
        for f in &j {
            assert!(f.blocks().iter().all(|blk| blk.as_slice().iter().all(|&x| x == 0.0)));
        }
    }

    #[test]
    fn do_not_gather_ignores_fields() {
        let layout = BoxLayout::single(geometry().domain()).unwrap();
        let mut s = species(
            config().do_not_gather(true).do_not_push(true).build().unwrap(),
            &layout,
        );
        let before = s.state(Level(0)).unwrap().conserved(0, [1, 1, 1]);
        let (e, b) = em_fields(&layout, [1e9, 0.0, 0.0]);
        let mut j = current(&layout);
        let m = s
            .evolve(Level(0), 1e-10, &ElectromagneticFields::new(&e, &b), &mut j, true)
            .unwrap();
        assert_eq!(m.push_us + m.advect_us, 0);
        assert_eq!(s.state(Level(0)).unwrap().conserved(0, [1, 1, 1]), before);
    }

    #[test]
    fn electric_field_accelerates_fluid() {
        let layout = BoxLayout::single(geometry().domain()).unwrap();
        let mut s = species(config().do_not_push(true).build().unwrap(), &layout);
        let before = s.state(Level(0)).unwrap().conserved(0, [2, 2, 2]);
        let (e, b) = em_fields(&layout, [0.0, 1e3, 0.0]);
        let mut j = current(&layout);
        s.evolve(Level(0), 1e-12, &ElectromagneticFields::new(&e, &b), &mut j, true)
            .unwrap();
        let after = s.state(Level(0)).unwrap().conserved(0, [2, 2, 2]);
        // electrons accelerate against E
        assert!(after[2] < before[2]);
        assert_eq!(after[0], before[0]);
    }

    #[test]
    fn non_finite_state_is_reported_with_stage() {
        let layout = BoxLayout::single(geometry().domain()).unwrap();
        let mut s = species(config().do_not_gather(true).build().unwrap(), &layout);
        s.state_mut(Level(0))
            .unwrap()
            .set_conserved(0, [3, 1, 1], [f64::NAN, 0.0, 0.0, 0.0]);
        let (e, b) = em_fields(&layout, [0.0; 3]);
        let mut j = current(&layout);
        match s.evolve(Level(0), 1e-10, &ElectromagneticFields::new(&e, &b), &mut j, true) {
            Err(FluidError::NonFiniteState { stage: "advect", field: "N", .. }) => {}
            other => panic!("expected NonFiniteState after advect, got {other:?}"),
        }
    }
}
