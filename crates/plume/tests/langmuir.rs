//! End-to-end plasma physics through the facade: a cold Langmuir
//! oscillation coupled to a toy Ampère solver, and a relativistic drift.

use std::f64::consts::{PI, TAU};

use plume::prelude::*;
use plume::types::constants::{ELECTRON_MASS, ELEMENTARY_CHARGE, EPSILON_0, SPEED_OF_LIGHT};
use plume_test_utils::{owned_sum, TestGridBuilder, YeeFields};

const N0: f64 = 1e24;
const U0: f64 = 0.01;
const NX: i32 = 32;

fn plasma_frequency() -> f64 {
    (N0 * ELEMENTARY_CHARGE * ELEMENTARY_CHARGE / (ELECTRON_MASS * EPSILON_0)).sqrt()
}

/// One wavelength `2πc/ωp` along x, two cells across.
fn langmuir_grid() -> (Geometry, BoxLayout) {
    let l = TAU * SPEED_OF_LIGHT / plasma_frequency();
    let dx = l / f64::from(NX);
    TestGridBuilder::new()
        .cells([NX, 2, 2])
        .extent([0.0; 3], [l, 2.0 * dx, 2.0 * dx])
        .max_box([16, 2, 2])
        .build()
        .unwrap()
}

fn electrons(geom: &Geometry, layout: &BoxLayout) -> FluidSpecies {
    let k = TAU / geom.prob_hi()[0];
    let config = FluidSpeciesConfig::builder("electrons")
        .species(PhysicalSpecies::Electron)
        .injector(FluidInjector::new(
            ConstantDensity(N0),
            move |x: f64, _y: f64, _z: f64| [U0 * (k * x).sin(), 0.0, 0.0],
        ))
        .check_finite(true)
        .build()
        .unwrap();
    let mut s = FluidSpecies::new(SpeciesId(0), config, 1).unwrap();
    s.allocate_level(Level(0), layout, geom.clone()).unwrap();
    s.init_data(Level(0)).unwrap();
    s
}

#[test]
fn langmuir_wave_oscillates_at_the_plasma_frequency() {
    let (geom, layout) = langmuir_grid();
    let mut s = electrons(&geom, &layout);
    let mut y = YeeFields::new(&layout);
    let wp = plasma_frequency();
    let steps = 100;
    let dt = TAU / wp / f64::from(steps);
    let k = TAU / geom.prob_hi()[0];

    let mut e_peak: f64 = 0.0;
    for _ in 0..steps {
        y.clear_sources();
        let em = ElectromagneticFields::new(&y.e, &y.b);
        s.evolve(Level(0), dt, &em, &mut y.j, false).unwrap();
        y.ampere_update(&geom, dt);
        for blk in y.e[0].blocks() {
            let valid = blk.valid_box();
            e_peak = valid.iter().fold(e_peak, |m, p| m.max(blk.get(p, 0).abs()));
        }
    }

    // after one plasma period the momentum profile is back where it started
    let st = s.state(Level(0)).unwrap();
    let amplitude = U0 * SPEED_OF_LIGHT;
    for b in 0..layout.len() {
        let valid = st.density().block(b).valid_box();
        for p in valid.iter() {
            let q = st.conserved(b, p);
            let x = geom.node_position(p)[0];
            let expected = amplitude * (k * x).sin();
            let u = q[1] / q[0];
            assert!(
                (u - expected).abs() < 0.05 * amplitude,
                "u at {p:?}: {u:e} vs {expected:e}"
            );
        }
    }

    // E = (m/e)·u0·c·ωp·sin(kx)·sin(ωp t)
    let e_expected = ELECTRON_MASS * amplitude * wp / ELEMENTARY_CHARGE;
    assert!(
        ((e_peak - e_expected) / e_expected).abs() < 0.05,
        "peak E {e_peak:e} vs {e_expected:e}"
    );
}

#[test]
fn total_charge_is_conserved_through_the_oscillation() {
    let (geom, layout) = langmuir_grid();
    let mut s = electrons(&geom, &layout);
    let mut y = YeeFields::new(&layout);
    let dt = PI / plasma_frequency() / 50.0;

    let mut rho = MultiField::new("rho", &layout, IndexType::NODE, 1, 0);
    s.deposit_charge(Level(0), &mut rho).unwrap();
    let q0 = owned_sum(&rho, &geom);

    for _ in 0..25 {
        y.clear_sources();
        let em = ElectromagneticFields::new(&y.e, &y.b);
        s.evolve(Level(0), dt, &em, &mut y.j, false).unwrap();
        y.ampere_update(&geom, dt);
    }

    rho.fill(0.0);
    s.deposit_charge(Level(0), &mut rho).unwrap();
    let q1 = owned_sum(&rho, &geom);
    assert!(((q1 - q0) / q0).abs() < 1e-12, "total charge {q0:e} -> {q1:e}");
}

#[test]
fn relativistic_drift_leaves_a_uniform_plasma_unchanged() {
    let (geom, layout) = TestGridBuilder::new()
        .cells([8, 8, 8])
        .extent([0.0; 3], [8e-6; 3])
        .max_box([4, 8, 4])
        .build()
        .unwrap();
    let u = [2.0, -1.0, 0.5];
    let mut fluids = MultiFluidContainer::new(1);
    fluids
        .add(
            FluidSpeciesConfig::builder("beam")
                .species(PhysicalSpecies::Electron)
                .injector(FluidInjector::new(ConstantDensity(N0), ConstantMomentum(u)))
                .limiter(SlopeLimiter::MonotonizedCentral)
                .build()
                .unwrap(),
        )
        .unwrap();
    fluids.allocate_level(Level(0), &layout, &geom).unwrap();
    fluids.init_data(Level(0)).unwrap();

    let mut y = YeeFields::new(&layout);
    let dt = 0.3 * 1e-6 / SPEED_OF_LIGHT;
    for _ in 0..5 {
        y.clear_sources();
        let em = ElectromagneticFields::new(&y.e, &y.b);
        fluids.evolve(Level(0), dt, &em, &mut y.j, false).unwrap();
    }

    let gamma = (1.0 + u.iter().map(|c| c * c).sum::<f64>()).sqrt();
    let st = fluids.get("beam").unwrap().state(Level(0)).unwrap();
    let q = st.conserved(0, [2, 3, 2]);
    assert!(((q[0] - N0) / N0).abs() < 1e-12);
    for a in Axis::ALL {
        let i = a.index();
        let expected_nu = N0 * u[i] * SPEED_OF_LIGHT;
        assert!(((q[i + 1] - expected_nu) / expected_nu).abs() < 1e-12);

        // j = q·N·v on every owned edge
        let expected_j = -ELEMENTARY_CHARGE * N0 * u[i] * SPEED_OF_LIGHT / gamma;
        let f = &y.j[i];
        let mask = OwnerMask::for_field(f, &geom);
        for (b, blk) in f.blocks().iter().enumerate() {
            let valid = blk.valid_box();
            for p in valid.iter().filter(|&p| mask.is_owned(b, p)) {
                let got = blk.get(p, 0);
                assert!(
                    ((got - expected_j) / expected_j).abs() < 1e-10,
                    "j{a} at {p:?}: {got:e} vs {expected_j:e}"
                );
            }
        }
    }
}
