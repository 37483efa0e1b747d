//! Test fixtures for Plume development.
//!
//! Provides a [`TestGridBuilder`] for periodic geometries and box layouts,
//! [`YeeFields`] holding a field solver's staggered E, B, J and rho with a
//! toy Ampère update, and (in [`fixtures`]) seeded random profiles and
//! states.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use plume_core::constants::EPSILON_0;
use plume_mesh::{
    Axis, BoxLayout, CommPrecision, Geometry, IndexType, IntVect, MeshError, MultiField,
    OwnerMask,
};

/// Builder for a test level: geometry plus box layout.
///
/// Defaults to an 8×8×8 fully periodic domain of unit cells held in a
/// single box.
#[derive(Clone, Debug)]
pub struct TestGridBuilder {
    n_cells: IntVect,
    prob_lo: [f64; 3],
    prob_hi: Option<[f64; 3]>,
    max_box: Option<IntVect>,
    periodic: [bool; 3],
}

impl TestGridBuilder {
    pub fn new() -> Self {
        Self {
            n_cells: [8; 3],
            prob_lo: [0.0; 3],
            prob_hi: None,
            max_box: None,
            periodic: [true; 3],
        }
    }

    pub fn cells(mut self, n_cells: IntVect) -> Self {
        self.n_cells = n_cells;
        self
    }

    /// Physical extent. Defaults to one metre per cell.
    pub fn extent(mut self, lo: [f64; 3], hi: [f64; 3]) -> Self {
        self.prob_lo = lo;
        self.prob_hi = Some(hi);
        self
    }

    /// Chop the domain into boxes of at most `max_box` cells.
    pub fn max_box(mut self, max_box: IntVect) -> Self {
        self.max_box = Some(max_box);
        self
    }

    pub fn periodic(mut self, periodic: [bool; 3]) -> Self {
        self.periodic = periodic;
        self
    }

    pub fn build(self) -> Result<(Geometry, BoxLayout), MeshError> {
        let hi = self.prob_hi.unwrap_or_else(|| {
            std::array::from_fn(|a| self.prob_lo[a] + f64::from(self.n_cells[a]))
        });
        let geom = Geometry::new(self.n_cells, self.prob_lo, hi, self.periodic)?;
        let layout = match self.max_box {
            Some(max) => BoxLayout::chop(geom.domain(), max)?,
            None => BoxLayout::single(geom.domain())?,
        };
        Ok((geom, layout))
    }
}

impl Default for TestGridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Physical position of point `p` of staggering `ty` in a 3-D geometry.
pub fn staggered_position(geom: &Geometry, ty: IndexType, p: IntVect) -> [f64; 3] {
    let x = geom.node_position(p);
    let dx = geom.cell_size();
    std::array::from_fn(|a| if ty.is_nodal(a) { x[a] } else { x[a] + 0.5 * dx[a] })
}

/// Set component 0 of `field` at every valid point from its position,
/// then refresh ghosts.
pub fn fill_from_position(field: &mut MultiField, geom: &Geometry, f: impl Fn([f64; 3]) -> f64) {
    let ty = field.index_type();
    for block in field.blocks_mut() {
        let valid = block.valid_box();
        for p in valid.iter() {
            block.set(p, 0, f(staggered_position(geom, ty, p)));
        }
    }
    field.fill_boundary(geom, CommPrecision::Double);
}

/// Sum of component 0 over owned points, each physical point once.
pub fn owned_sum(field: &MultiField, geom: &Geometry) -> f64 {
    OwnerMask::for_field(field, geom).sum(field, 0)
}

/// A field solver's state on the Yee mesh: `E` and `J` edge-centred, `B`
/// face-centred, `rho` nodal.
#[derive(Clone, Debug)]
pub struct YeeFields {
    pub e: [MultiField; 3],
    pub b: [MultiField; 3],
    pub j: [MultiField; 3],
    pub rho: MultiField,
}

impl YeeFields {
    /// Zero fields on `layout` with two ghost layers.
    pub fn new(layout: &BoxLayout) -> Self {
        let edge = |name: &str, a: Axis| {
            MultiField::new(format!("{name}{a}"), layout, IndexType::cell_along(a), 1, 2)
        };
        Self {
            e: Axis::ALL.map(|a| edge("E", a)),
            b: Axis::ALL.map(|a| {
                MultiField::new(format!("B{a}"), layout, IndexType::node_along(a), 1, 2)
            }),
            j: Axis::ALL.map(|a| edge("j", a)),
            rho: MultiField::new("rho", layout, IndexType::NODE, 1, 2),
        }
    }

    /// Uniform electric and magnetic fields.
    pub fn uniform(layout: &BoxLayout, e: [f64; 3], b: [f64; 3]) -> Self {
        let mut y = Self::new(layout);
        for a in Axis::ALL {
            y.e[a.index()].fill(e[a.index()]);
            y.b[a.index()].fill(b[a.index()]);
        }
        y
    }

    /// Zero the current and charge accumulators.
    pub fn clear_sources(&mut self) {
        for f in &mut self.j {
            f.fill(0.0);
        }
        self.rho.fill(0.0);
    }

    /// Ampère's law without curl B: `E -= dt·j/ε0` at every valid point,
    /// then a halo exchange of E.
    ///
    /// `j` holds only owned contributions, so shared points are summed
    /// over blocks before the update.
    pub fn ampere_update(&mut self, geom: &Geometry, dt: f64) {
        for a in Axis::ALL {
            let j = &self.j[a.index()];
            let e = &mut self.e[a.index()];
            let total = |p: IntVect| -> f64 {
                j.blocks()
                    .iter()
                    .filter(|blk| blk.valid_box().contains(p))
                    .map(|blk| blk.get(p, 0))
                    .sum()
            };
            let updates: Vec<Vec<(IntVect, f64)>> = e
                .blocks()
                .iter()
                .map(|blk| {
                    let valid = blk.valid_box();
                    valid
                        .iter()
                        .map(|p| (p, blk.get(p, 0) - dt * total(canonical(geom, p)) / EPSILON_0))
                        .collect()
                })
                .collect();
            for (blk, values) in e.blocks_mut().iter_mut().zip(updates) {
                for (p, v) in values {
                    blk.set(p, 0, v);
                }
            }
            e.fill_boundary(geom, CommPrecision::Double);
        }
    }
}

/// Periodic representative of `p` inside the domain.
fn canonical(geom: &Geometry, p: IntVect) -> IntVect {
    std::array::from_fn(|a| {
        if geom.is_periodic(a) {
            p[a].rem_euclid(geom.period(a))
        } else {
            p[a]
        }
    })
}
