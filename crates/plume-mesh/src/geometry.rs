//! Physical geometry of a level: domain box, extent and periodicity.

use plume_core::Dimensionality;
use smallvec::SmallVec;

use crate::{IndexBox, IndexType, IntVect, MeshError};

/// Mapping from index space to physical space for one level.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    domain: IndexBox,
    prob_lo: [f64; 3],
    prob_hi: [f64; 3],
    cell_size: [f64; 3],
    periodic: [bool; 3],
    dims: Dimensionality,
}

impl Geometry {
    /// A domain of `n_cells` cells spanning `[prob_lo, prob_hi]`.
    pub fn new(
        n_cells: IntVect,
        prob_lo: [f64; 3],
        prob_hi: [f64; 3],
        periodic: [bool; 3],
    ) -> Result<Self, MeshError> {
        if n_cells.iter().any(|&n| n <= 0) {
            return Err(MeshError::InvalidSize {
                what: "domain cell count",
                size: n_cells,
            });
        }
        let mut cell_size = [0.0; 3];
        for a in 0..3 {
            let (lo, hi) = (prob_lo[a], prob_hi[a]);
            if !lo.is_finite() || !hi.is_finite() || hi <= lo {
                return Err(MeshError::InvalidExtent { axis: a, lo, hi });
            }
            cell_size[a] = (hi - lo) / f64::from(n_cells[a]);
        }
        Ok(Self {
            domain: IndexBox::cells([0; 3], [n_cells[0] - 1, n_cells[1] - 1, n_cells[2] - 1]),
            prob_lo,
            prob_hi,
            cell_size,
            periodic,
            dims: Dimensionality::ThreeD,
        })
    }

    /// Use a reduced-dimensionality coordinate mapping.
    pub fn with_dimensionality(mut self, dims: Dimensionality) -> Self {
        self.dims = dims;
        self
    }

    /// Cell-centered domain box.
    pub fn domain(&self) -> IndexBox {
        self.domain
    }

    /// Domain box in the given staggering.
    pub fn domain_as(&self, ty: IndexType) -> IndexBox {
        self.domain.convert(ty)
    }

    /// Lower physical corner.
    pub fn prob_lo(&self) -> [f64; 3] {
        self.prob_lo
    }

    /// Upper physical corner.
    pub fn prob_hi(&self) -> [f64; 3] {
        self.prob_hi
    }

    /// Cell size per axis.
    pub fn cell_size(&self) -> [f64; 3] {
        self.cell_size
    }

    /// Periodicity flags per axis.
    pub fn periodicity(&self) -> [bool; 3] {
        self.periodic
    }

    /// Whether `axis` is periodic.
    pub fn is_periodic(&self, axis: usize) -> bool {
        self.periodic[axis]
    }

    /// Coordinate mapping mode.
    pub fn dimensionality(&self) -> Dimensionality {
        self.dims
    }

    /// Period along `axis` in index units (the cell count).
    pub fn period(&self, axis: usize) -> i32 {
        self.domain.len(axis) as i32
    }

    /// Physical position of node `p`.
    pub fn node_position(&self, p: IntVect) -> [f64; 3] {
        self.dims.position(p, self.prob_lo, self.cell_size)
    }

    /// All periodic image offsets, including the zero shift.
    pub fn periodic_shifts(&self) -> SmallVec<[IntVect; 27]> {
        let choices = |a: usize| -> SmallVec<[i32; 3]> {
            if self.periodic[a] {
                let l = self.period(a);
                SmallVec::from_slice(&[-l, 0, l])
            } else {
                SmallVec::from_slice(&[0])
            }
        };
        let mut out = SmallVec::new();
        for &sz in &choices(2) {
            for &sy in &choices(1) {
                for &sx in &choices(0) {
                    out.push([sx, sy, sz]);
                }
            }
        }
        out
    }

    /// Whether `p` is the canonical representative of its periodic image
    /// class. On a periodic nodal axis the upper domain node duplicates the
    /// lower one and is not canonical.
    pub fn is_canonical(&self, p: IntVect, ty: IndexType) -> bool {
        let dom = self.domain_as(ty);
        (0..3).all(|a| {
            if self.periodic[a] {
                let lo = dom.lo()[a];
                p[a] >= lo && p[a] < lo + self.period(a)
            } else {
                dom.lo()[a] <= p[a] && p[a] <= dom.hi()[a]
            }
        })
    }
}
