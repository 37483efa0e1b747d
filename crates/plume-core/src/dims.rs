//! Spatial dimensionality of a simulation.

use std::fmt;

/// How grid indices map onto physical coordinates.
///
/// Storage is always three-dimensional; reduced modes collapse the unused
/// grid axes and hold the missing physical coordinate at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    /// Full Cartesian (x, y, z).
    #[default]
    ThreeD,
    /// Cartesian slab: grid axes 0 and 1 are x and z.
    Xz,
    /// Cylindrical: grid axes 0 and 1 are r and z.
    Rz,
    /// Single axis along z.
    OneD,
}

impl Dimensionality {
    /// Physical position of a grid point given per-axis `origin` and
    /// `spacing` (in grid-axis order).
    pub fn position(self, index: [i32; 3], origin: [f64; 3], spacing: [f64; 3]) -> [f64; 3] {
        let along = |axis: usize| origin[axis] + f64::from(index[axis]) * spacing[axis];
        match self {
            Self::ThreeD => [along(0), along(1), along(2)],
            Self::Xz | Self::Rz => [along(0), 0.0, along(1)],
            Self::OneD => [0.0, 0.0, along(0)],
        }
    }

    /// Whether this is the full three-dimensional case.
    pub fn is_three_d(self) -> bool {
        matches!(self, Self::ThreeD)
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ThreeD => "3D",
            Self::Xz => "XZ",
            Self::Rz => "RZ",
            Self::OneD => "1D",
        };
        f.write_str(s)
    }
}
