//! Integer points, axes and staggering descriptors.

use std::fmt;

/// A point of the integer index space.
pub type IntVect = [i32; 3];

/// Componentwise `a + b`.
pub fn add(a: IntVect, b: IntVect) -> IntVect {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Componentwise `a - b`.
pub fn sub(a: IntVect, b: IntVect) -> IntVect {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// A coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// First axis.
    X,
    /// Second axis.
    Y,
    /// Third axis.
    Z,
}

impl Axis {
    /// All three axes in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The axis as an array index.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit offset along this axis.
    pub fn unit(self) -> IntVect {
        let mut v = [0; 3];
        v[self.index()] = 1;
        v
    }

    /// Shift `p` by `n` along this axis.
    pub fn step(self, p: IntVect, n: i32) -> IntVect {
        let mut q = p;
        q[self.index()] += n;
        q
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(s)
    }
}

/// Per-axis staggering: nodal (on vertices) or cell-centered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexType {
    nodal: [bool; 3],
}

impl IndexType {
    /// Nodal on every axis.
    pub const NODE: IndexType = IndexType { nodal: [true; 3] };
    /// Cell-centered on every axis.
    pub const CELL: IndexType = IndexType { nodal: [false; 3] };

    /// Build from per-axis nodal flags.
    pub const fn new(nodal: [bool; 3]) -> Self {
        Self { nodal }
    }

    /// Cell-centered along `axis`, nodal on the other two.
    ///
    /// The Yee staggering of E and J along `axis`, and the layout of
    /// face states between neighbouring nodes along `axis`.
    pub fn cell_along(axis: Axis) -> Self {
        let mut nodal = [true; 3];
        nodal[axis.index()] = false;
        Self { nodal }
    }

    /// Nodal along `axis`, cell-centered on the other two (Yee B).
    pub fn node_along(axis: Axis) -> Self {
        let mut nodal = [false; 3];
        nodal[axis.index()] = true;
        Self { nodal }
    }

    /// Whether the given axis is nodal.
    pub fn is_nodal(self, axis: usize) -> bool {
        self.nodal[axis]
    }

    /// Per-axis nodal flags.
    pub fn nodal_flags(self) -> [bool; 3] {
        self.nodal
    }

    /// Nodal on every axis.
    pub fn node_centered(self) -> bool {
        self.nodal.iter().all(|&n| n)
    }

    /// Cell-centered on every axis.
    pub fn cell_centered(self) -> bool {
        self.nodal.iter().all(|&n| !n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yee_types_are_complementary() {
        for axis in Axis::ALL {
            let e = IndexType::cell_along(axis);
            let b = IndexType::node_along(axis);
            for a in 0..3 {
                assert_ne!(e.is_nodal(a), b.is_nodal(a), "axis {axis}, component {a}");
            }
        }
    }

    #[test]
    fn centering_predicates() {
        assert!(IndexType::NODE.node_centered());
        assert!(IndexType::CELL.cell_centered());
        assert!(!IndexType::cell_along(Axis::Y).node_centered());
        assert!(!IndexType::cell_along(Axis::Y).cell_centered());
    }

    #[test]
    fn axis_step_moves_one_component() {
        assert_eq!(Axis::Z.step([1, 2, 3], -2), [1, 2, 1]);
        assert_eq!(add(Axis::Y.unit(), [1, 1, 1]), [1, 2, 1]);
        assert_eq!(sub([4, 4, 4], [1, 2, 3]), [3, 2, 1]);
    }
}
