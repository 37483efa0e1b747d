//! Borrowed views of the field solver's electromagnetic state.

use plume_mesh::{Axis, MultiField};

/// Read-only electric and magnetic fields, each component on its own
/// (typically Yee-staggered) layout sharing the fluid's boxes.
#[derive(Clone, Copy, Debug)]
pub struct ElectromagneticFields<'a> {
    e: &'a [MultiField; 3],
    b: &'a [MultiField; 3],
}

impl<'a> ElectromagneticFields<'a> {
    /// Wrap the six field components.
    pub fn new(e: &'a [MultiField; 3], b: &'a [MultiField; 3]) -> Self {
        Self { e, b }
    }

    /// Electric field component along `axis`.
    pub fn e(&self, axis: Axis) -> &'a MultiField {
        &self.e[axis.index()]
    }

    /// Magnetic field component along `axis`.
    pub fn b(&self, axis: Axis) -> &'a MultiField {
        &self.b[axis.index()]
    }

    /// All six components, E first.
    pub fn components(&self) -> impl Iterator<Item = &'a MultiField> {
        let (e, b) = (self.e, self.b);
        e.iter().chain(b.iter())
    }
}
