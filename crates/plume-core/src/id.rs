//! Strongly-typed identifiers.

use std::fmt;

/// Refinement level index. Level 0 is the coarsest (and, for the fluid
/// engine, the only fully supported) level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(pub u32);

impl Level {
    /// The base level.
    pub const BASE: Level = Level(0);

    /// The level as a vector index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Level {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a fluid species within a container.
///
/// `SpeciesId(n)` is the n-th species registered with the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesId(pub u32);

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SpeciesId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_index_matches_value() {
        assert_eq!(Level(3).index(), 3);
        assert_eq!(Level::BASE, Level::default());
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(Level(2).to_string(), "2");
        assert_eq!(SpeciesId::from(7).to_string(), "7");
    }
}
