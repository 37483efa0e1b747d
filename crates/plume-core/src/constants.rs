//! Physical constants in SI units (CODATA 2018).

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Square of [`SPEED_OF_LIGHT`].
pub const SPEED_OF_LIGHT_SQ: f64 = SPEED_OF_LIGHT * SPEED_OF_LIGHT;

/// Vacuum permittivity, F/m.
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;

/// Elementary charge, C.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// Electron rest mass, kg.
pub const ELECTRON_MASS: f64 = 9.109_383_701_5e-31;

/// Proton rest mass, kg.
pub const PROTON_MASS: f64 = 1.672_621_923_69e-27;
