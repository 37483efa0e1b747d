//! Symmetric slope limiters.

/// Limiter combining the backward and forward differences at a node into
/// one slope.
///
/// Every variant is symmetric, returns `a` when both differences equal `a`,
/// returns zero at extrema (differences of opposite sign or either zero),
/// and otherwise lies between the two differences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SlopeLimiter {
    /// The smaller difference in magnitude. Most diffusive.
    #[default]
    Minmod,
    /// Harmonic mean `2ab/(a+b)`.
    VanLeer,
    /// `min(2|a|, 2|b|, |a+b|/2)` with the common sign.
    MonotonizedCentral,
}

impl SlopeLimiter {
    /// Limited slope from backward difference `back` and forward
    /// difference `fwd`.
    #[inline]
    pub fn ave(self, back: f64, fwd: f64) -> f64 {
        if back == 0.0 || fwd == 0.0 || back.is_sign_negative() != fwd.is_sign_negative() {
            return 0.0;
        }
        match self {
            Self::Minmod => {
                if back.abs() < fwd.abs() {
                    back
                } else {
                    fwd
                }
            }
            // ordered to avoid overflow of back*fwd
            Self::VanLeer => 2.0 * back / (back + fwd) * fwd,
            Self::MonotonizedCentral => {
                let mag = (2.0 * back.abs())
                    .min(2.0 * fwd.abs())
                    .min(0.5 * (back + fwd).abs());
                mag.copysign(back)
            }
        }
    }
}
