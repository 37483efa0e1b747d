//! Per-step timing of the fluid stages.

use std::time::Instant;

/// Timing of one [`FluidSpecies::evolve`](crate::FluidSpecies::evolve) call.
///
/// All durations are in microseconds. Skipped stages report zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvolveMetrics {
    /// Wall-clock time for the whole step.
    pub total_us: u64,
    /// Field gather and Lorentz push, including its halo exchange.
    pub push_us: u64,
    /// Both advection passes and the final halo exchange.
    pub advect_us: u64,
    /// Current deposition.
    pub deposit_us: u64,
    /// Valid nodes advanced by the step, summed over blocks.
    pub nodes: usize,
}

/// Microseconds elapsed since `start`.
pub(crate) fn elapsed_us(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}
