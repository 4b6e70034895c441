//! Per-tick summary returned by [`JelloCube::tick`](crate::JelloCube::tick).

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Index of the tick (0 for the first).
    pub tick: u64,
    /// Integration steps taken.
    pub steps: u32,
    /// Force evaluations across all steps.
    pub evaluations: u32,
    /// Simulation time after the tick (seconds).
    pub sim_time: f64,
    /// Wall-clock time including mesh regeneration (seconds).
    pub wall_time: f64,
}
