//! Simulation event types.
//!
//! Small value types tagged with the tick that produced them.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Tick number (0-indexed).
    pub tick: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Tick started.
    TickBegin {
        /// Simulation time before the tick (seconds).
        sim_time: f64,
    },

    /// Tick completed.
    TickEnd {
        /// Integration steps taken during the tick.
        steps: u32,
        /// Wall-clock time for the whole tick, mesh regeneration included (seconds).
        wall_time: f64,
    },

    /// One integrator step completed.
    IntegratorStep {
        /// Step number within the tick.
        step: u32,
        /// Force evaluations performed.
        evaluations: u32,
        /// Wall-clock time for the step (seconds).
        wall_time: f64,
    },

    /// Energy snapshot at the end of a tick.
    Energy {
        /// Kinetic energy `½·m·Σ|v|²`.
        kinetic: f64,
        /// Gravitational potential energy relative to the floor.
        potential: f64,
        /// Spring potential energy.
        elastic: f64,
    },

    /// Points below the floor plane.
    FloorContact {
        /// Number of penetrating points.
        contact_count: u32,
        /// Deepest penetration.
        max_penetration: f32,
    },

    /// Lattice, evaluator, and surface rebuilt for a new resolution.
    LatticeRebuilt {
        resolution: u32,
        point_count: usize,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given tick.
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }

    /// Short name of the payload variant.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::TickBegin { .. } => "tick_begin",
            EventKind::TickEnd { .. } => "tick_end",
            EventKind::IntegratorStep { .. } => "integrator_step",
            EventKind::Energy { .. } => "energy",
            EventKind::FloorContact { .. } => "floor_contact",
            EventKind::LatticeRebuilt { .. } => "lattice_rebuilt",
            EventKind::Custom { label, .. } => label.as_str(),
        }
    }
}
