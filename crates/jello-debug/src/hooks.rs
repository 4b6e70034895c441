//! Inspection hooks for live debugging.
//!
//! Hooks are registered on the cube driver and called at fixed points of
//! every tick. They observe; they never modify the lattice.

use std::sync::mpsc;

use jello_telemetry::events::{EventKind, SimulationEvent};
use jello_telemetry::EventBus;

/// End-of-tick measurements handed to [`InspectionHook::on_tick_end`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    /// Integration steps taken.
    pub steps: u32,
    /// Wall-clock time for the tick, mesh regeneration included (seconds).
    pub wall_time: f64,
    pub kinetic_energy: f64,
    /// Gravitational potential relative to the floor.
    pub potential_energy: f64,
    pub elastic_energy: f64,
    /// Points below the floor.
    pub floor_contacts: u32,
    pub max_penetration: f32,
}

impl TickStats {
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy + self.elastic_energy
    }
}

/// Trait for simulation inspection hooks.
///
/// # Lifecycle
///
/// ```text
/// on_rebuild                     (construction, every resolution change)
/// for each tick:
///   on_tick_begin
///   for each integration step:
///     on_step
///   on_tick_end
/// on_simulation_end
/// ```
pub trait InspectionHook: Send {
    /// Called before the first step of a tick.
    fn on_tick_begin(&mut self, tick: u64, sim_time: f64) {
        let _ = (tick, sim_time);
    }

    /// Called after each integration step.
    fn on_step(&mut self, tick: u64, step: u32, evaluations: u32, wall_time: f64) {
        let _ = (tick, step, evaluations, wall_time);
    }

    /// Called after the mesh has been regenerated.
    fn on_tick_end(&mut self, tick: u64, stats: &TickStats) {
        let _ = (tick, stats);
    }

    /// Called when the lattice is (re)built.
    fn on_rebuild(&mut self, tick: u64, resolution: u32, point_count: usize) {
        let _ = (tick, resolution, point_count);
    }

    /// Called when the simulation completes.
    fn on_simulation_end(&mut self) {}

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Hook that translates driver calls into telemetry events.
///
/// Unconnected, events are buffered until [`drain_events`](Self::drain_events).
/// Connected to a bus, they go straight onto its channel.
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
    sender: Option<mpsc::Sender<SimulationEvent>>,
    /// Emit `IntegratorStep` events (one per step, can be many).
    record_steps: bool,
}

impl TelemetryHook {
    /// Creates a buffering hook.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            sender: None,
            record_steps: true,
        }
    }

    /// Creates a hook that feeds `bus`.
    pub fn connected(bus: &EventBus) -> Self {
        Self {
            sender: Some(bus.sender()),
            ..Self::new()
        }
    }

    /// Skips per-step events.
    pub fn without_steps(mut self) -> Self {
        self.record_steps = false;
        self
    }

    /// Drains buffered events for dispatch.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, tick: u64, kind: EventKind) {
        let event = SimulationEvent::new(tick, kind);
        match &self.sender {
            Some(sender) => {
                if let Err(err) = sender.send(event) {
                    // Bus dropped: keep the event locally instead.
                    self.events.push(err.0);
                }
            }
            None => self.events.push(event),
        }
    }
}

impl Default for TelemetryHook {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectionHook for TelemetryHook {
    fn on_tick_begin(&mut self, tick: u64, sim_time: f64) {
        self.push(tick, EventKind::TickBegin { sim_time });
    }

    fn on_step(&mut self, tick: u64, step: u32, evaluations: u32, wall_time: f64) {
        if self.record_steps {
            self.push(
                tick,
                EventKind::IntegratorStep {
                    step,
                    evaluations,
                    wall_time,
                },
            );
        }
    }

    fn on_tick_end(&mut self, tick: u64, stats: &TickStats) {
        self.push(
            tick,
            EventKind::Energy {
                kinetic: stats.kinetic_energy,
                potential: stats.potential_energy,
                elastic: stats.elastic_energy,
            },
        );
        if stats.floor_contacts > 0 {
            self.push(
                tick,
                EventKind::FloorContact {
                    contact_count: stats.floor_contacts,
                    max_penetration: stats.max_penetration,
                },
            );
        }
        self.push(
            tick,
            EventKind::TickEnd {
                steps: stats.steps,
                wall_time: stats.wall_time,
            },
        );
    }

    fn on_rebuild(&mut self, tick: u64, resolution: u32, point_count: usize) {
        self.push(
            tick,
            EventKind::LatticeRebuilt {
                resolution,
                point_count,
            },
        );
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}
