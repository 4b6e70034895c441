//! Pluggable event sinks.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events in memory.
///
/// Clones share the same storage, so a test can keep one clone and hand
/// the other to the bus.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SimulationEvent>> {
        // A panic while pushing cannot leave the Vec inconsistent.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copies of all collected events.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of collected events whose label is `label`.
    pub fn count(&self, label: &str) -> usize {
        self.lock().iter().filter(|e| e.label() == label).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.lock().push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing`.
///
/// Per-step events go to `trace`, everything else to `debug`, so a
/// default subscriber stays quiet.
#[derive(Debug, Default)]
pub struct TracingSink {
    handled: u64,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events handled so far.
    pub fn handled(&self) -> u64 {
        self.handled
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.handled += 1;
        match &event.kind {
            EventKind::IntegratorStep { .. } => {
                tracing::trace!(tick = event.tick, event = ?event.kind, "simulation_event");
            }
            _ => {
                tracing::debug!(tick = event.tick, event = ?event.kind, "simulation_event");
            }
        }
    }

    fn finalize(&mut self) {
        tracing::debug!(events = self.handled, "telemetry finished");
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
