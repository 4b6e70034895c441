//! # jello-telemetry
//!
//! Event bus for simulation telemetry. The cube driver's hooks emit
//! structured events (tick timing, integrator cost, energy, floor
//! contact, lattice rebuilds) that pluggable sinks consume.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
