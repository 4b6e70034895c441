//! # jello-cube
//!
//! The per-tick driver. A [`JelloCube`] owns the lattice, the force
//! evaluator built for it, the active integrator, and the surface mesh,
//! and keeps the four consistent across resolution changes.
//!
//! ```text
//! tick(timestamp):
//!     repeat steps_per_tick: integrator.step(lattice, evaluator, dt)
//!     surface.regenerate(lattice)
//! ```

pub mod cube;
pub mod report;

pub use cube::JelloCube;
pub use report::TickReport;

pub use jello_debug::{InspectionHook, StateSnapshot, TickStats};
pub use jello_mesh::VertexRecord;
pub use jello_solver::{IntegratorKind, PhysicsParams, SimulationConfig};
