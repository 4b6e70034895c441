//! # jello-solver
//!
//! Spring forces, time integration, and solver configuration.
//!
//! ## Key Types
//!
//! - [`SpringForceEvaluator`]: lattice state → per-point accelerations
//! - [`IntegratorStrategy`]: pluggable integrator trait
//! - [`ExplicitEuler`] / [`RungeKutta4`]: the two integrators
//! - [`SimulationConfig`] / [`PhysicsParams`]: configuration passed in,
//!   never read from globals
//! - [`PresetDatabase`]: named parameter sets

pub mod config;
pub mod euler;
pub mod forces;
pub mod presets;
pub mod rk4;
pub mod springs;
pub mod strategy;

pub use config::{
    CollisionParams, HookeMode, PhysicsParams, SimulationConfig, SpringCoefficients, SpringParams,
};
pub use euler::ExplicitEuler;
pub use forces::{FloorContacts, SpringForceEvaluator};
pub use presets::{Preset, PresetDatabase};
pub use rk4::{RungeKutta4, StageDerivative};
pub use springs::SpringClass;
pub use strategy::{IntegratorKind, IntegratorStrategy, StepResult};
