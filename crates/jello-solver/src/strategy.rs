//! Integrator strategy trait: the core abstraction for time stepping.
//!
//! Every integrator implements this trait so the cube driver can swap
//! between explicit Euler and RK4 at runtime.

use serde::{Deserialize, Serialize};

use jello_lattice::Lattice;

use crate::euler::ExplicitEuler;
use crate::forces::SpringForceEvaluator;
use crate::rk4::RungeKutta4;

/// Result of one integration step.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepResult {
    /// Force evaluations performed.
    pub evaluations: u32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for time integrators.
///
/// The driver calls `step` with the fixed `dt` once per substep:
///
/// ```text
/// loop {
///     integrator.step(&mut lattice, &evaluator, dt);
/// }
/// ```
///
/// There is no error path. A diverging simulation is a tuning problem,
/// not a failure of the step.
///
/// # Implementations
///
/// - [`ExplicitEuler`]: one evaluation per step
/// - [`RungeKutta4`]: four evaluations per step, pooled stage buffers
pub trait IntegratorStrategy: Send {
    /// Advances `lattice` by `dt`, modifying positions and velocities in place.
    ///
    /// `evaluator` must have been built for `lattice`'s dimensions.
    fn step(
        &mut self,
        lattice: &mut Lattice,
        evaluator: &SpringForceEvaluator,
        dt: f32,
    ) -> StepResult;

    /// Returns the integrator's name.
    fn name(&self) -> &str;

    fn kind(&self) -> IntegratorKind;
}

/// Selects an integrator by name in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    #[serde(alias = "euler")]
    ExplicitEuler,
    #[default]
    #[serde(rename = "runge_kutta_4", alias = "rk4")]
    RungeKutta4,
}

impl IntegratorKind {
    pub fn all() -> &'static [IntegratorKind] {
        &[IntegratorKind::ExplicitEuler, IntegratorKind::RungeKutta4]
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntegratorKind::ExplicitEuler => "explicit_euler",
            IntegratorKind::RungeKutta4 => "runge_kutta_4",
        }
    }

    /// Parses CLI-style names (`euler`, `rk4`, or the full names).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "euler" | "explicit_euler" => Some(IntegratorKind::ExplicitEuler),
            "rk4" | "runge_kutta_4" => Some(IntegratorKind::RungeKutta4),
            _ => None,
        }
    }

    /// Force evaluations per step.
    pub fn evaluations_per_step(&self) -> u32 {
        match self {
            IntegratorKind::ExplicitEuler => 1,
            IntegratorKind::RungeKutta4 => 4,
        }
    }

    /// Creates a boxed integrator of this kind.
    pub fn create(&self) -> Box<dyn IntegratorStrategy> {
        match self {
            IntegratorKind::ExplicitEuler => Box::new(ExplicitEuler::new()),
            IntegratorKind::RungeKutta4 => Box::new(RungeKutta4::new()),
        }
    }
}
