//! Explicit Euler integration (first-order).
//!
//! ```text
//! a      = accel(x(t), v(t))
//! x(t+dt) = x(t) + dt · v(t)
//! v(t+dt) = v(t) + dt · a
//! ```
//!
//! Positions advance with the pre-update velocity.

use std::time::Instant;

use glam::Vec3;

use jello_lattice::Lattice;

use crate::forces::SpringForceEvaluator;
use crate::strategy::{IntegratorKind, IntegratorStrategy, StepResult};

/// Explicit Euler integrator.
///
/// Keeps its acceleration buffer between steps; it is resized when the
/// lattice size changes.
#[derive(Debug, Default)]
pub struct ExplicitEuler {
    acceleration: Vec<Vec3>,
}

impl ExplicitEuler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accelerations computed by the most recent step.
    pub fn last_acceleration(&self) -> &[Vec3] {
        &self.acceleration
    }
}

impl IntegratorStrategy for ExplicitEuler {
    fn step(
        &mut self,
        lattice: &mut Lattice,
        evaluator: &SpringForceEvaluator,
        dt: f32,
    ) -> StepResult {
        let start = Instant::now();

        let n = lattice.point_count();
        self.acceleration.resize(n, Vec3::ZERO);

        evaluator.compute_accelerations_into(
            &lattice.positions,
            &lattice.velocities,
            &mut self.acceleration,
        );

        for idx in 0..n {
            lattice.positions[idx] += dt * lattice.velocities[idx];
            lattice.velocities[idx] += dt * self.acceleration[idx];
        }

        StepResult {
            evaluations: 1,
            wall_time: start.elapsed().as_secs_f64(),
        }
    }

    fn name(&self) -> &str {
        IntegratorKind::ExplicitEuler.name()
    }

    fn kind(&self) -> IntegratorKind {
        IntegratorKind::ExplicitEuler
    }
}
