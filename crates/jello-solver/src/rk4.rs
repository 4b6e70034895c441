//! Fourth-order Runge-Kutta integration.
//!
//! Four force evaluations per step. For stage `s` the derivative is
//! `(dx_s, dv_s) = (dt · v_s, dt · accel(x_s, v_s))`, evaluated at:
//!
//! ```text
//! stage 1:  (x, v)
//! stage 2:  (x + dx_1 / 2, v + dv_1 / 2)
//! stage 3:  (x + dx_2 / 2, v + dv_2 / 2)
//! stage 4:  (x + dx_3,     v + dv_3)
//!
//! x += (dx_1 + 2·dx_2 + 2·dx_3 + dx_4) / 6
//! v += (dv_1 + 2·dv_2 + 2·dv_3 + dv_4) / 6
//! ```

use std::time::Instant;

use glam::Vec3;

use jello_lattice::Lattice;

use crate::forces::SpringForceEvaluator;
use crate::strategy::{IntegratorKind, IntegratorStrategy, StepResult};

/// Scale applied to the previous stage's derivative before each stage.
const STAGE_SCALE: [f32; 4] = [0.0, 0.5, 0.5, 1.0];

/// One stage derivative over the whole lattice.
#[derive(Debug, Clone, Default)]
pub struct StageDerivative {
    /// Position increment `dt · v_stage`.
    pub dx: Vec<Vec3>,
    /// Velocity increment `dt · a_stage`.
    pub dv: Vec<Vec3>,
}

impl StageDerivative {
    fn resize(&mut self, n: usize) {
        self.dx.resize(n, Vec3::ZERO);
        self.dv.resize(n, Vec3::ZERO);
    }
}

/// RK4 integrator with pooled buffers.
///
/// The four stage buffers are independent allocations and are only ever
/// written by their own stage. The scratch state holds the displaced
/// lattice each stage is evaluated at.
#[derive(Debug, Default)]
pub struct RungeKutta4 {
    stages: [StageDerivative; 4],
    scratch_positions: Vec<Vec3>,
    scratch_velocities: Vec<Vec3>,
    acceleration: Vec<Vec3>,
}

impl RungeKutta4 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage derivatives from the most recent step.
    pub fn stages(&self) -> &[StageDerivative; 4] {
        &self.stages
    }

    fn ensure_capacity(&mut self, n: usize) {
        for stage in &mut self.stages {
            stage.resize(n);
        }
        self.scratch_positions.resize(n, Vec3::ZERO);
        self.scratch_velocities.resize(n, Vec3::ZERO);
        self.acceleration.resize(n, Vec3::ZERO);
    }
}

impl IntegratorStrategy for RungeKutta4 {
    fn step(
        &mut self,
        lattice: &mut Lattice,
        evaluator: &SpringForceEvaluator,
        dt: f32,
    ) -> StepResult {
        let start = Instant::now();

        let n = lattice.point_count();
        self.ensure_capacity(n);

        for s in 0..4 {
            // Stage state: the base state displaced by a fraction of the
            // previous stage's derivative.
            let scale = STAGE_SCALE[s];
            if s == 0 {
                self.scratch_positions.copy_from_slice(&lattice.positions);
                self.scratch_velocities.copy_from_slice(&lattice.velocities);
            } else {
                let prev = &self.stages[s - 1];
                for idx in 0..n {
                    self.scratch_positions[idx] = lattice.positions[idx] + scale * prev.dx[idx];
                    self.scratch_velocities[idx] = lattice.velocities[idx] + scale * prev.dv[idx];
                }
            }

            evaluator.compute_accelerations_into(
                &self.scratch_positions,
                &self.scratch_velocities,
                &mut self.acceleration,
            );

            let stage = &mut self.stages[s];
            for idx in 0..n {
                stage.dx[idx] = dt * self.scratch_velocities[idx];
                stage.dv[idx] = dt * self.acceleration[idx];
            }
        }

        let [k1, k2, k3, k4] = &self.stages;
        for idx in 0..n {
            lattice.positions[idx] +=
                (k1.dx[idx] + 2.0 * k2.dx[idx] + 2.0 * k3.dx[idx] + k4.dx[idx]) / 6.0;
            lattice.velocities[idx] +=
                (k1.dv[idx] + 2.0 * k2.dv[idx] + 2.0 * k3.dv[idx] + k4.dv[idx]) / 6.0;
        }

        StepResult {
            evaluations: 4,
            wall_time: start.elapsed().as_secs_f64(),
        }
    }

    fn name(&self) -> &str {
        IntegratorKind::RungeKutta4.name()
    }

    fn kind(&self) -> IntegratorKind {
        IntegratorKind::RungeKutta4
    }
}
