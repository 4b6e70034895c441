//! Benchmark runner: executes scenarios and collects metrics.

use std::time::Instant;

use jello_solver::IntegratorKind;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Runs a single scenario to completion.
    pub fn run(scenario: &Scenario) -> BenchmarkMetrics {
        let mut cube = scenario.build_cube();
        let initial = cube.lattice().positions.clone();

        tracing::info!(
            scenario = scenario.kind.name(),
            integrator = cube.integrator_name(),
            resolution = cube.resolution(),
            ticks = scenario.ticks,
            "benchmark started"
        );

        let mut tick_times = Vec::with_capacity(scenario.ticks as usize);
        let mut steps = 0u64;
        let mut min_height = cube.lattice().min_height();

        let total_start = Instant::now();
        for _ in 0..scenario.ticks {
            let timestamp = cube.sim_time();
            let report = cube.tick(timestamp);
            tick_times.push(report.wall_time);
            steps += report.steps as u64;
            min_height = min_height.min(cube.lattice().min_height());
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let max_displacement = cube
            .lattice()
            .positions
            .iter()
            .zip(&initial)
            .map(|(p, p0)| p.distance(*p0))
            .fold(0.0f32, f32::max);

        let avg_tick_time = if tick_times.is_empty() {
            0.0
        } else {
            tick_times.iter().sum::<f64>() / tick_times.len() as f64
        };
        let min_tick_time = tick_times.iter().copied().fold(f64::MAX, f64::min);
        let max_tick_time = tick_times.iter().copied().fold(0.0, f64::max);

        cube.finish();

        BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            integrator: cube.integrator_name().to_string(),
            resolution: cube.resolution(),
            ticks: scenario.ticks,
            steps,
            total_wall_time,
            avg_tick_time,
            min_tick_time: if tick_times.is_empty() { 0.0 } else { min_tick_time },
            max_tick_time,
            final_kinetic_energy: cube.kinetic_energy(),
            max_displacement,
            min_height,
            point_count: cube.lattice().point_count(),
            triangle_count: cube.surface().triangle_count(),
        }
    }

    /// Runs every scenario with `integrator`.
    pub fn run_all(integrator: IntegratorKind) -> Vec<BenchmarkMetrics> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind).with_integrator(integrator)))
            .collect()
    }
}
