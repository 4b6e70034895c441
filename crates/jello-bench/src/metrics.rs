//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    /// Integrator name (`explicit_euler` or `runge_kutta_4`).
    pub integrator: String,
    pub resolution: u32,
    /// Ticks executed.
    pub ticks: u32,
    /// Integration steps executed.
    pub steps: u64,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per tick (seconds).
    pub avg_tick_time: f64,
    pub min_tick_time: f64,
    pub max_tick_time: f64,
    /// Final kinetic energy (approaches zero once settled).
    pub final_kinetic_energy: f64,
    /// Largest point displacement from the initial state.
    pub max_displacement: f32,
    /// Lowest point height seen over the run.
    pub min_height: f32,
    pub point_count: usize,
    pub triangle_count: usize,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,integrator,resolution,point_count,triangle_count,ticks,steps,total_wall_time_s,avg_tick_ms,min_tick_ms,max_tick_ms,final_ke,max_displacement,min_height".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6}",
            self.scenario,
            self.integrator,
            self.resolution,
            self.point_count,
            self.triangle_count,
            self.ticks,
            self.steps,
            self.total_wall_time,
            self.avg_tick_time * 1000.0,
            self.min_tick_time * 1000.0,
            self.max_tick_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.min_height,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
