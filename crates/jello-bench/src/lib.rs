//! # jello-bench
//!
//! Benchmark suite for the jello cube.
//!
//! Three scenarios (free fall onto the floor, release from a stretched
//! shape, squash against the floor), metric collection, and CSV export
//! for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
