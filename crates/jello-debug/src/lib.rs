//! # jello-debug
//!
//! Inspection hooks called from the cube driver, bincode state snapshots
//! for replay, and a JSON exporter that records the vertex stream per tick.

pub mod frame_export;
pub mod hooks;
pub mod snapshot;

pub use frame_export::JsonFrameExporter;
pub use hooks::{InspectionHook, TelemetryHook, TickStats};
pub use snapshot::StateSnapshot;
