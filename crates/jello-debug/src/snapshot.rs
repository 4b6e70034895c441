//! State snapshot serialization for replay and debugging.
//!
//! A snapshot holds everything that persists between ticks: the lattice
//! resolution and its position/velocity buffers. Restoring one and
//! stepping with the same configuration reproduces the same trajectory.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use jello_lattice::Lattice;
use jello_types::{JelloError, JelloResult};

/// A complete simulation state snapshot, serialized with `bincode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Tick count when the snapshot was taken.
    pub tick: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    pub resolution: u32,
    /// Point positions, flat: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
    /// Point velocities, same layout as `positions`.
    pub velocities: Vec<f32>,
    pub point_count: usize,
}

fn flatten(values: &[Vec3]) -> Vec<f32> {
    let mut out = Vec::with_capacity(values.len() * 3);
    for v in values {
        out.extend_from_slice(&v.to_array());
    }
    out
}

fn unflatten(values: &[f32], what: &str) -> JelloResult<Vec<Vec3>> {
    if values.len() % 3 != 0 {
        return Err(JelloError::InvalidLattice(format!(
            "{what} buffer length {} is not a multiple of 3",
            values.len()
        )));
    }
    Ok(values
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect())
}

impl StateSnapshot {
    /// Captures `lattice`.
    pub fn from_lattice(tick: u64, sim_time: f64, lattice: &Lattice) -> Self {
        Self {
            tick,
            sim_time,
            resolution: lattice.resolution(),
            positions: flatten(&lattice.positions),
            velocities: flatten(&lattice.velocities),
            point_count: lattice.point_count(),
        }
    }

    /// Rebuilds the lattice this snapshot was taken from.
    pub fn restore(&self) -> JelloResult<Lattice> {
        let positions = unflatten(&self.positions, "position")?;
        let velocities = unflatten(&self.velocities, "velocity")?;
        if positions.len() != self.point_count {
            return Err(JelloError::InvalidLattice(format!(
                "Snapshot declares {} points but stores {}",
                self.point_count,
                positions.len()
            )));
        }
        Lattice::from_parts(self.resolution, positions, velocities)
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> JelloResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| JelloError::Serialization(format!("Snapshot serialization failed: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> JelloResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| JelloError::Serialization(format!("Snapshot deserialization failed: {e}")))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> JelloResult<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        tracing::debug!(path = %path.as_ref().display(), tick = self.tick, "snapshot saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> JelloResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Largest per-point distance between the positions of two snapshots.
    ///
    /// `None` when the snapshots hold different lattice sizes.
    pub fn max_position_delta(&self, other: &StateSnapshot) -> Option<f32> {
        if self.positions.len() != other.positions.len() {
            return None;
        }
        let delta = self
            .positions
            .chunks_exact(3)
            .zip(other.positions.chunks_exact(3))
            .map(|(a, b)| {
                let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
                (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
            })
            .fold(0.0f32, f32::max);
        Some(delta)
    }
}
