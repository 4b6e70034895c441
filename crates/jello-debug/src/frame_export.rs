//! JSON frame exporter: records the vertex stream for offline viewing.
//!
//! Captures the interleaved `[px, py, pz, nx, ny, nz]` stream of every
//! submitted tick and writes the whole animation as one JSON document.
//! Groups of three records form a triangle, so no index buffer is needed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use jello_mesh::SurfaceMesh;
use jello_types::{JelloError, JelloResult};

/// Floats per vertex record.
pub const RECORD_STRIDE: usize = 6;

/// One captured tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    pub tick: u64,
    pub sim_time: f64,
    /// Interleaved position + normal, `RECORD_STRIDE` floats per vertex.
    pub vertices: Vec<f32>,
}

/// The document written by [`JsonFrameExporter::finalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    pub resolution: u32,
    pub stride: usize,
    pub frames: Vec<FrameData>,
}

impl AnimationData {
    /// Vertex count of each frame. Frames may differ if the resolution
    /// changed mid-recording.
    pub fn vertex_counts(&self) -> Vec<usize> {
        self.frames
            .iter()
            .map(|f| f.vertices.len() / self.stride)
            .collect()
    }
}

/// Exports simulation frames to a JSON file.
///
/// ```text
/// let mut exporter = JsonFrameExporter::new("frames.json", resolution);
/// // each tick:
/// exporter.submit_frame(tick, sim_time, cube.surface());
/// exporter.finalize()?;
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    resolution: u32,
    frames: Vec<FrameData>,
}

impl JsonFrameExporter {
    pub fn new(output_path: impl AsRef<Path>, resolution: u32) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
            resolution,
            frames: Vec::new(),
        }
    }

    /// Records the current vertex stream of `surface`.
    pub fn submit_frame(&mut self, tick: u64, sim_time: f64, surface: &SurfaceMesh) {
        self.frames.push(FrameData {
            tick,
            sim_time,
            vertices: surface.interleaved(),
        });
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Serializes the recorded frames without consuming them.
    pub fn to_json_string(&self) -> JelloResult<String> {
        let data = AnimationData {
            resolution: self.resolution,
            stride: RECORD_STRIDE,
            frames: self.frames.clone(),
        };
        serde_json::to_string(&data)
            .map_err(|e| JelloError::Serialization(format!("JSON serialization failed: {e}")))
    }

    /// Writes the JSON file and clears the recorded frames.
    pub fn finalize(&mut self) -> JelloResult<()> {
        let json = self.to_json_string()?;
        std::fs::write(&self.output_path, json)?;
        tracing::info!(
            path = %self.output_path.display(),
            frames = self.frames.len(),
            "frames exported"
        );
        self.frames.clear();
        Ok(())
    }

    /// Parses a document written by [`finalize`](Self::finalize).
    pub fn read(path: impl AsRef<Path>) -> JelloResult<AnimationData> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| JelloError::Serialization(format!("JSON parse failed: {e}")))
    }
}
