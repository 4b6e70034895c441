//! # jello-mesh
//!
//! Turns the lattice's six boundary faces into a renderable triangle list.
//!
//! ## Key Types
//!
//! - [`CubeFace`]: the six faces and their (a, b) → lattice index maps
//! - [`SurfaceMesh`]: per-face normal accumulator plus the vertex stream
//! - [`VertexRecord`]: one interleaved position + normal vertex

pub mod faces;
pub mod normals;
pub mod surface;

pub use faces::{face_index, CubeFace};
pub use surface::{SurfaceMesh, VertexRecord};
