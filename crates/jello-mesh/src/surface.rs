//! Renderable surface of the jello cube.
//!
//! Two buffers, both owned here and overwritten in place every tick:
//!
//! - the normal accumulator, `6 · dim²` entries (one block per face)
//! - the vertex stream, 6 records per boundary quad, grouped in threes
//!   as a triangle list

use std::ops::Range;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use jello_lattice::Lattice;

use crate::faces::{face_index, CubeFace};
use crate::normals::{accumulate_face_normals, accumulator_slot, quad_corners, QUAD_TRIANGLES};

/// Records emitted per boundary quad (two triangles).
pub const RECORDS_PER_QUAD: usize = 6;

/// One vertex of the triangle list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct VertexRecord {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Surface triangles and normals for a lattice of one size.
///
/// Buffers follow the lattice: passing a lattice of a different size to
/// any of the update methods resizes them first.
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    dim: usize,
    normals: Vec<Vec3>,
    vertices: Vec<VertexRecord>,
}

impl SurfaceMesh {
    /// Empty buffers sized for a lattice of side `dim`.
    pub fn new(dim: usize) -> Self {
        let mut mesh = Self::default();
        mesh.resize(dim);
        mesh
    }

    /// Builds normals and the vertex stream for `lattice`.
    ///
    /// # Example
    /// ```
    /// use jello_lattice::Lattice;
    /// use jello_mesh::SurfaceMesh;
    ///
    /// let mesh = SurfaceMesh::for_lattice(&Lattice::build(2));
    /// // 6 faces × 4 quads × 2 triangles
    /// assert_eq!(mesh.triangle_count(), 48);
    /// assert_eq!(mesh.interleaved().len(), 48 * 3 * 6);
    /// ```
    pub fn for_lattice(lattice: &Lattice) -> Self {
        let mut mesh = Self::new(lattice.dim());
        mesh.regenerate(lattice);
        mesh
    }

    /// Number of records a lattice of side `dim` produces.
    pub fn records_for_dim(dim: usize) -> usize {
        let quads = dim.saturating_sub(1);
        CubeFace::COUNT * quads * quads * RECORDS_PER_QUAD
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn resize(&mut self, dim: usize) {
        if dim != self.dim {
            tracing::debug!(from = self.dim, to = dim, "resizing surface buffers");
        }
        self.dim = dim;
        self.normals.clear();
        self.normals.resize(CubeFace::COUNT * dim * dim, Vec3::ZERO);
        self.vertices.clear();
        self.vertices.reserve(Self::records_for_dim(dim));
    }

    fn ensure_dim(&mut self, lattice: &Lattice) {
        if lattice.dim() != self.dim {
            self.resize(lattice.dim());
        }
    }

    /// Recomputes the per-face normals from current positions.
    pub fn recompute_normals(&mut self, lattice: &Lattice) {
        self.ensure_dim(lattice);
        accumulate_face_normals(lattice, &mut self.normals);
    }

    /// Rewrites the vertex stream from current positions and the normals
    /// last computed by [`recompute_normals`](Self::recompute_normals).
    pub fn emit_vertex_stream(&mut self, lattice: &Lattice) {
        self.ensure_dim(lattice);
        let dim = self.dim;

        self.vertices.clear();
        for &face in CubeFace::all() {
            for a in 0..dim - 1 {
                for b in 0..dim - 1 {
                    let corners = quad_corners(a, b);
                    for tri in QUAD_TRIANGLES {
                        for corner in tri {
                            let (ca, cb) = corners[corner];
                            self.vertices.push(VertexRecord {
                                position: lattice.positions[face_index(face, ca, cb, dim)],
                                normal: self.normals[accumulator_slot(face, ca, cb, dim)],
                            });
                        }
                    }
                }
            }
        }
    }

    /// Normals, then the vertex stream.
    pub fn regenerate(&mut self, lattice: &Lattice) {
        self.recompute_normals(lattice);
        self.emit_vertex_stream(lattice);
    }

    /// The normal accumulator, one `dim²` block per face in
    /// [`CubeFace::all`] order.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Normal at face parameter `(a, b)`.
    pub fn normal(&self, face: CubeFace, a: usize, b: usize) -> Vec3 {
        self.normals[accumulator_slot(face, a, b, self.dim)]
    }

    pub fn vertices(&self) -> &[VertexRecord] {
        &self.vertices
    }

    /// Records belonging to `face`.
    pub fn face_range(&self, face: CubeFace) -> Range<usize> {
        let per_face = Self::records_for_dim(self.dim) / CubeFace::COUNT;
        let start = face.ordinal() * per_face;
        start..start + per_face
    }

    /// Flat `[px, py, pz, nx, ny, nz, ...]` buffer.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertices.len() * 6);
        for v in &self.vertices {
            out.extend_from_slice(&v.position.to_array());
            out.extend_from_slice(&v.normal.to_array());
        }
        out
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
