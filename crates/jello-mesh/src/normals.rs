//! Per-face vertex normals from lattice positions.
//!
//! Each face keeps its own `dim²` block of normals, so points on a cube
//! edge carry one normal per adjacent face and edges stay sharp.

use glam::Vec3;

use jello_lattice::Lattice;

use crate::faces::{face_index, CubeFace};

/// Lengths at or below this are left unnormalized.
const MIN_NORMAL_LENGTH: f32 = 1e-10;

/// Slot of face parameter `(a, b)` in the normal accumulator.
#[inline]
pub fn accumulator_slot(face: CubeFace, a: usize, b: usize, dim: usize) -> usize {
    face.ordinal() * dim * dim + a * dim + b
}

/// Face parameters of the corners of quad `(a, b)`, as `[p00, p01, p11, p10]`
/// where the first digit steps `a` and the second steps `b`.
#[inline]
pub fn quad_corners(a: usize, b: usize) -> [(usize, usize); 4] {
    [(a, b), (a, b + 1), (a + 1, b + 1), (a + 1, b)]
}

/// The quad's two triangles as corner positions in `[p00, p01, p11, p10]`:
/// `(p00, p11, p01)` and `(p00, p10, p11)`.
pub const QUAD_TRIANGLES: [[usize; 3]; 2] = [[0, 2, 1], [0, 3, 2]];

/// Recomputes area-weighted normals into `normals` (length `6·dim²`).
///
/// Every triangle's unnormalized cross product is added to its three
/// corners; non-degenerate sums are then normalized.
pub fn accumulate_face_normals(lattice: &Lattice, normals: &mut [Vec3]) {
    let dim = lattice.dim();
    debug_assert_eq!(normals.len(), CubeFace::COUNT * dim * dim);

    normals.fill(Vec3::ZERO);

    for &face in CubeFace::all() {
        for a in 0..dim - 1 {
            for b in 0..dim - 1 {
                let corners = quad_corners(a, b);
                let points = corners.map(|(ca, cb)| lattice.positions[face_index(face, ca, cb, dim)]);

                for tri in QUAD_TRIANGLES {
                    let p0 = points[tri[0]];
                    let n = (points[tri[1]] - p0).cross(points[tri[2]] - p0);
                    for corner in tri {
                        let (ca, cb) = corners[corner];
                        normals[accumulator_slot(face, ca, cb, dim)] += n;
                    }
                }
            }
        }
    }

    for n in normals.iter_mut() {
        let len = n.length();
        if len > MIN_NORMAL_LENGTH {
            *n /= len;
        }
    }
}
