//! The six boundary faces of the lattice.
//!
//! Each face is parameterized by `(a, b)` in `[0, dim)²`. The maps are
//! chosen so that stepping `a` then `b` turns counter-clockwise seen from
//! outside: `e_a × e_b` points along [`CubeFace::outward`].
//!
//! ```text
//! face     a axis   b axis   lattice coord (i, j, k)
//! front    -Y       +X       (a,      b,      0)
//! back     -Y       -X       (a,      last-b, last)
//! top      +Z       +X       (0,      b,      last-a)
//! bottom   -Z       +X       (last,   b,      a)
//! right    -Y       -Z       (a,      last,   b)
//! left     -Y       +Z       (a,      0,      last-b)
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use jello_lattice::flat_index;
use jello_types::GridCoord;

/// One face of the cube, named by its outward direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubeFace {
    /// +Z
    Front,
    /// -Z
    Back,
    /// +Y
    Top,
    /// -Y
    Bottom,
    /// +X
    Right,
    /// -X
    Left,
}

impl CubeFace {
    pub const COUNT: usize = 6;

    /// All faces in emission order.
    pub fn all() -> &'static [CubeFace; 6] {
        &[
            CubeFace::Front,
            CubeFace::Back,
            CubeFace::Top,
            CubeFace::Bottom,
            CubeFace::Right,
            CubeFace::Left,
        ]
    }

    /// Position in [`all`](Self::all).
    #[inline]
    pub fn ordinal(self) -> usize {
        match self {
            CubeFace::Front => 0,
            CubeFace::Back => 1,
            CubeFace::Top => 2,
            CubeFace::Bottom => 3,
            CubeFace::Right => 4,
            CubeFace::Left => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CubeFace::Front => "front",
            CubeFace::Back => "back",
            CubeFace::Top => "top",
            CubeFace::Bottom => "bottom",
            CubeFace::Right => "right",
            CubeFace::Left => "left",
        }
    }

    /// Unit outward normal of the face at rest.
    pub fn outward(self) -> Vec3 {
        match self {
            CubeFace::Front => Vec3::Z,
            CubeFace::Back => Vec3::NEG_Z,
            CubeFace::Top => Vec3::Y,
            CubeFace::Bottom => Vec3::NEG_Y,
            CubeFace::Right => Vec3::X,
            CubeFace::Left => Vec3::NEG_X,
        }
    }

    /// Lattice coordinate of face parameter `(a, b)`.
    #[inline]
    pub fn coord(self, a: usize, b: usize, dim: usize) -> GridCoord {
        debug_assert!(a < dim && b < dim);
        let last = dim - 1;
        match self {
            CubeFace::Front => GridCoord::new(a, b, 0),
            CubeFace::Back => GridCoord::new(a, last - b, last),
            CubeFace::Top => GridCoord::new(0, b, last - a),
            CubeFace::Bottom => GridCoord::new(last, b, a),
            CubeFace::Right => GridCoord::new(a, last, b),
            CubeFace::Left => GridCoord::new(a, 0, last - b),
        }
    }
}

/// Flat lattice index of face parameter `(a, b)` on `face`.
#[inline]
pub fn face_index(face: CubeFace, a: usize, b: usize, dim: usize) -> usize {
    flat_index(face.coord(a, b, dim), dim)
}
