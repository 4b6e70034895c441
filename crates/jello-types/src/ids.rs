//! Grid coordinates and offsets.
//!
//! Newtype structs keep lattice coordinates from being confused with
//! flat storage indices.

use serde::{Deserialize, Serialize};

/// A cell of the lattice.
///
/// `i` is the row (running down -Y), `j` the column (+X),
/// `k` the depth (-Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

/// A signed step between two lattice cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridOffset {
    pub di: i32,
    pub dj: i32,
    pub dk: i32,
}

impl GridCoord {
    #[inline]
    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    /// Applies `offset`, returning `None` if any component leaves `0..dim`.
    #[inline]
    pub fn offset(self, offset: GridOffset, dim: usize) -> Option<Self> {
        let step = |base: usize, delta: i32| -> Option<usize> {
            let v = base as i64 + delta as i64;
            (v >= 0 && (v as usize) < dim).then_some(v as usize)
        };
        Some(Self {
            i: step(self.i, offset.di)?,
            j: step(self.j, offset.dj)?,
            k: step(self.k, offset.dk)?,
        })
    }
}

impl GridOffset {
    #[inline]
    pub const fn new(di: i32, dj: i32, dk: i32) -> Self {
        Self { di, dj, dk }
    }

    /// Number of axes this offset moves along.
    #[inline]
    pub fn axis_count(self) -> u32 {
        (self.di != 0) as u32 + (self.dj != 0) as u32 + (self.dk != 0) as u32
    }

    /// Euclidean length in grid units.
    #[inline]
    pub fn length(self) -> f32 {
        ((self.di * self.di + self.dj * self.dj + self.dk * self.dk) as f32).sqrt()
    }

    /// The same step in the opposite direction.
    #[inline]
    pub const fn reversed(self) -> Self {
        Self::new(-self.di, -self.dj, -self.dk)
    }
}

impl From<(usize, usize, usize)> for GridCoord {
    fn from((i, j, k): (usize, usize, usize)) -> Self {
        Self::new(i, j, k)
    }
}

impl From<(i32, i32, i32)> for GridOffset {
    fn from((di, dj, dk): (i32, i32, i32)) -> Self {
        Self::new(di, dj, dk)
    }
}
