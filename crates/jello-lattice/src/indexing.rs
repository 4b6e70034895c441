//! Index mapping between grid coordinates and flat storage.
//!
//! Layout is depth-major: `idx = k·dim² + i·dim + j`. Every crate that
//! touches lattice storage goes through these functions.

use jello_types::{GridCoord, GridOffset};

/// Flat storage index of `coord` in a lattice of side `dim`.
///
/// # Example
/// ```
/// use jello_lattice::{flat_index, grid_coord};
/// use jello_types::GridCoord;
///
/// let c = GridCoord::new(1, 2, 3);
/// let idx = flat_index(c, 4);
/// assert_eq!(idx, 3 * 16 + 1 * 4 + 2);
/// assert_eq!(grid_coord(idx, 4), c);
/// ```
#[inline]
pub fn flat_index(coord: GridCoord, dim: usize) -> usize {
    debug_assert!(coord.i < dim && coord.j < dim && coord.k < dim);
    coord.k * dim * dim + coord.i * dim + coord.j
}

/// Inverse of [`flat_index`].
#[inline]
pub fn grid_coord(idx: usize, dim: usize) -> GridCoord {
    debug_assert!(idx < dim * dim * dim);
    let plane = dim * dim;
    GridCoord {
        k: idx / plane,
        i: (idx % plane) / dim,
        j: idx % dim,
    }
}

/// Flat index of the cell `offset` away from `coord`, if it lies in the grid.
#[inline]
pub fn neighbor(coord: GridCoord, offset: GridOffset, dim: usize) -> Option<usize> {
    coord.offset(offset, dim).map(|c| flat_index(c, dim))
}
