//! # jello-lattice
//!
//! The cubic grid of point masses behind the jello cube.
//!
//! ## Key Types
//!
//! - [`Lattice`]: contiguous position/velocity buffers for `dim³` points.
//! - [`indexing`]: the pure `(i, j, k)` ↔ flat index bijection every other
//!   crate goes through.

pub mod indexing;
pub mod lattice;

pub use indexing::{flat_index, grid_coord, neighbor};
pub use lattice::Lattice;

/// Vector type used for positions, velocities, and forces.
pub use glam::Vec3;
