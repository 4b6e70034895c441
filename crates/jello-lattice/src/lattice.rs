//! Lattice state: contiguous position and velocity buffers.
//!
//! This is the only state that persists from one tick to the next.
//! The integrator reads and writes these buffers every step.

use glam::Vec3;
use jello_types::constants::{CUBE_EDGE, MIN_RESOLUTION};
use jello_types::{GridCoord, JelloError, JelloResult};

use crate::indexing::{flat_index, grid_coord};

/// A cubic grid of point masses.
///
/// Holds `dim³` points where `dim = resolution + 1`. At rest the points
/// span a unit cube centered at the origin:
///
/// ```text
/// (i, j, k) = (0, 0, 0)             → (-0.5,  0.5,  0.5)
/// (i, j, k) = (dim-1, dim-1, dim-1) → ( 0.5, -0.5, -0.5)
/// ```
///
/// `positions` and `velocities` are index-aligned through
/// [`flat_index`](crate::indexing::flat_index).
#[derive(Debug, Clone)]
pub struct Lattice {
    resolution: u32,
    dim: usize,
    spacing: f32,

    // ─── Per-point state ───
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
}

impl Lattice {
    /// Allocates a lattice at rest.
    ///
    /// Resolutions below 1 are clamped to 1.
    ///
    /// # Example
    /// ```
    /// use jello_lattice::Lattice;
    /// let lattice = Lattice::build(2);
    /// assert_eq!(lattice.dim(), 3);
    /// assert_eq!(lattice.point_count(), 27);
    /// ```
    pub fn build(resolution: u32) -> Self {
        let resolution = Self::clamp_resolution(resolution);
        let dim = resolution as usize + 1;
        let n = dim * dim * dim;
        let spacing = CUBE_EDGE / resolution as f32;

        let mut lattice = Self {
            resolution,
            dim,
            spacing,
            positions: Vec::with_capacity(n),
            velocities: vec![Vec3::ZERO; n],
        };
        for idx in 0..n {
            let rest = lattice.rest_position(grid_coord(idx, dim));
            lattice.positions.push(rest);
        }
        lattice
    }

    /// Reassembles a lattice from raw buffers (e.g. a snapshot).
    pub fn from_parts(
        resolution: u32,
        positions: Vec<Vec3>,
        velocities: Vec<Vec3>,
    ) -> JelloResult<Self> {
        let resolution = Self::clamp_resolution(resolution);
        let dim = resolution as usize + 1;
        let n = dim * dim * dim;

        if positions.len() != n {
            return Err(JelloError::InvalidLattice(format!(
                "Position count ({}) != dim³ ({}) for resolution {}",
                positions.len(),
                n,
                resolution
            )));
        }
        if velocities.len() != n {
            return Err(JelloError::InvalidLattice(format!(
                "Velocity count ({}) != dim³ ({}) for resolution {}",
                velocities.len(),
                n,
                resolution
            )));
        }

        Ok(Self {
            resolution,
            dim,
            spacing: CUBE_EDGE / resolution as f32,
            positions,
            velocities,
        })
    }

    /// Coerces a requested resolution into the supported range.
    #[inline]
    pub fn clamp_resolution(resolution: u32) -> u32 {
        if resolution < MIN_RESOLUTION {
            tracing::warn!(requested = resolution, "lattice resolution clamped to {MIN_RESOLUTION}");
        }
        resolution.max(MIN_RESOLUTION)
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Points per cube edge (`resolution + 1`).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Rest distance between adjacent points.
    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index(&self, coord: GridCoord) -> usize {
        flat_index(coord, self.dim)
    }

    #[inline]
    pub fn coord(&self, idx: usize) -> GridCoord {
        grid_coord(idx, self.dim)
    }

    /// Position of `coord` at rest.
    pub fn rest_position(&self, coord: GridCoord) -> Vec3 {
        let half = CUBE_EDGE * 0.5;
        let start = Vec3::new(-half, half, half);
        start
            + Vec3::new(
                coord.j as f32 * self.spacing,
                -(coord.i as f32) * self.spacing,
                -(coord.k as f32) * self.spacing,
            )
    }

    /// Puts every point back at rest with zero velocity.
    pub fn reset(&mut self) {
        for idx in 0..self.point_count() {
            self.positions[idx] = self.rest_position(grid_coord(idx, self.dim));
        }
        self.velocities.fill(Vec3::ZERO);
    }

    /// Moves every point by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Scales positions per axis about the current centroid.
    pub fn scale_about_center(&mut self, scale: Vec3) {
        let center = self.centroid();
        for p in &mut self.positions {
            *p = center + (*p - center) * scale;
        }
    }

    /// Gives every point the same velocity.
    pub fn set_uniform_velocity(&mut self, velocity: Vec3) {
        self.velocities.fill(velocity);
    }

    /// Mean position of all points.
    pub fn centroid(&self) -> Vec3 {
        let sum: Vec3 = self.positions.iter().copied().sum();
        sum / self.point_count() as f32
    }

    /// Lowest Y coordinate in the lattice.
    pub fn min_height(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| p.y)
            .fold(f32::INFINITY, f32::min)
    }

    /// Total kinetic energy: 0.5 · m · Σ ||v_i||².
    pub fn kinetic_energy(&self, point_mass: f32) -> f64 {
        let sum: f64 = self
            .velocities
            .iter()
            .map(|v| v.length_squared() as f64)
            .sum();
        0.5 * point_mass as f64 * sum
    }
}
