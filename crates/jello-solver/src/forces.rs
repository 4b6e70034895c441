//! Spring force evaluation.
//!
//! Maps a full lattice snapshot (positions, velocities) to per-point
//! accelerations. Integrators call this once per stage; it never touches
//! the lattice itself.
//!
//! Per spring between point `a` and neighbor `b`, with `d = a - b`,
//! `L = |d|`, `n = d / L`:
//!
//! ```text
//! hooke    F = -ks · (L - rest) · n
//! legacy   F = -ks · d
//! damping  F = -kd · ((va - vb) · d / L) · n
//! ```
//!
//! Plus gravity and a one-sided penalty contact with the floor plane.

use glam::Vec3;

use jello_lattice::{grid_coord, neighbor, Lattice};
use jello_types::constants::DEGENERATE_LENGTH;
use jello_types::GridOffset;

use crate::config::{CollisionParams, HookeMode, PhysicsParams, SpringCoefficients};
use crate::springs::{spring_offsets, SpringClass};

/// A neighbor offset with its rest length and coefficients resolved.
#[derive(Debug, Clone, Copy)]
struct SpringTerm {
    offset: GridOffset,
    rest_length: f32,
    coefficients: SpringCoefficients,
}

/// Floor contact statistics for one lattice state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloorContacts {
    /// Points below the floor.
    pub count: u32,
    /// Deepest penetration (0 when there is no contact).
    pub max_penetration: f32,
}

/// Computes accelerations for a lattice of fixed size.
///
/// Built for one lattice dimension; rebuild it when the resolution
/// changes (see [`matches`](Self::matches)).
#[derive(Debug, Clone)]
pub struct SpringForceEvaluator {
    dim: usize,
    params: PhysicsParams,
    gravity: Vec3,
    terms: Vec<SpringTerm>,
}

impl SpringForceEvaluator {
    /// Builds an evaluator for a lattice of side `dim` and rest `spacing`.
    ///
    /// `params` are sanitized first, so a zero or non-finite mass falls
    /// back to the default instead of producing infinite accelerations.
    pub fn new(dim: usize, spacing: f32, params: &PhysicsParams) -> Self {
        let params = params.sanitized();
        let terms = spring_offsets()
            .into_iter()
            .map(|entry| SpringTerm {
                offset: entry.offset,
                rest_length: spacing * entry.class.rest_factor(),
                coefficients: params.springs.for_class(entry.class),
            })
            .filter(|term| term.coefficients != SpringCoefficients::disabled())
            .collect();

        Self {
            dim,
            gravity: Vec3::from_array(params.gravity),
            params,
            terms,
        }
    }

    /// Builds an evaluator sized for `lattice`.
    pub fn for_lattice(lattice: &Lattice, params: &PhysicsParams) -> Self {
        Self::new(lattice.dim(), lattice.spacing(), params)
    }

    /// True if this evaluator was built for `lattice`'s dimensions.
    pub fn matches(&self, lattice: &Lattice) -> bool {
        self.dim == lattice.dim()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    /// Number of spring terms checked per point (inactive classes skipped).
    pub fn active_offsets(&self) -> usize {
        self.terms.len()
    }

    /// Returns per-point accelerations for the given state.
    pub fn compute_accelerations(&self, positions: &[Vec3], velocities: &[Vec3]) -> Vec<Vec3> {
        let mut out = vec![Vec3::ZERO; positions.len()];
        self.compute_accelerations_into(positions, velocities, &mut out);
        out
    }

    /// Writes per-point accelerations into `out`, overwriting every entry.
    ///
    /// All three buffers must hold `dim³` entries (checked in debug builds).
    pub fn compute_accelerations_into(
        &self,
        positions: &[Vec3],
        velocities: &[Vec3],
        out: &mut [Vec3],
    ) {
        let n = self.dim * self.dim * self.dim;
        debug_assert_eq!(positions.len(), n, "position buffer does not match lattice");
        debug_assert_eq!(velocities.len(), n, "velocity buffer does not match lattice");
        debug_assert_eq!(out.len(), n, "acceleration buffer does not match lattice");

        let mass = self.params.mass;
        let inv_mass = 1.0 / mass;

        for (idx, acc) in out.iter_mut().enumerate() {
            let coord = grid_coord(idx, self.dim);
            let pa = positions[idx];
            let va = velocities[idx];

            let mut force = self.gravity * mass;

            for term in &self.terms {
                let Some(nb) = neighbor(coord, term.offset, self.dim) else {
                    continue;
                };
                force += spring_force(
                    pa,
                    positions[nb],
                    va,
                    velocities[nb],
                    term.rest_length,
                    term.coefficients,
                    self.params.hooke_mode,
                );
            }

            force += floor_force(pa, va, &self.params.collision);

            *acc = force * inv_mass;
        }
    }

    /// Total spring potential `Σ ½·ks·(L - rest)²`, each spring counted once.
    pub fn elastic_energy(&self, positions: &[Vec3]) -> f64 {
        let mut energy = 0.0f64;
        for (idx, &pa) in positions.iter().enumerate() {
            let coord = grid_coord(idx, self.dim);
            for term in &self.terms {
                match neighbor(coord, term.offset, self.dim) {
                    Some(nb) if nb > idx => {
                        let stretch = (pa.distance(positions[nb]) - term.rest_length) as f64;
                        energy += 0.5 * term.coefficients.stiffness as f64 * stretch * stretch;
                    }
                    _ => {}
                }
            }
        }
        energy
    }

    /// Counts points below the floor and the deepest penetration.
    pub fn floor_contacts(&self, positions: &[Vec3]) -> FloorContacts {
        let floor = self.params.collision.floor_height;
        positions
            .iter()
            .filter(|p| p.y < floor)
            .fold(FloorContacts::default(), |acc, p| FloorContacts {
                count: acc.count + 1,
                max_penetration: acc.max_penetration.max(floor - p.y),
            })
    }

    /// Number of springs of `class` in the lattice (each counted once).
    pub fn spring_count(&self, class: SpringClass) -> usize {
        let n = self.dim * self.dim * self.dim;
        spring_offsets()
            .into_iter()
            .filter(|entry| entry.class == class)
            .map(|entry| {
                (0..n)
                    .filter(|&idx| {
                        let coord = grid_coord(idx, self.dim);
                        matches!(neighbor(coord, entry.offset, self.dim), Some(nb) if nb > idx)
                    })
                    .count()
            })
            .sum()
    }
}

/// Force on `a` from the spring joining it to `b`.
///
/// Returns zero for coincident endpoints.
#[inline]
pub fn spring_force(
    pa: Vec3,
    pb: Vec3,
    va: Vec3,
    vb: Vec3,
    rest_length: f32,
    coefficients: SpringCoefficients,
    mode: HookeMode,
) -> Vec3 {
    let d = pa - pb;
    let length = d.length();
    if length < DEGENERATE_LENGTH {
        return Vec3::ZERO;
    }
    let n = d / length;

    let hooke = match mode {
        HookeMode::Corrected => -coefficients.stiffness * (length - rest_length) * n,
        HookeMode::Legacy => -coefficients.stiffness * d,
    };

    let closing_speed = (va - vb).dot(d) / length;
    let damping = -coefficients.damping * closing_speed * n;

    hooke + damping
}

/// Penalty force pushing `p` back above the floor.
#[inline]
pub fn floor_force(p: Vec3, v: Vec3, collision: &CollisionParams) -> Vec3 {
    let depth = collision.floor_height - p.y;
    if depth <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(0.0, collision.stiffness * depth - collision.damping * v.y, 0.0)
}
