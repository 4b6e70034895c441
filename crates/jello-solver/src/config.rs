//! Solver configuration.
//!
//! [`PhysicsParams`] feeds the force evaluator; [`SimulationConfig`]
//! wraps it with the lattice and time-stepping settings. Both load from
//! TOML with every field optional.

use serde::{Deserialize, Serialize};

use jello_types::constants::{
    DEFAULT_DT, DEFAULT_FLOOR_HEIGHT, DEFAULT_POINT_MASS, DEFAULT_RESOLUTION, EPSILON, GRAVITY,
    MIN_RESOLUTION,
};

use crate::springs::SpringClass;
use crate::strategy::IntegratorKind;

/// Stiffness and damping for one spring class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringCoefficients {
    /// Hookean stiffness `k`.
    pub stiffness: f32,
    /// Damping coefficient along the spring axis.
    pub damping: f32,
}

impl SpringCoefficients {
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self { stiffness, damping }
    }

    /// A spring that exerts no force.
    pub const fn disabled() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Coefficients for all four spring classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    pub structural: SpringCoefficients,
    pub shear: SpringCoefficients,
    pub diagonal: SpringCoefficients,
    pub bend: SpringCoefficients,
}

impl SpringParams {
    /// Same coefficients for every class.
    pub const fn uniform(stiffness: f32, damping: f32) -> Self {
        let c = SpringCoefficients::new(stiffness, damping);
        Self {
            structural: c,
            shear: c,
            diagonal: c,
            bend: c,
        }
    }

    /// Only structural springs active.
    pub const fn structural_only(stiffness: f32, damping: f32) -> Self {
        Self {
            structural: SpringCoefficients::new(stiffness, damping),
            shear: SpringCoefficients::disabled(),
            diagonal: SpringCoefficients::disabled(),
            bend: SpringCoefficients::disabled(),
        }
    }

    #[inline]
    pub fn for_class(&self, class: SpringClass) -> SpringCoefficients {
        match class {
            SpringClass::Structural => self.structural,
            SpringClass::Shear => self.shear,
            SpringClass::Diagonal => self.diagonal,
            SpringClass::Bend => self.bend,
        }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::uniform(500.0, 2.0)
    }
}

/// Penalty contact against the floor plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionParams {
    /// Force per unit penetration depth.
    pub stiffness: f32,
    /// Force per unit downward velocity while in contact.
    pub damping: f32,
    /// Y coordinate of the floor.
    pub floor_height: f32,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            stiffness: 2000.0,
            damping: 20.0,
            floor_height: DEFAULT_FLOOR_HEIGHT,
        }
    }
}

/// How the Hookean term measures spring extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookeMode {
    /// `F = -k·(|d| - rest)·n`.
    #[default]
    Corrected,
    /// `F = -k·d`. The current length is overwritten by the rest length
    /// before both the Hooke term and the normalization, so the two cancel
    /// and every spring acts as if its rest length were zero. Kept so old
    /// tunings can be reproduced.
    Legacy,
}

/// Parameters consumed by the force evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Mass of every lattice point.
    pub mass: f32,
    /// Gravity vector [gx, gy, gz].
    pub gravity: [f32; 3],
    pub hooke_mode: HookeMode,
    pub springs: SpringParams,
    pub collision: CollisionParams,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            mass: DEFAULT_POINT_MASS,
            gravity: [0.0, -GRAVITY, 0.0],
            hooke_mode: HookeMode::Corrected,
            springs: SpringParams::default(),
            collision: CollisionParams::default(),
        }
    }
}

impl PhysicsParams {
    /// Same parameters with gravity switched off.
    pub fn without_gravity(mut self) -> Self {
        self.gravity = [0.0; 3];
        self
    }

    /// Returns a copy with a usable mass and non-negative coefficients.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();

        if !out.mass.is_finite() || out.mass <= EPSILON {
            tracing::warn!(value = out.mass, "mass reset to {DEFAULT_POINT_MASS}");
            out.mass = DEFAULT_POINT_MASS;
        }

        let clamp_non_negative = |c: &mut SpringCoefficients| {
            c.stiffness = c.stiffness.max(0.0);
            c.damping = c.damping.max(0.0);
        };
        clamp_non_negative(&mut out.springs.structural);
        clamp_non_negative(&mut out.springs.shear);
        clamp_non_negative(&mut out.springs.diagonal);
        clamp_non_negative(&mut out.springs.bend);
        out.collision.stiffness = out.collision.stiffness.max(0.0);
        out.collision.damping = out.collision.damping.max(0.0);

        out
    }
}

/// Top-level configuration for a jello cube simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Lattice cells per cube edge.
    pub resolution: u32,
    /// Fixed integration step (seconds).
    pub dt: f32,
    /// Integration steps taken per `tick`.
    pub steps_per_tick: u32,
    pub integrator: IntegratorKind,
    pub physics: PhysicsParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            dt: DEFAULT_DT,
            steps_per_tick: 1,
            integrator: IntegratorKind::RungeKutta4,
            physics: PhysicsParams::default(),
        }
    }
}

impl SimulationConfig {
    /// Small lattice, Euler integration. Cheap enough for unit tests.
    pub fn debug() -> Self {
        Self {
            resolution: 2,
            integrator: IntegratorKind::ExplicitEuler,
            ..Default::default()
        }
    }

    /// Denser lattice and several RK4 steps per tick.
    pub fn high_quality() -> Self {
        Self {
            resolution: 10,
            steps_per_tick: 8,
            integrator: IntegratorKind::RungeKutta4,
            ..Default::default()
        }
    }

    /// Returns a copy with out-of-range values coerced into range.
    ///
    /// Invalid values are never rejected.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();

        if out.resolution < MIN_RESOLUTION {
            tracing::warn!(value = out.resolution, "resolution clamped to {MIN_RESOLUTION}");
            out.resolution = MIN_RESOLUTION;
        }
        if !out.dt.is_finite() || out.dt <= 0.0 {
            tracing::warn!(value = out.dt, "dt reset to {DEFAULT_DT}");
            out.dt = DEFAULT_DT;
        }
        if out.steps_per_tick == 0 {
            tracing::warn!("steps_per_tick clamped to 1");
            out.steps_per_tick = 1;
        }
        out.physics = out.physics.sanitized();

        out
    }
}
