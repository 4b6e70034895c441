//! Simulation defaults.
//!
//! These seed `PhysicsParams` and `SimulationConfig`. Nothing reads them
//! as ambient state during a step.

/// Gravitational acceleration magnitude.
pub const GRAVITY: f32 = 9.81;

/// Default integration timestep (seconds). Fixed, never derived from frame time.
pub const DEFAULT_DT: f32 = 0.001;

/// Default lattice resolution (cells per cube edge).
pub const DEFAULT_RESOLUTION: u32 = 7;

/// Smallest accepted lattice resolution.
pub const MIN_RESOLUTION: u32 = 1;

/// Default mass of every point in the lattice.
pub const DEFAULT_POINT_MASS: f32 = 0.05;

/// Default height of the collision floor (Y coordinate).
pub const DEFAULT_FLOOR_HEIGHT: f32 = -2.0;

/// Edge length of the cube at rest.
pub const CUBE_EDGE: f32 = 1.0;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;

/// Spring lengths below this are treated as coincident points.
pub const DEGENERATE_LENGTH: f32 = 1.0e-9;
