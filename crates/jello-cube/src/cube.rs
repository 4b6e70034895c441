//! The jello cube driver.

use std::time::Instant;

use glam::Vec3;

use jello_debug::{InspectionHook, StateSnapshot, TickStats};
use jello_lattice::Lattice;
use jello_mesh::{SurfaceMesh, VertexRecord};
use jello_solver::forces::FloorContacts;
use jello_solver::{
    IntegratorKind, IntegratorStrategy, PhysicsParams, SimulationConfig, SpringForceEvaluator,
};
use jello_types::JelloResult;

use crate::report::TickReport;

/// A simulated jello cube.
///
/// Owns everything that has to agree on the lattice size. The lattice is
/// the only state carried from tick to tick; the integrator's stage
/// buffers and the surface buffers are scratch.
pub struct JelloCube {
    config: SimulationConfig,
    lattice: Lattice,
    evaluator: SpringForceEvaluator,
    integrator: Box<dyn IntegratorStrategy>,
    surface: SurfaceMesh,
    hooks: Vec<Box<dyn InspectionHook>>,
    tick_count: u64,
    sim_time: f64,
    last_timestamp: Option<f64>,
}

impl JelloCube {
    /// Builds a cube at rest. Out-of-range config values are clamped.
    pub fn new(config: SimulationConfig) -> Self {
        let config = config.sanitized();
        let lattice = Lattice::build(config.resolution);
        let evaluator = SpringForceEvaluator::for_lattice(&lattice, &config.physics);
        let integrator = config.integrator.create();
        let surface = SurfaceMesh::for_lattice(&lattice);

        tracing::info!(
            resolution = config.resolution,
            points = lattice.point_count(),
            integrator = integrator.name(),
            dt = config.dt,
            "jello cube created"
        );

        Self {
            config,
            lattice,
            evaluator,
            integrator,
            surface,
            hooks: Vec::new(),
            tick_count: 0,
            sim_time: 0.0,
            last_timestamp: None,
        }
    }

    // ─── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn evaluator(&self) -> &SpringForceEvaluator {
        &self.evaluator
    }

    pub fn surface(&self) -> &SurfaceMesh {
        &self.surface
    }

    /// The triangle list produced by the last tick.
    pub fn vertex_stream(&self) -> &[VertexRecord] {
        self.surface.vertices()
    }

    /// The triangle list as flat `[px, py, pz, nx, ny, nz, ...]`.
    pub fn interleaved(&self) -> Vec<f32> {
        self.surface.interleaved()
    }

    pub fn resolution(&self) -> u32 {
        self.lattice.resolution()
    }

    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    pub fn integrator_kind(&self) -> IntegratorKind {
        self.integrator.kind()
    }

    /// Ticks completed.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated seconds elapsed.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Timestamp passed to the most recent `tick`.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    // ─── Stepping ─────────────────────────────────────────────────────

    /// Advances the simulation by `steps_per_tick` fixed steps of `dt`,
    /// then regenerates the surface.
    ///
    /// `timestamp` is recorded but does not influence the step size.
    pub fn tick(&mut self, timestamp: f64) -> TickReport {
        let start = Instant::now();

        if let Some(previous) = self.last_timestamp {
            if timestamp < previous {
                tracing::debug!(previous, timestamp, "timestamp went backwards");
            }
        }
        self.last_timestamp = Some(timestamp);

        let tick = self.tick_count;
        for hook in &mut self.hooks {
            hook.on_tick_begin(tick, self.sim_time);
        }

        let dt = self.config.dt;
        let steps = self.config.steps_per_tick;
        let mut evaluations = 0;
        for step in 0..steps {
            let result = self
                .integrator
                .step(&mut self.lattice, &self.evaluator, dt);
            evaluations += result.evaluations;
            self.sim_time += dt as f64;
            for hook in &mut self.hooks {
                hook.on_step(tick, step, result.evaluations, result.wall_time);
            }
        }

        self.surface.regenerate(&self.lattice);

        let wall_time = start.elapsed().as_secs_f64();
        if !self.hooks.is_empty() {
            let stats = self.measure(steps, wall_time);
            for hook in &mut self.hooks {
                hook.on_tick_end(tick, &stats);
            }
        }

        self.tick_count += 1;
        TickReport {
            tick,
            steps,
            evaluations,
            sim_time: self.sim_time,
            wall_time,
        }
    }

    /// Runs `count` ticks with timestamps spaced by one tick of sim time.
    pub fn run(&mut self, count: u64) -> Vec<TickReport> {
        let tick_span = self.config.dt as f64 * self.config.steps_per_tick as f64;
        (0..count)
            .map(|_| {
                let timestamp = self.sim_time + tick_span;
                self.tick(timestamp)
            })
            .collect()
    }

    // ─── Reconfiguration ──────────────────────────────────────────────

    /// Replaces the lattice with a fresh one at `resolution` (clamped),
    /// rebuilding the evaluator and surface to match.
    pub fn set_resolution(&mut self, resolution: u32) {
        let lattice = Lattice::build(resolution);
        tracing::info!(
            from = self.lattice.resolution(),
            to = lattice.resolution(),
            "resolution changed"
        );
        self.install_lattice(lattice);
    }

    /// Swaps the integrator. State is kept.
    pub fn set_integrator(&mut self, kind: IntegratorKind) {
        if kind == self.integrator.kind() {
            return;
        }
        tracing::info!(from = self.integrator.name(), to = kind.name(), "integrator changed");
        self.integrator = kind.create();
        self.config.integrator = kind;
    }

    /// Replaces the physics parameters. State is kept.
    pub fn set_physics(&mut self, physics: PhysicsParams) {
        let config = SimulationConfig {
            physics,
            ..self.config.clone()
        }
        .sanitized();
        self.config = config;
        self.evaluator = SpringForceEvaluator::for_lattice(&self.lattice, &self.config.physics);
        tracing::debug!("physics parameters updated");
    }

    /// Changes the step size and substep count. Values are clamped.
    pub fn set_timing(&mut self, dt: f32, steps_per_tick: u32) {
        self.config = SimulationConfig {
            dt,
            steps_per_tick,
            ..self.config.clone()
        }
        .sanitized();
    }

    /// Puts the lattice back at rest and zeroes the clock.
    pub fn reset(&mut self) {
        self.lattice.reset();
        self.surface.regenerate(&self.lattice);
        self.tick_count = 0;
        self.sim_time = 0.0;
        self.last_timestamp = None;
    }

    /// Runs `edit` on the lattice (e.g. to displace or launch it), then
    /// regenerates the surface.
    ///
    /// The lattice must keep its size. If the buffers were resized, the
    /// lattice is rebuilt at rest.
    pub fn edit_lattice(&mut self, edit: impl FnOnce(&mut Lattice)) {
        edit(&mut self.lattice);

        let dim = self.lattice.dim();
        let expected = dim * dim * dim;
        if self.lattice.positions.len() != expected || self.lattice.velocities.len() != expected {
            tracing::warn!(
                positions = self.lattice.positions.len(),
                velocities = self.lattice.velocities.len(),
                expected,
                "lattice buffers resized during edit; rebuilding at rest"
            );
            self.lattice = Lattice::build(self.lattice.resolution());
        }
        self.surface.regenerate(&self.lattice);
    }

    fn install_lattice(&mut self, lattice: Lattice) {
        self.config.resolution = lattice.resolution();
        self.evaluator = SpringForceEvaluator::for_lattice(&lattice, &self.config.physics);
        self.lattice = lattice;
        self.surface.regenerate(&self.lattice);

        let (tick, resolution, points) = (
            self.tick_count,
            self.lattice.resolution(),
            self.lattice.point_count(),
        );
        for hook in &mut self.hooks {
            hook.on_rebuild(tick, resolution, points);
        }
    }

    // ─── Snapshots ────────────────────────────────────────────────────

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from_lattice(self.tick_count, self.sim_time, &self.lattice)
    }

    /// Restores lattice state and clock from `snapshot`.
    ///
    /// The resolution follows the snapshot; physics and integrator stay.
    pub fn restore(&mut self, snapshot: &StateSnapshot) -> JelloResult<()> {
        let lattice = snapshot.restore()?;
        tracing::info!(tick = snapshot.tick, resolution = lattice.resolution(), "snapshot restored");
        self.tick_count = snapshot.tick;
        self.sim_time = snapshot.sim_time;
        self.last_timestamp = None;
        self.install_lattice(lattice);
        Ok(())
    }

    // ─── Hooks ────────────────────────────────────────────────────────

    /// Registers a hook. It immediately sees the current lattice as a rebuild.
    pub fn add_hook(&mut self, mut hook: Box<dyn InspectionHook>) {
        tracing::debug!(hook = hook.name(), "inspection hook added");
        hook.on_rebuild(
            self.tick_count,
            self.lattice.resolution(),
            self.lattice.point_count(),
        );
        self.hooks.push(hook);
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Signals the end of the simulation to every hook.
    pub fn finish(&mut self) {
        for hook in &mut self.hooks {
            hook.on_simulation_end();
        }
    }

    // ─── Measurements ─────────────────────────────────────────────────

    pub fn kinetic_energy(&self) -> f64 {
        self.lattice.kinetic_energy(self.config.physics.mass)
    }

    /// Gravitational potential relative to the floor plane.
    pub fn potential_energy(&self) -> f64 {
        let physics = &self.config.physics;
        let gravity = Vec3::from_array(physics.gravity);
        let floor = Vec3::new(0.0, physics.collision.floor_height, 0.0);
        let sum: f64 = self
            .lattice
            .positions
            .iter()
            .map(|p| -gravity.dot(*p - floor) as f64)
            .sum();
        physics.mass as f64 * sum
    }

    pub fn elastic_energy(&self) -> f64 {
        self.evaluator.elastic_energy(&self.lattice.positions)
    }

    pub fn floor_contacts(&self) -> FloorContacts {
        self.evaluator.floor_contacts(&self.lattice.positions)
    }

    fn measure(&self, steps: u32, wall_time: f64) -> TickStats {
        let contacts = self.floor_contacts();
        TickStats {
            steps,
            wall_time,
            kinetic_energy: self.kinetic_energy(),
            potential_energy: self.potential_energy(),
            elastic_energy: self.elastic_energy(),
            floor_contacts: contacts.count,
            max_penetration: contacts.max_penetration,
        }
    }
}

impl Default for JelloCube {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
