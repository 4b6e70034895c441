//! Benchmark scenarios: a configuration plus an initial deformation.
//!
//! 1. **Free fall**: the cube drops onto the floor and settles.
//! 2. **Stretch release**: no gravity, released from a stretched shape.
//! 3. **Squash**: thrown down just above the floor.

use serde::{Deserialize, Serialize};

use jello_cube::JelloCube;
use jello_lattice::Vec3;
use jello_solver::{IntegratorKind, SimulationConfig};
use jello_types::{JelloError, JelloResult};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    FreeFall,
    StretchRelease,
    Squash,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::FreeFall,
            ScenarioKind::StretchRelease,
            ScenarioKind::Squash,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::FreeFall => "free_fall",
            ScenarioKind::StretchRelease => "stretch_release",
            ScenarioKind::Squash => "squash",
        }
    }

    pub fn from_name(name: &str) -> JelloResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| JelloError::UnknownName {
                kind: "scenario",
                name: name.to_string(),
            })
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub config: SimulationConfig,
    /// Ticks to simulate.
    pub ticks: u32,
    /// Translation applied to the rest lattice.
    pub offset: Vec3,
    /// Per-axis scale about the centroid applied after the offset.
    pub stretch: Vec3,
    /// Initial velocity of every point.
    pub launch_velocity: Vec3,
}

impl Scenario {
    fn base(kind: ScenarioKind) -> Self {
        Self {
            kind,
            config: SimulationConfig {
                resolution: 5,
                steps_per_tick: 10,
                ..SimulationConfig::default()
            },
            ticks: 100,
            offset: Vec3::ZERO,
            stretch: Vec3::ONE,
            launch_velocity: Vec3::ZERO,
        }
    }

    /// Drop from half a unit up; lands after about 0.65 s.
    pub fn free_fall() -> Self {
        Self {
            offset: Vec3::new(0.0, 0.5, 0.0),
            ticks: 150,
            ..Self::base(ScenarioKind::FreeFall)
        }
    }

    /// Gravity off; stretched 1.5× along X and squeezed along Y.
    pub fn stretch_release() -> Self {
        let mut scenario = Self {
            stretch: Vec3::new(1.5, 0.7, 1.0),
            ..Self::base(ScenarioKind::StretchRelease)
        };
        scenario.config.physics = scenario.config.physics.clone().without_gravity();
        scenario
    }

    /// Starts 0.1 above the floor moving down at 4 units/s.
    pub fn squash() -> Self {
        Self {
            offset: Vec3::new(0.0, -1.4, 0.0),
            launch_velocity: Vec3::new(0.0, -4.0, 0.0),
            ..Self::base(ScenarioKind::Squash)
        }
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::FreeFall => Self::free_fall(),
            ScenarioKind::StretchRelease => Self::stretch_release(),
            ScenarioKind::Squash => Self::squash(),
        }
    }

    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.config.integrator = integrator;
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.config.resolution = resolution;
        self
    }

    /// Builds the cube in its initial state.
    pub fn build_cube(&self) -> JelloCube {
        let mut cube = JelloCube::new(self.config.clone());
        let (offset, stretch, velocity) = (self.offset, self.stretch, self.launch_velocity);
        cube.edit_lattice(|lattice| {
            lattice.translate(offset);
            if stretch != Vec3::ONE {
                lattice.scale_about_center(stretch);
            }
            lattice.set_uniform_velocity(velocity);
        });
        cube
    }
}
