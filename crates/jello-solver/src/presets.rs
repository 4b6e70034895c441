//! Named physics presets.
//!
//! Tuned parameter sets for common looks, looked up by name
//! (e.g. `"jello"`, `"rubber"`). Custom presets can be registered at
//! runtime.

use std::collections::HashMap;

use jello_types::{JelloError, JelloResult};

use crate::config::{CollisionParams, PhysicsParams, SpringCoefficients, SpringParams};

/// A named parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub physics: PhysicsParams,
}

/// A collection of physics presets keyed by name.
#[derive(Debug, Clone)]
pub struct PresetDatabase {
    presets: HashMap<String, Preset>,
}

impl PresetDatabase {
    /// Creates a database with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();
        db.register(jello());
        db.register(firm_jello());
        db.register(wobbly_jello());
        db.register(rubber());
        db
    }

    pub fn empty() -> Self {
        Self {
            presets: HashMap::new(),
        }
    }

    /// Registers a preset. Overwrites if the name already exists.
    pub fn register(&mut self, preset: Preset) {
        self.presets.insert(preset.name.clone(), preset);
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    /// Looks up a preset's physics, failing with the list of known names.
    pub fn physics(&self, name: &str) -> JelloResult<PhysicsParams> {
        self.get(name)
            .map(|p| p.physics.clone())
            .ok_or_else(|| JelloError::UnknownName {
                kind: "preset",
                name: name.to_string(),
            })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Default tuning. Matches `PhysicsParams::default()`.
fn jello() -> Preset {
    Preset {
        name: "jello".into(),
        description: "Balanced wobble, settles in about a second".into(),
        physics: PhysicsParams::default(),
    }
}

/// Stiffer springs, heavier damping.
fn firm_jello() -> Preset {
    Preset {
        name: "firm_jello".into(),
        description: "Holds its shape, small quick oscillations".into(),
        physics: PhysicsParams {
            springs: SpringParams {
                structural: SpringCoefficients::new(1200.0, 4.0),
                shear: SpringCoefficients::new(1000.0, 4.0),
                diagonal: SpringCoefficients::new(800.0, 3.0),
                bend: SpringCoefficients::new(600.0, 3.0),
            },
            ..PhysicsParams::default()
        },
    }
}

/// Soft springs, weak bend resistance.
fn wobbly_jello() -> Preset {
    Preset {
        name: "wobbly_jello".into(),
        description: "Large slow deformation, sags on the floor".into(),
        physics: PhysicsParams {
            springs: SpringParams {
                structural: SpringCoefficients::new(200.0, 1.0),
                shear: SpringCoefficients::new(150.0, 1.0),
                diagonal: SpringCoefficients::new(100.0, 0.5),
                bend: SpringCoefficients::new(40.0, 0.5),
            },
            ..PhysicsParams::default()
        },
    }
}

/// Bouncy: stiff springs, light damping, springy floor.
fn rubber() -> Preset {
    Preset {
        name: "rubber".into(),
        description: "Bounces off the floor with little energy loss".into(),
        physics: PhysicsParams {
            springs: SpringParams::uniform(900.0, 0.5),
            collision: CollisionParams {
                stiffness: 3000.0,
                damping: 2.0,
                ..CollisionParams::default()
            },
            ..PhysicsParams::default()
        },
    }
}
