//! Spring classes and their neighbor offsets.
//!
//! Springs are not stored. A spring exists between two lattice points
//! whenever their grid offset belongs to one of the classes below and
//! both ends lie inside the grid.
//!
//! ```text
//! class       offset shape        count   rest length
//! structural  (±1, 0, 0) perms      6     spacing
//! shear       (±1, ±1, 0) perms    12     spacing·√2
//! diagonal    (±1, ±1, ±1)          8     spacing·√3
//! bend        (±2, 0, 0) perms      6     spacing·2
//! ```

use serde::{Deserialize, Serialize};

use jello_types::GridOffset;

/// The four canonical neighbor-offset classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpringClass {
    Structural,
    Shear,
    Diagonal,
    Bend,
}

impl SpringClass {
    pub fn all() -> &'static [SpringClass] {
        &[
            SpringClass::Structural,
            SpringClass::Shear,
            SpringClass::Diagonal,
            SpringClass::Bend,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpringClass::Structural => "structural",
            SpringClass::Shear => "shear",
            SpringClass::Diagonal => "diagonal",
            SpringClass::Bend => "bend",
        }
    }

    /// Classifies a grid offset, or `None` if no spring spans it.
    pub fn classify(offset: GridOffset) -> Option<Self> {
        let components = [offset.di, offset.dj, offset.dk];
        let ones = components.iter().filter(|c| c.abs() == 1).count();
        let twos = components.iter().filter(|c| c.abs() == 2).count();
        let zeros = components.iter().filter(|&&c| c == 0).count();

        match (ones, twos, zeros) {
            (1, 0, 2) => Some(SpringClass::Structural),
            (2, 0, 1) => Some(SpringClass::Shear),
            (3, 0, 0) => Some(SpringClass::Diagonal),
            (0, 1, 2) => Some(SpringClass::Bend),
            _ => None,
        }
    }

    /// Rest length in grid units.
    pub fn rest_factor(&self) -> f32 {
        match self {
            SpringClass::Structural => 1.0,
            SpringClass::Shear => std::f32::consts::SQRT_2,
            SpringClass::Diagonal => 3.0f32.sqrt(),
            SpringClass::Bend => 2.0,
        }
    }
}

/// One entry of the neighbor table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringOffset {
    pub offset: GridOffset,
    pub class: SpringClass,
}

/// All 32 offsets a lattice point can reach through a spring.
///
/// Ordered by class (structural, shear, diagonal, bend). Every offset's
/// reverse is also in the table.
pub fn spring_offsets() -> Vec<SpringOffset> {
    let mut table = Vec::with_capacity(32);
    for &class in SpringClass::all() {
        for di in -2..=2 {
            for dj in -2..=2 {
                for dk in -2..=2 {
                    let offset = GridOffset::new(di, dj, dk);
                    if SpringClass::classify(offset) == Some(class) {
                        table.push(SpringOffset { offset, class });
                    }
                }
            }
        }
    }
    table
}
