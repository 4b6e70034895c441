//! # jello-types
//!
//! Shared types, identifiers, error types, and simulation constants
//! for the jello cube soft-body simulator.
//!
//! This crate has no physics in it. It defines the vocabulary the
//! lattice, solver, and mesh crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{JelloError, JelloResult};
pub use ids::{GridCoord, GridOffset};
