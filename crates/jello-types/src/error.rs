//! Error types for the jello simulator.
//!
//! The numerical core never fails; these cover the edges around it
//! (snapshot reassembly, config files, export).

use thiserror::Error;

/// Unified error type for the jello crates.
#[derive(Debug, Error)]
pub enum JelloError {
    /// Lattice arrays do not match the lattice dimensions.
    #[error("Invalid lattice: {0}")]
    InvalidLattice(String),

    /// Configuration value could not be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unknown preset or scenario name.
    #[error("Unknown {kind}: '{name}'")]
    UnknownName {
        kind: &'static str,
        name: String,
    },
}

/// Convenience alias for `Result<T, JelloError>`.
pub type JelloResult<T> = Result<T, JelloError>;
