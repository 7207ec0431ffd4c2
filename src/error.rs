//! Error types for the Ellingham engine
//!
//! Only contract violations surface as `Err`. Conditions that ordinary user
//! input can trigger (unknown material, extrapolation, degenerate samples) are
//! reported as [`Diagnostic`](crate::results::Diagnostic) values instead.

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Material '{0}' not found in database")]
    MaterialNotFound(String),

    #[error("Duplicate material '{0}' already exists")]
    DuplicateMaterial(String),

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Array length mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
