//! Error kinds
//!
//! Collisions are not errors; they travel as `Option<Collision>`. What ends up
//! here are broken invariants (which would otherwise turn into NaN) and
//! configuration that cannot be read.

use thiserror::Error;

/// Result type alias for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    /// Attempted to normalize or resize a vector of length zero
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,

    /// Colour blend factor outside `0.0..=1.0`
    #[error("blend factor {0} outside 0..=1")]
    BlendOutOfRange(f64),

    /// Settings failed validation
    #[error("settings error: {0}")]
    Settings(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
