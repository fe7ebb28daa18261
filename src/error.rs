// src/error.rs - Error taxonomy for the arm host
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArmError {
    /// Malformed or semantically invalid configuration / arguments.
    /// Reported before any hardware object is constructed.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A write target outside the valid pulse range. Rejected before any
    /// movement is attempted; no partial write occurs.
    #[error("value {value} for servo {servo} outside valid range [{min}, {max}]")]
    RangeViolation {
        servo: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A persisted pose or sequence file that could be opened but not parsed.
    #[error("malformed data in {path}: {reason}")]
    Storage { path: String, reason: String },

    #[error("hardware error: {0}")]
    Hardware(String),
}
