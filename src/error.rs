//! Error types.

use thiserror::Error;

/// Errors returned by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// An index value reached the classifier although it lies outside
    /// \[0, 1\] (or is NaN).  Masking should have excluded it.
    #[error("index value {value} at position {position} is outside [0, 1]")]
    InvalidInput { value: f64, position: usize },

    #[error("unknown palette mode “{0}”")]
    UnknownPaletteMode(String),

    #[error("invalid index class {0} (expected 1..=7)")]
    InvalidClass(u8),

    #[error("invalid color “{0}” (expected #rrggbb)")]
    InvalidColor(String),

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
