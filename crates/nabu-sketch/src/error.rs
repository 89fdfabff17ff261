use thiserror::Error;

/// Errors raised synchronously by shape factories and camera setters.
///
/// Nothing is retried; the call that violated a precondition returns the error
/// and leaves the scene untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    #[error("invalid range: `from` ({from}) must be less than `to` ({to})")]
    InvalidRange { from: f32, to: f32 },

    #[error("{what} length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { what: &'static str, expected: usize, actual: usize },

    #[error("non-finite value {value} at x = {x}")]
    NonFinite { x: f32, value: f32 },

    #[error("zoom must be a positive finite number, got {0}")]
    InvalidZoom(f32),
}

/// Validates an explicit `(from, to)` sampling range.
pub(crate) fn check_range(from: f32, to: f32) -> Result<(), SketchError> {
    if from.is_finite() && to.is_finite() && from < to {
        Ok(())
    } else {
        Err(SketchError::InvalidRange { from, to })
    }
}

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), SketchError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SketchError::LengthMismatch { what, expected, actual })
    }
}
