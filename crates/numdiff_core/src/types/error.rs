//! Error types for finite-difference estimation.
//!
//! All variants are usage errors: they are raised before the wrapped
//! function is evaluated even once, so a failed call never leaves a
//! partially filled gradient behind.

use thiserror::Error;

/// Usage errors raised by the finite-difference kernel.
///
/// # Variants
///
/// - `ShapeMismatch`: an array argument does not match the point's shape
/// - `ZeroStep`: a step size of zero would be used at some coordinate
/// - `InvalidMode`: a mode name outside `forward`, `backward`, `central`
/// - `InvalidConfig`: a configuration value that can never be used
///
/// # Examples
///
/// ```
/// use numdiff_core::types::FiniteDiffError;
///
/// let err = FiniteDiffError::ShapeMismatch { expected: vec![3], found: vec![2] };
/// assert_eq!(format!("{}", err), "Shape mismatch: expected [3], found [2]");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FiniteDiffError {
    /// Array argument shape differs from the point's shape.
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Shape of the point
        expected: Vec<usize>,
        /// Shape that was supplied
        found: Vec<usize>,
    },

    /// Step size is zero at the given coordinate.
    #[error("Zero step size at coordinate {index:?}")]
    ZeroStep {
        /// Multi-index of the first offending coordinate
        index: Vec<usize>,
    },

    /// Unknown differencing mode name.
    #[error("Invalid mode: '{0}' (expected forward, backward or central)")]
    InvalidMode(String),

    /// Configuration value rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = FiniteDiffError::ShapeMismatch {
            expected: vec![2, 3],
            found: vec![6],
        };
        assert_eq!(
            format!("{}", err),
            "Shape mismatch: expected [2, 3], found [6]"
        );
    }

    #[test]
    fn test_zero_step_display() {
        let err = FiniteDiffError::ZeroStep { index: vec![1, 0] };
        assert_eq!(format!("{}", err), "Zero step size at coordinate [1, 0]");
    }

    #[test]
    fn test_invalid_mode_display() {
        let err = FiniteDiffError::InvalidMode("sideways".to_string());
        assert!(format!("{}", err).contains("'sideways'"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&FiniteDiffError::InvalidConfig("epsilon".to_string()));
    }
}
