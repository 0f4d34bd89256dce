//! Finite-difference configuration.

use crate::types::{DiffMode, Epsilon, FiniteDiffError};

/// Settings used to build a finite-difference operator.
///
/// Holds the scheme, the uniform step and the diagnostic switch for the
/// Jacobian-vector product. Per-coordinate steps are passed as an
/// [`Epsilon`] directly instead.
///
/// # Example
///
/// ```
/// use numdiff_core::config::FiniteDiffConfig;
/// use numdiff_core::types::DiffMode;
///
/// let config = FiniteDiffConfig::default();
/// assert_eq!(config.mode, DiffMode::Central);
/// assert!((config.epsilon - 1e-6).abs() < 1e-18);
///
/// let custom = FiniteDiffConfig::new()
///     .with_mode(DiffMode::Forward)
///     .with_epsilon(1e-4)
///     .with_trace_pushforward(true);
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FiniteDiffConfig {
    /// Differencing scheme.
    pub mode: DiffMode,

    /// Uniform step size.
    ///
    /// Must be finite and nonzero. A negative step mirrors the one-sided
    /// schemes.
    pub epsilon: f64,

    /// Emit a `debug` event with the inputs and gradient on every
    /// Jacobian-vector product.
    pub trace_pushforward: bool,
}

impl Default for FiniteDiffConfig {
    /// Default values:
    /// - `mode`: central
    /// - `epsilon`: 1e-6
    /// - `trace_pushforward`: false
    fn default() -> Self {
        Self {
            mode: DiffMode::Central,
            epsilon: 1e-6,
            trace_pushforward: false,
        }
    }
}

impl FiniteDiffConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Central differences with a step balancing truncation against rounding
    /// for values of order one (roughly the cube root of machine epsilon).
    pub fn high_precision() -> Self {
        Self {
            mode: DiffMode::Central,
            epsilon: 1e-5,
            trace_pushforward: false,
        }
    }

    /// Forward differences: N + 1 evaluations instead of 2N.
    pub fn fast() -> Self {
        Self {
            mode: DiffMode::Forward,
            epsilon: 1e-7,
            trace_pushforward: false,
        }
    }

    /// Builder method: set the differencing scheme.
    #[inline]
    pub fn with_mode(mut self, mode: DiffMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method: set the uniform step.
    #[inline]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder method: toggle the pushforward diagnostic.
    #[inline]
    pub fn with_trace_pushforward(mut self, enabled: bool) -> Self {
        self.trace_pushforward = enabled;
        self
    }

    /// Uniform step as an [`Epsilon`].
    #[inline]
    pub fn step(&self) -> Epsilon<f64> {
        Epsilon::Uniform(self.epsilon)
    }

    /// Rejects a step that could never produce a gradient.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `epsilon` is zero, NaN or infinite.
    pub fn validate(&self) -> Result<(), FiniteDiffError> {
        if !self.epsilon.is_finite() {
            return Err(FiniteDiffError::InvalidConfig(format!(
                "epsilon must be finite, got {}",
                self.epsilon
            )));
        }
        if self.epsilon == 0.0 {
            return Err(FiniteDiffError::InvalidConfig(
                "epsilon must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}
