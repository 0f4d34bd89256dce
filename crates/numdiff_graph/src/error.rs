//! # Operator Error Types
//!
//! Errors raised by operator entry points and by the registry.
//!
//! Errors returned by a wrapped function are boxed once when the operator
//! is built and then passed through untouched: the original value is the
//! [`std::error::Error::source`] of [`OperatorError::Function`] and can be
//! recovered by downcasting.

use numdiff_core::types::FiniteDiffError;
use thiserror::Error;

/// Error value produced by a wrapped function.
pub type FunctionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for operator evaluation and registration.
///
/// # Example
///
/// ```rust
/// use numdiff_core::types::FiniteDiffError;
/// use numdiff_graph::OperatorError;
///
/// let err = OperatorError::from(FiniteDiffError::ZeroStep { index: vec![0] });
/// assert!(err.is_usage());
/// assert_eq!(err.to_string(), "Zero step size at coordinate [0]");
/// ```
#[derive(Error, Debug)]
pub enum OperatorError {
    /// Finite-difference usage error (shape mismatch, zero step, bad mode).
    #[error(transparent)]
    Usage(#[from] FiniteDiffError),

    /// A declared parameter is absent from the bindings.
    #[error("Operator '{operator}' is missing binding '{name}'")]
    MissingBinding {
        /// Operator name
        operator: &'static str,
        /// Binding name
        name: String,
    },

    /// A binding declared scalar holds more than one value.
    #[error("Binding '{name}' must be a scalar, found shape {shape:?}")]
    NotScalar {
        /// Binding name
        name: String,
        /// Shape that was supplied
        shape: Vec<usize>,
    },

    /// The wrapped function failed.
    #[error("{0}")]
    Function(#[source] FunctionError),

    /// Registry already holds an operator under this name.
    #[error("Operator '{0}' is already registered")]
    DuplicateOperator(String),

    /// Registry holds no operator under this name.
    #[error("Operator '{0}' is not registered")]
    UnknownOperator(String),
}

impl OperatorError {
    /// Returns true for finite-difference usage errors.
    #[inline]
    pub fn is_usage(&self) -> bool {
        matches!(self, OperatorError::Usage(_))
    }

    /// Borrows the wrapped function's own error, if that is what failed.
    pub fn function_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            OperatorError::Function(err) => Some(&**err),
            _ => None,
        }
    }

    /// Takes the wrapped function's own error, if that is what failed.
    pub fn into_function_error(self) -> Option<FunctionError> {
        match self {
            OperatorError::Function(err) => Some(err),
            _ => None,
        }
    }
}
