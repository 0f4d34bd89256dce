//! # Finite-Difference Operator
//!
//! Wraps an opaque scalar function `f: psi -> y` as a graph node whose
//! gradient is estimated by finite differences.
//!
//! | Entry point | Typed method | Result |
//! |-------------|--------------|--------|
//! | `apply` | [`FiniteDifferenceOperator::evaluate`] | `y = f(psi)` |
//! | `pullback` | [`FiniteDifferenceOperator::vjp`] | `_psi = grad f(psi) * sum(_y)` |
//! | `pushforward` | [`FiniteDifferenceOperator::jvp`] | `y_ = <grad f(psi), psi_>` |
//!
//! The gradient is recomputed on every `pullback` and `pushforward`; the
//! operator keeps no state between calls.
//!
//! # Usage
//!
//! ```rust
//! use ndarray::{arr1, ArrayD};
//! use numdiff_graph::{DiffMode, FiniteDifferenceOperator};
//!
//! let op = FiniteDifferenceOperator::new(
//!     |x: &ArrayD<f64>| x[[0]] * x[[0]] + 3.0 * x[[1]],
//!     1e-3,
//!     DiffMode::Central,
//! );
//! let psi = arr1(&[1.0, 2.0]).into_dyn();
//!
//! assert_eq!(op.evaluate(&psi).unwrap(), 7.0);
//!
//! let upstream = ndarray::arr0(2.0).into_dyn();
//! let grad_psi = op.vjp(&upstream, &psi).unwrap();
//! assert!((grad_psi[[0]] - 4.0).abs() < 1e-4);
//! assert!((grad_psi[[1]] - 6.0).abs() < 1e-4);
//!
//! let directional = op.jvp(&arr1(&[1.0, 0.0]).into_dyn(), &psi).unwrap();
//! assert!((directional - 2.0).abs() < 1e-4);
//! ```

use std::fmt;
use std::sync::Arc;

use ndarray::ArrayD;
use numdiff_core::config::FiniteDiffConfig;
use numdiff_core::math::finite_diff::try_estimate_gradient;
use numdiff_core::types::{DiffMode, Epsilon, FiniteDiffError};

use crate::error::{FunctionError, OperatorError};
use crate::operator::{
    cotangent_name, scalar_value, tangent_name, Bindings, NodeContext, Operator, OperatorSchema,
    ParamSpec,
};

/// Input parameter name.
pub const PSI: &str = "psi";

/// Output parameter name.
pub const Y: &str = "y";

/// Schema of the finite-difference operator: `psi` of any shape in,
/// scalar `y` out.
pub static FINITE_DIFFERENCE_SCHEMA: OperatorSchema = OperatorSchema {
    name: "finite_difference",
    inputs: &[ParamSpec::any(PSI)],
    outputs: &[ParamSpec::scalar(Y)],
};

/// Boxed form of the wrapped function.
pub type ScalarFn = dyn Fn(&ArrayD<f64>) -> Result<f64, FunctionError> + Send + Sync;

/// Graph operator with a finite-difference gradient.
///
/// Cloning shares the wrapped function.
#[derive(Clone)]
pub struct FiniteDifferenceOperator {
    func: Arc<ScalarFn>,
    epsilon: Epsilon<f64>,
    mode: DiffMode,
    trace_pushforward: bool,
}

impl FiniteDifferenceOperator {
    /// Wraps an infallible function.
    pub fn new<F>(func: F, epsilon: impl Into<Epsilon<f64>>, mode: DiffMode) -> Self
    where
        F: Fn(&ArrayD<f64>) -> f64 + Send + Sync + 'static,
    {
        let func: Arc<ScalarFn> =
            Arc::new(move |x: &ArrayD<f64>| -> Result<f64, FunctionError> { Ok(func(x)) });
        Self::from_shared(func, epsilon.into(), mode)
    }

    /// Wraps a fallible function.
    ///
    /// Its errors surface as [`OperatorError::Function`] with the original
    /// value as the error source.
    pub fn try_new<F, E>(func: F, epsilon: impl Into<Epsilon<f64>>, mode: DiffMode) -> Self
    where
        F: Fn(&ArrayD<f64>) -> Result<f64, E> + Send + Sync + 'static,
        E: Into<FunctionError>,
    {
        let func: Arc<ScalarFn> = Arc::new(move |x: &ArrayD<f64>| -> Result<f64, FunctionError> {
            func(x).map_err(Into::into)
        });
        Self::from_shared(func, epsilon.into(), mode)
    }

    /// Wraps an infallible function using a validated configuration.
    ///
    /// # Errors
    ///
    /// `Usage(InvalidConfig)` if the configured step is zero or not finite.
    pub fn from_config<F>(func: F, config: &FiniteDiffConfig) -> Result<Self, OperatorError>
    where
        F: Fn(&ArrayD<f64>) -> f64 + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self::new(func, config.step(), config.mode)
            .with_trace_pushforward(config.trace_pushforward))
    }

    fn from_shared(func: Arc<ScalarFn>, epsilon: Epsilon<f64>, mode: DiffMode) -> Self {
        Self {
            func,
            epsilon,
            mode,
            trace_pushforward: false,
        }
    }

    /// Builder method: toggle the `debug` diagnostic emitted by [`jvp`](Self::jvp).
    #[inline]
    pub fn with_trace_pushforward(mut self, enabled: bool) -> Self {
        self.trace_pushforward = enabled;
        self
    }

    /// Step size.
    #[inline]
    pub fn epsilon(&self) -> &Epsilon<f64> {
        &self.epsilon
    }

    /// Differencing scheme.
    #[inline]
    pub fn mode(&self) -> DiffMode {
        self.mode
    }

    /// Forward evaluation: calls the wrapped function once at `psi`.
    ///
    /// # Errors
    ///
    /// `Function` if the wrapped function fails.
    pub fn evaluate(&self, psi: &ArrayD<f64>) -> Result<f64, OperatorError> {
        (self.func)(psi).map_err(OperatorError::Function)
    }

    /// Finite-difference gradient of the wrapped function at `psi`.
    ///
    /// # Errors
    ///
    /// - `Usage` for an epsilon shape mismatch or zero step, before any evaluation
    /// - `Function` if any evaluation fails
    pub fn gradient(&self, psi: &ArrayD<f64>) -> Result<ArrayD<f64>, OperatorError> {
        try_estimate_gradient(
            psi,
            |x| (self.func)(x).map_err(OperatorError::Function),
            &self.epsilon,
            self.mode,
        )
    }

    /// Vector-Jacobian product: the gradient scaled by `sum(upstream)`.
    ///
    /// `upstream` may have any shape; a scalar sensitivity is a
    /// zero-dimensional array.
    ///
    /// # Errors
    ///
    /// As [`gradient`](Self::gradient).
    pub fn vjp(
        &self,
        upstream: &ArrayD<f64>,
        psi: &ArrayD<f64>,
    ) -> Result<ArrayD<f64>, OperatorError> {
        let scale = upstream.sum();
        let gradient = self.gradient(psi)?;
        Ok(gradient * scale)
    }

    /// Jacobian-vector product: the gradient dotted with `tangent`.
    ///
    /// # Errors
    ///
    /// - `Usage(ShapeMismatch)` if `tangent` is not shaped like `psi`,
    ///   before any evaluation
    /// - otherwise as [`gradient`](Self::gradient)
    pub fn jvp(&self, tangent: &ArrayD<f64>, psi: &ArrayD<f64>) -> Result<f64, OperatorError> {
        if tangent.shape() != psi.shape() {
            return Err(FiniteDiffError::ShapeMismatch {
                expected: psi.shape().to_vec(),
                found: tangent.shape().to_vec(),
            }
            .into());
        }

        let gradient = self.gradient(psi)?;
        if self.trace_pushforward {
            tracing::debug!(
                mode = %self.mode,
                psi = ?psi,
                tangent = ?tangent,
                gradient = ?gradient,
                "finite-difference pushforward"
            );
        }

        Ok(gradient
            .iter()
            .zip(tangent.iter())
            .map(|(g, t)| g * t)
            .sum())
    }
}

impl fmt::Debug for FiniteDifferenceOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiniteDifferenceOperator")
            .field("epsilon", &self.epsilon)
            .field("mode", &self.mode)
            .field("trace_pushforward", &self.trace_pushforward)
            .finish_non_exhaustive()
    }
}

impl Operator for FiniteDifferenceOperator {
    fn schema(&self) -> &'static OperatorSchema {
        &FINITE_DIFFERENCE_SCHEMA
    }

    fn apply(&self, node: &NodeContext, inputs: &Bindings) -> Result<Bindings, OperatorError> {
        FINITE_DIFFERENCE_SCHEMA.check_inputs(inputs)?;
        let psi = inputs.require(self.name(), PSI)?;
        tracing::trace!(node = node.id(), label = node.label(), "finite-difference apply");

        let y = self.evaluate(psi)?;
        Ok(Bindings::new().with(Y, scalar_value(y)))
    }

    fn pullback(
        &self,
        node: &NodeContext,
        cotangents: &Bindings,
        inputs: &Bindings,
    ) -> Result<Bindings, OperatorError> {
        FINITE_DIFFERENCE_SCHEMA.check_inputs(inputs)?;
        let psi = inputs.require(self.name(), PSI)?;
        let upstream = cotangents.require(self.name(), &cotangent_name(Y))?;
        tracing::trace!(node = node.id(), label = node.label(), "finite-difference pullback");

        let grad_psi = self.vjp(upstream, psi)?;
        Ok(Bindings::new().with(cotangent_name(PSI), grad_psi))
    }

    fn pushforward(
        &self,
        node: &NodeContext,
        tangents: &Bindings,
        inputs: &Bindings,
    ) -> Result<Bindings, OperatorError> {
        FINITE_DIFFERENCE_SCHEMA.check_inputs(inputs)?;
        let psi = inputs.require(self.name(), PSI)?;
        let tangent = tangents.require(self.name(), &tangent_name(PSI))?;
        tracing::trace!(node = node.id(), label = node.label(), "finite-difference pushforward");

        let y_dot = self.jvp(tangent, psi)?;
        Ok(Bindings::new().with(tangent_name(Y), scalar_value(y_dot)))
    }
}
