//! Declared parameter schema of an operator.

use super::bindings::Bindings;
use crate::error::OperatorError;

/// Shape constraint of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeSpec {
    /// Any shape, including zero-size and zero-dimensional arrays.
    Any,
    /// Exactly one value (shape `[]`, `[1]`, `[1, 1]`, ...).
    Scalar,
}

impl ShapeSpec {
    /// Whether an array of `shape` satisfies this constraint.
    #[inline]
    pub fn accepts(&self, shape: &[usize]) -> bool {
        match self {
            ShapeSpec::Any => true,
            ShapeSpec::Scalar => shape.iter().product::<usize>() == 1,
        }
    }
}

/// A named, shape-constrained parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamSpec {
    /// Parameter name
    pub name: &'static str,
    /// Shape constraint
    pub shape: ShapeSpec,
}

impl ParamSpec {
    /// Parameter accepting any shape.
    pub const fn any(name: &'static str) -> Self {
        Self {
            name,
            shape: ShapeSpec::Any,
        }
    }

    /// Parameter holding exactly one value.
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            shape: ShapeSpec::Scalar,
        }
    }
}

/// Static description of an operator's inputs and outputs.
///
/// # Example
///
/// ```rust
/// use numdiff_graph::operator::{OperatorSchema, ParamSpec};
///
/// static SQUARE: OperatorSchema = OperatorSchema {
///     name: "square",
///     inputs: &[ParamSpec::any("x")],
///     outputs: &[ParamSpec::any("y")],
/// };
///
/// assert!(SQUARE.input("x").is_some());
/// assert!(SQUARE.output("x").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSchema {
    /// Operator name, used as the registry key
    pub name: &'static str,
    /// Declared inputs
    pub inputs: &'static [ParamSpec],
    /// Declared outputs
    pub outputs: &'static [ParamSpec],
}

impl OperatorSchema {
    /// Looks up a declared input.
    pub fn input(&self, name: &str) -> Option<&ParamSpec> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Looks up a declared output.
    pub fn output(&self, name: &str) -> Option<&ParamSpec> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Checks that every declared input is bound with an accepted shape.
    ///
    /// # Errors
    ///
    /// - `MissingBinding` for the first absent input
    /// - `NotScalar` for a scalar input holding several values
    pub fn check_inputs(&self, inputs: &Bindings) -> Result<(), OperatorError> {
        for param in self.inputs {
            let value = inputs.require(self.name, param.name)?;
            if !param.shape.accepts(value.shape()) {
                return Err(OperatorError::NotScalar {
                    name: param.name.to_string(),
                    shape: value.shape().to_vec(),
                });
            }
        }
        Ok(())
    }
}
