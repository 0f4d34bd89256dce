//! Named values exchanged between the graph engine and an operator.
//!
//! Naming follows the usual adjoint convention: for a parameter `x`, the
//! cotangent is `_x` and the tangent is `x_`.

use std::collections::BTreeMap;

use ndarray::{arr0, ArrayD};

use crate::error::OperatorError;

/// Cotangent (adjoint) name of a parameter: `y` becomes `_y`.
pub fn cotangent_name(name: &str) -> String {
    format!("_{name}")
}

/// Tangent name of a parameter: `psi` becomes `psi_`.
pub fn tangent_name(name: &str) -> String {
    format!("{name}_")
}

/// Wraps a scalar as a zero-dimensional array.
#[inline]
pub fn scalar_value(value: f64) -> ArrayD<f64> {
    arr0(value).into_dyn()
}

/// Named arrays passed into and out of operator entry points.
///
/// # Example
///
/// ```rust
/// use ndarray::arr1;
/// use numdiff_graph::operator::Bindings;
///
/// let inputs = Bindings::new().with("psi", arr1(&[1.0, 2.0]).into_dyn());
/// assert_eq!(inputs.get("psi").map(|v| v.len()), Some(2));
/// assert!(inputs.require("demo", "y").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: BTreeMap<String, ArrayD<f64>>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: bind `name` to `value`.
    #[inline]
    pub fn with(mut self, name: impl Into<String>, value: ArrayD<f64>) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Binds `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: ArrayD<f64>) -> Option<ArrayD<f64>> {
        self.values.insert(name.into(), value)
    }

    /// Looks up a binding.
    pub fn get(&self, name: &str) -> Option<&ArrayD<f64>> {
        self.values.get(name)
    }

    /// Removes and returns a binding.
    pub fn remove(&mut self, name: &str) -> Option<ArrayD<f64>> {
        self.values.remove(name)
    }

    /// Looks up a binding that `operator` cannot run without.
    ///
    /// # Errors
    ///
    /// `MissingBinding` if `name` is not bound.
    pub fn require(&self, operator: &'static str, name: &str) -> Result<&ArrayD<f64>, OperatorError> {
        self.values
            .get(name)
            .ok_or_else(|| OperatorError::MissingBinding {
                operator,
                name: name.to_string(),
            })
    }

    /// Reads a binding holding exactly one value.
    ///
    /// # Errors
    ///
    /// - `MissingBinding` if `name` is not bound
    /// - `NotScalar` if the bound array has more or fewer than one element
    pub fn scalar(&self, operator: &'static str, name: &str) -> Result<f64, OperatorError> {
        let value = self.require(operator, name)?;
        match value.iter().next() {
            Some(&v) if value.len() == 1 => Ok(v),
            _ => Err(OperatorError::NotScalar {
                name: name.to_string(),
                shape: value.shape().to_vec(),
            }),
        }
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of bindings.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when nothing is bound.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ArrayD<f64>)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (S, ArrayD<f64>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Bindings {
    type Item = (String, ArrayD<f64>);
    type IntoIter = std::collections::btree_map::IntoIter<String, ArrayD<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
