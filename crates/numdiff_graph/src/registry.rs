//! Operator lookup table keyed by name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::OperatorError;
use crate::operator::Operator;

/// Registry of operators addressable by name.
///
/// # Example
///
/// ```rust
/// use numdiff_graph::{DiffMode, FiniteDifferenceOperator, OperatorRegistry};
///
/// let mut registry = OperatorRegistry::new();
/// let op = FiniteDifferenceOperator::new(|x| x.sum(), 1e-3, DiffMode::Central);
/// registry.register(op).unwrap();
///
/// assert!(registry.contains("finite_difference"));
/// assert!(registry.get("missing").is_err());
/// ```
#[derive(Clone, Default)]
pub struct OperatorRegistry {
    operators: HashMap<String, Arc<dyn Operator>>,
}

impl OperatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operator under its schema name.
    ///
    /// # Errors
    ///
    /// `DuplicateOperator` if the name is taken.
    pub fn register<O: Operator + 'static>(&mut self, operator: O) -> Result<(), OperatorError> {
        let name = operator.name();
        self.register_shared(name, Arc::new(operator))
    }

    /// Registers an operator under an explicit name.
    ///
    /// Lets several configured instances of one operator type coexist.
    ///
    /// # Errors
    ///
    /// `DuplicateOperator` if the name is taken.
    pub fn register_as<O: Operator + 'static>(
        &mut self,
        name: impl Into<String>,
        operator: O,
    ) -> Result<(), OperatorError> {
        self.register_shared(name, Arc::new(operator))
    }

    /// Registers an already shared operator under an explicit name.
    ///
    /// # Errors
    ///
    /// `DuplicateOperator` if the name is taken.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        operator: Arc<dyn Operator>,
    ) -> Result<(), OperatorError> {
        let name = name.into();
        if self.operators.contains_key(&name) {
            return Err(OperatorError::DuplicateOperator(name));
        }
        tracing::debug!(
            name = %name,
            schema = operator.schema().name,
            "registered operator"
        );
        self.operators.insert(name, operator);
        Ok(())
    }

    /// Looks up an operator.
    ///
    /// # Errors
    ///
    /// `UnknownOperator` if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Operator>, OperatorError> {
        self.operators
            .get(name)
            .cloned()
            .ok_or_else(|| OperatorError::UnknownOperator(name.to_string()))
    }

    /// Removes an operator, returning it if present.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Operator>> {
        self.operators.remove(name)
    }

    /// Whether an operator is registered under `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered operators.
    #[inline]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Returns true when nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("operators", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{scalar_value, Bindings, NodeContext, OperatorSchema, ParamSpec};

    static IDENTITY: OperatorSchema = OperatorSchema {
        name: "identity",
        inputs: &[ParamSpec::any("x")],
        outputs: &[ParamSpec::any("y")],
    };

    struct Identity;

    impl Operator for Identity {
        fn schema(&self) -> &'static OperatorSchema {
            &IDENTITY
        }

        fn apply(&self, _: &NodeContext, inputs: &Bindings) -> Result<Bindings, OperatorError> {
            Ok(Bindings::new().with("y", inputs.require("identity", "x")?.clone()))
        }

        fn pullback(
            &self,
            _: &NodeContext,
            cotangents: &Bindings,
            _: &Bindings,
        ) -> Result<Bindings, OperatorError> {
            Ok(Bindings::new().with("_x", cotangents.require("identity", "_y")?.clone()))
        }

        fn pushforward(
            &self,
            _: &NodeContext,
            tangents: &Bindings,
            _: &Bindings,
        ) -> Result<Bindings, OperatorError> {
            Ok(Bindings::new().with("y_", tangents.require("identity", "x_")?.clone()))
        }
    }

    #[test]
    fn test_register_and_dispatch() {
        let mut registry = OperatorRegistry::new();
        assert!(registry.is_empty());
        registry.register(Identity).unwrap();
        assert_eq!(registry.len(), 1);

        let op = registry.get("identity").unwrap();
        let out = op
            .apply(
                &NodeContext::new(0, "id"),
                &Bindings::new().with("x", scalar_value(3.0)),
            )
            .unwrap();
        assert_eq!(out.scalar("identity", "y").unwrap(), 3.0);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = OperatorRegistry::new();
        registry.register(Identity).unwrap();
        let err = registry.register(Identity).unwrap_err();
        assert!(matches!(err, OperatorError::DuplicateOperator(ref n) if n == "identity"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_as_allows_several_instances() {
        let mut registry = OperatorRegistry::new();
        registry.register_as("id_a", Identity).unwrap();
        registry.register_as("id_b", Identity).unwrap();
        registry.register(Identity).unwrap();
        assert_eq!(registry.names(), vec!["id_a", "id_b", "identity"]);
        assert_eq!(registry.get("id_b").unwrap().name(), "identity");
    }

    #[test]
    fn test_unknown_and_unregister() {
        let mut registry = OperatorRegistry::new();
        assert!(matches!(
            registry.get("identity"),
            Err(OperatorError::UnknownOperator(_))
        ));
        registry.register(Identity).unwrap();
        assert!(registry.unregister("identity").is_some());
        assert!(!registry.contains("identity"));
        assert!(registry.unregister("identity").is_none());
    }

    #[test]
    fn test_debug_lists_names() {
        let mut registry = OperatorRegistry::new();
        registry.register(Identity).unwrap();
        assert!(format!("{:?}", registry).contains("identity"));
    }
}
