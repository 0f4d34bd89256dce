//! # Operator Interface
//!
//! The contract between a graph engine and a differentiable node.
//!
//! An operator advertises a static [`OperatorSchema`] and three entry
//! points, each receiving the engine's [`NodeContext`] plus named
//! [`Bindings`]:
//!
//! | Entry point | Receives | Returns |
//! |-------------|----------|---------|
//! | `apply` | inputs (`x`) | outputs (`y`) |
//! | `pullback` | output cotangents (`_y`), inputs | input cotangents (`_x`) |
//! | `pushforward` | input tangents (`x_`), inputs | output tangents (`y_`) |
//!
//! The trait is object safe; engines hold operators as `Arc<dyn Operator>`
//! in an [`OperatorRegistry`](crate::registry::OperatorRegistry).

pub mod bindings;
pub mod schema;

pub use bindings::{cotangent_name, scalar_value, tangent_name, Bindings};
pub use schema::{OperatorSchema, ParamSpec, ShapeSpec};

use crate::error::OperatorError;

/// Handle identifying the graph node an entry point runs for.
///
/// Opaque to operators: it is passed through and only used to label
/// diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodeContext {
    id: usize,
    label: String,
}

impl NodeContext {
    /// Creates a context for node `id`.
    pub fn new(id: usize, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Node identifier assigned by the engine.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Human-readable node label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A differentiable graph node.
pub trait Operator: Send + Sync {
    /// Declared inputs and outputs.
    fn schema(&self) -> &'static OperatorSchema;

    /// Forward evaluation.
    fn apply(&self, node: &NodeContext, inputs: &Bindings) -> Result<Bindings, OperatorError>;

    /// Vector-Jacobian product: output cotangents to input cotangents.
    fn pullback(
        &self,
        node: &NodeContext,
        cotangents: &Bindings,
        inputs: &Bindings,
    ) -> Result<Bindings, OperatorError>;

    /// Jacobian-vector product: input tangents to output tangents.
    fn pushforward(
        &self,
        node: &NodeContext,
        tangents: &Bindings,
        inputs: &Bindings,
    ) -> Result<Bindings, OperatorError>;

    /// Registry key; the schema name unless overridden.
    fn name(&self) -> &'static str {
        self.schema().name
    }
}
