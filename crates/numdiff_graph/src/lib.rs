//! # numdiff_graph: Finite-Difference Operator for Autodiff Graphs
//!
//! ## Layer 2 (Graph Integration) Role
//!
//! numdiff_graph turns the Layer 1 kernel into a node an autodiff graph
//! engine can schedule:
//! - Operator contract: `Operator`, `OperatorSchema`, `NodeContext`, `Bindings` (`operator`)
//! - Name-keyed operator lookup: `OperatorRegistry` (`registry`)
//! - The finite-difference node: `FiniteDifferenceOperator` (`finite_difference`)
//! - Error types: `OperatorError` (`error`)
//!
//! The graph engine itself (scheduling, traversal, serialisation) lives
//! outside this crate.
//!
//! ## Usage Examples
//!
//! ```rust
//! use ndarray::{arr0, arr1, ArrayD};
//! use numdiff_graph::operator::{Bindings, NodeContext};
//! use numdiff_graph::{DiffMode, FiniteDifferenceOperator, OperatorRegistry};
//!
//! let mut registry = OperatorRegistry::new();
//! registry
//!     .register(FiniteDifferenceOperator::new(
//!         |x: &ArrayD<f64>| x[[0]] * x[[0]] + 3.0 * x[[1]],
//!         1e-3,
//!         DiffMode::Central,
//!     ))
//!     .unwrap();
//!
//! let op = registry.get("finite_difference").unwrap();
//! let node = NodeContext::new(0, "loss");
//! let inputs = Bindings::new().with("psi", arr1(&[1.0, 2.0]).into_dyn());
//!
//! let y = op.apply(&node, &inputs).unwrap();
//! assert_eq!(y.scalar("finite_difference", "y").unwrap(), 7.0);
//!
//! let grads = op
//!     .pullback(&node, &Bindings::new().with("_y", arr0(2.0).into_dyn()), &inputs)
//!     .unwrap();
//! let grad_psi = grads.get("_psi").unwrap();
//! assert!((grad_psi[[0]] - 4.0).abs() < 1e-4);
//! assert!((grad_psi[[1]] - 6.0).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod finite_difference;
pub mod operator;
pub mod registry;

pub use error::{FunctionError, OperatorError};
pub use finite_difference::{FiniteDifferenceOperator, FINITE_DIFFERENCE_SCHEMA};
pub use numdiff_core::config::FiniteDiffConfig;
pub use numdiff_core::types::{DiffMode, Epsilon, FiniteDiffError};
pub use operator::Operator;
pub use registry::OperatorRegistry;
