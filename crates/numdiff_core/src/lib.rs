//! # numdiff_core: Finite-Difference Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! numdiff_core is the bottom layer of the workspace, providing:
//! - Differencing schemes and step sizes (`types`)
//! - The per-coordinate finite-difference gradient kernel (`math::finite_diff`)
//! - Operator configuration (`config`)
//! - Gradient checking helpers (`verify`)
//! - Error types: `FiniteDiffError` (`types::error`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other numdiff_* crates:
//! - num-traits: generic floating-point kernel
//! - ndarray: points and gradients of arbitrary shape
//! - thiserror: error derivation
//! - tracing: diagnostic events (no subscriber is installed here)
//! - serde: configuration loading (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use ndarray::{arr1, ArrayD};
//! use numdiff_core::math::estimate_gradient;
//! use numdiff_core::types::{DiffMode, Epsilon};
//!
//! let point = arr1(&[1.0, 2.0]).into_dyn();
//! let f = |x: &ArrayD<f64>| x[[0]] * x[[0]] + 3.0 * x[[1]];
//!
//! let grad = estimate_gradient(&point, f, &Epsilon::from(1e-3), DiffMode::Central).unwrap();
//! assert!((grad[[0]] - 2.0).abs() < 1e-4);
//! assert!((grad[[1]] - 3.0).abs() < 1e-4);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable (de)serialisation for `FiniteDiffConfig` and `DiffMode`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod math;
pub mod types;
pub mod verify;

pub use config::FiniteDiffConfig;
pub use math::{estimate_gradient, try_estimate_gradient};
pub use types::{DiffMode, Epsilon, FiniteDiffError};
