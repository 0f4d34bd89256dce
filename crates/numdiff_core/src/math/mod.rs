//! Numerical kernels.
//!
//! - [`finite_diff`]: per-coordinate finite-difference gradient estimation

pub mod finite_diff;

pub use finite_diff::{estimate_gradient, try_estimate_gradient};
