//! Value types shared by the kernel and its callers.
//!
//! - `DiffMode`: differencing scheme (`types::mode`)
//! - `Epsilon`: scalar or per-coordinate step size (`types::epsilon`)
//! - `FiniteDiffError`: usage errors (`types::error`)

pub mod epsilon;
pub mod error;
pub mod mode;

pub use epsilon::Epsilon;
pub use error::FiniteDiffError;
pub use mode::{DiffMode, Stencil};
