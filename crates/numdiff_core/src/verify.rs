//! Gradient checking against finite differences.
//!
//! Compares a hand-written (analytic) gradient with the kernel's estimate,
//! the usual way to validate the backward pass of a new operator.
//!
//! ```
//! use ndarray::{arr1, ArrayD};
//! use numdiff_core::types::{DiffMode, Epsilon};
//! use numdiff_core::verify::check_gradient;
//!
//! let point = arr1(&[0.3, -1.2]).into_dyn();
//! let f = |x: &ArrayD<f64>| x[[0]].sin() * x[[1]];
//! let analytic = arr1(&[0.3_f64.cos() * -1.2, 0.3_f64.sin()]).into_dyn();
//!
//! let check = check_gradient(&point, f, &analytic, &Epsilon::from(1e-5), DiffMode::Central, 1e-6).unwrap();
//! assert!(check.passed);
//! ```

use ndarray::{ArrayD, Dimension};

use crate::math::finite_diff::estimate_gradient;
use crate::types::{DiffMode, Epsilon, FiniteDiffError};

/// Relative error with an absolute fallback near zero.
pub fn relative_error(a: f64, b: f64) -> f64 {
    let max_abs = a.abs().max(b.abs());
    if max_abs < 1e-10 {
        (a - b).abs()
    } else {
        (a - b).abs() / max_abs
    }
}

/// Outcome of comparing an analytic gradient with a finite-difference one.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientCheck {
    /// Finite-difference estimate.
    pub estimate: ArrayD<f64>,
    /// Largest absolute deviation over all coordinates.
    pub max_abs_error: f64,
    /// Largest relative deviation over all coordinates.
    pub max_rel_error: f64,
    /// Multi-index with the largest relative deviation (`None` for an empty point).
    pub worst_index: Option<Vec<usize>>,
    /// Whether `max_rel_error` is within the tolerance.
    pub passed: bool,
}

/// Checks `analytic` against a finite-difference estimate of `func` at `point`.
///
/// A NaN anywhere in either gradient fails the check.
///
/// # Errors
///
/// - `ShapeMismatch` if `analytic` is not shaped like `point`
/// - any usage error of the kernel
pub fn check_gradient<F>(
    point: &ArrayD<f64>,
    func: F,
    analytic: &ArrayD<f64>,
    epsilon: &Epsilon<f64>,
    mode: DiffMode,
    tolerance: f64,
) -> Result<GradientCheck, FiniteDiffError>
where
    F: FnMut(&ArrayD<f64>) -> f64,
{
    if analytic.shape() != point.shape() {
        return Err(FiniteDiffError::ShapeMismatch {
            expected: point.shape().to_vec(),
            found: analytic.shape().to_vec(),
        });
    }

    let estimate = estimate_gradient(point, func, epsilon, mode)?;

    let mut max_abs_error = 0.0_f64;
    let mut max_rel_error = 0.0_f64;
    let mut worst_index = None;
    let mut any_nan = false;

    for (index, &fd) in estimate.indexed_iter() {
        let exact = analytic[index.slice()];
        if fd.is_nan() || exact.is_nan() {
            any_nan = true;
            continue;
        }
        max_abs_error = max_abs_error.max((fd - exact).abs());
        let rel = relative_error(fd, exact);
        if worst_index.is_none() || rel > max_rel_error {
            max_rel_error = rel;
            worst_index = Some(index.slice().to_vec());
        }
    }

    tracing::debug!(
        mode = %mode,
        max_abs_error,
        max_rel_error,
        tolerance,
        "gradient check"
    );

    Ok(GradientCheck {
        estimate,
        max_abs_error,
        max_rel_error,
        worst_index,
        passed: !any_nan && max_rel_error <= tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_relative_error() {
        assert!(relative_error(1.0, 1.0) < 1e-10);
        assert!(relative_error(1.0, 1.01) < 0.02);
        assert!(relative_error(0.0, 0.0) < 1e-10);
        // Absolute fallback near zero
        assert!((relative_error(1e-12, 0.0) - 1e-12).abs() < 1e-20);
    }

    #[test]
    fn test_correct_gradient_passes() {
        let point = arr2(&[[1.0, 2.0], [-0.5, 0.25]]).into_dyn();
        let f = |x: &ArrayD<f64>| x.iter().map(|v| v.exp()).sum::<f64>();
        let analytic = point.mapv(f64::exp);
        let check = check_gradient(
            &point,
            f,
            &analytic,
            &Epsilon::from(1e-5),
            DiffMode::Central,
            1e-8,
        )
        .unwrap();
        assert!(check.passed, "{:?}", check);
        assert!(check.max_abs_error < 1e-7);
    }

    #[test]
    fn test_wrong_gradient_fails_and_locates_coordinate() {
        let point = arr1(&[1.0, 2.0, 3.0]).into_dyn();
        let f = |x: &ArrayD<f64>| x.iter().map(|v| v * v).sum::<f64>();
        // Third entry is off by a factor of two.
        let analytic = arr1(&[2.0, 4.0, 3.0]).into_dyn();
        let check = check_gradient(
            &point,
            f,
            &analytic,
            &Epsilon::from(1e-4),
            DiffMode::Central,
            1e-6,
        )
        .unwrap();
        assert!(!check.passed);
        assert_eq!(check.worst_index, Some(vec![2]));
        assert!((check.max_abs_error - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_nan_fails() {
        let point = arr1(&[1.0]).into_dyn();
        let analytic = arr1(&[f64::NAN]).into_dyn();
        let check = check_gradient(
            &point,
            |x: &ArrayD<f64>| x[[0]],
            &analytic,
            &Epsilon::from(1e-4),
            DiffMode::Forward,
            1.0,
        )
        .unwrap();
        assert!(!check.passed);
    }

    #[test]
    fn test_analytic_shape_mismatch() {
        let point = arr1(&[1.0, 2.0]).into_dyn();
        let analytic = arr1(&[1.0]).into_dyn();
        let result = check_gradient(
            &point,
            |x: &ArrayD<f64>| x.sum(),
            &analytic,
            &Epsilon::from(1e-4),
            DiffMode::Central,
            1e-6,
        );
        assert!(matches!(result, Err(FiniteDiffError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_empty_point() {
        let point = ArrayD::<f64>::zeros(ndarray::IxDyn(&[0]));
        let check = check_gradient(
            &point,
            |_: &ArrayD<f64>| 0.0,
            &point.clone(),
            &Epsilon::from(1e-4),
            DiffMode::Central,
            1e-6,
        )
        .unwrap();
        assert!(check.passed);
        assert_eq!(check.worst_index, None);
    }
}
