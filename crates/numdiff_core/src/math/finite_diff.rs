//! Finite-difference gradient estimation for scalar black-box functions.
//!
//! For every coordinate `i` of the point, in logical row-major order, the
//! kernel perturbs that coordinate alone (equivalent to adding `h_i e_i`
//! with `e_i` the `i`-th basis vector) and differences the function values
//! according to [`DiffMode`]:
//!
//! - forward: `(f(x + h e_i) - f(x)) / h`
//! - backward: `(f(x) - f(x - h e_i)) / h`
//! - central: `(f(x + h e_i) - f(x - h e_i)) / 2h`
//!
//! A single probe buffer is perturbed in place and restored after each
//! evaluation, so the caller's point is never touched and no basis vector
//! is allocated per coordinate.
//!
//! # Usage
//!
//! ```
//! use ndarray::arr1;
//! use numdiff_core::math::finite_diff::estimate_gradient;
//! use numdiff_core::types::{DiffMode, Epsilon};
//!
//! // f(x) = x0^2 + 3 x1
//! let point = arr1(&[1.0, 2.0]).into_dyn();
//! let f = |x: &ndarray::ArrayD<f64>| x[[0]] * x[[0]] + 3.0 * x[[1]];
//!
//! let grad = estimate_gradient(&point, f, &Epsilon::from(1e-3), DiffMode::Central).unwrap();
//! assert!((grad[[0]] - 2.0).abs() < 1e-4);
//! assert!((grad[[1]] - 3.0).abs() < 1e-4);
//! ```

use std::convert::Infallible;

use ndarray::{ArrayD, Dimension};
use num_traits::Float;

use crate::types::{DiffMode, Epsilon, FiniteDiffError};

/// Estimates the gradient of an infallible scalar function at `point`.
///
/// The result has exactly the shape of `point`. NaN or infinite function
/// values propagate into the affected entries unchanged.
///
/// # Errors
///
/// Usage errors from [`Epsilon::validate`], raised before `func` is called.
pub fn estimate_gradient<T, F>(
    point: &ArrayD<T>,
    mut func: F,
    epsilon: &Epsilon<T>,
    mode: DiffMode,
) -> Result<ArrayD<T>, FiniteDiffError>
where
    T: Float,
    F: FnMut(&ArrayD<T>) -> T,
{
    run_kernel(point, |x| Ok::<T, Infallible>(func(x)), epsilon, mode).map_err(|err| match err {
        KernelError::Usage(e) => e,
        KernelError::Function(never) => match never {},
    })
}

/// Estimates the gradient of a fallible scalar function at `point`.
///
/// The first error returned by `func` aborts the estimate and is handed
/// back to the caller as is; no partially filled gradient is returned.
/// Usage errors are checked before the first evaluation and converted into
/// the caller's error type through `From<FiniteDiffError>`.
///
/// # Examples
///
/// ```
/// use ndarray::{arr1, ArrayD};
/// use numdiff_core::math::finite_diff::try_estimate_gradient;
/// use numdiff_core::types::{DiffMode, Epsilon, FiniteDiffError};
///
/// #[derive(Debug)]
/// enum ModelError {
///     Usage(FiniteDiffError),
///     Domain,
/// }
///
/// impl From<FiniteDiffError> for ModelError {
///     fn from(err: FiniteDiffError) -> Self {
///         ModelError::Usage(err)
///     }
/// }
///
/// let log_sum = |x: &ArrayD<f64>| {
///     let s = x.sum();
///     if s > 0.0 { Ok(s.ln()) } else { Err(ModelError::Domain) }
/// };
///
/// let ok = try_estimate_gradient(&arr1(&[1.0, 1.0]).into_dyn(), log_sum, &Epsilon::from(1e-4), DiffMode::Central);
/// assert!((ok.unwrap()[[0]] - 0.5).abs() < 1e-6);
///
/// let err = try_estimate_gradient(&arr1(&[0.0, 0.0]).into_dyn(), log_sum, &Epsilon::from(1e-4), DiffMode::Central);
/// assert!(matches!(err, Err(ModelError::Domain)));
/// ```
pub fn try_estimate_gradient<T, F, E>(
    point: &ArrayD<T>,
    func: F,
    epsilon: &Epsilon<T>,
    mode: DiffMode,
) -> Result<ArrayD<T>, E>
where
    T: Float,
    F: FnMut(&ArrayD<T>) -> Result<T, E>,
    E: From<FiniteDiffError>,
{
    run_kernel(point, func, epsilon, mode).map_err(|err| match err {
        KernelError::Usage(e) => E::from(e),
        KernelError::Function(e) => e,
    })
}

/// Separates usage errors from function errors inside the kernel so the
/// infallible entry point needs no `From` bound on its error type.
enum KernelError<E> {
    Usage(FiniteDiffError),
    Function(E),
}

fn run_kernel<T, F, E>(
    point: &ArrayD<T>,
    mut func: F,
    epsilon: &Epsilon<T>,
    mode: DiffMode,
) -> Result<ArrayD<T>, KernelError<E>>
where
    T: Float,
    F: FnMut(&ArrayD<T>) -> Result<T, E>,
{
    epsilon
        .validate(point.shape())
        .map_err(KernelError::Usage)?;

    let mut gradient = ArrayD::zeros(point.raw_dim());
    if point.is_empty() {
        return Ok(gradient);
    }

    tracing::trace!(
        mode = %mode,
        coordinates = point.len(),
        uniform_step = epsilon.is_uniform(),
        "estimating finite-difference gradient"
    );

    let stencil = mode.stencil::<T>();
    let origin = if stencil.uses_origin() {
        Some(func(point).map_err(KernelError::Function)?)
    } else {
        None
    };

    let mut probe = point.to_owned();
    for (index, &x) in point.indexed_iter() {
        let coord = index.slice();
        let h = epsilon.step_at(coord);

        let upper = evaluate_offset(&mut probe, coord, x, stencil.upper, h, origin, &mut func)
            .map_err(KernelError::Function)?;
        let lower = evaluate_offset(&mut probe, coord, x, stencil.lower, h, origin, &mut func)
            .map_err(KernelError::Function)?;

        gradient[coord] = (upper - lower) / (stencil.span() * h);
    }

    Ok(gradient)
}

/// Evaluates `func` with coordinate `coord` moved by `offset * h`.
///
/// A zero offset reuses the cached value at the unperturbed point.
#[inline]
fn evaluate_offset<T, F, E>(
    probe: &mut ArrayD<T>,
    coord: &[usize],
    x: T,
    offset: T,
    h: T,
    origin: Option<T>,
    func: &mut F,
) -> Result<T, E>
where
    T: Float,
    F: FnMut(&ArrayD<T>) -> Result<T, E>,
{
    if offset.is_zero() {
        if let Some(value) = origin {
            return Ok(value);
        }
    }
    probe[coord] = x + offset * h;
    let value = func(&*probe);
    probe[coord] = x;
    value
}
