//! Step sizes for finite differencing.
//!
//! A step is either one scalar shared by every coordinate or an array with
//! exactly the point's shape. The scalar form is never materialised: the
//! kernel reads it through [`Epsilon::step_at`] for each coordinate.

use ndarray::{ArrayD, Dimension, IxDyn};
use num_traits::Float;

use super::error::FiniteDiffError;

/// Per-coordinate step size.
///
/// # Examples
///
/// ```
/// use ndarray::{arr1, ArrayD};
/// use numdiff_core::types::Epsilon;
///
/// let uniform = Epsilon::from(1e-3_f64);
/// assert_eq!(uniform.step_at(&[4]), 1e-3);
///
/// let steps: ArrayD<f64> = arr1(&[1e-3, 1e-4]).into_dyn();
/// let per_coordinate = Epsilon::from(steps);
/// assert_eq!(per_coordinate.step_at(&[1]), 1e-4);
/// assert!(per_coordinate.validate(&[3]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Epsilon<T> {
    /// Same step for every coordinate.
    Uniform(T),
    /// One step per coordinate; shape must equal the point's shape.
    PerCoordinate(ArrayD<T>),
}

impl<T: Float> Epsilon<T> {
    /// Checks the step against a point of the given shape.
    ///
    /// Shape is checked first, then every step that will actually be used
    /// must be nonzero. A uniform zero step is accepted for an empty point
    /// because no coordinate ever reads it.
    ///
    /// # Errors
    ///
    /// - `ShapeMismatch` if a per-coordinate array has a different shape
    /// - `ZeroStep` naming the first coordinate whose step is zero
    pub fn validate(&self, shape: &[usize]) -> Result<(), FiniteDiffError> {
        match self {
            Epsilon::Uniform(h) => {
                let n: usize = shape.iter().product();
                if n > 0 && h.is_zero() {
                    return Err(FiniteDiffError::ZeroStep {
                        index: vec![0; shape.len()],
                    });
                }
                Ok(())
            }
            Epsilon::PerCoordinate(steps) => {
                if steps.shape() != shape {
                    return Err(FiniteDiffError::ShapeMismatch {
                        expected: shape.to_vec(),
                        found: steps.shape().to_vec(),
                    });
                }
                match steps.indexed_iter().find(|(_, h)| h.is_zero()) {
                    Some((index, _)) => Err(FiniteDiffError::ZeroStep {
                        index: index.slice().to_vec(),
                    }),
                    None => Ok(()),
                }
            }
        }
    }

    /// Step applicable to the coordinate at `index`.
    ///
    /// # Panics
    ///
    /// Panics if a per-coordinate array does not contain `index`; call
    /// [`Epsilon::validate`] first.
    #[inline]
    pub fn step_at(&self, index: &[usize]) -> T {
        match self {
            Epsilon::Uniform(h) => *h,
            Epsilon::PerCoordinate(steps) => steps[index],
        }
    }

    /// Materialises one step per coordinate for a point of the given shape.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if a per-coordinate array has a different shape.
    pub fn to_array(&self, shape: &[usize]) -> Result<ArrayD<T>, FiniteDiffError> {
        match self {
            Epsilon::Uniform(h) => Ok(ArrayD::from_elem(IxDyn(shape), *h)),
            Epsilon::PerCoordinate(steps) if steps.shape() == shape => Ok(steps.clone()),
            Epsilon::PerCoordinate(steps) => Err(FiniteDiffError::ShapeMismatch {
                expected: shape.to_vec(),
                found: steps.shape().to_vec(),
            }),
        }
    }

    /// Returns true for the scalar form.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        matches!(self, Epsilon::Uniform(_))
    }
}

impl From<f64> for Epsilon<f64> {
    fn from(h: f64) -> Self {
        Epsilon::Uniform(h)
    }
}

impl From<f32> for Epsilon<f32> {
    fn from(h: f32) -> Self {
        Epsilon::Uniform(h)
    }
}

impl<T> From<ArrayD<T>> for Epsilon<T> {
    fn from(steps: ArrayD<T>) -> Self {
        Epsilon::PerCoordinate(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_uniform_validates_any_shape() {
        let eps = Epsilon::Uniform(1e-4_f64);
        assert!(eps.validate(&[]).is_ok());
        assert!(eps.validate(&[3]).is_ok());
        assert!(eps.validate(&[2, 5, 1]).is_ok());
    }

    #[test]
    fn test_uniform_zero_rejected() {
        let eps = Epsilon::Uniform(0.0_f64);
        assert_eq!(
            eps.validate(&[2, 2]),
            Err(FiniteDiffError::ZeroStep { index: vec![0, 0] })
        );
    }

    #[test]
    fn test_uniform_zero_on_empty_point_is_unused() {
        let eps = Epsilon::Uniform(0.0_f64);
        assert!(eps.validate(&[0]).is_ok());
        assert!(eps.validate(&[3, 0]).is_ok());
    }

    #[test]
    fn test_per_coordinate_shape_mismatch() {
        let eps = Epsilon::from(arr1(&[1e-3, 1e-3]).into_dyn());
        assert_eq!(
            eps.validate(&[3]),
            Err(FiniteDiffError::ShapeMismatch {
                expected: vec![3],
                found: vec![2],
            })
        );
    }

    #[test]
    fn test_per_coordinate_same_size_different_shape() {
        let eps = Epsilon::from(arr1(&[1e-3; 6]).into_dyn());
        assert!(matches!(
            eps.validate(&[2, 3]),
            Err(FiniteDiffError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_per_coordinate_zero_reports_multi_index() {
        let eps = Epsilon::from(arr2(&[[1e-3, 1e-3], [1e-3, 0.0]]).into_dyn());
        assert_eq!(
            eps.validate(&[2, 2]),
            Err(FiniteDiffError::ZeroStep { index: vec![1, 1] })
        );
    }

    #[test]
    fn test_step_at() {
        let eps = Epsilon::from(arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn());
        assert_eq!(eps.step_at(&[0, 1]), 2.0);
        assert_eq!(eps.step_at(&[1, 0]), 3.0);
        assert_eq!(Epsilon::Uniform(0.5_f64).step_at(&[7, 7]), 0.5);
    }

    #[test]
    fn test_to_array_broadcasts_scalar() {
        let steps = Epsilon::Uniform(0.25_f64).to_array(&[2, 3]).unwrap();
        assert_eq!(steps.shape(), &[2, 3]);
        assert!(steps.iter().all(|&h| h == 0.25));
    }

    #[test]
    fn test_to_array_rejects_mismatch() {
        let eps = Epsilon::from(arr1(&[1.0_f64]).into_dyn());
        assert!(eps.to_array(&[2]).is_err());
        assert!(eps.to_array(&[1]).is_ok());
    }

    #[test]
    fn test_is_uniform() {
        assert!(Epsilon::from(1e-3_f32).is_uniform());
        assert!(!Epsilon::from(arr1(&[1e-3_f32]).into_dyn()).is_uniform());
    }
}
