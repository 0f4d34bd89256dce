//! Differencing scheme selection.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::error::FiniteDiffError;

/// Finite-difference scheme.
///
/// | Mode | Estimate | Evaluations | Order |
/// |------|----------|-------------|-------|
/// | `Forward` | `(f(x + h e_i) - f(x)) / h` | N + 1 | 1 |
/// | `Backward` | `(f(x) - f(x - h e_i)) / h` | N + 1 | 1 |
/// | `Central` | `(f(x + h e_i) - f(x - h e_i)) / 2h` | 2N | 2 |
///
/// # Examples
///
/// ```
/// use numdiff_core::types::DiffMode;
///
/// assert_eq!(DiffMode::default(), DiffMode::Central);
///
/// let mode: DiffMode = "forward".parse().unwrap();
/// assert_eq!(mode, DiffMode::Forward);
/// assert!("sideways".parse::<DiffMode>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiffMode {
    /// One-sided difference stepping up from the point.
    Forward,
    /// One-sided difference stepping down from the point.
    Backward,
    /// Symmetric difference around the point.
    #[default]
    Central,
}

/// Offsets (in units of the step) of the two evaluation points of a scheme.
///
/// The estimate at coordinate `i` is
/// `(f(x + upper h e_i) - f(x + lower h e_i)) / ((upper - lower) h)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stencil<T> {
    /// Offset of the first evaluation point
    pub upper: T,
    /// Offset of the second evaluation point
    pub lower: T,
}

impl<T: Float> Stencil<T> {
    /// Distance between the two evaluation points in units of the step.
    #[inline]
    pub fn span(&self) -> T {
        self.upper - self.lower
    }

    /// Whether one of the evaluation points is the unperturbed point.
    #[inline]
    pub fn uses_origin(&self) -> bool {
        self.upper.is_zero() || self.lower.is_zero()
    }
}

impl DiffMode {
    /// All modes, in declaration order.
    pub const ALL: [DiffMode; 3] = [DiffMode::Forward, DiffMode::Backward, DiffMode::Central];

    /// Returns the evaluation offsets for this scheme.
    #[inline]
    pub fn stencil<T: Float>(self) -> Stencil<T> {
        match self {
            DiffMode::Forward => Stencil {
                upper: T::one(),
                lower: T::zero(),
            },
            DiffMode::Backward => Stencil {
                upper: T::zero(),
                lower: -T::one(),
            },
            DiffMode::Central => Stencil {
                upper: T::one(),
                lower: -T::one(),
            },
        }
    }

    /// Truncation order of the scheme's error in the step size.
    #[inline]
    pub fn order(self) -> u32 {
        match self {
            DiffMode::Forward | DiffMode::Backward => 1,
            DiffMode::Central => 2,
        }
    }

    /// Number of function evaluations needed for a point with `n` coordinates.
    ///
    /// One-sided schemes share a single evaluation at the unperturbed point.
    pub fn evaluation_count(self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        match self {
            DiffMode::Forward | DiffMode::Backward => n + 1,
            DiffMode::Central => 2 * n,
        }
    }

    /// Lowercase name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            DiffMode::Forward => "forward",
            DiffMode::Backward => "backward",
            DiffMode::Central => "central",
        }
    }
}

impl fmt::Display for DiffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiffMode {
    type Err = FiniteDiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(DiffMode::Forward),
            "backward" => Ok(DiffMode::Backward),
            "central" => Ok(DiffMode::Central),
            _ => Err(FiniteDiffError::InvalidMode(s.to_string())),
        }
    }
}
