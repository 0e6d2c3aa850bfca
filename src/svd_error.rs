use core::fmt::{Display, Formatter, Result};

/// Errors of factorization, reconstruction and swapping.
///
/// All of them are raised at the violated precondition and are recoverable by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SvdError
{
    /// Array is not a non-empty 2-dimensional matrix, or its shape disagrees with its data.
    Shape(Vec<usize>),
    /// Pair of matrices with incompatible sizes.
    ShapeMismatch {
        /// Which pair was compared.
        what: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Inclusive component range `[start, end]` is inverted or outside `[0, n_comps)`.
    Range {
        start: isize,
        end: isize,
        n_comps: usize,
    },
    /// Normalization over a zero-span (constant or empty) sequence.
    DegenerateRange,
}

impl Display for SvdError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result
    {
        match self {
            SvdError::Shape(shape) =>
                write!(f, "Shape: {:?} is not a non-empty 2-D matrix shape matching its data", shape),
            SvdError::ShapeMismatch {what, left, right} =>
                write!(f, "ShapeMismatch: {} sizes {:?} and {:?} don't match", what, left, right),
            SvdError::Range {start, end, n_comps} =>
                write!(f, "Range: components [{}, {}] inverted or outside [0, {})", start, end, n_comps),
            SvdError::DegenerateRange =>
                write!(f, "DegenerateRange: values span zero range"),
        }
    }
}

impl std::error::Error for SvdError {}
