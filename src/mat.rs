//! Dense real matrix

use num_traits::Float;
use core::ops::{Range, RangeBounds, Bound};
use core::ops::{Neg, Add, Sub, Mul};
use core::ops::{Index, IndexMut};
use core::fmt;
use crate::SvdError;

/// Dense matrix of real values.
///
/// The data array is owned and stored in column-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Mat<F>
{
    nrows: usize,
    ncols: usize,
    array: Vec<F>,
}

impl<F: Float> Mat<F>
{
    fn h_index(&self, (r, c): (usize, usize)) -> usize
    {
        assert!(r < self.nrows && c < self.ncols, "index ({}, {}) out of {:?}", r, c, self.size());

        self.nrows * c + r
    }

    fn h_bound<RR, CR>(&self, rows: RR, cols: CR) -> (Range<usize>, Range<usize>)
    where RR: RangeBounds<usize>, CR: RangeBounds<usize>
    {
        let row_b = match rows.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&i) => i,
            Bound::Excluded(&i) => i + 1
        };

        let row_e = match rows.end_bound() {
            Bound::Unbounded => self.nrows,
            Bound::Included(&i) => i + 1,
            Bound::Excluded(&i) => i
        };

        let col_b = match cols.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&i) => i,
            Bound::Excluded(&i) => i + 1
        };

        let col_e = match cols.end_bound() {
            Bound::Unbounded => self.ncols,
            Bound::Included(&i) => i + 1,
            Bound::Excluded(&i) => i
        };

        assert!(row_b <= row_e && row_e <= self.nrows);
        assert!(col_b <= col_e && col_e <= self.ncols);

        (row_b .. row_e, col_b .. col_e)
    }

    /// Creates a zero matrix.
    pub fn new(nrows: usize, ncols: usize) -> Self
    {
        Mat {
            nrows,
            ncols,
            array: vec![F::zero(); nrows * ncols],
        }
    }

    /// Creates a zero matrix of the same size as `mat`.
    pub fn new_like(mat: &Mat<F>) -> Self
    {
        let (nrows, ncols) = mat.size();

        Mat::new(nrows, ncols)
    }

    /// Creates a zero column vector.
    pub fn new_vec(nrows: usize) -> Self
    {
        Mat::new(nrows, 1)
    }

    /// Creates a `nrows` by `ncols` matrix whose leading diagonal is `diag`.
    ///
    /// Entries of `diag` beyond `min(nrows, ncols)` are ignored.
    pub fn new_diag(nrows: usize, ncols: usize, diag: &[F]) -> Self
    {
        let mut mat = Mat::new(nrows, ncols);

        for (i, d) in diag.iter().take(nrows.min(ncols)).enumerate() {
            mat[(i, i)] = *d;
        }

        mat
    }

    /// Creates a matrix from an N-dimensional shape and a flat data array.
    ///
    /// Returns the matrix, or [`SvdError::Shape`] if `shape` is not 2-dimensional
    /// or does not agree with the length of `array`.
    /// * `colmaj` tells whether `array` is laid out in column-major (`true`) or row-major (`false`).
    pub fn from_shape_vec(shape: &[usize], array: Vec<F>, colmaj: bool) -> Result<Self, SvdError>
    {
        if shape.len() != 2 || shape[0].checked_mul(shape[1]) != Some(array.len()) {
            return Err(SvdError::Shape(shape.to_vec()));
        }

        let (nrows, ncols) = (shape[0], shape[1]);

        if colmaj {
            Ok(Mat {nrows, ncols, array})
        }
        else {
            Ok(Mat::new(nrows, ncols).set_by(|r, c| array[r * ncols + c]))
        }
    }

    /// Builder pattern with data by a function.
    ///
    /// * `f` takes a row and a column of the matrix and returns data of each element.
    pub fn set_by<M>(mut self, mut f: M) -> Self
    where M: FnMut(usize, usize) -> F
    {
        for c in 0.. self.ncols {
            for r in 0.. self.nrows {
                self[(r, c)] = f(r, c);
            }
        }
        self
    }

    /// Builder pattern with data by an iterator in row-major.
    ///
    /// Missing trailing data is filled with zero.
    pub fn set_iter<'b, T>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=&'b F>, F: 'b
    {
        let mut i = iter.into_iter();

        for r in 0.. self.nrows {
            for c in 0.. self.ncols {
                self[(r, c)] = i.next().copied().unwrap_or_else(F::zero);
            }
        }
        self
    }

    /// Builder pattern of an identity matrix.
    pub fn set_eye(self) -> Self
    {
        self.set_by(|r, c| if r == c {F::one()} else {F::zero()})
    }

    /// Size of the matrix.
    ///
    /// Returns a tuple of a number of rows and columns.
    pub fn size(&self) -> (usize, usize)
    {
        (self.nrows, self.ncols)
    }

    /// Data array in column-major order.
    pub fn as_slice(&self) -> &[F]
    {
        &self.array
    }

    /// Data array in row-major order.
    pub fn to_rowmaj(&self) -> Vec<F>
    {
        let mut v = Vec::with_capacity(self.array.len());

        for r in 0.. self.nrows {
            for c in 0.. self.ncols {
                v.push(self[(r, c)]);
            }
        }
        v
    }

    /// Column `c` as a slice.
    pub fn col(&self, c: usize) -> &[F]
    {
        let (_, spl) = self.array.split_at(self.nrows * c);

        &spl[.. self.nrows]
    }

    /// Column `c` as a mutable slice.
    pub fn col_mut(&mut self, c: usize) -> &mut[F]
    {
        let nrows = self.nrows;
        let (_, spl) = self.array.split_at_mut(nrows * c);

        &mut spl[.. nrows]
    }

    /// Two distinct columns as mutable slices, in the order given.
    pub fn col_pair_mut(&mut self, c1: usize, c2: usize) -> (&mut[F], &mut[F])
    {
        assert_ne!(c1, c2);

        let nrows = self.nrows;
        let (lo, hi) = (c1.min(c2), c1.max(c2));
        let (spl_lo, spl_hi) = self.array.split_at_mut(nrows * hi);
        let col_lo = &mut spl_lo[nrows * lo .. nrows * (lo + 1)];
        let col_hi = &mut spl_hi[.. nrows];

        if c1 < c2 {
            (col_lo, col_hi)
        }
        else {
            (col_hi, col_lo)
        }
    }

    /// Copies a block.
    ///
    /// Returns a new matrix of the rows and columns in the ranges.
    pub fn slice<RR, CR>(&self, rows: RR, cols: CR) -> Mat<F>
    where RR: RangeBounds<usize>, CR: RangeBounds<usize>
    {
        let (row_range, col_range) = self.h_bound(rows, cols);

        Mat::new(row_range.len(), col_range.len())
            .set_by(|r, c| self[(row_range.start + r, col_range.start + c)])
    }

    /// Overwrites a block whose top-left corner is at `(row, col)` by `rhs`.
    pub fn assign_at(&mut self, (row, col): (usize, usize), rhs: &Mat<F>)
    {
        let (r_nrows, r_ncols) = rhs.size();

        assert!(row + r_nrows <= self.nrows);
        assert!(col + r_ncols <= self.ncols);

        for c in 0.. r_ncols {
            for r in 0.. r_nrows {
                self[(row + r, col + c)] = rhs[(r, c)];
            }
        }
    }

    /// Transposed copy.
    pub fn t(&self) -> Mat<F>
    {
        Mat::new(self.ncols, self.nrows).set_by(|r, c| self[(c, r)])
    }

    /// Leading diagonal.
    pub fn diag(&self) -> Vec<F>
    {
        (0.. self.nrows.min(self.ncols)).map(|i| self[(i, i)]).collect()
    }

    /// Minimum and maximum element.
    ///
    /// Returns `None` for an empty matrix.
    pub fn min_max(&self) -> Option<(F, F)>
    {
        let first = *self.array.first()?;

        Some(self.array.iter().fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))))
    }

    /// Square of the Frobenius norm.
    pub fn norm_p2sq(&self) -> F
    {
        self.array.iter().fold(F::zero(), |sum, v| sum + *v * *v)
    }

    /// Frobenius norm.
    pub fn norm_p2(&self) -> F
    {
        self.norm_p2sq().sqrt()
    }
}

//

impl<F: Float> Index<(usize, usize)> for Mat<F>
{
    type Output = F;

    fn index(&self, index: (usize, usize)) -> &F
    {
        let i = self.h_index(index);

        &self.array[i]
    }
}

impl<F: Float> IndexMut<(usize, usize)> for Mat<F>
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut F
    {
        let i = self.h_index(index);

        &mut self.array[i]
    }
}

//

impl<F: Float + fmt::LowerExp> fmt::Display for Mat<F>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        writeln!(f, "[")?;
        for r in 0.. self.nrows {
            for c in 0.. self.ncols {
                write!(f, "  {:.3e},", self[(r, c)])?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

//

impl<F: Float> Neg for &Mat<F>
{
    type Output = Mat<F>;

    fn neg(self) -> Mat<F>
    {
        self * -F::one()
    }
}

impl<F: Float> Add for &Mat<F>
{
    type Output = Mat<F>;

    fn add(self, rhs: &Mat<F>) -> Mat<F>
    {
        assert_eq!(self.size(), rhs.size());

        Mat::new_like(self).set_by(|r, c| self[(r, c)] + rhs[(r, c)])
    }
}

impl<F: Float> Sub for &Mat<F>
{
    type Output = Mat<F>;

    fn sub(self, rhs: &Mat<F>) -> Mat<F>
    {
        assert_eq!(self.size(), rhs.size());

        Mat::new_like(self).set_by(|r, c| self[(r, c)] - rhs[(r, c)])
    }
}

impl<F: Float> Mul for &Mat<F>
{
    type Output = Mat<F>;

    fn mul(self, rhs: &Mat<F>) -> Mat<F>
    {
        let (l_nrows, l_ncols) = self.size();
        let (r_nrows, r_ncols) = rhs.size();

        assert_eq!(l_ncols, r_nrows);

        let mut mat = Mat::new(l_nrows, r_ncols);

        for c in 0.. r_ncols {
            let rhs_col = rhs.col(c);
            let mat_col = mat.col_mut(c);
            for (k, b) in rhs_col.iter().enumerate() {
                if *b == F::zero() {
                    continue;
                }
                for (m, a) in mat_col.iter_mut().zip(self.col(k)) {
                    *m = *m + *a * *b;
                }
            }
        }

        mat
    }
}

impl<F: Float> Mul<F> for &Mat<F>
{
    type Output = Mat<F>;

    fn mul(self, rhs: F) -> Mat<F>
    {
        Mat::new_like(self).set_by(|r, c| self[(r, c)] * rhs)
    }
}

//

#[test]
fn test_set()
{
    {
        let a = Mat::<f64>::new(3, 3).set_eye();
        let b = Mat::new(3, 3).set_iter(&[
            1., 0., 0.,
            0., 1., 0.,
            0., 0., 1.
        ]);
        assert_eq!(a, b);
    }
    {
        let a = Mat::<f64>::new(2, 4).set_by(|r, c| (r * 4 + c) as f64);
        let b = Mat::new(2, 4).set_iter(&[
            0., 1., 2., 3.,
            4., 5., 6., 7.
        ]);
        assert_eq!(a, b);
        assert_eq!(a.to_rowmaj(), vec![0., 1., 2., 3., 4., 5., 6., 7.]);
        assert_eq!(a.as_slice(), &[0., 4., 1., 5., 2., 6., 3., 7.]);
    }
    {
        let a = Mat::new_diag(2, 3, &[5., 6., 7.]);
        let b = Mat::new(2, 3).set_iter(&[
            5., 0., 0.,
            0., 6., 0.
        ]);
        assert_eq!(a, b);
        assert_eq!(a.diag(), vec![5., 6.]);
    }
}

#[test]
fn test_from_shape_vec()
{
    let rowmaj = Mat::from_shape_vec(&[2, 3], vec![1., 2., 3., 4., 5., 6.], false).unwrap();
    let colmaj = Mat::from_shape_vec(&[2, 3], vec![1., 4., 2., 5., 3., 6.], true).unwrap();
    assert_eq!(rowmaj, colmaj);
    assert_eq!(rowmaj[(1, 2)], 6.);

    let r = Mat::<f64>::from_shape_vec(&[2, 2, 2], vec![0.; 8], false);
    assert_eq!(r.unwrap_err(), SvdError::Shape(vec![2, 2, 2]));

    let r = Mat::<f64>::from_shape_vec(&[2, 2], vec![0.; 3], true);
    assert_eq!(r.unwrap_err(), SvdError::Shape(vec![2, 2]));

    // element count overflows
    let r = Mat::<f64>::from_shape_vec(&[usize::MAX, 2], vec![0.; 2], false);
    assert_eq!(r.unwrap_err(), SvdError::Shape(vec![usize::MAX, 2]));
}

#[test]
fn test_slice()
{
    {
        let a = Mat::<f64>::new(4, 4).set_eye();
        let a = a.slice(1 ..= 2, 1 ..= 2);
        let b = Mat::new(2, 2).set_eye();
        assert_eq!(a, b);
    }
    {
        let mut a = Mat::<f64>::new(4, 4).set_eye();
        let b = Mat::new(4, 4).set_iter(&[
            1., 0., 0., 0.,
            0., 2., 2., 0.,
            0., 2., 2., 0.,
            0., 0., 0., 1.
        ]);
        let a2 = Mat::new(2, 2).set_by(|_, _| 2.);
        a.assign_at((1, 1), &a2);
        assert_eq!(a, b);
    }
    {
        let mut a = Mat::<f64>::new(3, 3).set_by(|r, c| (r + 3 * c) as f64);
        let (c2, c0) = a.col_pair_mut(2, 0);
        assert_eq!(c2, &[6., 7., 8.]);
        assert_eq!(c0, &[0., 1., 2.]);
        c0[0] = -1.;
        assert_eq!(a[(0, 0)], -1.);
        assert_eq!(a.col(1), &[3., 4., 5.]);
    }
}

#[test]
fn test_ops()
{
    {
        let a = Mat::<f64>::new(2, 3).set_iter(&[
            1., 2., 3.,
            4., 5., 6.
        ]);
        let b = Mat::new(3, 2).set_iter(&[
            1., 4.,
            2., 5.,
            3., 6.
        ]);
        assert_eq!(a.t(), b);

        let c = Mat::new(2, 2).set_iter(&[
            14., 32.,
            32., 77.
        ]);
        assert_eq!(&a * &b, c);
        println!("{}", c);
    }
    {
        let a1 = Mat::<f64>::new(2, 2).set_eye();
        let a2 = Mat::new(2, 2).set_by(|_, _| 1.);
        let b = Mat::new(2, 2).set_iter(&[
            2., 1.,
            1., 2.
        ]);
        assert_eq!(&a1 + &a2, b);
        assert_eq!(&b - &a2, a1);
        assert_eq!(-&a1, &a1 * -1.);
        assert_eq!(b.norm_p2sq(), 10.);
        assert_eq!(b.min_max(), Some((1., 2.)));
    }
}
