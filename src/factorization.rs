use num_traits::Float;
use crate::matsvd::MatSVD;
use crate::{Mat, SvdError};

/// Singular value decomposition `U · S · VH` of a matrix.
///
/// For a `nrows` by `ncols` matrix and `k = min(nrows, ncols)`:
/// * `U` is `nrows` by `k`,
/// * `S` is `k` by `k` with non-negative, non-increasing singular values on the diagonal and zeros elsewhere,
/// * `VH` is `k` by `ncols`.
///
/// `S` is held as a full matrix so that any block of components can be sliced
/// and multiplied uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization<F>
{
    u: Mat<F>,
    s: Mat<F>,
    vh: Mat<F>,
}

impl<F: Float> Factorization<F>
{
    /// Assembles a factorization from its three matrices, e.g. loaded from array dumps.
    ///
    /// Returns the [`Factorization`], or [`SvdError::ShapeMismatch`] if `u · s · vh` is not a valid product.
    pub fn from_parts(u: Mat<F>, s: Mat<F>, vh: Mat<F>) -> Result<Self, SvdError>
    {
        if u.size().1 != s.size().0 {
            return Err(SvdError::ShapeMismatch {what: "U and S", left: u.size(), right: s.size()});
        }
        if s.size().1 != vh.size().0 {
            return Err(SvdError::ShapeMismatch {what: "S and VH", left: s.size(), right: vh.size()});
        }

        Ok(Factorization {u, s, vh})
    }

    /// Left singular vectors.
    pub fn u(&self) -> &Mat<F>
    {
        &self.u
    }

    /// Singular values as a diagonal matrix.
    pub fn s(&self) -> &Mat<F>
    {
        &self.s
    }

    /// Transposed right singular vectors.
    pub fn vh(&self) -> &Mat<F>
    {
        &self.vh
    }

    /// Takes `(U, S, VH)`.
    pub fn into_parts(self) -> (Mat<F>, Mat<F>, Mat<F>)
    {
        (self.u, self.s, self.vh)
    }

    /// Number of singular components, `min(U columns, VH rows)`.
    pub fn n_comps(&self) -> usize
    {
        self.u.size().1.min(self.vh.size().0)
    }

    /// Singular values, the diagonal of `S` up to [`Factorization::n_comps`].
    pub fn singular(&self) -> Vec<F>
    {
        let mut d = self.s.diag();
        d.truncate(self.n_comps());
        d
    }

    /// Full product `U · S · VH`.
    pub fn compose(&self) -> Mat<F>
    {
        &(&self.u * &self.s) * &self.vh
    }
}

fn check_shape<F: Float>(mat: &Mat<F>) -> Result<(), SvdError>
{
    let (nrows, ncols) = mat.size();

    if nrows == 0 || ncols == 0 {
        Err(SvdError::Shape(vec![nrows, ncols]))
    }
    else {
        Ok(())
    }
}

/// Singular value decomposition of a matrix.
///
/// Returns the [`Factorization`], or [`SvdError::Shape`] if `mat` has no elements.
pub fn factorize<F: Float>(mat: &Mat<F>) -> Result<Factorization<F>, SvdError>
{
    check_shape(mat)?;

    let mut svd = MatSVD::new(mat.size());
    svd.decomp(mat);

    let (u, s, vh) = svd.into_usvh();
    let k = s.len();

    Ok(Factorization {
        u,
        s: Mat::new_diag(k, k, &s),
        vh,
    })
}

/// Singular values only.
///
/// Returns a matrix of the same size as `mat` with the singular values on its leading diagonal,
/// or [`SvdError::Shape`] if `mat` has no elements.
pub fn singular_values<F: Float>(mat: &Mat<F>) -> Result<Mat<F>, SvdError>
{
    check_shape(mat)?;

    let mut svd = MatSVD::new(mat.size());
    svd.decomp(mat);

    let (nrows, ncols) = mat.size();
    Ok(Mat::new_diag(nrows, ncols, svd.s()))
}

//

#[test]
fn test_factorize_shapes()
{
    for (r, c) in [(5, 3), (3, 5), (4, 4), (1, 6), (6, 1)] {
        let mat = Mat::new(r, c).set_by(|i, j| ((i * 7 + j * 3) % 5) as f64 - 2.);
        let f = factorize(&mat).unwrap();
        let k = r.min(c);

        assert_eq!(f.u().size(), (r, k));
        assert_eq!(f.s().size(), (k, k));
        assert_eq!(f.vh().size(), (k, c));
        assert_eq!(f.n_comps(), k);
        assert!((&f.compose() - &mat).norm_p2() < 1e-9);
    }
}

#[test]
fn test_factorize_empty()
{
    let mat = Mat::<f64>::new(0, 3);

    assert_eq!(factorize(&mat).unwrap_err(), SvdError::Shape(vec![0, 3]));
    assert_eq!(singular_values(&mat).unwrap_err(), SvdError::Shape(vec![0, 3]));
}

#[test]
fn test_singular_values()
{
    let mat = Mat::new(2, 3).set_iter(&[
        3., 0., 0.,
        0., -4., 0.
    ]);

    let s = singular_values(&mat).unwrap();
    let expected = Mat::new(2, 3).set_iter(&[
        4., 0., 0.,
        0., 3., 0.
    ]);
    assert!((&s - &expected).norm_p2() < 1e-12);
}

#[test]
fn test_from_parts()
{
    let u = Mat::<f64>::new(3, 2);
    let s = Mat::new(2, 2);
    let vh = Mat::new(2, 4);

    let f = Factorization::from_parts(u.clone(), s.clone(), vh.clone()).unwrap();
    assert_eq!(f.n_comps(), 2);
    assert_eq!(f.compose().size(), (3, 4));

    let r = Factorization::from_parts(u.clone(), Mat::new(3, 2), vh.clone());
    assert_eq!(r.unwrap_err(), SvdError::ShapeMismatch {what: "U and S", left: (3, 2), right: (3, 2)});

    let r = Factorization::from_parts(u, s, Mat::new(3, 4));
    assert_eq!(r.unwrap_err(), SvdError::ShapeMismatch {what: "S and VH", left: (2, 2), right: (3, 4)});
}
