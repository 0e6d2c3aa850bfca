/*!
Matrix singular value decomposition by one-sided Jacobi rotations

References
* [LAPACK Working Notes](https://www.netlib.org/lapack/lawns/index.html) lawn15
* J. Demmel and K. Veselic, "Jacobi's Method is More Accurate than QR,"
  UT-CS-89-88, October 1989.
*/

use num_traits::Float;
use crate::Mat;

const MAX_SWEEPS: usize = 100;

fn dot<F: Float>(x: &[F], y: &[F]) -> F
{
    x.iter().zip(y).fold(F::zero(), |sum, (u, v)| sum + *u * *v)
}

fn rotate<F: Float>(x: &mut[F], y: &mut[F], c: F, s: F)
{
    for (u, v) in x.iter_mut().zip(y.iter_mut()) {
        let tmp1 = *u * c - *v * s;
        let tmp2 = *u * s + *v * c;
        *u = tmp1;
        *v = tmp2;
    }
}

#[derive(Debug)]
struct OneSidedJacobi<F>
{
    u: Mat<F>,
    v: Mat<F>,
}

impl<F: Float> OneSidedJacobi<F>
{
    fn apply_jacobi_rot(&mut self, c1: usize, c2: usize) -> bool
    {
        let eps = F::epsilon();
        let tol_cnv1_sq = eps * eps * F::from(4).unwrap_or_else(F::one);
        let tol_cnv2_sq = eps * eps;

        let (u1, u2) = self.u.col_pair_mut(c1, c2);
        let a = dot(u1, u1);
        let b = dot(u2, u2);
        let d = dot(u1, u2);

        if (d * d <= tol_cnv1_sq * a * b) || (d * d <= tol_cnv2_sq) {
            true
        }
        else {
            let one = F::one();
            let two = one + one;

            let zeta = (b - a) / (two * d);
            let t = if zeta > F::zero() {
                one / (zeta + (one + zeta * zeta).sqrt())
            }
            else {
                -one / (-zeta + (one + zeta * zeta).sqrt())
            };
            let c = one / (one + t * t).sqrt();
            let s = c * t;

            rotate(u1, u2, c, s);

            let (v1, v2) = self.v.col_pair_mut(c1, c2);
            rotate(v1, v2, c, s);

            false
        }
    }

    fn decomp(&mut self) -> usize
    {
        let (_, n) = self.u.size();

        assert_eq!(n, self.v.size().1);

        let mut sweeps = 0;
        let mut converged_all = false;
        while !converged_all {
            if sweeps == MAX_SWEEPS {
                log::warn!("Jacobi sweeps reached {} without convergence", MAX_SWEEPS);
                break;
            }
            sweeps += 1;
            converged_all = true;

            for i in 0.. n.saturating_sub(1) {
                for j in i + 1.. n {
                    if !self.apply_jacobi_rot(i, j) {converged_all = false;}
                }
            }
        }

        sweeps
    }
}

/// Thin singular value decomposition workplace.
///
/// For a `nrows` by `ncols` matrix with `k = min(nrows, ncols)`,
/// the result consists of `nrows` by `k` left singular vectors,
/// `k` singular values sorted in non-increasing order,
/// and `k` by `ncols` transposed right singular vectors.
#[derive(Debug)]
pub(crate) struct MatSVD<F>
{
    transposed: bool,
    //
    j: OneSidedJacobi<F>,
    s: Vec<F>,
}

impl<F: Float> MatSVD<F>
{
    /// Makes a SVD workplace for factorizing a specified size matrix.
    pub(crate) fn new((nrows, ncols): (usize, usize)) -> Self
    {
        let transposed = nrows < ncols;

        let (u_nrows, u_ncols) = if !transposed {
            (nrows, ncols)
        }
        else {
            (ncols, nrows)
        };

        MatSVD {
            transposed,
            j: OneSidedJacobi {
                u: Mat::new(u_nrows, u_ncols),
                v: Mat::new(u_ncols, u_ncols).set_eye(),
            },
            s: vec![F::zero(); u_ncols],
        }
    }

    fn norm_singular(&mut self)
    {
        let tol_div0 = F::min_positive_value();
        let (_, n) = self.j.u.size();

        for i in 0.. n {
            let col = self.j.u.col_mut(i);
            let s = dot(col, col).sqrt();
            self.s[i] = s;

            if s < tol_div0 {
                continue;
            }

            for u in col.iter_mut() {
                *u = *u / s;
            }
        }
    }

    fn sort_singular(&mut self)
    {
        let mut order: Vec<usize> = (0.. self.s.len()).collect();
        order.sort_by(|&a, &b| self.s[b].partial_cmp(&self.s[a]).unwrap_or(core::cmp::Ordering::Equal));

        let u = &self.j.u;
        let v = &self.j.v;
        let sorted_u = Mat::new_like(u).set_by(|r, c| u[(r, order[c])]);
        let sorted_v = Mat::new_like(v).set_by(|r, c| v[(r, order[c])]);
        let sorted_s = order.iter().map(|&i| self.s[i]).collect();

        self.j.u = sorted_u;
        self.j.v = sorted_v;
        self.s = sorted_s;
    }

    /// Runs SVD of a specified matrix.
    pub(crate) fn decomp(&mut self, g: &Mat<F>)
    {
        if !self.transposed {
            self.j.u = g.clone();
        }
        else {
            self.j.u = g.t();
        }
        assert_eq!(self.j.u.size().1, self.j.v.size().0);

        self.j.v = Mat::new_like(&self.j.v).set_eye();

        let sweeps = self.j.decomp();
        log::debug!("SVD of {:?}: {} sweeps", g.size(), sweeps);

        self.norm_singular();
        self.sort_singular();
    }

    /// Singular values in non-increasing order.
    pub(crate) fn s(&self) -> &[F]
    {
        &self.s
    }

    /// Takes the decomposition result as `(U, singular values, VH)`.
    pub(crate) fn into_usvh(self) -> (Mat<F>, Vec<F>, Mat<F>)
    {
        if !self.transposed {
            (self.j.u, self.s, self.j.v.t())
        }
        else {
            (self.j.v, self.s, self.j.u.t())
        }
    }
}

//

#[cfg(test)]
fn test_matrix(nrows: usize, ncols: usize) -> Mat<f64>
{
    use rand::prelude::*;
    use rand_xoshiro::rand_core::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    let mut rng = Xoshiro256StarStar::seed_from_u64(0);
    Mat::new(nrows, ncols).set_by(|_, _| rng.gen())
}

#[test]
fn test_decomp()
{
    const TOL_RMSE: f64 = 1.0 / (1u64 << 32) as f64;

    for sz in [(4, 4), (6, 3), (3, 6)] {
        let mat = test_matrix(sz.0, sz.1);
        println!("mat = {}", mat);

        let mut svd = MatSVD::new(mat.size());
        svd.decomp(&mat);

        let s = svd.s().to_vec();
        let (u, _, vh) = svd.into_usvh();
        let k = sz.0.min(sz.1);
        assert_eq!(u.size(), (sz.0, k));
        assert_eq!(vh.size(), (k, sz.1));

        //

        let g = &(&u * &Mat::new_diag(k, k, &s)) * &vh;
        println!("mat reconstructed = {}", g);

        let g_err = (&g - &mat).norm_p2sq() / ((sz.0 * sz.1) as f64);
        println!("g_err = {:e}", g_err);
        assert!(g_err < TOL_RMSE);

        //

        let utu = &u.t() * &u;
        let utu_err = (&utu - &Mat::new(k, k).set_eye()).norm_p2sq() / ((k * k) as f64);
        println!("utu_err = {:e}", utu_err);
        assert!(utu_err < TOL_RMSE);

        let vvt = &vh * &vh.t();
        let vvt_err = (&vvt - &Mat::new(k, k).set_eye()).norm_p2sq() / ((k * k) as f64);
        println!("vvt_err = {:e}", vvt_err);
        assert!(vvt_err < TOL_RMSE);

        //

        for w in s.windows(2) {
            assert!(w[0] >= w[1]);
        }
        assert!(s[k - 1] >= 0.);
    }
}

#[test]
fn test_rank_deficient()
{
    // rank 1
    let mat = Mat::new(3, 3).set_by(|r, c| ((r + 1) * (c + 1)) as f64);

    let mut svd = MatSVD::new(mat.size());
    svd.decomp(&mat);

    let s = svd.s();
    assert!((s[0] - 14.).abs() < 1e-10);
    assert!(s[1].abs() < 1e-10);
    assert!(s[2].abs() < 1e-10);
}
