use float_eq::assert_float_eq;
use svdsteg::prelude::*;
use svdsteg::*;

use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

fn random_mat(rng: &mut Xoshiro256StarStar, nrows: usize, ncols: usize) -> Mat<f64>
{
    Mat::new(nrows, ncols).set_by(|_, _| rng.gen::<f64>() * 2. - 1.)
}

fn max_abs_diff(a: &Mat<f64>, b: &Mat<f64>) -> f64
{
    (a - b).as_slice().iter().fold(0., |m, v| v.abs().max(m))
}

//

#[test]
fn test_round_trip()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(0);

    for (r, c) in [(1, 1), (7, 7), (12, 5), (5, 12), (30, 17)] {
        let m = random_mat(&mut rng, r, c);
        let f = factorize(&m).unwrap();

        let k = r.min(c);
        assert_eq!(f.u().size(), (r, k));
        assert_eq!(f.s().size(), (k, k));
        assert_eq!(f.vh().size(), (k, c));

        let full = reconstruct(&f, 0, None, &Silent).unwrap();
        assert_eq!(full.size(), (r, c));
        assert!(max_abs_diff(&full, &m) < 1e-8);

        // default end is the last component
        let explicit = reconstruct(&f, 0, Some(k as isize - 1), &Silent).unwrap();
        assert_eq!(explicit, full);
    }
}

#[test]
fn test_monotonic_spectrum()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(1);
    let m = random_mat(&mut rng, 20, 9);
    let s = factorize(&m).unwrap().singular();

    assert_eq!(s.len(), 9);
    for w in s.windows(2) {
        assert!(w[0] >= w[1]);
    }
    assert!(s[8] >= 0.);

    let cum = cumulative_energy(&s).unwrap();
    assert_float_eq!(cum[8], 1., abs <= 1e-12);
}

#[test]
fn test_partial_ranges_add_up()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = Xoshiro256StarStar::seed_from_u64(2);
    let m = random_mat(&mut rng, 8, 10);
    let f = factorize(&m).unwrap();

    let head = reconstruct(&f, 0, Some(2), &Silent).unwrap();
    let tail = reconstruct(&f, 3, None, &Silent).unwrap();
    assert!(max_abs_diff(&(&head + &tail), &m) < 1e-8);

    // negative start counts from the 8 non-zero components, not the 10 columns
    let last3 = reconstruct(&f, -3, None, &Silent).unwrap();
    let same = reconstruct(&f, 5, Some(7), &Silent).unwrap();
    assert_eq!(last3, same);
}

#[test]
fn test_range_errors()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let m = Mat::new(4, 3).set_by(|r, c| (r * 3 + c) as f64);
    let f = factorize(&m).unwrap();

    assert_eq!(reconstruct(&f, 2, Some(1), &Silent).unwrap_err(),
               SvdError::Range {start: 2, end: 1, n_comps: 3});
    assert_eq!(reconstruct(&f, 0, Some(3), &Silent).unwrap_err(),
               SvdError::Range {start: 0, end: 3, n_comps: 3});
    assert_eq!(reconstruct(&f, -4, None, &Silent).unwrap_err(),
               SvdError::Range {start: -1, end: 2, n_comps: 3});
}

#[test]
fn test_best_rank1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let m = Mat::new(2, 2).set_iter(&[
        2., 3.,
        4., 5.
    ]);
    let f = factorize(&m).unwrap();
    let rank1 = reconstruct(&f, 0, Some(0), &LogNotify).unwrap();

    // independently: m' m = [[20, 26], [26, 34]] has eigenvalues 27 +- sqrt(725)
    let lambda1 = 27. + 725_f64.sqrt();
    let lambda2 = 27. - 725_f64.sqrt();
    let (v0, v1): (f64, f64) = (26., lambda1 - 20.);
    let norm = (v0 * v0 + v1 * v1).sqrt();
    let v = Mat::new(2, 1).set_iter(&[v0 / norm, v1 / norm]);

    // sigma1 u1 v1' = m v1 v1'
    let expected = &(&m * &v) * &v.t();
    println!("rank1 = {}", rank1);
    println!("expected = {}", expected);

    assert_float_eq!(rank1.as_slice(), expected.as_slice(), abs_all <= 1e-10);
    assert_ne!(rank1, m);

    let s = f.singular();
    assert_float_eq!(s[0], lambda1.sqrt(), abs <= 1e-10);
    assert_float_eq!(s[1], lambda2.sqrt(), abs <= 1e-10);

    // Eckart-Young: the residual is the dropped component
    assert_float_eq!((&m - &rank1).norm_p2(), lambda2.sqrt(), abs <= 1e-10);
}
