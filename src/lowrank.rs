//! Low-rank reconstruction
//!
//! ```text
//!   U   @   S   @  VH  =  M
//! r x k   k x k   k x c   r x c
//! ```
//!
//! Keeping only a block of columns of `U`, the matching diagonal block of `S`
//! and the matching rows of `VH` gives an approximation of `M`.
//! The best rank-`n` approximation in the least-squares sense keeps the first `n` components.

use num_traits::Float;
use crate::{Mat, Factorization, SvdError};
use crate::{Advisory, Notify};

/// Inclusive range `[start, end]` of singular components.
///
/// Index 0 is the component of the largest singular value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentRange
{
    pub start: usize,
    pub end: usize,
}

impl ComponentRange
{
    /// Resolves signed indices against `n_comps` components.
    ///
    /// Negative indices count from the end of the component range, `-1` being the last one.
    /// `end = None` means the last component.
    ///
    /// Returns the resolved range and whether a negative index was reinterpreted,
    /// or [`SvdError::Range`] if the resolved range is inverted or out of `[0, n_comps)`.
    pub fn resolve(start: isize, end: Option<isize>, n_comps: usize) -> Result<(Self, bool), SvdError>
    {
        let k = n_comps as isize;
        let mut reinterpreted = false;

        let start_r = if start < 0 {
            reinterpreted = true;
            k + start
        }
        else {
            start
        };

        let end_r = match end {
            None => k - 1,
            Some(e) if e < 0 => {
                reinterpreted = true;
                k + e
            },
            Some(e) => e,
        };

        if start_r < 0 || start_r > end_r || end_r >= k {
            return Err(SvdError::Range {start: start_r, end: end_r, n_comps});
        }

        Ok((ComponentRange {start: start_r as usize, end: end_r as usize}, reinterpreted))
    }

    /// Number of components in the range.
    pub fn len(&self) -> usize
    {
        self.end - self.start + 1
    }
}

/// Reconstructs a matrix from a range of singular components.
///
/// Returns `U[:, start..=end] · S[start..=end, start..=end] · VH[start..=end, :]`,
/// which has the same size as the factorized matrix.
/// * `start` and `end` are resolved by [`ComponentRange::resolve`] against [`Factorization::n_comps`].
/// * `notify` receives an [`Advisory::IndexReinterpreted`] notice when a negative index was resolved.
pub fn reconstruct<F, N>(fact: &Factorization<F>, start: isize, end: Option<isize>, notify: &N) -> Result<Mat<F>, SvdError>
where F: Float, N: Notify + ?Sized
{
    let (range, reinterpreted) = ComponentRange::resolve(start, end, fact.n_comps())?;
    let comps = range.start ..= range.end;

    if reinterpreted {
        let requested = match end {
            Some(e) => format!("[{}:{}]", start, e),
            None => format!("[{}:]", start),
        };
        notify.notify(
            Advisory::IndexReinterpreted,
            &format!("negative index counted from the {} non-zero components: selecting [{}:{}] from the requested {}",
                     fact.n_comps(), range.start, range.end, requested)
        );
    }

    let u = fact.u().slice(.., comps.clone());
    let s = fact.s().slice(comps.clone(), comps.clone());
    let vh = fact.vh().slice(comps, ..);

    Ok(&u * &(&s * &vh))
}

//

#[test]
fn test_resolve()
{
    assert_eq!(ComponentRange::resolve(0, None, 4), Ok((ComponentRange {start: 0, end: 3}, false)));
    assert_eq!(ComponentRange::resolve(1, Some(2), 4), Ok((ComponentRange {start: 1, end: 2}, false)));
    assert_eq!(ComponentRange::resolve(-2, None, 4), Ok((ComponentRange {start: 2, end: 3}, true)));
    assert_eq!(ComponentRange::resolve(0, Some(-1), 4), Ok((ComponentRange {start: 0, end: 3}, true)));
    assert_eq!(ComponentRange::resolve(-4, Some(-4), 4), Ok((ComponentRange {start: 0, end: 0}, true)));
    assert_eq!(ComponentRange::resolve(2, Some(2), 4).unwrap().0.len(), 1);

    assert_eq!(ComponentRange::resolve(3, Some(1), 4), Err(SvdError::Range {start: 3, end: 1, n_comps: 4}));
    assert_eq!(ComponentRange::resolve(0, Some(4), 4), Err(SvdError::Range {start: 0, end: 4, n_comps: 4}));
    assert_eq!(ComponentRange::resolve(-5, None, 4), Err(SvdError::Range {start: -1, end: 3, n_comps: 4}));
    assert_eq!(ComponentRange::resolve(0, None, 0), Err(SvdError::Range {start: 0, end: -1, n_comps: 0}));
}

#[test]
fn test_reconstruct_notice()
{
    use std::cell::Cell;
    use crate::{factorize, Silent};

    let mat = Mat::new(3, 2).set_iter(&[
        1., 2.,
        3., 4.,
        5., 7.
    ]);
    let f = factorize(&mat).unwrap();

    let count = Cell::new(0);
    let counter = |topic: Advisory, _: &str| {
        assert_eq!(topic, Advisory::IndexReinterpreted);
        count.set(count.get() + 1);
    };

    reconstruct(&f, 0, None, &counter).unwrap();
    reconstruct(&f, 0, Some(1), &counter).unwrap();
    assert_eq!(count.get(), 0);

    let last = reconstruct(&f, -1, None, &counter).unwrap();
    assert_eq!(count.get(), 1);
    assert_eq!(last, reconstruct(&f, 1, Some(1), &Silent).unwrap());
}
