use num_traits::Float;
use crate::{Mat, Factorization, SvdError};
use crate::{Advisory, Notify};
use crate::{normalize_shift, energy_ratios};

const SWAP_ADVISORY: &str =
    "swapped singular vectors are not re-orthogonalized, \
     so a reconstruction will likely rotate, reorder and shrink/stretch what was swapped in";

/// Hides the top components of `payload` in the bottom components of `carrier`.
///
/// With `k` = [`Factorization::n_comps`] of `carrier`,
/// the carrier's last `count` components `[k - count, k)` are overwritten
/// by the payload's first `count` components `[0, count)`:
/// columns of `U`, rows of `VH` and the diagonal block of `S`.
/// The payload's singular values are taken as fractions of their own sum,
/// then [`normalize_shift`]ed into `[0, carrier's singular value just above the window]`,
/// so the hybrid spectrum stays non-increasing.
/// When the whole spectrum is swapped, the upper bound is the carrier's smallest singular value.
///
/// Returns a new [`Factorization`]; `carrier` and `payload` are untouched.
/// `count == 0` returns a copy of `carrier`.
/// * `notify` receives an [`Advisory::SwapQuality`] notice on every call that passes validation.
///
/// Fails with
/// * [`SvdError::ShapeMismatch`] if the row numbers of `U` or the column numbers of `VH` differ,
/// * [`SvdError::Range`] if `count` exceeds the component number of either side,
/// * [`SvdError::DegenerateRange`] if the payload's swapped singular values cannot be rescaled,
///   which includes `count == 1`.
pub fn swap_low_for_high<F, N>(carrier: &Factorization<F>, payload: &Factorization<F>, count: usize, notify: &N) -> Result<Factorization<F>, SvdError>
where F: Float, N: Notify + ?Sized
{
    if carrier.u().size().0 != payload.u().size().0 {
        return Err(SvdError::ShapeMismatch {
            what: "left singular vectors (U)", left: carrier.u().size(), right: payload.u().size()
        });
    }
    if carrier.vh().size().1 != payload.vh().size().1 {
        return Err(SvdError::ShapeMismatch {
            what: "right singular vectors (VH)", left: carrier.vh().size(), right: payload.vh().size()
        });
    }

    let n_comps = carrier.n_comps();
    if count > n_comps {
        return Err(SvdError::Range {
            start: n_comps as isize - count as isize, end: n_comps as isize - 1, n_comps
        });
    }
    if count > payload.n_comps() {
        return Err(SvdError::Range {
            start: 0, end: count as isize - 1, n_comps: payload.n_comps()
        });
    }

    if count == 0 {
        notify.notify(Advisory::SwapQuality, SWAP_ADVISORY);
        return Ok(carrier.clone());
    }

    let bottom = n_comps - count;
    let s_carrier = carrier.singular();
    let s_payload = payload.singular();

    // wraps to the last one if the whole spectrum is swapped
    let high = s_carrier[if bottom > 0 {bottom - 1} else {n_comps - 1}];

    let ratios = energy_ratios(&s_payload[.. count])?;
    let s_replace = normalize_shift(&ratios, high, F::zero())?;

    notify.notify(Advisory::SwapQuality, SWAP_ADVISORY);
    log::debug!("swap {} components into [{}, {}) below {}", count, bottom, n_comps,
                high.to_f64().unwrap_or(f64::NAN));

    let (mut u, mut s, mut vh) = carrier.clone().into_parts();

    s.assign_at((bottom, bottom), &Mat::new_diag(count, count, &s_replace));
    u.assign_at((0, bottom), &payload.u().slice(.., .. count));
    vh.assign_at((bottom, 0), &payload.vh().slice(.. count, ..));

    Factorization::from_parts(u, s, vh)
}

//

#[cfg(test)]
fn test_pair() -> (Factorization<f64>, Factorization<f64>)
{
    use crate::factorize;

    let carrier = Mat::new(6, 4).set_by(|r, c| ((r * 5 + c * 3) % 7) as f64 + (r == c) as u8 as f64);
    let payload = Mat::new(6, 4).set_by(|r, c| ((r + 2 * c) % 3) as f64 - (r * c) as f64 / 10.);

    (factorize(&carrier).unwrap(), factorize(&payload).unwrap())
}

#[test]
fn test_swap_zero()
{
    use crate::Silent;

    let (carrier, payload) = test_pair();

    let r = swap_low_for_high(&carrier, &payload, 0, &Silent).unwrap();
    assert_eq!(r, carrier);
}

#[test]
fn test_swap_window()
{
    use crate::Silent;

    let (carrier, payload) = test_pair();
    let carrier_copy = carrier.clone();
    let payload_copy = payload.clone();

    let r = swap_low_for_high(&carrier, &payload, 2, &Silent).unwrap();
    assert_eq!(carrier, carrier_copy);
    assert_eq!(payload, payload_copy);

    let s = r.singular();
    let s_carrier = carrier.singular();
    assert_eq!(s[.. 2], s_carrier[.. 2]);
    assert_eq!(s[2], s_carrier[1]);
    assert_eq!(s[3], 0.);
    for w in s.windows(2) {
        assert!(w[0] >= w[1]);
    }

    // diagonal block only
    assert_eq!(r.s()[(2, 3)], 0.);
    assert_eq!(r.s()[(3, 2)], 0.);

    assert_eq!(r.u().slice(.., .. 2), carrier.u().slice(.., .. 2));
    assert_eq!(r.u().slice(.., 2 ..), payload.u().slice(.., .. 2));
    assert_eq!(r.vh().slice(.. 2, ..), carrier.vh().slice(.. 2, ..));
    assert_eq!(r.vh().slice(2 .., ..), payload.vh().slice(.. 2, ..));
}

#[test]
fn test_swap_edge_counts()
{
    use crate::Silent;

    let (carrier, payload) = test_pair();
    let s_carrier = carrier.singular();

    // a single ratio has no span to normalize
    let r = swap_low_for_high(&carrier, &payload, 1, &Silent);
    assert_eq!(r.unwrap_err(), SvdError::DegenerateRange);

    let r = swap_low_for_high(&carrier, &payload, 4, &Silent).unwrap();
    let s = r.singular();
    assert_eq!(s[0], s_carrier[3]);
    assert_eq!(s[3], 0.);
    for v in &s {
        assert!(*v <= s_carrier[3]);
    }
    assert_eq!(r.u(), payload.u());
    assert_eq!(r.vh(), payload.vh());
}

#[test]
fn test_swap_advisory_after_validation()
{
    use std::cell::Cell;

    let (carrier, payload) = test_pair();

    let count = Cell::new(0);
    let counter = |topic: Advisory, _: &str| {
        assert_eq!(topic, Advisory::SwapQuality);
        count.set(count.get() + 1);
    };

    swap_low_for_high(&carrier, &payload, 5, &counter).unwrap_err();
    swap_low_for_high(&carrier, &payload, 1, &counter).unwrap_err();
    assert_eq!(count.get(), 0);

    swap_low_for_high(&carrier, &payload, 2, &counter).unwrap();
    assert_eq!(count.get(), 1);
}

#[test]
fn test_swap_errors()
{
    use crate::{factorize, Silent};

    let (carrier, payload) = test_pair();

    let r = swap_low_for_high(&carrier, &payload, 5, &Silent);
    assert_eq!(r.unwrap_err(), SvdError::Range {start: -1, end: 3, n_comps: 4});

    let narrow = factorize(&Mat::new(6, 3).set_by(|r, c| (r + c) as f64)).unwrap();
    let r = swap_low_for_high(&carrier, &narrow, 1, &Silent);
    assert_eq!(r.unwrap_err(), SvdError::ShapeMismatch {
        what: "right singular vectors (VH)", left: (4, 4), right: (3, 3)
    });

    let short = factorize(&Mat::new(5, 4).set_by(|r, c| (r + c) as f64)).unwrap();
    let r = swap_low_for_high(&carrier, &short, 1, &Silent);
    assert_eq!(r.unwrap_err(), SvdError::ShapeMismatch {
        what: "left singular vectors (U)", left: (6, 4), right: (5, 4)
    });
}
