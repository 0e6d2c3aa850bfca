use std::sync::atomic::{AtomicUsize, Ordering};
use svdsteg::prelude::*;
use svdsteg::*;

use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

fn carrier_payload(nrows: usize, ncols: usize) -> (Mat<f64>, Mat<f64>)
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(0);

    // smooth "image" with a decaying spectrum
    let carrier = Mat::new(nrows, ncols).set_by(|r, c| {
        let x = r as f64 / nrows as f64;
        let y = c as f64 / ncols as f64;
        128. + 100. * (3. * x).sin() * (2. * y).cos() + rng.gen::<f64>()
    });

    // noise with a band of "text" at a distinguished value
    let payload = Mat::new(nrows, ncols).set_by(|r, c| {
        if (4 .. 8).contains(&r) && (3 .. ncols - 3).contains(&c) {-1.} else {rng.gen()}
    });

    (carrier, payload)
}

//

#[test]
fn test_hide_and_reveal()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (carrier, payload) = carrier_payload(24, 18);
    let f_carrier = factorize(&carrier).unwrap();
    let f_payload = factorize(&payload).unwrap();
    let count = 4;

    let hidden = swap_low_for_high(&f_carrier, &f_payload, count, &LogNotify).unwrap();

    // retained components are untouched, swapped-in energy stays below them
    let s_carrier = f_carrier.singular();
    let s_hidden = hidden.singular();
    let bottom = s_carrier.len() - count;
    assert_eq!(s_hidden[.. bottom], s_carrier[.. bottom]);
    for v in &s_hidden[bottom ..] {
        assert!(*v <= s_carrier[bottom - 1]);
        assert!(*v >= 0.);
    }

    // the mixed matrix stays close to the carrier
    let mixed = hidden.compose();
    assert_eq!(mixed.size(), carrier.size());
    let rel_err = (&mixed - &carrier).norm_p2() / carrier.norm_p2();
    println!("rel_err = {:e}", rel_err);
    assert!(rel_err < 0.1);

    // and its re-factorization is a valid one
    let f_mixed = factorize(&mixed).unwrap();
    let revealed = reconstruct(&f_mixed, -(count as isize), None, &LogNotify).unwrap();
    assert_eq!(revealed.size(), carrier.size());
    let full = reconstruct(&f_mixed, 0, None, &Silent).unwrap();
    assert!((&full - &mixed).norm_p2() < 1e-8 * mixed.norm_p2());
}

#[test]
fn test_swap_zero_is_noop()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (carrier, payload) = carrier_payload(12, 16);
    let f_carrier = factorize(&carrier).unwrap();
    let f_payload = factorize(&payload).unwrap();

    let r = swap_low_for_high(&f_carrier, &f_payload, 0, &Silent).unwrap();
    assert_eq!(r, f_carrier);
    assert_eq!(r.compose(), f_carrier.compose());
}

#[test]
fn test_advisory_once()
{
    let _ = env_logger::builder().is_test(true).try_init();

    static SEEN: AtomicUsize = AtomicUsize::new(0);
    fn count_swap(topic: Advisory, _msg: &str)
    {
        if topic == Advisory::SwapQuality {
            SEEN.fetch_add(1, Ordering::Relaxed);
        }
    }
    static NOTIFY: NotifyOnce<fn(Advisory, &str)> = NotifyOnce::new(count_swap as fn(Advisory, &str));

    let (carrier, payload) = carrier_payload(12, 12);
    let f_carrier = factorize(&carrier).unwrap();
    let f_payload = factorize(&payload).unwrap();

    // failing calls keep the notice for a swap that happens
    swap_low_for_high(&f_carrier, &f_payload, 13, &NOTIFY).unwrap_err();
    swap_low_for_high(&f_carrier, &f_payload, 1, &NOTIFY).unwrap_err();
    assert_eq!(SEEN.load(Ordering::Relaxed), 0);

    for count in [2, 3, 0, 4] {
        swap_low_for_high(&f_carrier, &f_payload, count, &NOTIFY).unwrap();
    }
    assert_eq!(SEEN.load(Ordering::Relaxed), 1);
}
