use num_traits::Float;
use crate::SvdError;

/// Min-max normalization followed by scale and shift.
///
/// Returns `low + (high - low) * (v - min) / (max - min)` for each `v` of `values`.
/// * `high` is the value `max(values)` is mapped to.
/// * `low` is the value `min(values)` is mapped to.
///
/// Fails with [`SvdError::DegenerateRange`] if `values` is empty or all of them are equal.
pub fn normalize_shift<F: Float>(values: &[F], high: F, low: F) -> Result<Vec<F>, SvdError>
{
    let first = *values.first().ok_or(SvdError::DegenerateRange)?;
    let (min, max) = values.iter()
                     .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    let span = max - min;
    if !(span > F::zero()) {
        return Err(SvdError::DegenerateRange);
    }

    Ok(values.iter()
       .map(|v| (*v - min) / span * (high - low) + low)
       .collect())
}

//

#[test]
fn test_normalize_shift()
{
    use float_eq::assert_float_eq;

    let r = normalize_shift(&[1., 3., 2., 5.], 10., 2.).unwrap();
    assert_float_eq!(r.as_slice(), [2., 6., 4., 10.].as_ref(), abs_all <= 1e-12);

    // reversed bounds flip the order
    let r = normalize_shift(&[0., 1.], 0., 1.).unwrap();
    assert_float_eq!(r.as_slice(), [1., 0.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_normalize_shift_degenerate()
{
    assert_eq!(normalize_shift(&[5.], 1., 0.), Err(SvdError::DegenerateRange));
    assert_eq!(normalize_shift(&[2., 2., 2.], 1., 0.), Err(SvdError::DegenerateRange));
    assert_eq!(normalize_shift::<f64>(&[], 1., 0.), Err(SvdError::DegenerateRange));
}
