use num_traits::Float;
use crate::SvdError;

/// Singular values as fractions of their own sum.
///
/// Fails with [`SvdError::DegenerateRange`] if the sum is not positive.
pub fn energy_ratios<F: Float>(s: &[F]) -> Result<Vec<F>, SvdError>
{
    let sum = s.iter().fold(F::zero(), |acc, v| acc + *v);

    if !(sum > F::zero()) {
        return Err(SvdError::DegenerateRange);
    }

    Ok(s.iter().map(|v| *v / sum).collect())
}

/// Cumulative sum of [`energy_ratios`].
///
/// The last element is one for a non-degenerate spectrum.
pub fn cumulative_energy<F: Float>(s: &[F]) -> Result<Vec<F>, SvdError>
{
    let mut acc = F::zero();

    Ok(energy_ratios(s)?.into_iter()
       .map(|r| {
           acc = acc + r;
           acc
       })
       .collect())
}

//

#[test]
fn test_cumulative_energy()
{
    use float_eq::assert_float_eq;

    let r = energy_ratios(&[6., 3., 1.]).unwrap();
    assert_float_eq!(r.as_slice(), [0.6, 0.3, 0.1].as_ref(), abs_all <= 1e-12);

    let c = cumulative_energy(&[6., 3., 1.]).unwrap();
    assert_float_eq!(c.as_slice(), [0.6, 0.9, 1.0].as_ref(), abs_all <= 1e-12);

    assert_eq!(cumulative_energy(&[0., 0.]), Err(SvdError::DegenerateRange));
}
