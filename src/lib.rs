/*!
Low-rank reconstruction and singular component swapping of real matrices.

This crate provides:
* [`factorize`] - singular value decomposition `U · S · VH` of a matrix ([`Mat`]),
  by one-sided Jacobi rotations in pure Rust, generic over `num::Float`.
* [`reconstruct`] - low-rank approximation from a range of singular components.
* [`swap_low_for_high`] - hides the strongest components of a *payload* matrix
  in the weakest components of a *carrier* matrix.
* [`normalize_shift`] - min-max normalization followed by scale and shift.

Advisory notices, which are not errors, are delivered to a [`Notify`] implementation given by the caller.
`svdsteg` uses `log` crate; [`LogNotify`] forwards the notices to it.

# Examples

The best rank-1 approximation of a 2x2 matrix:

```
use float_eq::assert_float_eq;
use svdsteg::prelude::*;
use svdsteg::*;

//env_logger::init(); // Use any logger crate as `svdsteg` uses `log` crate.

let m = Mat::new(2, 2).set_iter(&[
    2., 3.,
    4., 5.
]);

let f = factorize(&m).unwrap();
let s = f.singular();

// sigma0 * sigma1 = |det m|
assert_float_eq!(s[0] * s[1], 2., abs <= 1e-10);

// the whole range gives back the original
let full = reconstruct(&f, 0, None, &LogNotify).unwrap();
assert_float_eq!(full.as_slice(), m.as_slice(), abs_all <= 1e-10);

// rank 1 leaves the second singular value as the error
let rank1 = reconstruct(&f, 0, Some(0), &LogNotify).unwrap();
assert_float_eq!((&m - &rank1).norm_p2(), s[1], abs <= 1e-10);
```

Hiding a payload:

```
use svdsteg::prelude::*;
use svdsteg::*;

static NOTIFY: NotifyOnce<LogNotify> = NotifyOnce::new(LogNotify);

let carrier = factorize(&Mat::new(8, 6).set_by(|r, c| ((r * 3 + c * 5) % 11) as f64)).unwrap();
let payload = factorize(&Mat::new(8, 6).set_by(|r, c| if r == c {1.} else {0.5})).unwrap();

let hidden = swap_low_for_high(&carrier, &payload, 2, &NOTIFY).unwrap();
let mixed = hidden.compose();

// the payload is visible again in the last components of the re-factorized matrix
let revealed = reconstruct(&factorize(&mixed).unwrap(), -2, None, &NOTIFY).unwrap();
assert_eq!(revealed.size(), (8, 6));
```
*/

mod svd_error;
mod mat;
mod matsvd;
mod factorization;
mod notify;

pub use svd_error::*;
pub use mat::*;
pub use factorization::*;
pub use notify::*;

//

mod lowrank;
mod swap;
mod normalize;
mod spectrum;

pub use lowrank::*;
pub use swap::*;
pub use normalize::*;
pub use spectrum::*;

//

/// Prelude
pub mod prelude
{
    pub use crate::{Mat, Factorization, SvdError};
    pub use crate::{Notify, NotifyOnce, LogNotify, Silent};
}
