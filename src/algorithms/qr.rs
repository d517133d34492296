//! Implicit-shift QR iteration on a symmetric tridiagonal matrix.
//!
//! One outer iteration of the solver consists of scanning for the trailing
//! unreduced block of the tridiagonal matrix ([`find_unreduced_block`]) and, if
//! one exists, applying a single implicit-shift QR sub-step to it
//! ([`implicit_shift_step`]). The sub-step uses the Wilkinson shift (the
//! eigenvalue of the trailing 2×2 block closest to its bottom-right entry) and
//! chases the resulting bulge down the band with a chain of Givens rotations,
//! each of which is appended to the caller's rotation log.
//!
//! When every superdiagonal entry has deflated to numerical zero, the diagonal
//! holds the eigenvalues and the recorded rotations (together with the
//! Householder reflections from the reduction phase) determine the
//! eigenvectors.

use super::GivensRotation;

/// Locates the lower-right-most unreduced block of the tridiagonal matrix.
///
/// A superdiagonal entry at position `i` is treated as numerically zero when
/// `|diag[i]| + |diag[i+1]| + |superdiag[i]|` evaluates identically to
/// `|diag[i]| + |diag[i+1]|` in floating-point arithmetic: the entry is
/// absorbed without changing the sum, so it is negligible relative to its
/// diagonal neighbors. This absorption test is scale-invariant and requires no
/// tolerance parameter.
///
/// Scanning from the bottom row upward, returns `Some((imin, imax))` where
/// `imax` is the largest index with a numerically nonzero superdiagonal entry
/// and `imin` is the lower end of the contiguous unreduced run ending there.
/// Returns `None` when every entry has deflated, i.e. the matrix is diagonal.
pub fn find_unreduced_block(diagonal: &[f64], superdiagonal: &[f64]) -> Option<(usize, usize)> {
    debug_assert_eq!(diagonal.len(), superdiagonal.len() + 1);

    let mut imin = None;
    let mut imax = None;
    for i in (0..superdiagonal.len()).rev() {
        let sum = diagonal[i].abs() + diagonal[i + 1].abs();
        // The comparison must be exact: it asks the hardware whether the
        // superdiagonal term survives the addition at this magnitude.
        #[allow(clippy::float_cmp)]
        if sum + superdiagonal[i].abs() != sum {
            if imax.is_none() {
                imax = Some(i);
            }
            imin = Some(i);
        } else if imin.is_some() {
            // The unreduced run has ended; everything above decouples.
            break;
        }
    }

    match (imin, imax) {
        (Some(lo), Some(hi)) => Some((lo, hi)),
        _ => None,
    }
}

/// Computes `(cs, sn)` solving `sn*x + cs*y = 0` with `cs^2 + sn^2 = 1`.
///
/// The larger of the two inputs is used as the divisor so the intermediate
/// ratio never overflows when the inputs are of very different magnitudes.
#[inline]
pub fn givens_sin_cos(x: f64, y: f64) -> (f64, f64) {
    if y != 0.0 {
        if y.abs() > x.abs() {
            let tau = -x / y;
            let sn = 1.0 / (1.0 + tau * tau).sqrt();
            (sn * tau, sn)
        } else {
            let tau = -y / x;
            let cs = 1.0 / (1.0 + tau * tau).sqrt();
            (cs, cs * tau)
        }
    } else {
        (1.0, 0.0)
    }
}

/// The Wilkinson shift: the eigenvalue of the symmetric 2×2 block
/// `[[a00, a01], [a01, a11]]` that is closer to `a11`.
///
/// Uses the quadratic-formula variant that adds quantities of matching sign,
/// avoiding the cancellation the textbook formula suffers when the discriminant
/// is dominated by `dif`.
#[inline]
pub fn wilkinson_shift(a00: f64, a01: f64, a11: f64) -> f64 {
    let dif = 0.5 * (a00 - a11);
    let sgn = if dif >= 0.0 { 1.0 } else { -1.0 };
    let a01_sqr = a01 * a01;
    a11 - a01_sqr / (dif + sgn * (dif * dif + a01_sqr).sqrt())
}

/// Applies one implicit-shift QR sub-step to the unreduced block
/// `[imin, imax + 1]` of the tridiagonal matrix, in place.
///
/// The sweep runs a chain of Givens rotations from the top of the block to the
/// bottom. Each rotation zeroes the off-tridiagonal fill-in introduced by its
/// predecessor while updating a 4-entry-wide moving window of the band; the
/// first and last rotations of the chain have a reduced window because their
/// neighbors fall outside the block. Every rotation is appended to `givens` in
/// the order applied.
pub fn implicit_shift_step(
    diagonal: &mut [f64],
    superdiagonal: &mut [f64],
    imin: usize,
    imax: usize,
    givens: &mut Vec<GivensRotation>,
) {
    debug_assert!(imax < superdiagonal.len());
    debug_assert!(imin <= imax);

    let shift = wilkinson_shift(
        diagonal[imax],
        superdiagonal[imax],
        diagonal[imax + 1],
    );

    // Entries that would start the explicit QR factorization of T - shift*I.
    let mut x = diagonal[imin] - shift;
    let mut y = superdiagonal[imin];

    // The transient fill-in element two positions off the diagonal.
    let mut a02 = 0.0;

    for i1 in imin..=imax {
        let i2 = i1 + 1;
        let (cs, sn) = givens_sin_cos(x, y);
        givens.push(GivensRotation::new(i1, cs, sn));

        // The rotation touches the 4x4 window centered on rows (i1, i2). The
        // entry above the window changes only once the chain has started.
        if i1 > imin {
            superdiagonal[i1 - 1] = cs * superdiagonal[i1 - 1] - sn * a02;
        }

        let a11 = diagonal[i1];
        let a12 = superdiagonal[i1];
        let a22 = diagonal[i2];
        let tmp11 = cs * a11 - sn * a12;
        let tmp12 = cs * a12 - sn * a22;
        let tmp21 = sn * a11 + cs * a12;
        let tmp22 = sn * a12 + cs * a22;
        diagonal[i1] = cs * tmp11 - sn * tmp12;
        superdiagonal[i1] = sn * tmp11 + cs * tmp12;
        diagonal[i2] = sn * tmp21 + cs * tmp22;

        if i1 < imax {
            // Rotate the entry below the window and track the bulge it spills
            // into the second superdiagonal; the next rotation will zero it.
            let a23 = superdiagonal[i2];
            a02 = -sn * a23;
            superdiagonal[i2] = cs * a23;

            x = superdiagonal[i1];
            y = a02;
        }
    }
}
