//! Householder reduction of a symmetric matrix to tridiagonal form.
//!
//! This is the direct (non-iterative) phase of the solver. For each column
//! `i = 0..n-3`, a Householder reflection is built that annihilates the entries
//! below the immediate subdiagonal of that column, and the symmetric rank-2
//! update `A <- A - v*w^T - w*v^T` is applied to the trailing submatrix. Only
//! the upper triangle of the working buffer is kept live; the vacated strict
//! lower triangle stores the data needed to replay the reflections later:
//!
//! ```text
//!   (r, c), r <= c      live tridiagonal entries (upper triangle + diagonal)
//!   (i+1, i)            the scale factor 2/(v^T v) of reflection i
//!   (r, i), r >= i+2    the essential components of the reflection vector v
//! ```
//!
//! The leading components of each `v` (zeros up to index i, an implied 1 at
//! index i+1) are never stored; the reconstruction code in
//! [`crate::algorithms::accumulate`] accounts for them. After the reduction the
//! live diagonal and superdiagonal are mirrored into dedicated linear arrays so
//! the QR iteration never touches the N×N buffer again.

/// Flat row-major index into an `n`-by-`n` buffer.
#[inline(always)]
pub(crate) fn at(r: usize, c: usize, n: usize) -> usize {
    r * n + c
}

/// Reduces the symmetric matrix held in `matrix` to tridiagonal form in place,
/// packing the Householder data into the lower triangle as described in the
/// module docs, and mirrors the resulting diagonal and superdiagonal into
/// `diagonal` and `superdiagonal`.
///
/// Only the upper triangle of the input (including the diagonal) is read; the
/// matrix is assumed symmetric.
///
/// `p`, `v` and `w` are caller-owned scratch vectors of length `n`; their
/// contents on entry are irrelevant and their contents on exit are unspecified.
///
/// # Panics
///
/// Panics if the buffer lengths are inconsistent with `n`, or if `n < 2`.
pub fn householder_tridiagonalize(
    matrix: &mut [f64],
    n: usize,
    diagonal: &mut [f64],
    superdiagonal: &mut [f64],
    p: &mut [f64],
    v: &mut [f64],
    w: &mut [f64],
) {
    assert!(n >= 2, "tridiagonalization requires at least a 2x2 matrix");
    assert_eq!(matrix.len(), n * n);
    assert_eq!(diagonal.len(), n);
    assert_eq!(superdiagonal.len(), n - 1);

    for i in 0..n.saturating_sub(2) {
        let ip1 = i + 1;

        // Read the trailing part of row i as the initial reflection vector.
        // By symmetry this equals the trailing part of column i.
        let mut length = 0.0;
        for r in 0..ip1 {
            v[r] = 0.0;
        }
        for r in ip1..n {
            let vr = matrix[at(i, r, n)];
            v[r] = vr;
            length += vr * vr;
        }

        // Normalize so that v[i+1] = 1, choosing the sign of the pivot shift
        // to avoid catastrophic cancellation. A zero-length segment means the
        // column is already in tridiagonal form; the reflection degenerates to
        // the identity and v stays all-zero.
        let mut vdv = 1.0;
        length = length.sqrt();
        if length > 0.0 {
            let v1 = v[ip1];
            let sgn = if v1 >= 0.0 { 1.0 } else { -1.0 };
            let inv_denom = 1.0 / (v1 + sgn * length);
            v[ip1] = 1.0;
            for r in ip1 + 1..n {
                v[r] *= inv_denom;
                vdv += v[r] * v[r];
            }
        }

        // p = (2/v^T v) * A * v over the trailing block, reading A from the
        // upper triangle only.
        let inv_vdv = 1.0 / vdv;
        let two_inv_vdv = 2.0 * inv_vdv;
        let mut pdv = 0.0;
        for r in i..n {
            let mut sum = 0.0;
            for c in i..r {
                sum += matrix[at(c, r, n)] * v[c];
            }
            for c in r..n {
                sum += matrix[at(r, c, n)] * v[c];
            }
            p[r] = sum * two_inv_vdv;
            pdv += p[r] * v[r];
        }

        // w = p - (p^T v / v^T v) * v, so that A - v*w^T - w*v^T equals the
        // two-sided reflection H*A*H and stays exactly symmetric.
        let correction = pdv * inv_vdv;
        for r in i..n {
            w[r] = p[r] - correction * v[r];
        }

        // Apply the rank-2 update to the upper triangle of the trailing block.
        for r in i..n {
            let vr = v[r];
            let wr = w[r];
            matrix[at(r, r, n)] -= 2.0 * vr * wr;
            for c in r + 1..n {
                matrix[at(r, c, n)] -= vr * w[c] + wr * v[c];
            }
        }

        // Pack the reflection into the vacated part of column i. A stored
        // scale of exactly 0.0 marks the degenerate identity reflection, which
        // makes its replay a no-op without any special casing downstream.
        matrix[at(ip1, i, n)] = if length > 0.0 { two_inv_vdv } else { 0.0 };
        for r in ip1 + 1..n {
            matrix[at(r, i, n)] = v[r];
        }
    }

    // Mirror the 3-band into linear arrays for cache-friendly QR iterations.
    for k in 0..n - 1 {
        diagonal[k] = matrix[at(k, k, n)];
        superdiagonal[k] = matrix[at(k, k + 1, n)];
    }
    diagonal[n - 1] = matrix[at(n - 1, n - 1, n)];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tridiagonalize(matrix: &mut [f64], n: usize) -> (Vec<f64>, Vec<f64>) {
        let mut diagonal = vec![0.0; n];
        let mut superdiagonal = vec![0.0; n - 1];
        let mut p = vec![0.0; n];
        let mut v = vec![0.0; n];
        let mut w = vec![0.0; n];
        householder_tridiagonalize(
            matrix,
            n,
            &mut diagonal,
            &mut superdiagonal,
            &mut p,
            &mut v,
            &mut w,
        );
        (diagonal, superdiagonal)
    }

    #[test]
    fn test_tridiagonal_input_keeps_its_band_up_to_sign() {
        // A tridiagonal input still gets reflected (its subdiagonal entries
        // are nonzero), but each reflection only acts on a single coordinate,
        // so the band survives with at most sign changes.
        let n = 4;
        #[rustfmt::skip]
        let mut m = vec![
            2.0, -1.0, 0.0, 0.0,
            -1.0, 2.0, -1.0, 0.0,
            0.0, -1.0, 2.0, -1.0,
            0.0, 0.0, -1.0, 2.0,
        ];
        let (diagonal, superdiagonal) = tridiagonalize(&mut m, n);

        assert_eq!(diagonal, vec![2.0; 4]);
        for s in &superdiagonal {
            assert!((s.abs() - 1.0).abs() < 1e-15, "band magnitude lost: {s}");
        }
    }

    #[test]
    fn test_decoupled_leading_row_skips_the_reflection() {
        // Row 0 is already decoupled from the trailing block, so the first
        // Householder segment has zero norm: the reflection must be skipped
        // and recorded with a zero scale factor so its replay is a no-op.
        let n = 3;
        #[rustfmt::skip]
        let mut m = vec![
            5.0, 0.0, 0.0,
            0.0, 2.0, 1.0,
            0.0, 1.0, 2.0,
        ];
        let (diagonal, superdiagonal) = tridiagonalize(&mut m, n);

        assert_eq!(diagonal, vec![5.0, 2.0, 2.0]);
        assert_eq!(superdiagonal, vec![0.0, 1.0]);
        assert_eq!(m[at(1, 0, n)], 0.0);
    }

    #[test]
    fn test_trace_is_preserved() {
        // Similarity transformations preserve the trace, so the sum of the
        // tridiagonal diagonal must match the trace of the input.
        let n = 5;
        let mut m = vec![0.0; n * n];
        for r in 0..n {
            for c in 0..n {
                // Symmetric with a dominant diagonal; exact values irrelevant.
                m[at(r, c, n)] = 1.0 / ((r + c + 1) as f64) + if r == c { 3.0 } else { 0.0 };
            }
        }
        let trace: f64 = (0..n).map(|k| m[at(k, k, n)]).sum();

        let (diagonal, _) = tridiagonalize(&mut m, n);
        let tri_trace: f64 = diagonal.iter().sum();
        assert!(
            (trace - tri_trace).abs() < 1e-12 * trace.abs(),
            "trace drifted: {trace} vs {tri_trace}"
        );
    }

    #[test]
    fn test_frobenius_norm_is_preserved() {
        // Orthogonal similarity preserves the Frobenius norm. Compare the norm
        // of the symmetric input against the norm of the tridiagonal result
        // (diagonal plus both copies of the superdiagonal).
        let n = 6;
        let mut m = vec![0.0; n * n];
        for r in 0..n {
            for c in 0..n {
                let lo = r.min(c) as f64;
                let hi = r.max(c) as f64;
                m[at(r, c, n)] = (lo + 1.0) / (hi + 2.0);
            }
        }
        let norm_sq: f64 = m.iter().map(|x| x * x).sum();

        let (diagonal, superdiagonal) = tridiagonalize(&mut m, n);
        let tri_norm_sq: f64 = diagonal.iter().map(|x| x * x).sum::<f64>()
            + 2.0 * superdiagonal.iter().map(|x| x * x).sum::<f64>();
        assert!(
            (norm_sq - tri_norm_sq).abs() < 1e-12 * norm_sq,
            "Frobenius norm drifted: {norm_sq} vs {tri_norm_sq}"
        );
    }

    #[test]
    fn test_2x2_input_is_a_no_op_reduction() {
        let n = 2;
        let mut m = vec![3.0, 1.0, 1.0, 2.0];
        let (diagonal, superdiagonal) = tridiagonalize(&mut m, n);
        assert_eq!(diagonal, vec![3.0, 2.0]);
        assert_eq!(superdiagonal, vec![1.0]);
    }
}
